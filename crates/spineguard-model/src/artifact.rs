//! Classifier artifact schema and fail-fast validation.
//!
//! The offline trainer produces a JSON artifact carrying the feature-name
//! order it was trained on and one centroid per posture class. The loader
//! refuses anything that does not line up exactly with the pipeline's
//! canonical feature order, so a session can never start with a model
//! that would be invoked on a reordered vector.

use std::path::Path;

use serde::{Deserialize, Serialize};

use spineguard_core::{ModelError, PostureLabel, FEATURE_NAMES};

/// Artifact schema version this loader understands.
pub const SCHEMA_VERSION: u32 = 1;

/// One trained posture class: its label and feature-space centroid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCentroid {
    /// Posture label text (`"good"` or `"bad"`, case-insensitive).
    pub label: String,
    /// Mean feature vector of the class's training samples, in canonical
    /// field order.
    pub centroid: Vec<f64>,
}

/// On-disk classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Schema version; must equal [`SCHEMA_VERSION`].
    pub schema_version: u32,
    /// Feature-name order the model was trained on.
    pub feature_names: Vec<String>,
    /// Trained classes, at least one.
    pub classes: Vec<ClassCentroid>,
}

impl ModelArtifact {
    /// Read and validate an artifact from a JSON file.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unavailable`] if the file cannot be read,
    /// [`ModelError::InvalidArtifact`] if it is not valid JSON, plus
    /// everything [`validate`](Self::validate) rejects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ModelError::Unavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let artifact: Self =
            serde_json::from_str(&text).map_err(|e| ModelError::InvalidArtifact {
                detail: format!("malformed JSON: {e}"),
            })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check the artifact against the pipeline's expectations.
    ///
    /// # Errors
    ///
    /// [`ModelError::SchemaMismatch`] for a wrong schema version or
    /// feature order, [`ModelError::UnknownLabel`] for an unparseable
    /// class label, and [`ModelError::InvalidArtifact`] for an empty
    /// class list or a centroid with the wrong dimension or non-finite
    /// values.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ModelError::SchemaMismatch {
                detail: format!(
                    "schema version {} (supported: {SCHEMA_VERSION})",
                    self.schema_version
                ),
            });
        }
        if !self
            .feature_names
            .iter()
            .map(String::as_str)
            .eq(FEATURE_NAMES)
        {
            return Err(ModelError::SchemaMismatch {
                detail: format!(
                    "feature order {:?} does not match expected {:?}",
                    self.feature_names, FEATURE_NAMES
                ),
            });
        }
        if self.classes.is_empty() {
            return Err(ModelError::InvalidArtifact {
                detail: "artifact declares no classes".to_string(),
            });
        }
        for class in &self.classes {
            if PostureLabel::parse(&class.label).is_none() {
                return Err(ModelError::UnknownLabel {
                    label: class.label.clone(),
                });
            }
            if class.centroid.len() != FEATURE_NAMES.len() {
                return Err(ModelError::InvalidArtifact {
                    detail: format!(
                        "class '{}' centroid has {} values, expected {}",
                        class.label,
                        class.centroid.len(),
                        FEATURE_NAMES.len()
                    ),
                });
            }
            if class.centroid.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::InvalidArtifact {
                    detail: format!("class '{}' centroid contains a non-finite value", class.label),
                });
            }
        }
        Ok(())
    }
}
