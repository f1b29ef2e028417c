//! Nearest-centroid posture classifier.
//!
//! Classifies an averaged feature vector by retrieving the class whose
//! stored centroid is nearest in Euclidean distance. The confidence is a
//! distance ratio against the runner-up class: 0.5 when the vector is
//! equidistant from both, approaching 1.0 as it converges on a centroid.

use std::path::Path;

use tracing::info;

use spineguard_core::{Classifier, FeatureVector, ModelError, PostureLabel, Prediction};

use crate::artifact::ModelArtifact;

/// Trained nearest-centroid classifier behind the `Classifier` port.
pub struct CentroidClassifier {
    classes: Vec<(PostureLabel, [f64; 9])>,
}

impl CentroidClassifier {
    /// Load and validate an artifact, then build the classifier.
    ///
    /// # Errors
    ///
    /// Everything [`ModelArtifact::load`] rejects; all load-time errors
    /// are fatal and the session must refuse to start.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let classifier = Self::from_artifact(&ModelArtifact::load(path)?)?;
        info!(
            path = %path.display(),
            classes = classifier.classes.len(),
            "loaded classifier artifact"
        );
        Ok(classifier)
    }

    /// Build the classifier from an already-parsed artifact.
    ///
    /// # Errors
    ///
    /// Everything [`ModelArtifact::validate`] rejects.
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ModelError> {
        artifact.validate()?;
        let classes = artifact
            .classes
            .iter()
            .map(|class| {
                let label =
                    PostureLabel::parse(&class.label).ok_or_else(|| ModelError::UnknownLabel {
                        label: class.label.clone(),
                    })?;
                let mut centroid = [0.0; 9];
                centroid.copy_from_slice(&class.centroid);
                Ok((label, centroid))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;
        Ok(Self { classes })
    }

    /// Number of trained classes.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }
}

impl Classifier for CentroidClassifier {
    /// Predict by nearest centroid; an exact distance tie goes to the
    /// class declared first in the artifact.
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let query = features.as_array();
        if query.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::PredictionFailed {
                reason: "feature vector contains a non-finite value".to_string(),
            });
        }

        let mut best: Option<(PostureLabel, f64)> = None;
        let mut runner_up = f64::INFINITY;
        for (label, centroid) in &self.classes {
            let dist = euclidean(&query, centroid);
            match best {
                None => best = Some((*label, dist)),
                Some((_, best_dist)) if dist < best_dist => {
                    runner_up = best_dist;
                    best = Some((*label, dist));
                }
                Some(_) => runner_up = runner_up.min(dist),
            }
        }

        let (label, best_dist) = best.ok_or_else(|| ModelError::PredictionFailed {
            reason: "classifier holds no classes".to_string(),
        })?;

        // Single-class artifacts have no runner-up to compare against.
        let confidence = if runner_up.is_finite() {
            let denom = best_dist + runner_up;
            if denom > 0.0 {
                Some(runner_up / denom)
            } else {
                Some(0.5)
            }
        } else {
            None
        };

        Ok(Prediction { label, confidence })
    }
}

fn euclidean(a: &[f64; 9], b: &[f64; 9]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
