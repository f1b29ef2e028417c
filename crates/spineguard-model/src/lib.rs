//! # spineguard-model
//!
//! The concrete classifier artifact for the SpineGuard posture monitor:
//!
//! - [`ModelArtifact`] -- JSON schema produced by the offline trainer,
//!   with fail-fast validation against the pipeline's canonical feature
//!   order
//! - [`CentroidClassifier`] -- nearest-centroid implementation of the
//!   [`Classifier`](spineguard_core::Classifier) port
//!
//! Training the artifact is an external batch job; nothing in the
//! monitoring runtime depends on how the centroids were produced.

pub mod artifact;
pub mod centroid;

pub use artifact::{ClassCentroid, ModelArtifact, SCHEMA_VERSION};
pub use centroid::CentroidClassifier;
