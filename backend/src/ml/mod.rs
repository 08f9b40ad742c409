//! Model artifacts and inference
//!
//! The trained classifiers are serialized JSON bundles: a majority-vote
//! ensemble of depth-limited decision trees paired with label encoders
//! for categorical features and targets. Bundles are produced offline by
//! the `train_rotation` binary and loaded once at startup.

pub mod encoder;
pub mod registry;
pub mod tree;

pub use encoder::LabelEncoder;
pub use registry::{CropArtifacts, ModelRegistry, RotationArtifacts, SoilArtifacts};
pub use tree::{DecisionTree, Ensemble, TreeParams};
