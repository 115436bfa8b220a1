pub mod math;
pub mod activation;
pub mod layers;
pub mod features;
pub mod model;
pub mod envelope;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::DenseLayer;
pub use features::validate::{validate, ValidatedFeatures};
pub use model::model::{xor_model, ClassLabel, Model, DECISION_THRESHOLD};
pub use envelope::elliptic::{EllipticEnvelope, EnvelopeLabel};
pub use error::{ModelError, PredictError};
