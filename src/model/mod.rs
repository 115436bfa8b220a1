pub mod file;
pub mod model;

pub use file::ModelFile;
pub use model::{xor_model, ClassLabel, Model, DECISION_THRESHOLD};
