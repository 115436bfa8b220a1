pub mod validate;

pub use validate::{validate, ValidatedFeatures};
