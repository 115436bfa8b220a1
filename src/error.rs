use thiserror::Error;

/// Per-call failures surfaced by `validate()` and `Model::predict()`.
///
/// Both conditions are permanent for the given input: the core never
/// retries, clamps, or coerces, it reports and lets the caller decide.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("expected {expected} features, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("feature {index} is not finite ({value})")]
    NonFiniteInput { index: usize, value: f64 },
}

/// Failures raised while building or loading a `Model`. Once a `Model`
/// exists, none of these can occur during inference.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model has no layers")]
    EmptyModel,
    #[error("layer {layer} has no weights")]
    EmptyLayer { layer: usize },
    #[error("layer {layer} has ragged weight rows")]
    RaggedWeights { layer: usize },
    #[error("weights are {rows}x{cols} but biases have {biases} entries")]
    ShapeMismatch { rows: usize, cols: usize, biases: usize },
    #[error("layer {layer} expects {expected} inputs but the previous layer outputs {got}")]
    LayerChainMismatch { layer: usize, expected: usize, got: usize },
    #[error("expected a single output neuron, got {0}")]
    OutputArity(usize),
    #[error("precision matrix is {rows}x{cols}, expected {expected}x{expected}")]
    PrecisionShape { rows: usize, cols: usize, expected: usize },
    #[error("non-finite value in weights or biases")]
    NonFiniteParameter,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
