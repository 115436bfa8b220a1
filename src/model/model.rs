use std::sync::OnceLock;

use log::{debug, trace};

use crate::activation::activation::ActivationFunction;
use crate::error::{ModelError, PredictError};
use crate::features::validate::{validate, ValidatedFeatures};
use crate::layers::dense::DenseLayer;
use crate::math::matrix::Matrix;
use crate::model::file::ModelFile;

/// Binary class label produced by `Model::predict()`: 0 or 1.
pub type ClassLabel = u8;

/// Cutoff separating the two classes. Raw outputs at or above this value
/// map to class 1, below it to class 0 (ties round up, see `predict`).
pub const DECISION_THRESHOLD: f64 = 0.5;

/// An immutable feed-forward binary classifier.
///
/// Constructed once, never mutated afterwards; `predict()` borrows it
/// immutably, so a single `Model` can be shared across any number of
/// threads without synchronization.
#[derive(Debug, Clone)]
pub struct Model {
    layers: Vec<DenseLayer>,
    input_arity: usize,
    output_arity: usize,
}

impl Model {
    /// Builds a model from an ordered layer list, checking that adjacent
    /// layer shapes line up and that the last layer has a single neuron.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Model, ModelError> {
        let input_arity = layers.first().map(DenseLayer::input_size).ok_or(ModelError::EmptyModel)?;
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[1].input_size() != pair[0].output_size() {
                return Err(ModelError::LayerChainMismatch {
                    layer: i + 1,
                    expected: pair[1].input_size(),
                    got: pair[0].output_size(),
                });
            }
        }
        let output_arity = layers.last().map(DenseLayer::output_size).ok_or(ModelError::EmptyModel)?;
        if output_arity != 1 {
            return Err(ModelError::OutputArity(output_arity));
        }
        Ok(Model { layers, input_arity, output_arity })
    }

    /// The compiled-in XOR classifier: 2 inputs → 2 sigmoid hidden units
    /// → 1 sigmoid output.
    ///
    /// The hidden units sit at sigmoid saturation and compute OR and AND
    /// of the two inputs; the output fires when OR holds but AND does
    /// not, which is XOR.
    pub fn xor() -> Model {
        let hidden = DenseLayer::from_parts(
            Matrix::from_data(vec![vec![20.0, 20.0], vec![20.0, 20.0]]),
            Matrix::from_data(vec![vec![-10.0, -30.0]]),
            ActivationFunction::Sigmoid,
        );
        let output = DenseLayer::from_parts(
            Matrix::from_data(vec![vec![20.0], vec![-20.0]]),
            Matrix::from_data(vec![vec![-10.0]]),
            ActivationFunction::Sigmoid,
        );
        Model {
            layers: vec![hidden, output],
            input_arity: 2,
            output_arity: 1,
        }
    }

    /// Deserializes an externally-supplied model from a JSON file written
    /// in the `ModelFile` schema. Load only; this crate never writes
    /// model files.
    pub fn load_json(path: &str) -> Result<Model, ModelError> {
        ModelFile::load_json(path)?.into_model()
    }

    pub fn input_arity(&self) -> usize {
        self.input_arity
    }

    pub fn output_arity(&self) -> usize {
        self.output_arity
    }

    /// The single public entry point: validates `features` against this
    /// model's input arity, runs the forward pass, and thresholds the
    /// output scalar into a class label.
    pub fn predict(&self, features: &[f64]) -> Result<ClassLabel, PredictError> {
        let validated = validate(features, self.input_arity)?;
        self.predict_validated(&validated)
    }

    /// Thresholds the raw output of an already-validated feature vector.
    /// An output exactly at `DECISION_THRESHOLD` resolves to class 1.
    pub fn predict_validated(
        &self,
        features: &ValidatedFeatures<'_>,
    ) -> Result<ClassLabel, PredictError> {
        let y = self.raw_output(features)?;
        let label = if y >= DECISION_THRESHOLD { 1 } else { 0 };
        debug!("raw output {y:.6} -> class {label}");
        Ok(label)
    }

    /// The pre-threshold output scalar.
    ///
    /// Re-checks arity against this model's declared input size even for
    /// validated features, since the features may have been validated
    /// against a different model.
    pub fn raw_output(&self, features: &ValidatedFeatures<'_>) -> Result<f64, PredictError> {
        if features.arity() != self.input_arity {
            return Err(PredictError::ArityMismatch {
                expected: self.input_arity,
                got: features.arity(),
            });
        }
        let mut current = features.as_slice().to_vec();
        for (i, layer) in self.layers.iter().enumerate() {
            current = layer.forward(&current);
            trace!("layer {i}: {current:?}");
        }
        // Output arity 1 is enforced at construction.
        Ok(current[0])
    }
}

static XOR_MODEL: OnceLock<Model> = OnceLock::new();

/// Process-wide read-only XOR model, built on first use.
pub fn xor_model() -> &'static Model {
    XOR_MODEL.get_or_init(Model::xor)
}
