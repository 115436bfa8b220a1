use serde::Deserialize;

use crate::activation::activation::ActivationFunction;
use crate::error::ModelError;
use crate::layers::dense::DenseLayer;
use crate::math::matrix::Matrix;
use crate::model::model::Model;

/// On-disk JSON schema for an externally-supplied model.
///
/// ```json
/// {
///   "layers": [
///     { "weights": [[20.0, 20.0], [20.0, 20.0]],
///       "biases": [-10.0, -30.0],
///       "activation": "Sigmoid" }
///   ]
/// }
/// ```
///
/// `weights[i][j]` connects input `i` to neuron `j`. Where the weights
/// come from (a trainer, a hand edit) is up to whoever writes the file;
/// this crate only reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFile {
    pub layers: Vec<LayerFile>,
}

/// One layer entry in a `ModelFile`.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerFile {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: ActivationFunction,
}

impl ModelFile {
    /// Deserializes a `ModelFile` from a JSON file.
    pub fn load_json(path: &str) -> Result<ModelFile, ModelError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Converts the raw schema into a checked `Model`, running the same
    /// shape and finiteness validation as direct construction.
    pub fn into_model(self) -> Result<Model, ModelError> {
        let mut layers = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.into_iter().enumerate() {
            if layer.weights.is_empty() || layer.weights[0].is_empty() {
                return Err(ModelError::EmptyLayer { layer: i });
            }
            let cols = layer.weights[0].len();
            if layer.weights.iter().any(|row| row.len() != cols) {
                return Err(ModelError::RaggedWeights { layer: i });
            }
            layers.push(DenseLayer::new(
                Matrix::from_data(layer.weights),
                Matrix::from_data(vec![layer.biases]),
                layer.activation,
            )?);
        }
        Model::new(layers)
    }
}
