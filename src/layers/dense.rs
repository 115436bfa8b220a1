use crate::{activation::activation::ActivationFunction, error::ModelError, math::matrix::Matrix};

/// One fully-connected layer with fixed parameters.
///
/// Weights are stored input-major: `weights.data[i][j]` connects input `i`
/// to neuron `j`, matching the row-vector convention in `forward()`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Matrix,
    biases: Matrix,
    activator: ActivationFunction,
}

impl DenseLayer {
    /// Builds a layer after checking its parameter shapes and values.
    /// Biases must be a 1×n row where n is the weight matrix's width, and
    /// every parameter must be finite.
    pub fn new(
        weights: Matrix,
        biases: Matrix,
        activator: ActivationFunction,
    ) -> Result<DenseLayer, ModelError> {
        if biases.rows != 1 || biases.cols != weights.cols {
            return Err(ModelError::ShapeMismatch {
                rows: weights.rows,
                cols: weights.cols,
                biases: biases.rows * biases.cols,
            });
        }
        if !weights.all_finite() || !biases.all_finite() {
            return Err(ModelError::NonFiniteParameter);
        }
        Ok(DenseLayer { weights, biases, activator })
    }

    /// Unchecked constructor for compiled-in weights whose shapes are
    /// pinned at the call site.
    pub(crate) fn from_parts(
        weights: Matrix,
        biases: Matrix,
        activator: ActivationFunction,
    ) -> DenseLayer {
        DenseLayer { weights, biases, activator }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn output_size(&self) -> usize {
        self.weights.cols
    }

    /// z = x·W + b, then the element-wise activation. Pure: borrows the
    /// layer immutably, so one layer can serve many concurrent callers.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let z = Matrix::from_data(vec![input.to_vec()]) * self.weights.clone() + self.biases.clone();
        let a = z.map(|x| self.activator.function(x));
        a.data[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_applies_weights_biases_and_activation() {
        let layer = DenseLayer::new(
            Matrix::from_data(vec![vec![1.0], vec![1.0]]),
            Matrix::from_data(vec![vec![-1.5]]),
            ActivationFunction::ReLU,
        )
        .unwrap();
        // 1 + 1 - 1.5 = 0.5 stays, 0 + 0 - 1.5 clamps to 0
        assert_eq!(layer.forward(&[1.0, 1.0]), vec![0.5]);
        assert_eq!(layer.forward(&[0.0, 0.0]), vec![0.0]);
    }

    #[test]
    fn new_rejects_bias_width_mismatch() {
        let res = DenseLayer::new(
            Matrix::from_data(vec![vec![1.0, 2.0]]),
            Matrix::from_data(vec![vec![0.0]]),
            ActivationFunction::Identity,
        );
        assert!(matches!(res, Err(ModelError::ShapeMismatch { .. })));
    }

    #[test]
    fn new_rejects_non_finite_parameters() {
        let res = DenseLayer::new(
            Matrix::from_data(vec![vec![f64::NAN]]),
            Matrix::from_data(vec![vec![0.0]]),
            ActivationFunction::Identity,
        );
        assert!(matches!(res, Err(ModelError::NonFiniteParameter)));
    }
}
