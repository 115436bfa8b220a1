use log::debug;

use crate::error::{ModelError, PredictError};
use crate::features::validate::{validate, ValidatedFeatures};
use crate::math::matrix::Matrix;

/// Outcome of an envelope decision: inside the ellipse or not.
///
/// Discriminants follow the scikit-learn convention (1 inlier, -1
/// outlier) so callers comparing against exported models line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeLabel {
    Outlier = -1,
    Inlier = 1,
}

impl EnvelopeLabel {
    pub fn as_i8(self) -> i8 {
        self as i8
    }
}

/// An elliptic-envelope outlier detector: fixed means, a precision
/// matrix (the inverted covariance matrix), and a decision boundary.
///
/// Like `Model`, it is immutable after construction and `predict()`
/// borrows it immutably, so one envelope can serve many threads.
#[derive(Debug, Clone)]
pub struct EllipticEnvelope {
    means: Vec<f64>,
    precision: Matrix,
    decision_boundary: f64,
}

impl EllipticEnvelope {
    /// Builds an envelope after checking that the precision matrix is
    /// square with one row per mean and that every parameter is finite.
    pub fn new(
        means: Vec<f64>,
        precision: Matrix,
        decision_boundary: f64,
    ) -> Result<EllipticEnvelope, ModelError> {
        if means.is_empty() {
            return Err(ModelError::EmptyModel);
        }
        if precision.rows != precision.cols || precision.rows != means.len() {
            return Err(ModelError::PrecisionShape {
                rows: precision.rows,
                cols: precision.cols,
                expected: means.len(),
            });
        }
        if !precision.all_finite()
            || !decision_boundary.is_finite()
            || means.iter().any(|m| !m.is_finite())
        {
            return Err(ModelError::NonFiniteParameter);
        }
        Ok(EllipticEnvelope { means, precision, decision_boundary })
    }

    pub fn input_arity(&self) -> usize {
        self.means.len()
    }

    pub fn decision_boundary(&self) -> f64 {
        self.decision_boundary
    }

    /// Validates `features` against this envelope's arity and decides
    /// inlier versus outlier: a point is an inlier when
    /// `-distance - decision_boundary > 0`. A point exactly on the
    /// boundary is an outlier.
    pub fn predict(&self, features: &[f64]) -> Result<EnvelopeLabel, PredictError> {
        let validated = validate(features, self.means.len())?;
        let dist = self.squared_mahalanobis(&validated)?;
        let label = if -dist - self.decision_boundary > 0.0 {
            EnvelopeLabel::Inlier
        } else {
            EnvelopeLabel::Outlier
        };
        debug!("squared mahalanobis {dist:.6} -> {label:?}");
        Ok(label)
    }

    /// Squared Mahalanobis distance of an already-validated point from
    /// the stored means: (x - m)ᵀ · P · (x - m) where P is the
    /// precision matrix.
    ///
    /// Re-checks arity defensively; the features may have been
    /// validated against a different arity.
    pub fn squared_mahalanobis(
        &self,
        features: &ValidatedFeatures<'_>,
    ) -> Result<f64, PredictError> {
        if features.arity() != self.means.len() {
            return Err(PredictError::ArityMismatch {
                expected: self.means.len(),
                got: features.arity(),
            });
        }
        let x = features.as_slice();
        let size = self.means.len();
        let mut distance = 0.0;
        for i in 0..size {
            let mut accumulate = 0.0;
            for j in 0..size {
                accumulate += self.precision.data[i][j] * (x[j] - self.means[j]);
            }
            distance += accumulate * (x[i] - self.means[i]);
        }
        Ok(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_envelope(boundary: f64) -> EllipticEnvelope {
        EllipticEnvelope::new(
            vec![0.0, 0.0],
            Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            boundary,
        )
        .unwrap()
    }

    #[test]
    fn identity_precision_gives_squared_euclidean_distance() {
        let envelope = identity_envelope(-1.0);
        let point = validate(&[3.0, 4.0], 2).unwrap();
        assert_eq!(envelope.squared_mahalanobis(&point), Ok(25.0));
    }

    #[test]
    fn off_diagonal_precision_weighs_cross_terms() {
        let envelope = EllipticEnvelope::new(
            vec![1.0, 1.0],
            Matrix::from_data(vec![vec![2.0, -1.0], vec![-1.0, 2.0]]),
            -1.0,
        )
        .unwrap();
        // x - m = [1, 2]; P(x-m) = [0, 3]; dot with [1, 2] = 6
        let point = validate(&[2.0, 3.0], 2).unwrap();
        assert_eq!(envelope.squared_mahalanobis(&point), Ok(6.0));
    }

    #[test]
    fn distance_from_the_means_is_zero() {
        let envelope = identity_envelope(-1.0);
        let point = validate(&[0.0, 0.0], 2).unwrap();
        assert_eq!(envelope.squared_mahalanobis(&point), Ok(0.0));
    }

    #[test]
    fn new_rejects_non_square_precision() {
        let res = EllipticEnvelope::new(
            vec![0.0, 0.0],
            Matrix::from_data(vec![vec![1.0, 0.0]]),
            -1.0,
        );
        assert!(matches!(
            res,
            Err(ModelError::PrecisionShape { rows: 1, cols: 2, expected: 2 })
        ));
    }

    #[test]
    fn new_rejects_precision_means_size_mismatch() {
        let res = EllipticEnvelope::new(
            vec![0.0, 0.0, 0.0],
            Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            -1.0,
        );
        assert!(matches!(res, Err(ModelError::PrecisionShape { expected: 3, .. })));
    }

    #[test]
    fn new_rejects_non_finite_parameters() {
        let nan_mean = EllipticEnvelope::new(
            vec![f64::NAN, 0.0],
            Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            -1.0,
        );
        assert!(matches!(nan_mean, Err(ModelError::NonFiniteParameter)));

        let inf_boundary = EllipticEnvelope::new(
            vec![0.0, 0.0],
            Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            f64::NEG_INFINITY,
        );
        assert!(matches!(inf_boundary, Err(ModelError::NonFiniteParameter)));
    }

    #[test]
    fn new_rejects_empty_means() {
        let res = EllipticEnvelope::new(vec![], Matrix::zeros(0, 0), -1.0);
        assert!(matches!(res, Err(ModelError::EmptyModel)));
    }

    #[test]
    fn squared_mahalanobis_rechecks_arity_defensively() {
        let envelope = identity_envelope(-1.0);
        let point = validate(&[0.0, 1.0, 0.0], 3).unwrap();
        assert_eq!(
            envelope.squared_mahalanobis(&point),
            Err(PredictError::ArityMismatch { expected: 2, got: 3 })
        );
    }
}
