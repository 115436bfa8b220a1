use crate::error::PredictError;

/// A feature slice that has passed arity and finiteness checks.
///
/// Can only be produced by `validate()`; the inference engine's inner
/// entry points accept this type instead of a raw slice so malformed
/// input is rejected before any arithmetic happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedFeatures<'a> {
    features: &'a [f64],
}

impl<'a> ValidatedFeatures<'a> {
    pub fn as_slice(&self) -> &'a [f64] {
        self.features
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}

/// Checks that `features` has exactly `expected_arity` elements and that
/// every element is a finite f64. Pure; no side effects.
pub fn validate(
    features: &[f64],
    expected_arity: usize,
) -> Result<ValidatedFeatures<'_>, PredictError> {
    if features.len() != expected_arity {
        return Err(PredictError::ArityMismatch {
            expected: expected_arity,
            got: features.len(),
        });
    }
    // Report the first offending element.
    if let Some((index, &value)) = features.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(PredictError::NonFiniteInput { index, value });
    }
    Ok(ValidatedFeatures { features })
}
