//! Edit-boundary validation.
//!
//! Values are checked here, before they enter the document. A value that
//! slips past validation still degrades to zero in the aggregator instead
//! of crashing.

use crate::errors::{CostError, Result};

/// Bounds for a numeric input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: Option<f64>,
}

impl Default for NumericBounds {
    fn default() -> Self {
        // costs and quantities are non-negative unless a field says otherwise
        Self { min: 0.0, max: None }
    }
}

/// Parse and validate a user-entered number. Currency punctuation is
/// tolerated; NaN, infinities, and out-of-bounds values are rejected.
pub fn validate_numeric_input(raw: &str, bounds: &NumericBounds) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Err(CostError::validation("empty input"));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| CostError::validation(format!("'{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(CostError::validation("value must be finite"));
    }
    if value < bounds.min {
        return Err(CostError::validation(format!(
            "value must be at least {}",
            bounds.min
        )));
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Err(CostError::validation(format!("value must be at most {max}")));
        }
    }
    Ok(value)
}
