//! Expression evaluation and result formatting.
//!
//! Wraps the sanitizer and the sandboxed evaluator into the single
//! sanitize-and-evaluate pipeline used by both committed and live
//! evaluation.

use super::error::{CalcError, CalcResult};
use super::parser::eval_str;
use super::sanitize::sanitize;

/// Decimal places kept when formatting non-integers.
pub const DISPLAY_PRECISION: usize = 10;

/// Text shown in place of a result when evaluation fails.
pub const ERROR_TEXT: &str = "Error";

/// Evaluate a display expression.
///
/// Returns the value only when it is a finite number.
pub fn evaluate_expression(expression: &str) -> CalcResult<f64> {
    let sanitized = sanitize(expression);
    let value = eval_str(&sanitized)?;
    ensure_finite(value)
}

/// Reject infinities and NaN.
pub fn ensure_finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFiniteResult(value))
    }
}

/// Format a number for display.
///
/// Integers print without a decimal point. Other values are rounded to
/// [`DISPLAY_PRECISION`] decimal places with trailing zeros removed, which
/// hides floating-point noise such as `0.1 + 0.2`.
pub fn format_number(value: f64) -> String {
    let formatted = if value.fract() == 0.0 {
        format!("{}", value)
    } else {
        let fixed = format!("{:.*}", DISPLAY_PRECISION, value);
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };

    // Rounding can leave a negative zero behind.
    if formatted == "-0" {
        "0".to_string()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::FaultKind;

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate_expression("2 + 2"), Ok(4.0));
        assert_eq!(evaluate_expression("6 × 7"), Ok(42.0));
        assert_eq!(evaluate_expression("9 ÷ 3 − 1"), Ok(2.0));
    }

    #[test]
    fn test_log_is_base_ten() {
        assert_eq!(evaluate_expression("log(100)"), Ok(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        let err = evaluate_expression("5 / 0").unwrap_err();
        assert_eq!(err.kind(), FaultKind::NonFiniteResult);
    }

    #[test]
    fn test_invalid_expression() {
        let err = evaluate_expression("2 + * 2").unwrap_err();
        assert_eq!(err.kind(), FaultKind::Evaluation);
    }

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-35.0), "-35");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn test_format_decimals() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(3.141592653589793), "3.1415926536");
        assert_eq!(format_number(-0.00000000001), "0");
    }

    #[test]
    fn test_formatted_values_evaluate_back() {
        let text = format_number(2.0_f64.sqrt());
        let value = evaluate_expression(&text).unwrap();
        assert_eq!(format_number(value), text);
    }
}
