//! Scientific functions applied to the current operand, and constants.
//!
//! Direct trigonometry takes degrees; inverse trigonometry returns degrees.

use super::error::{CalcError, CalcResult};
use std::f64::consts::{E, PI};

/// Above this, `n!` no longer fits in an `f64`.
const FACTORIAL_LIMIT: f64 = 170.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Sqrt,
    Square,
    Factorial,
    Abs,
    Floor,
    Ceil,
    Round,
    Exp,
    Sinh,
    Cosh,
    Tanh,
}

impl ScientificFunction {
    pub const ALL: [Self; 19] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Log10,
        Self::Ln,
        Self::Sqrt,
        Self::Square,
        Self::Factorial,
        Self::Abs,
        Self::Floor,
        Self::Ceil,
        Self::Round,
        Self::Exp,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
    ];

    /// Canonical name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Log10 => "log10",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Factorial => "factorial",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Exp => "exp",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
        }
    }

    /// Look a function up by name. Button aliases `log` and `power` are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(Self::Log10),
            "power" => Some(Self::Square),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }

    /// Apply the function.
    ///
    /// Only `factorial` raises a domain fault itself; other out-of-domain
    /// inputs come back as NaN or infinity for the caller to reject.
    pub fn apply(self, value: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Sin => value.to_radians().sin(),
            Self::Cos => value.to_radians().cos(),
            Self::Tan => value.to_radians().tan(),
            Self::Asin => value.asin().to_degrees(),
            Self::Acos => value.acos().to_degrees(),
            Self::Atan => value.atan().to_degrees(),
            Self::Log10 => value.log10(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
            Self::Square => value.powi(2),
            Self::Factorial => factorial(value)?,
            Self::Abs => value.abs(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
            // Halves round towards positive infinity.
            Self::Round => (value + 0.5).floor(),
            Self::Exp => value.exp(),
            Self::Sinh => value.sinh(),
            Self::Cosh => value.cosh(),
            Self::Tanh => value.tanh(),
        };
        Ok(result)
    }
}

/// `n!` for non-negative integers.
pub fn factorial(n: f64) -> CalcResult<f64> {
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
        return Err(CalcError::Domain {
            function: "factorial",
            value: n,
        });
    }
    if n > FACTORIAL_LIMIT {
        return Ok(f64::INFINITY);
    }

    let mut result = 1.0;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

/// A constant that can be appended to the expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => E,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "π" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::FaultKind;

    fn apply(f: ScientificFunction, value: f64) -> f64 {
        f.apply(value).unwrap()
    }

    #[test]
    fn test_degree_trig() {
        assert!((apply(ScientificFunction::Sin, 90.0) - 1.0).abs() < 1e-9);
        assert!((apply(ScientificFunction::Cos, 60.0) - 0.5).abs() < 1e-9);
        assert!((apply(ScientificFunction::Tan, 45.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_trig_returns_degrees() {
        assert!((apply(ScientificFunction::Asin, 1.0) - 90.0).abs() < 1e-9);
        assert!((apply(ScientificFunction::Acos, 0.5) - 60.0).abs() < 1e-9);
        assert!((apply(ScientificFunction::Atan, 1.0) - 45.0).abs() < 1e-9);
        assert!(apply(ScientificFunction::Asin, 2.0).is_nan());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0), Ok(1.0));
        assert_eq!(factorial(1.0), Ok(1.0));
        assert_eq!(factorial(5.0), Ok(120.0));
        assert_eq!(factorial(171.0), Ok(f64::INFINITY));
    }

    #[test]
    fn test_factorial_domain() {
        for value in [-1.0, 2.5, f64::NAN] {
            let err = ScientificFunction::Factorial.apply(value).unwrap_err();
            assert_eq!(err.kind(), FaultKind::Domain);
        }
    }

    #[test]
    fn test_misc_functions() {
        assert_eq!(apply(ScientificFunction::Square, -3.0), 9.0);
        assert_eq!(apply(ScientificFunction::Sqrt, 81.0), 9.0);
        assert_eq!(apply(ScientificFunction::Log10, 1000.0), 3.0);
        assert_eq!(apply(ScientificFunction::Round, 2.5), 3.0);
        assert_eq!(apply(ScientificFunction::Round, -2.5), -2.0);
        assert_eq!(apply(ScientificFunction::Floor, -1.5), -2.0);
        assert_eq!(apply(ScientificFunction::Ceil, 1.2), 2.0);
        assert_eq!(apply(ScientificFunction::Abs, -7.0), 7.0);
        assert!(apply(ScientificFunction::Ln, -1.0).is_nan());
    }

    #[test]
    fn test_names_round_trip() {
        for f in ScientificFunction::ALL {
            assert_eq!(ScientificFunction::from_name(f.name()), Some(f));
        }
        assert_eq!(
            ScientificFunction::from_name("log"),
            Some(ScientificFunction::Log10)
        );
        assert_eq!(
            ScientificFunction::from_name("power"),
            Some(ScientificFunction::Square)
        );
        assert_eq!(ScientificFunction::from_name("cbrt"), None);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Constant::from_name("pi").map(Constant::value), Some(PI));
        assert_eq!(Constant::from_name("e").map(Constant::value), Some(E));
        assert_eq!(Constant::from_name("phi"), None);
    }
}
