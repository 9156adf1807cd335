//! Arithmetic operations and the operator profile
//!
//! Every operation returns a checked result: NaN and infinity never leave
//! this module as values.

use serde::{Deserialize, Serialize};

use crate::core::numfmt::format_number;
use crate::core::{CalcError, CalcResult};

/// Largest n for which n! is finite in f64
const MAX_FACTORIAL: f64 = 170.0;

/// Binary operations understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Remainder (%)
    Remainder,
    /// Power (^)
    Power,
    /// Text concatenation of the operands (||)
    Concatenate,
    /// Equality (==)
    Equal,
    /// Inequality (!=)
    NotEqual,
    /// Less than (<)
    Less,
    /// Less than or equal (<=)
    LessEqual,
    /// Greater than (>)
    Greater,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Logical and
    And,
    /// Logical or
    Or,
}

impl Operation {
    /// Returns the operator symbol as written in expressions
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Power => "^",
            Self::Concatenate => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Returns true if `config` allows this operation
    #[must_use]
    pub const fn is_enabled(&self, config: &OperatorConfig) -> bool {
        match self {
            Self::Add => config.add,
            Self::Subtract => config.subtract,
            Self::Multiply => config.multiply,
            Self::Divide => config.divide,
            Self::Remainder => config.remainder,
            Self::Power => config.power,
            Self::Concatenate => config.concatenate,
            Self::Equal
            | Self::NotEqual
            | Self::Less
            | Self::LessEqual
            | Self::Greater
            | Self::GreaterEqual => config.comparison,
            Self::And | Self::Or => config.logical,
        }
    }

    /// Applies the operation to two operands
    pub fn apply(&self, a: f64, b: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
            Self::Remainder => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a % b
            }
            Self::Power => a.powf(b),
            Self::Concatenate => concatenate(a, b)?,
            Self::Equal => bool_value(a == b),
            Self::NotEqual => bool_value(a != b),
            Self::Less => bool_value(a < b),
            Self::LessEqual => bool_value(a <= b),
            Self::Greater => bool_value(a > b),
            Self::GreaterEqual => bool_value(a >= b),
            Self::And => bool_value(is_truthy(a) && is_truthy(b)),
            Self::Or => bool_value(is_truthy(a) || is_truthy(b)),
        };
        check_result(raw)
    }
}

/// Prefix and postfix operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Prefix minus
    Negate,
    /// Prefix plus (identity)
    Plus,
    /// Logical not
    Not,
    /// Postfix factorial (!)
    Factorial,
}

impl UnaryOp {
    /// Returns the operator symbol as written in expressions
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "not",
            Self::Factorial => "!",
        }
    }

    /// Returns true if `config` allows this operation
    #[must_use]
    pub const fn is_enabled(&self, config: &OperatorConfig) -> bool {
        match self {
            // Sign prefixes ride on the additive switches
            Self::Negate => config.subtract,
            Self::Plus => config.add,
            Self::Not => config.logical,
            Self::Factorial => config.factorial,
        }
    }

    /// Applies the operation to its operand
    pub fn apply(&self, value: f64) -> CalcResult<f64> {
        let raw = match self {
            Self::Negate => -value,
            Self::Plus => value,
            Self::Not => bool_value(!is_truthy(value)),
            Self::Factorial => factorial(value)?,
        };
        check_result(raw)
    }
}

/// Which operators the expression parser accepts
///
/// Disabled operators fail evaluation with [`CalcError::DisabledOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// `+`
    pub add: bool,
    /// `-`
    pub subtract: bool,
    /// `*`
    pub multiply: bool,
    /// `/`
    pub divide: bool,
    /// `%`
    pub remainder: bool,
    /// `^`
    pub power: bool,
    /// Postfix `!`
    pub factorial: bool,
    /// `cond ? a : b`
    pub conditional: bool,
    /// `||`
    pub concatenate: bool,
    /// `and`, `or`, `not`
    pub logical: bool,
    /// `==`, `!=`, `<`, `<=`, `>`, `>=`
    pub comparison: bool,
    /// `in` (needs array operands, which this evaluator lacks)
    pub in_operator: bool,
    /// `name = expr`
    pub assignment: bool,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self::calculator()
    }
}

impl OperatorConfig {
    /// Arithmetic profile used by the calculator widget
    #[must_use]
    pub const fn calculator() -> Self {
        Self {
            add: true,
            subtract: true,
            multiply: true,
            divide: true,
            remainder: true,
            power: true,
            factorial: true,
            conditional: true,
            concatenate: true,
            logical: false,
            comparison: false,
            in_operator: false,
            assignment: true,
        }
    }

    /// Every operator switched on
    #[must_use]
    pub const fn all() -> Self {
        Self {
            add: true,
            subtract: true,
            multiply: true,
            divide: true,
            remainder: true,
            power: true,
            factorial: true,
            conditional: true,
            concatenate: true,
            logical: true,
            comparison: true,
            in_operator: true,
            assignment: true,
        }
    }
}

/// Non-zero and not NaN
#[must_use]
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

fn bool_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn factorial(value: f64) -> CalcResult<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(CalcError::InvalidResult(format!(
            "factorial of {} is undefined",
            format_number(value)
        )));
    }
    if value > MAX_FACTORIAL {
        return Err(CalcError::Overflow);
    }
    Ok((2..=value as u32).fold(1.0, |acc, n| acc * f64::from(n)))
}

fn concatenate(a: f64, b: f64) -> CalcResult<f64> {
    let joined = format!("{}{}", format_number(a), format_number(b));
    joined
        .parse()
        .map_err(|_| CalcError::InvalidResult(format!("'{joined}' is not a number")))
}

/// Rejects NaN and infinity
pub(crate) fn check_result(result: f64) -> CalcResult<f64> {
    if result.is_nan() {
        Err(CalcError::InvalidResult("NaN".into()))
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Operation symbols ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "-");
        assert_eq!(Operation::Multiply.symbol(), "*");
        assert_eq!(Operation::Divide.symbol(), "/");
        assert_eq!(Operation::Remainder.symbol(), "%");
        assert_eq!(Operation::Power.symbol(), "^");
        assert_eq!(Operation::Concatenate.symbol(), "||");
        assert_eq!(Operation::GreaterEqual.symbol(), ">=");
    }

    // --- Arithmetic ---

    #[test]
    fn test_add() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), Ok(5.0));
    }

    #[test]
    fn test_subtract() {
        assert_eq!(Operation::Subtract.apply(5.0, 3.0), Ok(2.0));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Operation::Multiply.apply(8.0, 2.0), Ok(16.0));
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::Divide.apply(12.0, 4.0), Ok(3.0));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::Divide.apply(5.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_remainder_by_zero() {
        assert_eq!(
            Operation::Remainder.apply(5.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(Operation::Power.apply(2.0, 10.0), Ok(1024.0));
    }

    #[test]
    fn test_power_overflow() {
        assert_eq!(Operation::Power.apply(10.0, 400.0), Err(CalcError::Overflow));
    }

    #[test]
    fn test_power_nan() {
        assert!(matches!(
            Operation::Power.apply(-8.0, 0.5),
            Err(CalcError::InvalidResult(_))
        ));
    }

    #[test]
    fn test_multiply_overflow() {
        assert_eq!(
            Operation::Multiply.apply(f64::MAX, 2.0),
            Err(CalcError::Overflow)
        );
    }

    // --- Concatenation ---

    #[test]
    fn test_concatenate_integers() {
        assert_eq!(Operation::Concatenate.apply(12.0, 34.0), Ok(1234.0));
    }

    #[test]
    fn test_concatenate_decimal() {
        assert_eq!(Operation::Concatenate.apply(1.5, 2.0), Ok(1.52));
    }

    #[test]
    fn test_concatenate_not_a_number() {
        // "1.5" followed by "2.5" has two dots
        assert!(matches!(
            Operation::Concatenate.apply(1.5, 2.5),
            Err(CalcError::InvalidResult(_))
        ));
    }

    // --- Comparison and logic ---

    #[test]
    fn test_comparisons_yield_one_or_zero() {
        assert_eq!(Operation::Less.apply(1.0, 2.0), Ok(1.0));
        assert_eq!(Operation::Greater.apply(1.0, 2.0), Ok(0.0));
        assert_eq!(Operation::Equal.apply(2.0, 2.0), Ok(1.0));
        assert_eq!(Operation::NotEqual.apply(2.0, 2.0), Ok(0.0));
        assert_eq!(Operation::LessEqual.apply(2.0, 2.0), Ok(1.0));
        assert_eq!(Operation::GreaterEqual.apply(1.0, 2.0), Ok(0.0));
    }

    #[test]
    fn test_logical() {
        assert_eq!(Operation::And.apply(1.0, 0.0), Ok(0.0));
        assert_eq!(Operation::Or.apply(1.0, 0.0), Ok(1.0));
        assert_eq!(UnaryOp::Not.apply(0.0), Ok(1.0));
        assert_eq!(UnaryOp::Not.apply(3.0), Ok(0.0));
    }

    // --- Unary ---

    #[test]
    fn test_negate() {
        assert_eq!(UnaryOp::Negate.apply(4.0), Ok(-4.0));
        assert_eq!(UnaryOp::Plus.apply(4.0), Ok(4.0));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(UnaryOp::Factorial.apply(0.0), Ok(1.0));
        assert_eq!(UnaryOp::Factorial.apply(5.0), Ok(120.0));
    }

    #[test]
    fn test_factorial_rejects_fraction_and_negative() {
        assert!(UnaryOp::Factorial.apply(2.5).is_err());
        assert!(UnaryOp::Factorial.apply(-1.0).is_err());
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(UnaryOp::Factorial.apply(170.0).is_ok());
        assert_eq!(UnaryOp::Factorial.apply(171.0), Err(CalcError::Overflow));
    }

    // --- OperatorConfig ---

    #[test]
    fn test_calculator_profile() {
        let config = OperatorConfig::calculator();
        assert!(Operation::Add.is_enabled(&config));
        assert!(Operation::Power.is_enabled(&config));
        assert!(Operation::Concatenate.is_enabled(&config));
        assert!(UnaryOp::Factorial.is_enabled(&config));
        assert!(config.conditional);
        assert!(config.assignment);
        assert!(!Operation::Equal.is_enabled(&config));
        assert!(!Operation::And.is_enabled(&config));
        assert!(!UnaryOp::Not.is_enabled(&config));
        assert!(!config.in_operator);
    }

    #[test]
    fn test_default_is_calculator_profile() {
        assert_eq!(OperatorConfig::default(), OperatorConfig::calculator());
    }

    #[test]
    fn test_all_profile_enables_comparison() {
        let config = OperatorConfig::all();
        assert!(Operation::LessEqual.is_enabled(&config));
        assert!(Operation::Or.is_enabled(&config));
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: OperatorConfig = serde_json::from_str(r#"{"comparison": true}"#).unwrap();
        assert!(config.comparison);
        assert!(config.add);
        assert!(!config.logical);
    }

    proptest! {
        #[test]
        fn prop_addition_commutative(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_results_are_finite(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            for op in [Operation::Add, Operation::Subtract, Operation::Multiply, Operation::Divide] {
                if let Ok(value) = op.apply(a, b) {
                    prop_assert!(value.is_finite());
                }
            }
        }
    }
}
