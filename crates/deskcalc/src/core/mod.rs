//! Calculator core: number text, expression evaluation and the button state machine
//!
//! Nothing in here knows about rendering. Frontends drive [`Calculator`]
//! with [`Input`] events and read back [`CalcState`].

pub mod evaluator;
pub mod machine;
pub mod numfmt;
mod operations;
pub mod parser;

pub use evaluator::{Evaluator, ExpressionEvaluator};
pub use machine::{CalcState, Calculator, Input, MemoryOp, Operator, ERROR_DISPLAY};
pub use operations::{Operation, OperatorConfig, UnaryOp};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// The state machine collapses every variant into the `"Error"` display;
/// the distinction only matters for diagnostics and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division (or remainder) by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid result (NaN or outside an operation's domain)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
    /// Operator is switched off in the active [`OperatorConfig`]
    #[error("Operator not enabled: '{0}'")]
    DisabledOperator(String),
    /// Identifier with no value in scope
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    /// Call to a function the evaluator does not provide
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    /// Keypad label that matches no button
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),
}
