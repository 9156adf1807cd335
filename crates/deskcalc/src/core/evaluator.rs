//! AST evaluator and the evaluation seam used by the state machine

use std::collections::HashMap;

use crate::core::operations::{check_result, is_truthy};
use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult, OperatorConfig};

/// Anything that can turn expression text into a number
///
/// The calculator state machine only talks to this trait, so frontends and
/// tests can swap in their own evaluator.
pub trait ExpressionEvaluator {
    /// Evaluates `expression`, failing on anything that is not a finite number
    fn evaluate_expression(&mut self, expression: &str) -> CalcResult<f64>;
}

/// Rewrites display symbols to parser symbols and strips all whitespace
#[must_use]
pub fn sanitize(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect()
}

/// Evaluator for AST expressions
///
/// Holds the operator profile and the variables created by assignment.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: OperatorConfig,
    variables: HashMap<String, f64>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates a new evaluator with the calculator operator profile
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OperatorConfig::calculator())
    }

    /// Creates an evaluator with a custom operator profile
    #[must_use]
    pub fn with_config(config: OperatorConfig) -> Self {
        Self {
            config,
            variables: HashMap::new(),
        }
    }

    /// Returns the active operator profile
    #[must_use]
    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// Looks up a variable or constant
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        constant(name).or_else(|| self.variables.get(name).copied())
    }

    /// Forgets every assigned variable
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&mut self, node: &AstNode) -> CalcResult<f64> {
        match node {
            // Literals like `1e999` parse to infinity
            AstNode::Number(n) => check_result(*n),
            AstNode::Variable(name) => self
                .variable(name)
                .ok_or_else(|| CalcError::UndefinedVariable(name.clone())),
            AstNode::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                op.apply(value)
            }
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                op.apply(left_val, right_val)
            }
            AstNode::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                // Only the chosen branch is evaluated
                if is_truthy(self.evaluate(condition)?) {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
            AstNode::Assign { name, value } => {
                if constant(name).is_some() {
                    return Err(CalcError::ParseError(format!(
                        "Cannot assign to constant '{name}'"
                    )));
                }
                let value = self.evaluate(value)?;
                self.variables.insert(name.clone(), value);
                Ok(value)
            }
            AstNode::Call { function, argument } => {
                let value = self.evaluate(argument)?;
                call(function, value)
            }
        }
    }

    /// Sanitizes, parses and evaluates a string expression
    ///
    /// The result is always finite.
    pub fn evaluate_str(&mut self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str_with(&sanitize(input), self.config)?;
        let value = self.evaluate(&ast)?;
        check_result(value)
    }
}

impl ExpressionEvaluator for Evaluator {
    fn evaluate_expression(&mut self, expression: &str) -> CalcResult<f64> {
        let result = self.evaluate_str(expression);
        if let Err(err) = &result {
            tracing::debug!(expression, error = %err, "evaluation failed");
        }
        result
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "PI" => Some(std::f64::consts::PI),
        "E" => Some(std::f64::consts::E),
        _ => None,
    }
}

fn call(function: &str, x: f64) -> CalcResult<f64> {
    let result = match function {
        "sqrt" => x.sqrt(),
        "cbrt" => x.cbrt(),
        "abs" => x.abs(),
        "exp" => x.exp(),
        "ln" | "log" => x.ln(),
        "log10" => x.log10(),
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        "round" => x.round(),
        "trunc" => x.trunc(),
        "sign" => {
            if x == 0.0 {
                0.0
            } else {
                x.signum()
            }
        }
        _ => return Err(CalcError::UnknownFunction(function.to_string())),
    };

    if result.is_nan() {
        Err(CalcError::InvalidResult(format!("{function} is undefined here")))
    } else if result.is_infinite() {
        Err(CalcError::Overflow)
    } else {
        Ok(result)
    }
}
