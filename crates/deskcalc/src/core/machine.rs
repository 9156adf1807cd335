//! Button-press state machine of the calculator widget
//!
//! State is the tuple (display, expression, memory, reset flag); output is
//! the display text. Every input is handled to completion before the next
//! one, and every evaluation failure lands on the same recoverable state:
//! display `"Error"`, empty expression, reset flag set.

use serde::{Deserialize, Serialize};

use crate::core::evaluator::ExpressionEvaluator;
use crate::core::numfmt::{format_number, parse_float};
use crate::core::Evaluator;

/// Display text shown after any failed operation
pub const ERROR_DISPLAY: &str = "Error";

/// Display text after mount and after Clear
const DEFAULT_DISPLAY: &str = "0";

/// The four binary operator keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `×`, evaluated as `*`
    Multiply,
    /// `÷`, evaluated as `/`
    Divide,
}

impl Operator {
    /// Every operator key, in keypad order top to bottom
    pub const ALL: [Operator; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Single-character symbol written into the pending expression
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Label printed on the key
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Maps an expression symbol back to its key
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// Memory register keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryOp {
    /// MC: zero the register
    Clear,
    /// MR: copy the register into the display
    Recall,
    /// M+: add the display value to the register
    Add,
    /// M-: subtract the display value from the register
    Subtract,
}

impl MemoryOp {
    /// Label printed on the key
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

/// A single button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    /// Digit key 0-9; larger values are ignored
    Digit(u8),
    /// `.`
    Decimal,
    /// Binary operator key
    Operator(Operator),
    /// `=`
    Equals,
    /// `C`
    Clear,
    /// `±`
    ToggleSign,
    /// `%`
    Percentage,
    /// `√`
    SquareRoot,
    /// `x²`
    Square,
    /// `1/x`
    Reciprocal,
    /// `π`
    Pi,
    /// `⌫`
    Backspace,
    /// Memory register key
    Memory(MemoryOp),
}

/// Calculator widget state
///
/// Only reachable through [`CalcState::next`] and [`Calculator::press`], which
/// keep two invariants: `display` is never empty and has at most one `.`;
/// `expression` is empty or ends in exactly one operator symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcState {
    display: String,
    expression: String,
    memory: f64,
    should_reset_display: bool,
    last_operation: Option<Operator>,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
            expression: String::new(),
            memory: 0.0,
            should_reset_display: false,
            last_operation: None,
        }
    }
}

impl CalcState {
    /// Text currently shown
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left operand plus pending operator, or empty
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Memory register value
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Whether the next digit starts a fresh number
    #[must_use]
    pub fn should_reset_display(&self) -> bool {
        self.should_reset_display
    }

    /// Most recent operator key, kept for display only
    #[must_use]
    pub fn last_operation(&self) -> Option<Operator> {
        self.last_operation
    }

    /// Returns true if the display shows the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Returns true if an operator is waiting for its second operand
    #[must_use]
    pub fn has_pending_operation(&self) -> bool {
        !self.expression.is_empty()
    }

    /// Pure transition: the state after `input`
    #[must_use]
    pub fn next(&self, input: Input, evaluator: &mut dyn ExpressionEvaluator) -> Self {
        let mut state = self.clone();
        state.apply(input, evaluator);
        state
    }

    fn apply(&mut self, input: Input, evaluator: &mut dyn ExpressionEvaluator) {
        match input {
            Input::Digit(d) => self.digit(d),
            Input::Decimal => self.decimal(),
            Input::Operator(op) => self.operator(op, evaluator),
            Input::Equals => self.equals(evaluator),
            Input::Clear => self.clear(),
            Input::ToggleSign => self.display = format_number(self.value() * -1.0),
            Input::Percentage => self.display = format_number(self.value() / 100.0),
            Input::SquareRoot => {
                let value = self.value();
                if value >= 0.0 {
                    self.show_result(value.sqrt());
                } else {
                    self.fail();
                }
            }
            Input::Square => {
                let value = self.value();
                self.show_result(value * value);
            }
            Input::Reciprocal => {
                let value = self.value();
                if value == 0.0 {
                    self.fail();
                } else {
                    self.show_result(1.0 / value);
                }
            }
            Input::Pi => self.show_result(std::f64::consts::PI),
            Input::Backspace => self.backspace(),
            Input::Memory(op) => self.memory_op(op),
        }
    }

    /// Numeric reading of the display
    fn value(&self) -> f64 {
        parse_float(&self.display)
    }

    fn digit(&mut self, d: u8) {
        let Some(ch) = char::from_digit(u32::from(d), 10) else {
            tracing::warn!(digit = d, "ignoring invalid digit key");
            return;
        };

        if self.display == DEFAULT_DISPLAY || self.should_reset_display {
            self.display = ch.to_string();
            self.should_reset_display = false;
        } else {
            self.display.push(ch);
        }
    }

    fn decimal(&mut self) {
        if self.should_reset_display {
            self.display = "0.".to_string();
            self.should_reset_display = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn operator(&mut self, op: Operator, evaluator: &mut dyn ExpressionEvaluator) {
        if self.expression.is_empty() {
            self.expression = format!("{} {}", self.display, op.symbol());
            self.should_reset_display = true;
        } else if self.should_reset_display {
            // Second operand not started yet: the latest operator wins
            self.expression.pop();
            self.expression.push(op.symbol());
        } else {
            match evaluator.evaluate_expression(&self.pending()) {
                Ok(result) => {
                    let text = format_number(result);
                    self.expression = format!("{} {}", text, op.symbol());
                    self.display = text;
                    self.should_reset_display = true;
                }
                Err(_) => self.fail(),
            }
        }
        self.last_operation = Some(op);
    }

    fn equals(&mut self, evaluator: &mut dyn ExpressionEvaluator) {
        if self.expression.is_empty() || self.should_reset_display {
            return;
        }

        match evaluator.evaluate_expression(&self.pending()) {
            Ok(result) => {
                self.display = format_number(result);
                self.expression.clear();
                self.should_reset_display = true;
            }
            Err(_) => self.fail(),
        }
    }

    fn clear(&mut self) {
        self.display = DEFAULT_DISPLAY.to_string();
        self.expression.clear();
        self.should_reset_display = false;
    }

    fn backspace(&mut self) {
        if self.display == DEFAULT_DISPLAY
            || self.display == ERROR_DISPLAY
            || self.display.chars().count() == 1
        {
            self.display = DEFAULT_DISPLAY.to_string();
        } else {
            self.display.pop();
        }
    }

    fn memory_op(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Clear => self.memory = 0.0,
            MemoryOp::Recall => {
                self.display = format_number(self.memory);
                self.should_reset_display = true;
            }
            MemoryOp::Add => {
                self.memory += self.value();
                self.should_reset_display = true;
            }
            MemoryOp::Subtract => {
                self.memory -= self.value();
                self.should_reset_display = true;
            }
        }
    }

    /// Expression plus the display as the right operand
    fn pending(&self) -> String {
        format!("{} {}", self.expression, self.display)
    }

    fn show_result(&mut self, value: f64) {
        if !value.is_finite() {
            self.fail();
            return;
        }
        self.display = format_number(value);
        self.should_reset_display = true;
    }

    fn fail(&mut self) {
        self.display = ERROR_DISPLAY.to_string();
        self.expression.clear();
        self.should_reset_display = true;
    }
}

/// Stateful calculator: one [`CalcState`] plus the evaluator it delegates to
pub struct Calculator<E: ExpressionEvaluator = Evaluator> {
    state: CalcState,
    evaluator: E,
}

impl<E: ExpressionEvaluator> std::fmt::Debug for Calculator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calculator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator with the default evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }
}

impl<E: ExpressionEvaluator> Calculator<E> {
    /// Creates a calculator delegating arithmetic to `evaluator`
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            state: CalcState::default(),
            evaluator,
        }
    }

    /// Handles one button press and returns the new state
    pub fn press(&mut self, input: Input) -> &CalcState {
        self.state = self.state.next(input, &mut self.evaluator);
        tracing::debug!(
            ?input,
            display = %self.state.display,
            expression = %self.state.expression,
            "calculator transition"
        );
        &self.state
    }

    /// Handles a sequence of presses in order
    pub fn press_all(&mut self, inputs: impl IntoIterator<Item = Input>) -> &CalcState {
        for input in inputs {
            self.press(input);
        }
        &self.state
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalcState {
        &self.state
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// The evaluator arithmetic is delegated to
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}
