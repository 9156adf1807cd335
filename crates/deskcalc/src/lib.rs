//! deskcalc - the calculator widget of a portfolio desktop
//!
//! A button-driven calculator: every key press is an [`Input`](core::Input)
//! applied to a small state (display text, pending expression, memory,
//! reset flag). Arithmetic is delegated to an expression evaluator behind the
//! [`ExpressionEvaluator`](core::ExpressionEvaluator) trait.
//!
//! Alongside the calculator live the other pieces of the desktop page: the
//! top-bar clock, the analytics wrapper and the page metadata.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut widget = CalculatorWidget::new();
//! widget.press_all([
//!     Input::Digit(5),
//!     Input::Operator(Operator::Add),
//!     Input::Digit(3),
//!     Input::Operator(Operator::Multiply),
//!     Input::Digit(2),
//!     Input::Equals,
//! ]);
//! // Operators apply left to right as they are pressed
//! assert_eq!(widget.display(), "16");
//!
//! // The evaluator on its own follows normal precedence
//! let mut eval = Evaluator::new();
//! assert_eq!(eval.evaluate_str("5 + 3 * 2").unwrap(), 11.0);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod analytics;
pub mod clock;
pub mod core;
pub mod keypad;
pub mod meta;
pub mod widget;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analytics::{Analytics, AnalyticsClient, AnalyticsHit};
    pub use crate::clock::{ClockFormat, ClockWidget};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser};
    pub use crate::core::{
        CalcError, CalcResult, CalcState, Calculator, ExpressionEvaluator, Input, MemoryOp,
        Operator, OperatorConfig,
    };
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::meta::{HeadTag, PageMeta};
    pub use crate::widget::{CalculatorWidget, StateObserver};

    #[cfg(feature = "tui")]
    pub use crate::tui::CalculatorApp;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2 + 3").unwrap(), 5.0);
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1 + 2 * 3").unwrap();
        let mut eval = Evaluator::new();
        assert_eq!(eval.evaluate(&ast).unwrap(), 7.0);
    }

    #[test]
    fn test_widget_and_keypad_agree() {
        let mut widget = CalculatorWidget::new();
        let keypad = Keypad::new();
        for label in ["9", "×", "9", "="] {
            let input = keypad.find_by_label(label).unwrap().input;
            widget.press(input);
        }
        assert_eq!(widget.display(), "81");
    }

    #[test]
    fn test_calculator_with_restricted_profile() {
        let config = OperatorConfig {
            divide: false,
            ..OperatorConfig::calculator()
        };
        let mut calc = Calculator::with_evaluator(Evaluator::with_config(config));
        calc.press_all([
            Input::Digit(8),
            Input::Operator(Operator::Divide),
            Input::Digit(2),
            Input::Equals,
        ]);
        assert_eq!(calc.display(), "Error");
    }

    #[test]
    fn test_error_recovery() {
        let mut widget = CalculatorWidget::new();
        widget.press_keys("1 / 0 =").unwrap();
        assert_eq!(widget.display(), "Error");
        widget.press_keys("2 + 2 =").unwrap();
        assert_eq!(widget.display(), "4");
    }

    #[test]
    fn test_ambient_pieces() {
        assert!(!PageMeta::default().render_head().is_empty());
        assert!(!Analytics::disabled().is_enabled());
        assert_eq!(ClockFormat::default(), ClockFormat::Full);
    }
}
