//! Calculator widget
//!
//! Owns one state machine and a list of observers. Every press that changes
//! the state is pushed to the observers in registration order, which is how
//! rendering layers stay in sync without polling.

use crate::core::{CalcResult, CalcState, Calculator, Evaluator, ExpressionEvaluator, Input};
use crate::keypad::Keypad;

/// Receives the new state after each change
pub trait StateObserver {
    /// Called with the state produced by `input`
    fn state_changed(&mut self, input: Input, state: &CalcState);
}

impl<F> StateObserver for F
where
    F: FnMut(Input, &CalcState),
{
    fn state_changed(&mut self, input: Input, state: &CalcState) {
        self(input, state);
    }
}

/// One calculator instance plus its observers
pub struct CalculatorWidget<E: ExpressionEvaluator = Evaluator> {
    calculator: Calculator<E>,
    keypad: Keypad,
    observers: Vec<Box<dyn StateObserver>>,
}

impl<E: ExpressionEvaluator> std::fmt::Debug for CalculatorWidget<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorWidget")
            .field("calculator", &self.calculator)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for CalculatorWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorWidget {
    /// Mounts a widget with the default evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }
}

impl<E: ExpressionEvaluator> CalculatorWidget<E> {
    /// Mounts a widget delegating arithmetic to `evaluator`
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            calculator: Calculator::with_evaluator(evaluator),
            keypad: Keypad::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Number of registered observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Handles one press, notifying observers if the state changed
    pub fn press(&mut self, input: Input) -> &CalcState {
        let before = self.calculator.state().clone();
        let after = self.calculator.press(input);
        if *after != before {
            for observer in &mut self.observers {
                observer.state_changed(input, after);
            }
        }
        self.calculator.state()
    }

    /// Handles a sequence of presses
    pub fn press_all(&mut self, inputs: impl IntoIterator<Item = Input>) -> &CalcState {
        for input in inputs {
            self.press(input);
        }
        self.calculator.state()
    }

    /// Handles a click on a keypad element id; unknown ids are ignored
    pub fn click(&mut self, element_id: &str) -> Option<&CalcState> {
        let input = self.keypad.handle_click(element_id)?;
        Some(self.press(input))
    }

    /// Parses and presses a textual key sequence
    ///
    /// # Errors
    ///
    /// Fails before any press if a token is not a known key.
    pub fn press_keys(&mut self, text: &str) -> CalcResult<&CalcState> {
        let inputs = self.keypad.parse_sequence(text)?;
        Ok(self.press_all(inputs))
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &CalcState {
        self.calculator.state()
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.calculator.display()
    }

    /// The keypad this widget accepts clicks from
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}
