//! TUI application state

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

use super::input::{InputHandler, KeyAction};
use super::keypad::KeypadState;
use super::ui;
use crate::analytics;
use crate::clock::{ClockFormat, ClockWidget, LocalTime, TimeSource};
use crate::core::{CalcState, Input};
use crate::keypad::label_for;
use crate::widget::CalculatorWidget;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp<T: TimeSource = LocalTime> {
    widget: CalculatorWidget,
    keypad: KeypadState,
    clock: ClockWidget<T>,
    input: InputHandler,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(ClockFormat::Full)
    }
}

impl CalculatorApp {
    /// Creates an app with a local-time clock
    #[must_use]
    pub fn new(clock_format: ClockFormat) -> Self {
        Self::with_clock(ClockWidget::new(clock_format))
    }
}

impl<T: TimeSource> CalculatorApp<T> {
    /// Creates an app around an existing clock
    #[must_use]
    pub fn with_clock(clock: ClockWidget<T>) -> Self {
        Self::with_parts(CalculatorWidget::new(), clock)
    }

    /// Creates an app from a configured widget and clock
    #[must_use]
    pub fn with_parts(widget: CalculatorWidget, clock: ClockWidget<T>) -> Self {
        Self {
            widget,
            keypad: KeypadState::new(),
            clock,
            input: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Current calculator state
    #[must_use]
    pub fn state(&self) -> &CalcState {
        self.widget.state()
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.widget.display()
    }

    /// Keypad with its highlight
    #[must_use]
    pub fn keypad(&self) -> &KeypadState {
        &self.keypad
    }

    /// Current clock text
    #[must_use]
    pub fn clock_text(&self) -> &str {
        self.clock.text()
    }

    /// The clock widget
    #[must_use]
    pub fn clock(&self) -> &ClockWidget<T> {
        &self.clock
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Presses a calculator key and highlights it
    pub fn press(&mut self, input: Input) {
        self.widget.press(input);
        self.keypad.highlight(input);
        analytics::track_event("calculator", "press", label_for(input));
    }

    /// Handles a key event; returns whether it did anything
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match self.input.handle_key(event) {
            KeyAction::Press(input) => {
                self.press(input);
                true
            }
            KeyAction::Quit => {
                self.quit();
                true
            }
            KeyAction::None => false,
        }
    }

    /// Handles a mouse event against a frame of size `frame_area`
    pub fn handle_mouse(&mut self, event: MouseEvent, frame_area: Rect) -> bool {
        let Some((x, y)) = self.input.click_position(event) else {
            return false;
        };
        let keypad_area = ui::keypad_area(frame_area);
        match self.keypad.input_at(keypad_area, x, y) {
            Some(input) => {
                self.press(input);
                true
            }
            None => false,
        }
    }

    /// Clock tick: refreshes the clock and drops the key highlight
    pub fn tick(&mut self) {
        self.clock.refresh();
        self.keypad.release();
    }
}
