//! Keyboard and mouse input handling

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::{Input, MemoryOp, Operator};

/// Actions that can be triggered by terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press a calculator key
    Press(Input),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Maps terminal events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let input = match code {
            KeyCode::Char(c @ '0'..='9') => Input::Digit(c as u8 - b'0'),
            KeyCode::Char('.' | ',') => Input::Decimal,
            KeyCode::Char('+') => Input::Operator(Operator::Add),
            KeyCode::Char('-') => Input::Operator(Operator::Subtract),
            KeyCode::Char('*' | 'x') => Input::Operator(Operator::Multiply),
            KeyCode::Char('/') => Input::Operator(Operator::Divide),
            KeyCode::Enter | KeyCode::Char('=') => Input::Equals,
            KeyCode::Esc | KeyCode::Char('c') => Input::Clear,
            KeyCode::Backspace => Input::Backspace,
            KeyCode::Char('n') => Input::ToggleSign,
            KeyCode::Char('%') => Input::Percentage,
            KeyCode::Char('r') => Input::SquareRoot,
            KeyCode::Char('s') => Input::Square,
            KeyCode::Char('i') => Input::Reciprocal,
            KeyCode::Char('p') => Input::Pi,
            KeyCode::F(1) => Input::Memory(MemoryOp::Clear),
            KeyCode::F(2) => Input::Memory(MemoryOp::Recall),
            KeyCode::F(3) => Input::Memory(MemoryOp::Add),
            KeyCode::F(4) => Input::Memory(MemoryOp::Subtract),
            KeyCode::Char('q') => return KeyAction::Quit,
            _ => return KeyAction::None,
        };
        KeyAction::Press(input)
    }

    /// Returns the click position of a left-button press
    #[must_use]
    pub fn click_position(&self, event: MouseEvent) -> Option<(u16, u16)> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key(key(code))
    }

    #[test]
    fn test_digit_keys() {
        for (d, c) in ('0'..='9').enumerate() {
            assert_eq!(
                press(KeyCode::Char(c)),
                KeyAction::Press(Input::Digit(d as u8))
            );
        }
    }

    #[test]
    fn test_operator_keys() {
        assert_eq!(press(KeyCode::Char('+')), KeyAction::Press(Input::Operator(Operator::Add)));
        assert_eq!(
            press(KeyCode::Char('-')),
            KeyAction::Press(Input::Operator(Operator::Subtract))
        );
        assert_eq!(
            press(KeyCode::Char('x')),
            KeyAction::Press(Input::Operator(Operator::Multiply))
        );
        assert_eq!(
            press(KeyCode::Char('/')),
            KeyAction::Press(Input::Operator(Operator::Divide))
        );
    }

    #[test]
    fn test_equals_and_clear() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Press(Input::Equals));
        assert_eq!(press(KeyCode::Char('=')), KeyAction::Press(Input::Equals));
        assert_eq!(press(KeyCode::Esc), KeyAction::Press(Input::Clear));
        assert_eq!(press(KeyCode::Char('c')), KeyAction::Press(Input::Clear));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(press(KeyCode::Char('n')), KeyAction::Press(Input::ToggleSign));
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Press(Input::SquareRoot));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Press(Input::Square));
        assert_eq!(press(KeyCode::Char('i')), KeyAction::Press(Input::Reciprocal));
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Press(Input::Pi));
        assert_eq!(press(KeyCode::Backspace), KeyAction::Press(Input::Backspace));
    }

    #[test]
    fn test_memory_keys() {
        assert_eq!(press(KeyCode::F(1)), KeyAction::Press(Input::Memory(MemoryOp::Clear)));
        assert_eq!(press(KeyCode::F(4)), KeyAction::Press(Input::Memory(MemoryOp::Subtract)));
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            KeyAction::None
        );
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(press(KeyCode::Char('z')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
        assert_eq!(press(KeyCode::F(9)), KeyAction::None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut event = key(KeyCode::Char('5'));
        event.kind = KeyEventKind::Release;
        assert_eq!(InputHandler::new().handle_key(event), KeyAction::None);
    }

    #[test]
    fn test_click_position() {
        let handler = InputHandler::new();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(handler.click_position(click), Some((12, 7)));

        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            ..click
        };
        assert_eq!(handler.click_position(drag), None);
    }
}
