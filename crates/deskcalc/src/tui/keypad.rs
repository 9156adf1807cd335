//! Keypad rendering and mouse hit-testing
//!
//! Wraps the [`Keypad`] model with a highlighted button so a key pressed on
//! the keyboard lights up on screen, and maps mouse clicks back to buttons.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::Input;
use crate::keypad::{ButtonStyle, Keypad};

/// Keypad plus the currently highlighted button
#[derive(Debug, Clone, Default)]
pub struct KeypadState {
    keypad: Keypad,
    pressed: Option<usize>,
}

impl KeypadState {
    /// Creates a keypad with nothing highlighted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Index of the highlighted button
    #[must_use]
    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    /// Highlights the button producing `input`, releasing any other
    pub fn highlight(&mut self, input: Input) {
        self.pressed = self.keypad.position_of(input);
    }

    /// Releases the highlighted button
    pub fn release(&mut self) {
        self.pressed = None;
    }

    /// Converts a click position inside `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell wide on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let (rows, cols) = self.keypad.dimensions();
        let btn_width = (area.width - 2) / cols as u16;
        let btn_height = (area.height - 2) / rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;
        if row < rows && col < cols {
            Some(row * cols + col)
        } else {
            None
        }
    }

    /// Input of the button under a click, if any
    #[must_use]
    pub fn input_at(&self, area: Rect, x: u16, y: u16) -> Option<Input> {
        let index = self.hit_test(area, x, y)?;
        self.keypad.get_button(index).map(|b| b.input)
    }
}

fn button_style(style: ButtonStyle) -> Style {
    match style {
        ButtonStyle::Digit => Style::default().fg(Color::White),
        ButtonStyle::Operator => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        ButtonStyle::Clear => Style::default().fg(Color::Red),
        ButtonStyle::Function => Style::default().fg(Color::Gray),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    state: &'a KeypadState,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(state: &'a KeypadState) -> Self {
        Self { state }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.state.keypad.dimensions();
        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        // Widest label is "[1/x]"
        if btn_width < 5 || btn_height == 0 {
            return;
        }

        for (index, btn) in self.state.keypad.buttons().iter().enumerate() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;

            let style = if self.state.pressed == Some(index) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                button_style(btn.style)
            };

            let span = Span::styled(format!("[{}]", btn.label), style);
            let label_x = x + btn_width.saturating_sub(span.width() as u16) / 2;
            buf.set_span(label_x, y, &span, btn_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MemoryOp, Operator};

    fn rendered(state: &KeypadState, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(state).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_highlight_and_release() {
        let mut state = KeypadState::new();
        state.highlight(Input::Digit(7));
        assert_eq!(state.pressed(), Some(8));
        state.highlight(Input::Operator(Operator::Add));
        assert_eq!(state.pressed(), Some(19));
        state.release();
        assert_eq!(state.pressed(), None);
    }

    #[test]
    fn test_highlight_unknown_input_releases() {
        let mut state = KeypadState::new();
        state.highlight(Input::Digit(7));
        state.highlight(Input::Digit(42));
        assert_eq!(state.pressed(), None);
    }

    #[test]
    fn test_hit_test_inside() {
        let state = KeypadState::new();
        // 24x7 inner cells: buttons are 6 wide and 1 tall
        let area = Rect::new(10, 5, 26, 9);
        assert_eq!(state.hit_test(area, 11, 6), Some(0));
        assert_eq!(state.hit_test(area, 17, 6), Some(1));
        assert_eq!(state.hit_test(area, 11, 7), Some(4));
        assert_eq!(state.hit_test(area, 34, 12), Some(27));
    }

    #[test]
    fn test_hit_test_outside_and_border() {
        let state = KeypadState::new();
        let area = Rect::new(10, 5, 26, 9);
        assert_eq!(state.hit_test(area, 9, 6), None);
        assert_eq!(state.hit_test(area, 10, 6), None);
        assert_eq!(state.hit_test(area, 11, 5), None);
        assert_eq!(state.hit_test(area, 35, 13), None);
        assert_eq!(state.hit_test(area, 50, 50), None);
    }

    #[test]
    fn test_hit_test_too_small() {
        let state = KeypadState::new();
        assert_eq!(state.hit_test(Rect::new(0, 0, 4, 4), 1, 1), None);
    }

    #[test]
    fn test_input_at() {
        let state = KeypadState::new();
        let area = Rect::new(0, 0, 26, 9);
        assert_eq!(state.input_at(area, 1, 1), Some(Input::Memory(MemoryOp::Clear)));
        assert_eq!(state.input_at(area, 19, 6), Some(Input::Equals));
        assert_eq!(state.input_at(area, 0, 0), None);
    }

    #[test]
    fn test_render_labels() {
        let state = KeypadState::new();
        let content = rendered(&state, Rect::new(0, 0, 26, 16));
        assert!(content.contains("Keypad"));
        for label in ["[MC]", "[7]", "[×]", "[÷]", "[1/x]", "[π]", "[=]"] {
            assert!(content.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_render_small_only_draws_border() {
        let state = KeypadState::new();
        let content = rendered(&state, Rect::new(0, 0, 10, 5));
        assert!(!content.contains("[7]"));
    }

    #[test]
    fn test_render_pressed_is_highlighted() {
        let mut state = KeypadState::new();
        state.highlight(Input::Digit(5));
        let area = Rect::new(0, 0, 26, 16);
        let mut buf = Buffer::empty(area);
        KeypadWidget::new(&state).render(area, &mut buf);

        let highlighted = buf
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .map(|c| c.symbol())
            .collect::<String>();
        assert_eq!(highlighted, "[5]");
    }
}
