//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::clock::TimeSource;
use crate::core::numfmt::format_number;

/// Title shown on the outer frame
pub const APP_TITLE: &str = " deskcalc ";

/// Keyboard shortcuts listed in the help panel
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-x/", "Operators"),
    ("Enter", "Equals"),
    ("Esc", "Clear"),
    ("Bksp", "Delete"),
    ("n %", "Sign, percent"),
    ("r s i", "√, x², 1/x"),
    ("p", "π"),
    ("F1-F4", "MC MR M+ M-"),
    ("q", "Quit"),
];

const KEYPAD_WIDTH: u16 = 28;

/// Renders the calculator UI to the frame
pub fn render<T: TimeSource>(app: &CalculatorApp<T>, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Screen areas of the calculator UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Areas {
    display: Rect,
    status: Rect,
    help: Rect,
    keypad: Rect,
}

fn layout(area: Rect) -> Areas {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(24), Constraint::Length(KEYPAD_WIDTH)])
        .split(inner);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Expression + display
            Constraint::Length(3), // Memory
            Constraint::Min(0),    // Help
        ])
        .split(columns[0]);

    Areas {
        display: left[0],
        status: left[1],
        help: left[2],
        keypad: columns[1],
    }
}

/// Where the keypad is drawn inside a frame of size `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    layout(area).keypad
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a, T: TimeSource> {
    app: &'a CalculatorApp<T>,
}

impl<'a, T: TimeSource> CalculatorUI<'a, T> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp<T>) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let state = self.app.state();
        let display_style = if state.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                state.expression().to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(state.display().to_string(), display_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Calculator ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let memory = self.app.state().memory();
        let text = if memory == 0.0 {
            Span::styled("M: empty", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                format!("M: {}", format_number(memory)),
                Style::default().fg(Color::Yellow),
            )
        };

        Paragraph::new(Line::from(text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>6}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl<T: TimeSource> Widget for CalculatorUI<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(APP_TITLE)
            .title_top(Line::from(format!(" {} ", self.app.clock_text())).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let areas = layout(area);
        self.render_display(areas.display, buf);
        self.render_status(areas.status, buf);
        self.render_help(areas.help, buf);
        KeypadWidget::new(self.app.keypad()).render(areas.keypad, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ClockFormat, ClockWidget, FixedTime};
    use crate::core::{Input, MemoryOp, Operator};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn fixed_app() -> CalculatorApp<FixedTime> {
        let time = NaiveDate::from_ymd_opt(2026, 1, 5)
            .and_then(|d| d.and_hms_opt(15, 7, 0))
            .unwrap();
        CalculatorApp::with_clock(ClockWidget::with_source(FixedTime(time), ClockFormat::Full))
    }

    fn draw(app: &CalculatorApp<FixedTime>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_fits_frame() {
        let frame = Rect::new(0, 0, 60, 20);
        let areas = layout(frame);
        assert_eq!(areas.keypad.width, KEYPAD_WIDTH);
        assert_eq!(areas.display.height, 4);
        assert_eq!(keypad_area(frame), areas.keypad);
        assert!(areas.keypad.x + areas.keypad.width <= 59);
    }

    #[test]
    fn test_render_initial() {
        let content = draw(&fixed_app());
        assert!(content.contains("deskcalc"));
        assert!(content.contains("Mon Jan 5 3:07 PM"));
        assert!(content.contains("Calculator"));
        assert!(content.contains("M: empty"));
        assert!(content.contains("Keypad"));
        assert!(content.contains("Help"));
    }

    #[test]
    fn test_render_expression_and_display() {
        let mut app = fixed_app();
        app.press(Input::Digit(4));
        app.press(Input::Digit(2));
        app.press(Input::Operator(Operator::Add));
        app.press(Input::Digit(7));
        let content = draw(&app);
        assert!(content.contains("42 +"));
        assert!(content.contains('7'));
    }

    #[test]
    fn test_render_error() {
        let mut app = fixed_app();
        app.press(Input::Reciprocal);
        let content = draw(&app);
        assert!(content.contains("Error"));
    }

    #[test]
    fn test_render_memory() {
        let mut app = fixed_app();
        app.press(Input::Digit(9));
        app.press(Input::Memory(MemoryOp::Add));
        let content = draw(&app);
        assert!(content.contains("M: 9"));
    }

    #[test]
    fn test_render_tiny_frame_does_not_panic() {
        let app = fixed_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
