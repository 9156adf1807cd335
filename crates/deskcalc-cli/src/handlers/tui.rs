//! Interactive terminal calculator

use std::io::{self, Stdout, Write};
use std::time::Instant;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deskcalc::analytics::{self, Analytics, TracingAnalytics};
use deskcalc::clock::{ClockFormat, ClockWidget};
use deskcalc::core::Evaluator;
use deskcalc::tui::{render, CalculatorApp};
use deskcalc::widget::CalculatorWidget;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

use crate::config::DeskConfig;
use crate::error::{CliError, CliResult};

/// Page path reported when the calculator opens
const PAGE_PATH: &str = "/calculator";

/// Builds the app from the loaded settings
#[must_use]
pub fn build_app(desk: &DeskConfig, clock_format: ClockFormat) -> CalculatorApp {
    let widget = CalculatorWidget::with_evaluator(Evaluator::with_config(desk.operators));
    CalculatorApp::with_parts(widget, ClockWidget::new(clock_format))
}

/// Installs global analytics and records the opening pageview
pub fn start_analytics(desk: &DeskConfig) {
    let facade = Analytics::new(desk.analytics.tracking_id.as_deref(), TracingAnalytics);
    if analytics::init_global(facade) {
        tracing::info!("analytics enabled");
    }
    analytics::track_pageview(PAGE_PATH, &desk.meta.title);
}

/// Runs the calculator until the user quits
pub fn execute_tui(desk: &DeskConfig, clock_format: ClockFormat) -> CliResult<()> {
    start_analytics(desk);
    let mut app = build_app(desk, clock_format);

    let mut terminal = setup_terminal().map_err(terminal_error)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    let restored = restore_terminal(terminal.backend_mut());
    terminal.show_cursor().map_err(terminal_error)?;

    result.map_err(terminal_error)?;
    restored.map_err(terminal_error)
}

/// Enters raw mode and the alternate screen, undoing both if a later step fails
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
    if entered.is_err() {
        let _ = restore_terminal(&mut stdout);
    }
    entered
}

/// Leaves raw mode and the alternate screen
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)?;
    raw
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal.draw(|frame| render(&*app, frame))?;

        let timeout = app.clock().until_next_tick(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if app.clock().due(last_tick.elapsed()) {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn terminal_error(err: io::Error) -> CliError {
    CliError::terminal(err.to_string())
}
