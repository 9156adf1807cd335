//! `clock`, `meta` and `config` handlers

use deskcalc::clock::{ClockFormat, ClockWidget};

use crate::config::DeskConfig;
use crate::error::CliResult;

/// Current local time in `format`
#[must_use]
pub fn execute_clock(format: ClockFormat) -> String {
    ClockWidget::new(format).text().to_string()
}

/// Head tags for the configured page metadata
#[must_use]
pub fn execute_meta(desk: &DeskConfig) -> String {
    desk.meta.render_head()
}

/// Effective configuration as YAML
pub fn execute_config(desk: &DeskConfig) -> CliResult<String> {
    desk.to_yaml()
}
