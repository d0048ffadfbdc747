//! Output formatting for lint results

mod compact;
mod grouped;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use grouped::GroupedFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::config::OutputFormat;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a complete lint result
    fn format(&self, result: &LintResult) -> String;

    /// Format a single diagnostic
    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String;
}

/// Create a formatter for the given output format
pub fn create_formatter(
    format: OutputFormat,
    verbose: bool,
    show_stats: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose, show_stats)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Grouped => Box::new(GroupedFormatter::new()),
        OutputFormat::Compact => Box::new(CompactFormatter::new()),
    }
}
