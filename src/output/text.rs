//! Human-readable text output

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::Colorize;

/// Default text formatter with colored output
pub struct TextFormatter {
    verbose: bool,
    show_stats: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool, show_stats: bool) -> Self {
        Self {
            verbose,
            show_stats,
        }
    }

    fn severity_label(severity: Severity) -> colored::ColoredString {
        match severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diagnostic in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diagnostic));
            output.push('\n');
        }

        if self.show_stats {
            if !result.diagnostics.is_empty() {
                output.push('\n');
            }

            let summary = format!(
                "{} file(s) checked: {} error(s), {} warning(s), {} info",
                result.files_processed, result.error_count, result.warning_count, result.info_count
            );
            if result.has_errors() {
                output.push_str(&summary.red().to_string());
            } else if result.warning_count > 0 {
                output.push_str(&summary.yellow().to_string());
            } else {
                output.push_str(&format!("{} {}", "✓".green(), summary.green()));
            }
            output.push('\n');
        }

        if self.verbose {
            output.push_str(&format!(
                "completed in {:.2?}\n",
                result.duration
            ));
        }

        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = format!(
            "{}:{}:{}: {} [{}] {}",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
            Self::severity_label(diagnostic.severity),
            diagnostic.rule_id.cyan(),
            diagnostic.message
        );

        if let Some(line) = &diagnostic.source_line {
            output.push_str(&format!("\n    {}", line.dimmed()));
            if diagnostic.location.column > 0 {
                let pad = " ".repeat(diagnostic.location.column - 1);
                let carets = "^".repeat(diagnostic.location.length.max(1));
                output.push_str(&format!("\n    {}{}", pad, carets.red()));
            }
        }

        if let Some(suggestion) = &diagnostic.suggestion {
            output.push_str(&format!(
                "\n    {} {}",
                "suggestion:".green(),
                suggestion
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Category, Location};
    use std::path::PathBuf;

    fn sample() -> Diagnostic {
        let mut d = Diagnostic::new(
            "if-missing-then",
            Severity::Error,
            Category::Syntax,
            "Use 'then' instead of 'do' after 'if' condition",
            Location::new(1, 11).with_length(2),
        )
        .with_suggestion("then")
        .with_source_line("if x == 1 do print(x) end");
        d.location.file = PathBuf::from("game.lua");
        d
    }

    #[test]
    fn test_format_diagnostic() {
        colored::control::set_override(false);
        let out = TextFormatter::new(false, true).format_diagnostic(&sample());
        assert!(out.starts_with("game.lua:1:11: error [if-missing-then]"));
        assert!(out.contains("if x == 1 do print(x) end"));
        assert!(out.contains("          ^^"));
        assert!(out.contains("suggestion: then"));
    }

    #[test]
    fn test_format_summary() {
        colored::control::set_override(false);
        let result = LintResult {
            diagnostics: vec![sample()],
            files_processed: 1,
            files_with_errors: 1,
            error_count: 1,
            ..Default::default()
        };
        let out = TextFormatter::new(false, true).format(&result);
        assert!(out.contains("1 file(s) checked: 1 error(s), 0 warning(s), 0 info"));
    }

    #[test]
    fn test_clean_summary() {
        colored::control::set_override(false);
        let result = LintResult {
            files_processed: 2,
            ..Default::default()
        };
        let out = TextFormatter::new(false, true).format(&result);
        assert!(out.contains("2 file(s) checked: 0 error(s)"));
    }

    #[test]
    fn test_stats_suppressed() {
        colored::control::set_override(false);
        let result = LintResult {
            diagnostics: vec![sample()],
            files_processed: 1,
            error_count: 1,
            files_with_errors: 1,
            ..Default::default()
        };
        let out = TextFormatter::new(false, false).format(&result);
        assert!(out.contains("game.lua:1:11"));
        assert!(!out.contains("file(s) checked"));
    }
}
