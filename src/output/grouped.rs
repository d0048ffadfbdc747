//! Output grouped by severity

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::Colorize;

/// Formatter that groups diagnostics by severity, errors first
pub struct GroupedFormatter;

impl GroupedFormatter {
    pub fn new() -> Self {
        Self
    }

    fn section(
        output: &mut String,
        header: colored::ColoredString,
        diagnostics: &[&Diagnostic],
    ) {
        if diagnostics.is_empty() {
            return;
        }
        output.push_str(&format!("{} ({})\n", header, diagnostics.len()));
        for d in diagnostics {
            output.push_str(&format!(
                "  {}:{}:{} [{}] {}\n",
                d.location.file.display(),
                d.location.line,
                d.location.column,
                d.rule_id.cyan(),
                d.message
            ));
            if let Some(suggestion) = &d.suggestion {
                output.push_str(&format!("      suggestion: {}\n", suggestion));
            }
        }
        output.push('\n');
    }
}

impl Default for GroupedFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for GroupedFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        let by_severity = |s: Severity| -> Vec<&Diagnostic> {
            result
                .diagnostics
                .iter()
                .filter(|d| d.severity == s)
                .collect()
        };

        Self::section(&mut output, "Errors".red().bold(), &by_severity(Severity::Error));
        Self::section(
            &mut output,
            "Warnings".yellow().bold(),
            &by_severity(Severity::Warning),
        );
        Self::section(&mut output, "Info".blue().bold(), &by_severity(Severity::Info));

        output.push_str(&format!(
            "{} file(s) checked: {} error(s), {} warning(s), {} info\n",
            result.files_processed, result.error_count, result.warning_count, result.info_count
        ));
        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "  {}:{}:{} [{}] {}",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.rule_id,
            diagnostic.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Category, Location};

    fn diag(rule: &str, severity: Severity) -> Diagnostic {
        Diagnostic::new(rule, severity, Category::Syntax, "msg", Location::new(1, 1))
    }

    #[test]
    fn test_errors_before_warnings() {
        colored::control::set_override(false);
        let result = LintResult {
            diagnostics: vec![
                diag("dot-length", Severity::Warning),
                diag("unterminated-string", Severity::Error),
            ],
            files_processed: 1,
            error_count: 1,
            warning_count: 1,
            ..Default::default()
        };
        let out = GroupedFormatter::new().format(&result);
        let errors_at = out.find("Errors (1)").unwrap();
        let warnings_at = out.find("Warnings (1)").unwrap();
        assert!(errors_at < warnings_at);
    }

    #[test]
    fn test_empty_sections_omitted() {
        colored::control::set_override(false);
        let result = LintResult {
            diagnostics: vec![diag("dot-length", Severity::Warning)],
            files_processed: 1,
            warning_count: 1,
            ..Default::default()
        };
        let out = GroupedFormatter::new().format(&result);
        assert!(!out.contains("Errors"));
        assert!(out.contains("Warnings (1)"));
    }
}
