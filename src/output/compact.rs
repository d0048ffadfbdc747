//! One-line-per-diagnostic output, grep-friendly

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;

/// Compact formatter: `file:line:col: severity: message [rule]`
pub struct CompactFormatter;

impl CompactFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();
        for diagnostic in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diagnostic));
            output.push('\n');
        }
        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        format!(
            "{}:{}:{}: {}: {} [{}]",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.severity,
            diagnostic.message,
            diagnostic.rule_id
        )
    }
}
