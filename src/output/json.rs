//! JSON output for machine consumption

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule: &'a str,
    severity: String,
    category: String,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    errors: usize,
    warnings: usize,
    info: usize,
    duration_ms: u128,
}

impl<'a> JsonDiagnostic<'a> {
    fn from(d: &'a Diagnostic) -> Self {
        Self {
            rule: &d.rule_id,
            severity: d.severity.to_string(),
            category: d.category.to_string(),
            message: &d.message,
            file: d.location.file.display().to_string(),
            line: d.location.line,
            column: d.location.column,
            length: d.location.length,
            suggestion: d.suggestion.as_deref(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            diagnostics: result.diagnostics.iter().map(JsonDiagnostic::from).collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                errors: result.error_count,
                warnings: result.warning_count,
                info: result.info_count,
                duration_ms: result.duration.as_millis(),
            },
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        serde_json::to_string(&JsonDiagnostic::from(diagnostic))
            .unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Category, Location, Severity};
    use std::path::PathBuf;

    #[test]
    fn test_json_output_parses() {
        let mut d = Diagnostic::new(
            "misspelled-word",
            Severity::Warning,
            Category::Spelling,
            "Misspelled keyword: 'funciton' should be 'function'",
            Location::new(1, 1).with_length(8),
        )
        .with_suggestion("function");
        d.location.file = PathBuf::from("a.lua");

        let result = LintResult {
            diagnostics: vec![d],
            files_processed: 1,
            warning_count: 1,
            files_with_warnings: 1,
            ..Default::default()
        };

        let out = JsonFormatter::new().format(&result);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["diagnostics"][0]["rule"], "misspelled-word");
        assert_eq!(value["diagnostics"][0]["severity"], "warning");
        assert_eq!(value["diagnostics"][0]["category"], "spelling");
        assert_eq!(value["diagnostics"][0]["suggestion"], "function");
        assert_eq!(value["summary"]["warnings"], 1);
    }

    #[test]
    fn test_suggestion_omitted_when_absent() {
        let d = Diagnostic::new(
            "unexpected-end",
            Severity::Error,
            Category::Structure,
            "Unexpected 'end' - no matching block statement",
            Location::new(3, 1),
        );
        let out = JsonFormatter::new().format_diagnostic(&d);
        assert!(!out.contains("suggestion"));
    }
}
