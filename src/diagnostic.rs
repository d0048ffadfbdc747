//! Diagnostic types for lint results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// What kind of problem a diagnostic describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Malformed source text (unterminated strings, missing tokens)
    Syntax,
    /// Legal-looking text with an invalid meaning (keyword used as a name)
    Semantic,
    /// A misspelled keyword or built-in name
    Spelling,
    /// Working code that reads better another way
    Style,
    /// Code that likely does not do what the author intended
    Logic,
    /// Unbalanced block keywords and terminators
    Structure,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Syntax => write!(f, "syntax"),
            Category::Semantic => write!(f, "semantic"),
            Category::Spelling => write!(f, "spelling"),
            Category::Style => write!(f, "style"),
            Category::Logic => write!(f, "logic"),
            Category::Structure => write!(f, "structure"),
        }
    }
}

/// Source code location
///
/// Line and column are 1-based; column is measured against the raw
/// (untrimmed) line text. The validator leaves `file` empty and the
/// engine fills it in when linting from disk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// File path (empty when linting a bare string)
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of the highlighted region
    pub length: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: PathBuf::new(),
            line,
            column,
            length: 0,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// A single reported issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that produced this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Problem category
    pub category: Category,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Location,
    /// Suggested replacement text, when the rule has one
    pub suggestion: Option<String>,
    /// The source line (for display)
    pub source_line: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        rule_id: &str,
        severity: Severity,
        category: Category,
        message: &str,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            category,
            message: message.to_string(),
            location,
            suggestion: None,
            source_line: None,
        }
    }

    /// Attach a suggested replacement
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// Attach the source line for display
    pub fn with_source_line(mut self, line: &str) -> Self {
        self.source_line = Some(line.to_string());
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
