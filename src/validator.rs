//! The diagnostic engine entry point
//!
//! `validate` is a pure function of the source text: it holds no state
//! between calls, performs no I/O, and never fails on malformed Lua -
//! malformed input produces diagnostics, not errors.

use crate::checks::RuleSet;
use crate::diagnostic::Diagnostic;
use crate::lexer;
use crate::structure;

/// Runs every per-line check plus the structural pass over a source text
pub struct Validator {
    rules: RuleSet,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
        }
    }

    /// Validate a full source text, returning diagnostics ordered by line
    /// number and, within a line, by discovery order
    pub fn validate(&self, source: &str) -> Vec<Diagnostic> {
        let scanned = lexer::scan(source);
        let mut diags = Vec::new();

        for (idx, line) in source.lines().enumerate() {
            let s = &scanned[idx];
            // Lines with no code outside strings and comments carry
            // nothing to check: blank lines, full single-line comments,
            // and lines inside long-bracket comments or strings
            if !s.has_code() && s.open_quote.is_none() {
                continue;
            }
            self.rules.check_line(line, s, idx + 1, &mut diags);
        }

        structure::check(&scanned, &mut diags);

        // The structural pass reports opening lines that precede the last
        // per-line diagnostics; a stable sort restores the line ordering
        // contract while keeping discovery order within a line
        diags.sort_by_key(|d| d.location.line);
        diags
    }
}

/// Validate a source text with the default rule set
pub fn validate(source: &str) -> Vec<Diagnostic> {
    Validator::new().validate(source)
}
