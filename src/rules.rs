//! Rule registry
//!
//! Every diagnostic the validator can emit is tagged with a rule ID from
//! this table. The registry backs `--list-rules`, `explain`, rule
//! disabling, and severity overrides.

use crate::diagnostic::{Category, Diagnostic, Location, Severity};

/// Static metadata for a single rule
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    /// Unique rule identifier
    pub id: &'static str,
    /// Default severity
    pub severity: Severity,
    /// Problem category
    pub category: Category,
    /// Short description for `--list-rules` and `explain`
    pub description: &'static str,
}

/// All rules, in the order the validator runs them
pub const RULES: &[RuleInfo] = &[
    RuleInfo {
        id: "unterminated-string",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "A quoted string literal is not closed before the end of the line",
    },
    RuleInfo {
        id: "keyword-as-function-name",
        severity: Severity::Error,
        category: Category::Semantic,
        description: "A reserved keyword is used as a function name",
    },
    RuleInfo {
        id: "missing-parentheses",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "A function declaration has no parameter list",
    },
    RuleInfo {
        id: "misspelled-word",
        severity: Severity::Warning,
        category: Category::Spelling,
        description: "A keyword or built-in name appears to be misspelled",
    },
    RuleInfo {
        id: "else-if-style",
        severity: Severity::Warning,
        category: Category::Style,
        description: "Lua spells 'else if' as the single keyword 'elseif'",
    },
    RuleInfo {
        id: "keyword-as-variable",
        severity: Severity::Error,
        category: Category::Semantic,
        description: "A reserved keyword is declared as a local variable",
    },
    RuleInfo {
        id: "assign-to-keyword",
        severity: Severity::Error,
        category: Category::Semantic,
        description: "A reserved keyword appears on the left of an assignment",
    },
    RuleInfo {
        id: "foreign-operator",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "An operator from another language that is not valid in Lua",
    },
    RuleInfo {
        id: "assignment-in-condition",
        severity: Severity::Warning,
        category: Category::Logic,
        description: "A bare '=' inside an 'if' condition, probably meant '=='",
    },
    RuleInfo {
        id: "dot-method-call",
        severity: Severity::Info,
        category: Category::Style,
        description: "A library method called with '.' where ':' is conventional",
    },
    RuleInfo {
        id: "if-missing-then",
        severity: Severity::Error,
        category: Category::Syntax,
        description: "An 'if' statement closed with 'do' instead of 'then'",
    },
    RuleInfo {
        id: "dot-length",
        severity: Severity::Warning,
        category: Category::Style,
        description: "'.length' used where Lua's '#' length operator applies",
    },
    RuleInfo {
        id: "unexpected-end",
        severity: Severity::Error,
        category: Category::Structure,
        description: "An 'end' with no open block to close",
    },
    RuleInfo {
        id: "unmatched-until",
        severity: Severity::Error,
        category: Category::Structure,
        description: "An 'until' with no open 'repeat' block",
    },
    RuleInfo {
        id: "unclosed-block",
        severity: Severity::Error,
        category: Category::Structure,
        description: "A block keyword whose terminator never appears",
    },
];

/// Look up a rule by ID
pub fn find(id: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|r| r.id == id)
}

/// Build a diagnostic with severity and category taken from the registry
pub fn diagnostic(
    rule_id: &str,
    message: &str,
    line: usize,
    column: usize,
    length: usize,
) -> Diagnostic {
    let info = find(rule_id).expect("rule id registered");
    Diagnostic::new(
        rule_id,
        info.severity,
        info.category,
        message,
        Location::new(line, column).with_length(length),
    )
}
