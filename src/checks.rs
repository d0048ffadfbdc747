//! Per-line rule checks
//!
//! Each check receives one raw line (columns are measured against the
//! untrimmed text) plus the shared lexical scan of that line, and appends
//! diagnostics to the sink. Checks are independent; their order only
//! decides diagnostic ordering within a line.

use crate::diagnostic::Diagnostic;
use crate::lexer::{char_col, ScannedLine};
use crate::rules::diagnostic as diag;
use regex::Regex;
use std::collections::HashSet;

/// Reserved words, including the Luau additions
pub const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    // Luau specific
    "type", "export", "continue", "typeof",
];

/// Misspelled token -> canonical correction
const MISSPELLINGS: &[(&str, &str)] = &[
    ("funciton", "function"),
    ("fucntion", "function"),
    ("funtion", "function"),
    ("functoin", "function"),
    ("retrun", "return"),
    ("retrn", "return"),
    ("reutrn", "return"),
    ("esle", "else"),
    ("elsif", "elseif"),
    ("elsefi", "elseif"),
    ("whiel", "while"),
    ("wihle", "while"),
    ("repat", "repeat"),
    ("repet", "repeat"),
    ("untill", "until"),
    ("untl", "until"),
    ("locl", "local"),
    ("loal", "local"),
    ("lacal", "local"),
    ("pirnt", "print"),
    ("prnit", "print"),
    ("prnt", "print"),
    ("lenght", "length"),
    ("lengh", "length"),
    ("tabel", "table"),
    ("tbale", "table"),
    ("stirng", "string"),
    ("srting", "string"),
    ("strig", "string"),
    ("numbr", "number"),
    ("numer", "number"),
    ("boolen", "boolean"),
    ("bolean", "boolean"),
];

/// Library methods conventionally called with ':'
const COLON_METHODS: &[&str] = &[
    "insert", "remove", "sort", "concat", "find", "sub", "gsub", "match",
];

/// Foreign operators and their Lua replacements, longest first so a
/// longer operator shadows its substrings
const FOREIGN_OPS: &[(&str, &str)] = &[
    ("===", "=="),
    ("!==", "~="),
    ("!=", "~="),
    ("++", "variable = variable + 1"),
    ("&&", "and"),
    ("||", "or"),
];

/// Compiled patterns for the per-line checks, built once per validator
pub struct RuleSet {
    keywords: HashSet<&'static str>,
    misspellings: Vec<(Regex, &'static str)>,
    func_decl: Regex,
    func_bare: Regex,
    local_decl: Regex,
    assign: Regex,
    method_call: Regex,
    if_do: Regex,
    if_word: Regex,
    decrement: Regex,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSet {
    pub fn new() -> Self {
        let misspellings = MISSPELLINGS
            .iter()
            .map(|(wrong, right)| {
                // Whole-word, case-insensitive
                let re = Regex::new(&format!(r"(?i)\b{}\b", wrong)).unwrap();
                (re, *right)
            })
            .collect();

        Self {
            keywords: KEYWORDS.iter().copied().collect(),
            misspellings,
            func_decl: Regex::new(r"\b(?:local\s+)?function\s+([A-Za-z_]\w*)\s*\(").unwrap(),
            func_bare: Regex::new(r"\bfunction\s+[A-Za-z_]\w*").unwrap(),
            local_decl: Regex::new(r"\blocal\s+([A-Za-z_]\w*)").unwrap(),
            assign: Regex::new(r"\b([A-Za-z_]\w*)\s*=").unwrap(),
            method_call: Regex::new(r"([A-Za-z_]\w*)\.([A-Za-z_]\w*)\s*\(").unwrap(),
            // Lazy so the first plausible `do` after the condition is
            // the one reported
            if_do: Regex::new(r"\bif\s+.+?\s+(do)\b").unwrap(),
            if_word: Regex::new(r"\bif\b").unwrap(),
            decrement: Regex::new(r"[A-Za-z0-9_](--)").unwrap(),
        }
    }

    /// True when the word is reserved
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Run every per-line check against one raw line
    pub fn check_line(
        &self,
        line: &str,
        scanned: &ScannedLine,
        line_no: usize,
        diags: &mut Vec<Diagnostic>,
    ) {
        self.check_string_termination(line, scanned, line_no, diags);
        self.check_function_syntax(line, line_no, diags);
        self.check_misspellings(line, line_no, diags);
        self.check_declarations(line, line_no, diags);
        self.check_operators(line, scanned, line_no, diags);
        self.check_common_mistakes(line, line_no, diags);
    }

    fn check_string_termination(
        &self,
        line: &str,
        scanned: &ScannedLine,
        line_no: usize,
        diags: &mut Vec<Diagnostic>,
    ) {
        if let Some(quote) = scanned.open_quote {
            // Column of the last occurrence of the opening delimiter
            let col = line
                .char_indices()
                .filter(|&(_, c)| c == quote)
                .map(|(i, _)| char_col(line, i))
                .next_back()
                .unwrap_or(1);
            diags.push(diag(
                "unterminated-string",
                "Unterminated string literal",
                line_no,
                col,
                1,
            ));
        }
    }

    fn check_function_syntax(&self, line: &str, line_no: usize, diags: &mut Vec<Diagnostic>) {
        if let Some(caps) = self.func_decl.captures(line) {
            let name = caps.get(1).unwrap();
            if self.is_keyword(name.as_str()) && name.as_str() != "function" {
                diags.push(diag(
                    "keyword-as-function-name",
                    &format!("Cannot use keyword '{}' as function name", name.as_str()),
                    line_no,
                    char_col(line, name.start()),
                    name.as_str().chars().count(),
                ));
            }
        }

        if !line.contains('(') {
            if let Some(m) = self.func_bare.find(line) {
                diags.push(diag(
                    "missing-parentheses",
                    "Function declaration missing parentheses",
                    line_no,
                    char_col(line, m.start()),
                    "function".len(),
                ));
            }
        }
    }

    fn check_misspellings(&self, line: &str, line_no: usize, diags: &mut Vec<Diagnostic>) {
        for (re, correction) in &self.misspellings {
            for m in re.find_iter(line) {
                diags.push(
                    diag(
                        "misspelled-word",
                        &format!("Did you mean '{}'? Found '{}'", correction, m.as_str()),
                        line_no,
                        char_col(line, m.start()),
                        m.as_str().chars().count(),
                    )
                    .with_suggestion(correction),
                );
            }
        }

        if !line.contains("elseif") {
            if let Some(pos) = line.find("else if") {
                diags.push(
                    diag(
                        "else-if-style",
                        "Use 'elseif' instead of 'else if' in Lua",
                        line_no,
                        char_col(line, pos),
                        "else if".len(),
                    )
                    .with_suggestion("elseif"),
                );
            }
        }
    }

    fn check_declarations(&self, line: &str, line_no: usize, diags: &mut Vec<Diagnostic>) {
        // `local function` binds the name after `function`, not a variable
        if !line.contains("local function") {
            for caps in self.local_decl.captures_iter(line) {
                let name = caps.get(1).unwrap();
                if self.is_keyword(name.as_str()) {
                    diags.push(diag(
                        "keyword-as-variable",
                        &format!("Cannot use keyword '{}' as variable name", name.as_str()),
                        line_no,
                        char_col(line, name.start()),
                        name.as_str().chars().count(),
                    ));
                }
            }
        }

        // Bare assignment to a keyword; comparison operators and method
        // definitions are excluded to avoid false positives
        let has_comparison = line.contains("==")
            || line.contains("~=")
            || line.contains("<=")
            || line.contains(">=");
        if !has_comparison && !line.contains("function") {
            if let Some(caps) = self.assign.captures(line) {
                let name = caps.get(1).unwrap();
                if self.is_keyword(name.as_str()) {
                    diags.push(diag(
                        "assign-to-keyword",
                        &format!("Cannot assign to keyword '{}'", name.as_str()),
                        line_no,
                        char_col(line, name.start()),
                        name.as_str().chars().count(),
                    ));
                }
            }
        }
    }

    fn check_operators(
        &self,
        line: &str,
        scanned: &ScannedLine,
        line_no: usize,
        diags: &mut Vec<Diagnostic>,
    ) {
        // Operators inside strings and comments are not operators; scan
        // the code-masked text, longest operator first
        let masked = &scanned.masked;
        let mut taken: Vec<(usize, usize)> = Vec::new();
        for (op, replacement) in FOREIGN_OPS {
            let mut search = 0;
            while let Some(rel) = masked[search..].find(op) {
                let at = search + rel;
                search = at + op.len();
                if taken.iter().any(|&(s, e)| at < e && at + op.len() > s) {
                    continue;
                }
                taken.push((at, at + op.len()));
                diags.push(
                    diag(
                        "foreign-operator",
                        &format!("Invalid operator '{}'. Use '{}' instead", op, replacement),
                        line_no,
                        char_col(masked, at),
                        op.chars().count(),
                    )
                    .with_suggestion(replacement),
                );
                // One report per operator kind per line
                break;
            }
        }

        // `--` is also the comment marker; only an occurrence glued to an
        // identifier reads as a decrement
        if let Some(caps) = self.decrement.captures(line) {
            let m = caps.get(1).unwrap();
            // The masked text has the same character count as the raw
            // line, but byte offsets can differ once multibyte characters
            // are blanked, so compare by character position
            let ident_pos = line[..m.start()].chars().count() - 1;
            let ident_is_code = masked
                .chars()
                .nth(ident_pos)
                .map(|c| c != ' ')
                .unwrap_or(false);
            if ident_is_code {
                diags.push(
                    diag(
                        "foreign-operator",
                        "Invalid operator '--'. Use 'variable = variable - 1' instead",
                        line_no,
                        char_col(line, m.start()),
                        2,
                    )
                    .with_suggestion("variable = variable - 1"),
                );
            }
        }

        self.check_condition_assignment(masked, line_no, diags);
    }

    /// A bare `=` after `if` that is not part of `==`, `~=`, `<=`, `>=`
    fn check_condition_assignment(
        &self,
        masked: &str,
        line_no: usize,
        diags: &mut Vec<Diagnostic>,
    ) {
        let if_end = match self.if_word.find(masked) {
            Some(m) => m.end(),
            None => return,
        };

        let chars: Vec<char> = masked.chars().collect();
        let if_end_chars = masked[..if_end].chars().count();
        for i in if_end_chars..chars.len() {
            if chars[i] != '=' {
                continue;
            }
            let prev = if i > 0 { chars[i - 1] } else { ' ' };
            let next = chars.get(i + 1).copied().unwrap_or(' ');
            if !matches!(prev, '=' | '!' | '<' | '>' | '~') && next != '=' {
                diags.push(diag(
                    "assignment-in-condition",
                    "Use '==' for comparison, not '=' (assignment)",
                    line_no,
                    i + 1,
                    1,
                ));
                return;
            }
        }
    }

    fn check_common_mistakes(&self, line: &str, line_no: usize, diags: &mut Vec<Diagnostic>) {
        if let Some(caps) = self.method_call.captures(line) {
            let method = caps.get(2).unwrap();
            if COLON_METHODS.contains(&method.as_str()) {
                // Column of the '.' between receiver and method
                let dot_at = caps.get(1).unwrap().end();
                diags.push(diag(
                    "dot-method-call",
                    &format!(
                        "Consider using ':' instead of '.' for method call '{}'",
                        method.as_str()
                    ),
                    line_no,
                    char_col(line, dot_at),
                    1,
                ));
            }
        }

        if let Some(caps) = self.if_do.captures(line) {
            let m = caps.get(1).unwrap();
            diags.push(
                diag(
                    "if-missing-then",
                    "Use 'then' instead of 'do' in if statements",
                    line_no,
                    char_col(line, m.start()),
                    2,
                )
                .with_suggestion("then"),
            );
        }

        if let Some(pos) = line.find(".length") {
            diags.push(
                diag(
                    "dot-length",
                    "Use '#' operator instead of '.length' to get table/string length",
                    line_no,
                    char_col(line, pos),
                    ".length".len(),
                )
                .with_suggestion("#"),
            );
        }
    }
}
