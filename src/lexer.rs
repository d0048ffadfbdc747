//! Line-by-line lexical state tracking
//!
//! One forward pass over the source classifies every character as code,
//! quoted string, long-bracket string, or comment, and records the lexical
//! state carried across each line boundary. The per-line rule checks and
//! the structural balancer both consume this scan, so string/comment
//! detection cannot diverge between passes.
//!
//! Lua long brackets open with `[`, zero or more `=`, `[` and close with
//! the mirrored form at the same `=` count (the "level"). A `--`
//! immediately followed by a long-bracket opener starts a multi-line
//! comment; `--` followed by anything else comments the rest of the line.
//! Quoted strings never span lines.

/// Lexical state at a line boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    /// Plain code
    #[default]
    Code,
    /// Inside a long-bracket comment of the given level
    Comment { level: usize },
    /// Inside a long-bracket string of the given level
    LongString { level: usize },
}

impl LexState {
    /// True when inside a multi-line comment
    pub fn in_comment(&self) -> bool {
        matches!(self, LexState::Comment { .. })
    }

    /// True when inside a multi-line string
    pub fn in_long_string(&self) -> bool {
        matches!(self, LexState::LongString { .. })
    }
}

/// The scan result for one source line
#[derive(Debug, Clone)]
pub struct ScannedLine {
    /// State the line starts in
    pub start_state: LexState,
    /// State the line ends in
    pub end_state: LexState,
    /// The line with every string and comment character blanked to a
    /// space; character count matches the raw line
    pub masked: String,
    /// Set when the line ends inside an unterminated quoted string
    pub open_quote: Option<char>,
}

impl ScannedLine {
    /// True when the line carries any code outside strings and comments
    pub fn has_code(&self) -> bool {
        !self.masked.trim().is_empty()
    }
}

/// Scan the whole source, carrying lexical state from line to line
pub fn scan(source: &str) -> Vec<ScannedLine> {
    let mut state = LexState::Code;
    source
        .lines()
        .map(|line| {
            let scanned = scan_line(line, state);
            state = scanned.end_state;
            scanned
        })
        .collect()
}

/// Scan a single line given the state it starts in
pub fn scan_line(line: &str, start_state: LexState) -> ScannedLine {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut masked = chars.clone();
    let mut state = start_state;
    let mut open_quote = None;
    let mut i = 0;

    while i < len {
        match state {
            LexState::Comment { level } | LexState::LongString { level } => {
                if closes_long_bracket(&chars, i, level) {
                    for m in masked.iter_mut().skip(i).take(level + 2) {
                        *m = ' ';
                    }
                    i += level + 2;
                    state = LexState::Code;
                } else {
                    masked[i] = ' ';
                    i += 1;
                }
            }
            LexState::Code => {
                let c = chars[i];
                if c == '-' && chars.get(i + 1) == Some(&'-') {
                    if let Some(level) = long_bracket_level(&chars, i + 2) {
                        let open_len = level + 4;
                        for m in masked.iter_mut().skip(i).take(open_len) {
                            *m = ' ';
                        }
                        i += open_len;
                        state = LexState::Comment { level };
                    } else {
                        // Line comment to end of line
                        for m in masked.iter_mut().skip(i) {
                            *m = ' ';
                        }
                        i = len;
                    }
                } else if c == '[' {
                    if let Some(level) = long_bracket_level(&chars, i) {
                        let open_len = level + 2;
                        for m in masked.iter_mut().skip(i).take(open_len) {
                            *m = ' ';
                        }
                        i += open_len;
                        state = LexState::LongString { level };
                    } else {
                        i += 1;
                    }
                } else if c == '"' || c == '\'' {
                    let quote = c;
                    let start = i;
                    i += 1;
                    let mut closed = false;
                    while i < len {
                        if chars[i] == '\\' {
                            i += 2;
                        } else if chars[i] == quote {
                            i += 1;
                            closed = true;
                            break;
                        } else {
                            i += 1;
                        }
                    }
                    let end = i.min(len);
                    for m in masked.iter_mut().take(end).skip(start) {
                        *m = ' ';
                    }
                    if !closed {
                        open_quote = Some(quote);
                    }
                    i = end;
                } else {
                    i += 1;
                }
            }
        }
    }

    ScannedLine {
        start_state,
        end_state: state,
        masked: masked.into_iter().collect(),
        open_quote,
    }
}

/// 1-based character column for a byte offset into a line
pub(crate) fn char_col(line: &str, byte_idx: usize) -> usize {
    line[..byte_idx].chars().count() + 1
}

/// Long-bracket opener level at `at` (`[`, `=`*level, `[`)
fn long_bracket_level(chars: &[char], at: usize) -> Option<usize> {
    if chars.get(at) != Some(&'[') {
        return None;
    }
    let mut level = 0;
    let mut i = at + 1;
    while chars.get(i) == Some(&'=') {
        level += 1;
        i += 1;
    }
    if chars.get(i) == Some(&'[') {
        Some(level)
    } else {
        None
    }
}

/// True when a closer of exactly the given level starts at `at`
fn closes_long_bracket(chars: &[char], at: usize, level: usize) -> bool {
    if chars.get(at) != Some(&']') {
        return false;
    }
    for k in 0..level {
        if chars.get(at + 1 + k) != Some(&'=') {
            return false;
        }
    }
    chars.get(at + 1 + level) == Some(&']')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end_states(source: &str) -> Vec<LexState> {
        scan(source).into_iter().map(|l| l.end_state).collect()
    }

    #[test]
    fn test_plain_code() {
        let scanned = scan_line("local x = 1", LexState::Code);
        assert_eq!(scanned.end_state, LexState::Code);
        assert_eq!(scanned.masked, "local x = 1");
        assert!(scanned.has_code());
    }

    #[test]
    fn test_line_comment_masks_rest() {
        let line = "x = 1 -- while true do";
        let scanned = scan_line(line, LexState::Code);
        assert_eq!(scanned.masked.len(), line.len());
        assert_eq!(scanned.masked.trim_end(), "x = 1");
        assert_eq!(scanned.end_state, LexState::Code);
    }

    #[test]
    fn test_quoted_string_masked() {
        let line = "print(\"end of if\")";
        let scanned = scan_line(line, LexState::Code);
        assert_eq!(scanned.masked.len(), line.len());
        assert!(scanned.masked.starts_with("print("));
        assert!(scanned.masked.ends_with(" )"));
        assert!(!scanned.masked.contains("end"));
        assert!(scanned.open_quote.is_none());
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let scanned = scan_line(r#"s = "he said \"hi\"""#, LexState::Code);
        assert!(scanned.open_quote.is_none());
        assert_eq!(scanned.end_state, LexState::Code);
    }

    #[test]
    fn test_unterminated_quote() {
        let scanned = scan_line("local x = \"hello", LexState::Code);
        assert_eq!(scanned.open_quote, Some('"'));
        // Still ends in code state: quoted strings never span lines
        assert_eq!(scanned.end_state, LexState::Code);
    }

    #[test]
    fn test_multiline_comment_states() {
        let states = end_states("x = 1\n--[[ comment\nstill comment\n]] y = 2\nz = 3");
        assert_eq!(
            states,
            vec![
                LexState::Code,
                LexState::Comment { level: 0 },
                LexState::Comment { level: 0 },
                LexState::Code,
                LexState::Code,
            ]
        );
    }

    #[test]
    fn test_leveled_comment_requires_matching_level() {
        // ]] must not close a level-1 comment
        let states = end_states("--[=[ one\n]] nope\n]=] done");
        assert_eq!(states[0], LexState::Comment { level: 1 });
        assert_eq!(states[1], LexState::Comment { level: 1 });
        assert_eq!(states[2], LexState::Code);
    }

    #[test]
    fn test_comment_opens_and_closes_on_one_line() {
        let scanned = scan_line("x = 1 --[[ mid ]] + 2", LexState::Code);
        assert_eq!(scanned.end_state, LexState::Code);
        assert!(scanned.masked.starts_with("x = 1"));
        assert!(scanned.masked.ends_with("+ 2"));
        assert!(!scanned.masked.contains("mid"));
        assert!(!scanned.masked.contains('['));
    }

    #[test]
    fn test_long_string_is_not_a_comment() {
        let states = end_states("s = [[\nraw text end\n]]");
        assert_eq!(states[0], LexState::LongString { level: 0 });
        assert_eq!(states[1], LexState::LongString { level: 0 });
        assert_eq!(states[2], LexState::Code);
    }

    #[test]
    fn test_comment_line_has_no_code() {
        let scanned = scan_line("-- just a note", LexState::Code);
        assert!(!scanned.has_code());
    }

    #[test]
    fn test_bracket_index_is_not_an_opener() {
        let scanned = scan_line("t[i] = t[j]", LexState::Code);
        assert_eq!(scanned.end_state, LexState::Code);
        assert_eq!(scanned.masked, "t[i] = t[j]");
    }

    #[test]
    fn test_keywords_inside_strings_masked() {
        let scanned = scan_line("print('function end until')", LexState::Code);
        assert!(!scanned.masked.contains("function"));
        assert!(!scanned.masked.contains("end"));
    }
}
