//! Block structure balancing
//!
//! A whole-text pass matching block-opening keywords against their
//! terminators with a LIFO stack. Lua closes most blocks with `end`, but
//! `repeat` closes with `until`, so a bare `end` can never match a
//! `repeat` frame. Keyword occurrences come from the shared lexical scan,
//! so text inside strings and comments never opens or closes a block.
//!
//! The `do` that finishes a `while`/`for` header belongs to that header
//! and does not open a frame of its own. A `do` written after an `if`
//! header (in place of `then`) is treated the same way; the per-line
//! checks already report that mistake.

use crate::diagnostic::Diagnostic;
use crate::lexer::{char_col, ScannedLine};
use crate::rules::diagnostic as diag;
use regex::Regex;

/// A keyword that opens a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword {
    Function,
    If,
    For,
    While,
    Repeat,
    Do,
}

impl BlockKeyword {
    fn as_str(&self) -> &'static str {
        match self {
            BlockKeyword::Function => "function",
            BlockKeyword::If => "if",
            BlockKeyword::For => "for",
            BlockKeyword::While => "while",
            BlockKeyword::Repeat => "repeat",
            BlockKeyword::Do => "do",
        }
    }

    /// The terminator this block requires
    fn terminator(&self) -> &'static str {
        match self {
            BlockKeyword::Repeat => "until",
            _ => "end",
        }
    }
}

/// An open block on the balancer stack
#[derive(Debug, Clone, Copy)]
pub struct BlockFrame {
    pub keyword: BlockKeyword,
    pub line: usize,
}

/// Balance block keywords across the whole text, appending `structure`
/// diagnostics for every mismatch
pub fn check(scanned: &[ScannedLine], diags: &mut Vec<Diagnostic>) {
    let word_re = Regex::new(r"[A-Za-z_]\w*").unwrap();
    let until_re = Regex::new(r"\buntil\b").unwrap();

    let mut stack: Vec<BlockFrame> = Vec::new();
    // Header state: a while/for awaits its `do`, an if awaits its `then`
    let mut expect_do = false;
    let mut expect_then = false;

    for (idx, line) in scanned.iter().enumerate() {
        let line_no = idx + 1;
        if !line.has_code() {
            continue;
        }
        let masked = &line.masked;

        for m in word_re.find_iter(masked) {
            match m.as_str() {
                "function" => stack.push(BlockFrame {
                    keyword: BlockKeyword::Function,
                    line: line_no,
                }),
                "if" => {
                    stack.push(BlockFrame {
                        keyword: BlockKeyword::If,
                        line: line_no,
                    });
                    expect_then = true;
                }
                "for" => {
                    stack.push(BlockFrame {
                        keyword: BlockKeyword::For,
                        line: line_no,
                    });
                    expect_do = true;
                }
                "while" => {
                    stack.push(BlockFrame {
                        keyword: BlockKeyword::While,
                        line: line_no,
                    });
                    expect_do = true;
                }
                "repeat" => stack.push(BlockFrame {
                    keyword: BlockKeyword::Repeat,
                    line: line_no,
                }),
                "then" => expect_then = false,
                "do" => {
                    if expect_do {
                        expect_do = false;
                    } else if expect_then {
                        // `if <cond> do` - consumed by the header; the
                        // if-missing-then check reports it
                        expect_then = false;
                    } else {
                        stack.push(BlockFrame {
                            keyword: BlockKeyword::Do,
                            line: line_no,
                        });
                    }
                }
                "end" => match stack.pop() {
                    None => diags.push(diag(
                        "unexpected-end",
                        "Unexpected 'end' - no matching block statement",
                        line_no,
                        char_col(masked, m.start()),
                        3,
                    )),
                    Some(frame) => {
                        if frame.keyword == BlockKeyword::Repeat && !until_re.is_match(masked) {
                            // repeat closes with until; this end must
                            // belong to some other open frame
                            stack.push(frame);
                        }
                    }
                },
                "until" => {
                    if stack.last().map(|f| f.keyword) == Some(BlockKeyword::Repeat) {
                        stack.pop();
                    } else {
                        diags.push(diag(
                            "unmatched-until",
                            "'until' without matching 'repeat'",
                            line_no,
                            char_col(masked, m.start()),
                            5,
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    for frame in stack {
        diags.push(diag(
            "unclosed-block",
            &format!(
                "Block '{}' is not closed with '{}'",
                frame.keyword.as_str(),
                frame.keyword.terminator()
            ),
            frame.line,
            1,
            frame.keyword.as_str().len(),
        ));
    }
}
