//! lualint - heuristic diagnostics for Lua and Luau source files
//!
//! The validator runs two passes over a source text. A per-line pass
//! applies the rule checks to each line, using a shared lexical scan to
//! ignore text inside strings and comments. A whole-text pass balances
//! block keywords against their terminators. Malformed input never
//! fails; it produces diagnostics.
//!
//! ```
//! use lualint::validator::validate;
//!
//! let diags = validate("if x == 1 do print(x) end");
//! assert_eq!(diags.len(), 1);
//! assert_eq!(diags[0].rule_id, "if-missing-then");
//! ```

pub mod checks;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod lexer;
pub mod output;
pub mod rules;
pub mod structure;
pub mod validator;
pub mod watch;

pub use config::Config;
pub use diagnostic::{Category, Diagnostic, Location, Severity};
pub use engine::{Engine, LintResult};
pub use validator::{validate, Validator};
