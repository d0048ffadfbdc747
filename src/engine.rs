//! Lint engine orchestrating validation across files

use crate::config::Config;
use crate::diagnostic::{Category, Diagnostic, Location, Severity};
use crate::validator::Validator;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of a lint run
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics found
    pub diagnostics: Vec<Diagnostic>,

    /// Number of files processed
    pub files_processed: usize,

    /// Number of files with at least one error
    pub files_with_errors: usize,

    /// Number of files with at least one warning
    pub files_with_warnings: usize,

    /// Total error count
    pub error_count: usize,

    /// Total warning count
    pub warning_count: usize,

    /// Total info count
    pub info_count: usize,

    /// Time taken for the run
    pub duration: Duration,
}

impl LintResult {
    /// Check if any errors were found
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if the run was completely clean
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Exit code for the CLI: 0 clean, 1 warnings, 2 errors
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }
}

/// The lint engine
pub struct Engine {
    config: Config,
    validator: Validator,
}

impl Engine {
    /// Create an engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            validator: Validator::new(),
        }
    }

    /// Lint a set of files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();
        log::info!("linting {} file(s)", files.len());

        let mut result = if self.config.engine.parallel && files.len() > 1 {
            let jobs = if self.config.engine.jobs > 0 {
                self.config.engine.jobs
            } else {
                num_cpus::get()
            };

            // Pool construction can fail when thread spawning does (a
            // bad jobs value, resource limits); degrade to sequential
            // rather than abort the run
            match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(|| {
                    files
                        .par_iter()
                        .map(|f| self.lint_file(f))
                        .reduce(LintResult::default, |mut acc, r| {
                            acc.merge(r);
                            acc
                        })
                }),
                Err(e) => {
                    log::warn!("thread pool unavailable ({}), linting sequentially", e);
                    self.lint_serial(files)
                }
            }
        } else {
            self.lint_serial(files)
        };

        // Parallel reduction loses file ordering
        result
            .diagnostics
            .sort_by(|a, b| a.location.file.cmp(&b.location.file));
        result.duration = start.elapsed();
        result
    }

    fn lint_serial(&self, files: &[PathBuf]) -> LintResult {
        let mut acc = LintResult::default();
        for file in files {
            acc.merge(self.lint_file(file));
        }
        acc
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..Default::default()
        };

        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("cannot read {}: {}", path.display(), e);
                let mut diag = Diagnostic::new(
                    "file-read-error",
                    Severity::Error,
                    Category::Syntax,
                    &format!("Cannot read file: {}", e),
                    Location::new(0, 0),
                );
                diag.location.file = path.to_path_buf();
                result.diagnostics.push(diag);
                result.error_count = 1;
                result.files_with_errors = 1;
                return result;
            }
        };

        let lines: Vec<&str> = source.lines().collect();

        for mut diag in self.validator.validate(&source) {
            if !self.config.is_rule_enabled(&diag.rule_id) {
                continue;
            }
            if let Some(severity) = self.config.get_severity_override(&diag.rule_id) {
                diag.severity = severity;
            }

            diag.location.file = path.to_path_buf();
            if diag.source_line.is_none() && diag.location.line > 0 {
                diag.source_line = lines
                    .get(diag.location.line - 1)
                    .map(|l| l.to_string());
            }

            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
            result.diagnostics.push(diag);
        }

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }
        result
    }

    /// Lint source text directly (stdin input)
    pub fn lint_source(&self, source: &str, name: &str) -> LintResult {
        let start = Instant::now();
        let mut result = LintResult {
            files_processed: 1,
            ..Default::default()
        };
        let lines: Vec<&str> = source.lines().collect();

        for mut diag in self.validator.validate(source) {
            if !self.config.is_rule_enabled(&diag.rule_id) {
                continue;
            }
            if let Some(severity) = self.config.get_severity_override(&diag.rule_id) {
                diag.severity = severity;
            }
            diag.location.file = PathBuf::from(name);
            if diag.source_line.is_none() && diag.location.line > 0 {
                diag.source_line = lines
                    .get(diag.location.line - 1)
                    .map(|l| l.to_string());
            }
            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
            result.diagnostics.push(diag);
        }

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }
        result.duration = start.elapsed();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_lint_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "ok.lua", "local x = 1\nprint(x)\n");

        let result = Engine::new(Config::default()).lint(&[path]);
        assert!(result.is_clean());
        assert_eq!(result.files_processed, 1);
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_lint_file_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.lua", "local s = \"oops\n");

        let result = Engine::new(Config::default()).lint(&[path.clone()]);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.files_with_errors, 1);
        assert_eq!(result.exit_code(), 2);
        assert_eq!(result.diagnostics[0].location.file, path);
        assert_eq!(
            result.diagnostics[0].source_line.as_deref(),
            Some("local s = \"oops")
        );
    }

    #[test]
    fn test_lint_file_with_warning_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "warn.lua", "local tbl = {}\nprint(tbl.length)\n");

        let result = Engine::new(Config::default()).lint(&[path]);
        assert_eq!(result.error_count, 0);
        assert!(result.warning_count > 0);
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_missing_file_reports_diagnostic() {
        let result = Engine::new(Config::default()).lint(&[PathBuf::from("/no/such/file.lua")]);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.diagnostics[0].rule_id, "file-read-error");
    }

    #[test]
    fn test_disabled_rule_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "warn.lua", "print(tbl.length)\n");

        let mut config = Config::default();
        config.rules.disabled.push("dot-length".to_string());
        let result = Engine::new(config).lint(&[path]);
        assert!(result.is_clean());
    }

    #[test]
    fn test_severity_override_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "warn.lua", "print(tbl.length)\n");

        let mut config = Config::default();
        config
            .rules
            .severity
            .insert("dot-length".to_string(), Severity::Error);
        let result = Engine::new(config).lint(&[path]);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.exit_code(), 2);
    }

    #[test]
    fn test_parallel_multi_file_counts() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.lua", "end\n");
        let b = write_file(&dir, "b.lua", "local x = 1\n");
        let c = write_file(&dir, "c.lua", "funciton f()\nend\n");

        let result = Engine::new(Config::default()).lint(&[a, b, c]);
        assert_eq!(result.files_processed, 3);
        assert_eq!(result.files_with_errors, 2);
        assert!(result.files_with_warnings >= 1);
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(&dir, "a.lua", "end\n"),
            write_file(&dir, "b.lua", "funciton f()\nend\n"),
            write_file(&dir, "c.lua", "local x = 1\n"),
        ];

        let parallel = Engine::new(Config::default()).lint(&files);

        let mut config = Config::default();
        config.engine.parallel = false;
        let sequential = Engine::new(config).lint(&files);

        assert_eq!(parallel.error_count, sequential.error_count);
        assert_eq!(parallel.warning_count, sequential.warning_count);
        assert_eq!(parallel.files_processed, sequential.files_processed);
        assert_eq!(parallel.diagnostics.len(), sequential.diagnostics.len());
    }

    #[test]
    fn test_lint_source_stdin() {
        let result = Engine::new(Config::default()).lint_source("end", "<stdin>");
        assert_eq!(result.error_count, 1);
        assert_eq!(
            result.diagnostics[0].location.file,
            PathBuf::from("<stdin>")
        );
    }
}
