//! lualint - heuristic diagnostics for Lua and Luau source files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lualint::config::{ColorMode, Config, OutputFormat};
use lualint::diagnostic::Severity;
use lualint::engine::{Engine, LintResult};
use lualint::output::create_formatter;
use lualint::rules;
use lualint::watch::{clear_screen, Watcher};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lualint",
    about = "Heuristic diagnostics for Lua and Luau source files",
    version
)]
struct Cli {
    /// Files, directories, or glob patterns to lint ('-' for stdin)
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (text, json, grouped, compact)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the summary statistics footer
    #[arg(long)]
    stats: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Run only these rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Hide diagnostics below this severity (info, warning, error)
    #[arg(long)]
    min_severity: Option<Severity>,

    /// Always exit with code 0
    #[arg(long)]
    exit_zero: bool,

    /// Re-lint on file changes
    #[arg(short, long)]
    watch: bool,

    /// Clear the screen before each watch run
    #[arg(long)]
    clear: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List all available rules
    ListRules,
    /// Explain a rule
    Explain {
        /// Rule ID
        rule: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Some(Command::ListRules) => {
            list_rules();
            return Ok(0);
        }
        Some(Command::Explain { rule }) => {
            return explain_rule(rule);
        }
        None => {}
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_default().context("failed to load configuration")?,
    };

    config.merge_cli(
        cli.format,
        if cli.verbose { Some(true) } else { None },
        if cli.stats { Some(true) } else { None },
        cli.jobs,
        if cli.disable.is_empty() {
            None
        } else {
            Some(cli.disable.clone())
        },
        if cli.select.is_empty() {
            None
        } else {
            Some(cli.select.clone())
        },
    );

    if cli.no_color {
        config.output.color = ColorMode::Never;
    }
    match config.output.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    if cli.paths.is_empty() {
        anyhow::bail!("no input files (pass paths, globs, or '-' for stdin)");
    }

    let engine = Engine::new(config.clone());
    let formatter = create_formatter(
        config.output.format,
        config.output.verbose,
        config.output.statistics,
    );

    // Stdin mode short-circuits file collection and watching
    if cli.paths.len() == 1 && cli.paths[0] == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        let mut result = engine.lint_source(&source, "<stdin>");
        if let Some(min) = cli.min_severity {
            apply_min_severity(&mut result, min);
        }
        print!("{}", formatter.format(&result));
        return Ok(if cli.exit_zero { 0 } else { result.exit_code() });
    }

    let files = collect_files(&cli.paths, &config)?;
    if files.is_empty() {
        anyhow::bail!("no Lua files matched the given paths");
    }

    let run_once = |engine: &Engine, files: &[PathBuf]| -> LintResult {
        let mut result = engine.lint(files);
        if let Some(min) = cli.min_severity {
            apply_min_severity(&mut result, min);
        }
        result
    };

    if cli.watch {
        let watcher = Watcher::new(&files)?;
        let result = run_once(&engine, &files);
        print!("{}", formatter.format(&result));
        println!("\nwatching for changes (ctrl-c to stop)...");

        while let Some(_changed) = watcher.wait() {
            if cli.clear {
                clear_screen();
            }
            let result = run_once(&engine, &files);
            print!("{}", formatter.format(&result));
            println!("\nwatching for changes (ctrl-c to stop)...");
        }
        return Ok(0);
    }

    let result = run_once(&engine, &files);
    print!("{}", formatter.format(&result));
    Ok(if cli.exit_zero { 0 } else { result.exit_code() })
}

/// Expand paths, directories, and glob patterns into a file list
fn collect_files(paths: &[String], config: &Config) -> Result<Vec<PathBuf>> {
    let exclude = config.files.exclude_set()?;
    let mut files = Vec::new();

    for arg in paths {
        let path = PathBuf::from(arg);
        if path.is_file() {
            files.push(path);
        } else if path.is_dir() {
            for pattern in &config.files.include {
                let full = format!("{}/{}", arg.trim_end_matches('/'), pattern);
                for entry in glob::glob(&full)
                    .with_context(|| format!("bad include pattern {}", full))?
                    .flatten()
                {
                    if entry.is_file() {
                        files.push(entry);
                    }
                }
            }
        } else {
            // Treat as a glob pattern
            for entry in glob::glob(arg)
                .with_context(|| format!("bad glob pattern {}", arg))?
                .flatten()
            {
                if entry.is_file() {
                    files.push(entry);
                }
            }
        }
    }

    files.retain(|f| !exclude.is_match(f));
    files.sort();
    files.dedup();
    Ok(files)
}

/// Drop diagnostics below the threshold and recompute the counters
fn apply_min_severity(result: &mut LintResult, min: Severity) {
    result.diagnostics.retain(|d| d.severity >= min);
    result.error_count = result.diagnostics.iter().filter(|d| d.is_error()).count();
    result.warning_count = result.diagnostics.iter().filter(|d| d.is_warning()).count();
    result.info_count = result.diagnostics.len() - result.error_count - result.warning_count;
}

fn list_rules() {
    println!("{:<24} {:<8} {:<10} DESCRIPTION", "RULE", "SEVERITY", "CATEGORY");
    for rule in rules::RULES {
        println!(
            "{:<24} {:<8} {:<10} {}",
            rule.id, rule.severity, rule.category, rule.description
        );
    }
}

fn explain_rule(rule_id: &str) -> Result<i32> {
    match rules::find(rule_id) {
        Some(rule) => {
            println!("{}", rule.id);
            println!("  severity: {}", rule.severity);
            println!("  category: {}", rule.category);
            println!("  {}", rule.description);
            Ok(0)
        }
        None => {
            eprintln!("unknown rule: {}", rule_id);
            Ok(2)
        }
    }
}
