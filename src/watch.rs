//! Watch mode: re-lint when source files change

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Watches paths for changes to Lua sources
pub struct Watcher {
    rx: mpsc::Receiver<Vec<PathBuf>>,
    // Held so the watcher thread stays alive
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl Watcher {
    /// Start watching the given paths recursively
    pub fn new(paths: &[PathBuf]) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(DEBOUNCE_MS),
            move |result: DebounceEventResult| {
                if let Ok(events) = result {
                    let changed: Vec<PathBuf> = events
                        .into_iter()
                        .map(|e| e.path)
                        .filter(|p| is_lua_source(p))
                        .collect();
                    if !changed.is_empty() {
                        let _ = tx.send(changed);
                    }
                }
            },
        )?;

        for path in paths {
            let root = if path.is_file() {
                path.parent().unwrap_or(Path::new(".")).to_path_buf()
            } else {
                path.clone()
            };
            debouncer
                .watcher()
                .watch(&root, RecursiveMode::Recursive)?;
            log::info!("watching {}", root.display());
        }

        Ok(Self {
            rx,
            _debouncer: debouncer,
        })
    }

    /// Block until the next batch of changed files
    pub fn wait(&self) -> Option<Vec<PathBuf>> {
        self.rx.recv().ok()
    }
}

fn is_lua_source(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("lua") | Some("luau")
    )
}

/// Clear the terminal between runs
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lua_source_filter() {
        assert!(is_lua_source(Path::new("main.lua")));
        assert!(is_lua_source(Path::new("src/types.luau")));
        assert!(!is_lua_source(Path::new("readme.md")));
        assert!(!is_lua_source(Path::new("Makefile")));
    }

    #[test]
    fn test_watcher_starts_on_directory() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = Watcher::new(&[dir.path().to_path_buf()]);
        assert!(watcher.is_ok());
    }
}
