//! Headless Mode
//!
//! Runs the same coordinator without a terminal UI: paths come from the
//! command line, status goes to stderr and results to stdout.

use crate::config::AppConfig;
use crate::error::{AppError, StripError};
use crate::queue::{JobCoordinator, JobResult, Notifier, StatusPresenter};
use crate::stripper::StripReport;
use crate::utils::format_file_size;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;
use tracing::warn;
use walkdir::WalkDir;

/// Writes status changes to stderr
struct ConsolePresenter {
    last: String,
}

impl StatusPresenter for ConsolePresenter {
    fn set_text(&mut self, text: &str) {
        if text != self.last {
            self.last = text.to_string();
            eprintln!("{}", text.replace('\n', " | "));
        }
    }
}

/// Prints notifications unless results are emitted as JSON
struct ConsoleNotifier {
    json: bool,
    failures: usize,
}

impl Notifier for ConsoleNotifier {
    fn error(&mut self, path: &Path, error: &StripError) {
        self.failures += 1;
        if !self.json {
            eprintln!("错误 Error: {}: {}", path.display(), error);
        }
    }

    fn success(&mut self, reports: &[StripReport]) {
        if self.json {
            return;
        }
        for report in reports {
            println!(
                "成功 Success: {} (saved {})",
                report.output.display(),
                format_file_size(report.saved_bytes())
            );
        }
    }
}

/// One JSON line per finished job
#[derive(Serialize)]
struct JsonRecord<'a> {
    job: u64,
    input: &'a Path,
    #[serde(flatten)]
    report: Option<&'a StripReport>,
    error: Option<String>,
}

impl<'a> From<&'a JobResult> for JsonRecord<'a> {
    fn from(result: &'a JobResult) -> Self {
        Self {
            job: result.id.0,
            input: &result.path,
            report: result.outcome.as_ref().ok(),
            error: result.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Options of the `strip` subcommand
pub struct HeadlessOptions {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub recursive: bool,
}

/// Strip every path and wait for all results. Returns the number of failures.
pub fn run(config: &AppConfig, options: HeadlessOptions) -> Result<usize, AppError> {
    let paths = expand_paths(options.paths, options.recursive);

    let presenter = ConsolePresenter {
        last: String::new(),
    };
    let notifier = ConsoleNotifier {
        json: options.json,
        failures: 0,
    };
    let mut coordinator = JobCoordinator::new(config, presenter, notifier)?;
    coordinator.submit(paths);

    while !coordinator.is_idle() {
        thread::sleep(coordinator.until_next_poll(Instant::now()));
        if let Some(summary) = coordinator.poll_if_due(Instant::now())
            && options.json
        {
            for result in &summary.results {
                match serde_json::to_string(&JsonRecord::from(result)) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to serialize result: {}", e),
                }
            }
        }
    }

    let failures = coordinator.notifier().failures;
    coordinator.shutdown();
    Ok(failures)
}

/// Expand directories into the PNG files they contain
fn expand_paths(paths: Vec<PathBuf>, recursive: bool) -> Vec<PathBuf> {
    let mut expanded = Vec::new();

    for path in paths {
        if recursive && path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_png_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            if found.is_empty() {
                warn!("No PNG files found in {}", path.display());
            }
            found.sort();
            expanded.extend(found);
        } else {
            expanded.push(path);
        }
    }

    expanded
}

/// Check if a path has a .png extension
fn is_png_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capture_logs, write_test_png};

    #[test]
    fn test_expand_paths_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.PNG"), b"x").unwrap();
        std::fs::write(nested.join("a.png"), b"x").unwrap();
        std::fs::write(nested.join("notes.txt"), b"x").unwrap();

        let expanded = expand_paths(vec![dir.path().to_path_buf()], true);
        assert_eq!(expanded, vec![dir.path().join("b.PNG"), nested.join("a.png")]);

        let flat = expand_paths(vec![dir.path().to_path_buf()], false);
        assert_eq!(flat, vec![dir.path().to_path_buf()]);
    }

    #[test]
    fn test_empty_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();

        let mut expanded = None;
        let logs = capture_logs(|| {
            expanded = Some(expand_paths(vec![dir.path().to_path_buf()], true));
        });

        assert_eq!(expanded, Some(Vec::new()));
        assert!(logs.contains("No PNG files found in"));
        assert!(logs.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_run_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        write_test_png(&good);

        let mut config = AppConfig::default();
        config.ui.poll_interval_ms = 5;
        let failures = run(
            &config,
            HeadlessOptions {
                paths: vec![good, dir.path().join("missing.png")],
                json: true,
                recursive: false,
            },
        )
        .unwrap();

        assert_eq!(failures, 1);
        assert!(dir.path().join("good_clear.png").exists());
    }

    #[test]
    fn test_json_record_shape() {
        let result = JobResult {
            id: crate::queue::job::JobId(7),
            path: PathBuf::from("in.png"),
            outcome: Err(StripError::NotFound(PathBuf::from("in.png"))),
        };
        let value = serde_json::to_value(JsonRecord::from(&result)).unwrap();
        assert_eq!(value["job"], 7);
        assert_eq!(value["input"], "in.png");
        assert!(value["error"].as_str().unwrap().contains("not found"));
    }
}
