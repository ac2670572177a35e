//! Application Module
//!
//! Main application state for the drop window: the drop-zone label, the
//! notification queue and the history of finished jobs.

use crate::config::AppConfig;
use crate::error::{AppError, StripError};
use crate::payload;
use crate::queue::{JobCoordinator, JobResult, Notifier, StatusPresenter};
use crate::stripper::StripReport;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

const HISTORY_LIMIT: usize = 200;

/// Label showing the coordinator's status text
#[derive(Debug, Default)]
pub struct DropZone {
    pub text: String,
}

impl StatusPresenter for DropZone {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// A modal message waiting to be dismissed
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Error { path: PathBuf, message: String },
    Success { reports: Vec<StripReport> },
}

/// Notifications shown one at a time, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for NotificationQueue {
    fn error(&mut self, path: &Path, error: &StripError) {
        self.pending.push_back(Notification::Error {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }

    fn success(&mut self, reports: &[StripReport]) {
        self.pending.push_back(Notification::Success {
            reports: reports.to_vec(),
        });
    }
}

/// One finished job in the history list
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub finished_at: DateTime<Local>,
    pub result: JobResult,
}

/// Main application state
pub struct App {
    pub coordinator: JobCoordinator<DropZone, NotificationQueue>,
    pub history: VecDeque<HistoryEntry>,
    pub should_quit: bool,
    pub confirm_exit: bool,
    pub confirm_selection: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let coordinator =
            JobCoordinator::new(config, DropZone::default(), NotificationQueue::default())?;
        Ok(Self {
            coordinator,
            history: VecDeque::new(),
            should_quit: false,
            confirm_exit: false,
            confirm_selection: false,
        })
    }

    pub fn status_text(&self) -> &str {
        &self.coordinator.presenter().text
    }

    pub fn notifications(&self) -> &NotificationQueue {
        self.coordinator.notifier()
    }

    /// Handle text dropped (pasted) onto the window
    pub fn handle_drop(&mut self, raw: &str) {
        let paths = payload::parse_drop(raw);
        info!("Dropped {} path(s)", paths.len());
        self.coordinator.submit(paths);
    }

    /// Called on every loop iteration; drains results when the poll timer fires
    pub fn tick(&mut self, now: Instant) {
        if let Some(summary) = self.coordinator.poll_if_due(now) {
            if summary.drained() > 0 {
                info!(
                    "{} job(s) finished, {} failed",
                    summary.drained(),
                    summary.failed()
                );
            }
            let finished_at = Local::now();
            for result in summary.results {
                self.history.push_front(HistoryEntry {
                    finished_at,
                    result,
                });
            }
            self.history.truncate(HISTORY_LIMIT);
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.coordinator.notifier_mut().dismiss();
    }

    /// Quit right away when idle, otherwise ask first
    pub fn request_quit(&mut self) {
        if self.coordinator.is_idle() {
            self.should_quit = true;
        } else {
            self.confirm_exit = true;
            self.confirm_selection = false; // Default to "No"
        }
    }

    pub fn answer_exit(&mut self, yes: bool) {
        self.confirm_exit = false;
        if yes {
            self.should_quit = true;
        }
    }

    pub fn shutdown(&mut self) {
        self.coordinator.shutdown();
    }
}
