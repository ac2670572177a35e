//! Job Coordinator
//!
//! Owns both channels, the worker thread and the in-flight counter. Everything
//! here runs on the UI thread; only `Job` and `JobResult` values cross over to
//! the worker.

use super::job::{Job, JobId, JobResult};
use super::status::{Notifier, Status, StatusPresenter};
use super::worker::run_worker;
use crate::config::AppConfig;
use crate::error::{AppError, StripError};
use crate::stripper::{self, StripReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Results drained by one poll
#[derive(Debug, Default)]
pub struct PollSummary {
    pub results: Vec<JobResult>,
}

impl PollSummary {
    pub fn drained(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.drained() - self.succeeded()
    }
}

pub struct JobCoordinator<P: StatusPresenter, N: Notifier> {
    job_tx: Option<Sender<Job>>,
    result_rx: Receiver<JobResult>,
    shutdown_flag: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    in_flight: usize,
    next_id: u64,
    presenter: P,
    notifier: N,
    poll_interval: Duration,
    next_poll: Instant,
}

impl<P: StatusPresenter, N: Notifier> JobCoordinator<P, N> {
    /// Start a coordinator whose worker strips PNGs with the configured options
    pub fn new(config: &AppConfig, presenter: P, notifier: N) -> Result<Self, AppError> {
        let options = config.strip_options();
        Self::with_processor(config.poll_interval(), presenter, notifier, move |path| {
            stripper::strip(path, &options)
        })
    }

    /// Start a coordinator with a custom per-job processor
    pub fn with_processor<F>(
        poll_interval: Duration,
        presenter: P,
        notifier: N,
        processor: F,
    ) -> Result<Self, AppError>
    where
        F: FnMut(&Path) -> Result<StripReport, StripError> + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        let shutdown_flag = Arc::new(AtomicBool::new(false));

        let flag = shutdown_flag.clone();
        let worker = thread::Builder::new()
            .name("pngslim-worker".to_string())
            .spawn(move || run_worker(job_rx, result_tx, flag, processor))
            .map_err(|e| AppError::WorkerSpawn(e.to_string()))?;

        let mut coordinator = Self {
            job_tx: Some(job_tx),
            result_rx,
            shutdown_flag,
            worker: Some(worker),
            in_flight: 0,
            next_id: 1,
            presenter,
            notifier,
            poll_interval,
            next_poll: Instant::now() + poll_interval,
        };
        coordinator.refresh_status();
        Ok(coordinator)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn status(&self) -> Status {
        Status::from_in_flight(self.in_flight)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Queue paths for stripping, refreshing the status before each enqueue
    pub fn submit(&mut self, paths: Vec<PathBuf>) -> Vec<JobId> {
        let mut ids = Vec::with_capacity(paths.len());

        for path in paths {
            self.in_flight += 1;
            self.refresh_status();

            let id = JobId(self.next_id);
            self.next_id += 1;
            let job = Job {
                id,
                path: path.clone(),
            };

            let sent = match &self.job_tx {
                Some(tx) => tx.send(job).is_ok(),
                None => false,
            };

            if sent {
                info!("Queued job {}: {}", id, path.display());
                ids.push(id);
            } else {
                warn!("Worker unavailable, rejecting {}", path.display());
                self.in_flight = self.in_flight.saturating_sub(1);
                self.refresh_status();
                self.notifier.error(&path, &StripError::WorkerUnavailable);
            }
        }

        ids
    }

    /// Drain every result available right now without blocking
    pub fn poll(&mut self) -> PollSummary {
        let mut summary = PollSummary::default();
        let mut reports = Vec::new();

        while let Ok(result) = self.result_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.refresh_status();

            match &result.outcome {
                Ok(report) => {
                    info!("Job {} done: {}", result.id, report.output.display());
                    reports.push(report.clone());
                }
                Err(e) => self.notifier.error(&result.path, e),
            }
            summary.results.push(result);
        }

        if !reports.is_empty() {
            self.notifier.success(&reports);
        }
        if summary.drained() > 0 {
            debug!(
                "Poll drained {} result(s), {} still in flight",
                summary.drained(),
                self.in_flight
            );
        }
        summary
    }

    /// Poll if the interval has elapsed, then re-arm the timer
    pub fn poll_if_due(&mut self, now: Instant) -> Option<PollSummary> {
        if now < self.next_poll {
            return None;
        }
        self.next_poll = now + self.poll_interval;
        Some(self.poll())
    }

    /// Time left before the next poll is due
    pub fn until_next_poll(&self, now: Instant) -> Duration {
        self.next_poll.saturating_duration_since(now)
    }

    /// Ask the worker to stop. Queued jobs are abandoned and a job that is
    /// running is not waited for.
    pub fn shutdown(&mut self) {
        if self.job_tx.is_none() && self.worker.is_none() {
            return;
        }

        info!("Shutting down worker ({} job(s) in flight)", self.in_flight);
        self.shutdown_flag.store(true, Ordering::Relaxed);
        self.job_tx = None;

        if let Some(handle) = self.worker.take() {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                debug!("Worker still busy, detaching");
            }
        }
    }

    fn refresh_status(&mut self) {
        let text = self.status().text();
        self.presenter.set_text(&text);
    }
}

impl<P: StatusPresenter, N: Notifier> Drop for JobCoordinator<P, N> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
