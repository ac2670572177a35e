use super::job::{Job, JobResult};
use crate::error::StripError;
use crate::stripper::StripReport;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

/// Run the strip loop until shutdown or until either channel closes.
///
/// Jobs are handled one at a time in arrival order. A panic inside
/// `process` becomes a failed result for that job only.
pub fn run_worker<F>(
    jobs: Receiver<Job>,
    results: Sender<JobResult>,
    shutdown: Arc<AtomicBool>,
    mut process: F,
) where
    F: FnMut(&Path) -> Result<StripReport, StripError>,
{
    info!("Worker started");

    while let Ok(job) = jobs.recv() {
        if shutdown.load(Ordering::Relaxed) {
            debug!("Shutdown requested, abandoning {} and the rest of the queue", job.id);
            break;
        }

        debug!("Processing job {}: {}", job.id, job.path.display());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| process(&job.path)))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                warn!("Job {} panicked: {}", job.id, message);
                Err(StripError::WorkerPanic(message))
            });

        if let Err(e) = &outcome {
            warn!("Job {} failed: {}", job.id, e);
        }

        let result = JobResult {
            id: job.id,
            path: job.path,
            outcome,
        };
        if results.send(result).is_err() {
            debug!("Result receiver dropped");
            break;
        }
    }

    info!("Worker stopped");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
