pub mod coordinator;
pub mod job;
pub mod status;
pub mod worker;

pub use coordinator::JobCoordinator;
pub use job::JobResult;
pub use status::{Notifier, StatusPresenter};
