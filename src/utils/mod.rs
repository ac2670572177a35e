pub mod humanize;
pub mod logger;

pub use humanize::format_file_size;
pub use logger::{init_logging, init_stderr_logging, log_panics};
