//! Status and notification surfaces driven by the coordinator.

use crate::error::StripError;
use crate::stripper::StripReport;
use std::path::Path;

pub const HINT_WAITING: &str = "请拖拽PNG文件(们)到这里\nDrag and drop PNG file(s) here";

/// Presented state, derived from the in-flight count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Processing(usize),
}

impl Status {
    pub fn from_in_flight(count: usize) -> Self {
        if count == 0 {
            Status::Idle
        } else {
            Status::Processing(count)
        }
    }

    /// Bilingual label text
    pub fn text(&self) -> String {
        match self {
            Status::Idle => HINT_WAITING.to_string(),
            Status::Processing(n) => format!(
                "正在处理{n}个文件，请稍候...\nProcessing {n} file(s), please wait...\n可继续拖入文件 / Keep dropping files to queue more"
            ),
        }
    }
}

/// Text sink showing the current status
pub trait StatusPresenter {
    fn set_text(&mut self, text: &str);
}

/// Error and success surface
pub trait Notifier {
    /// One call per failed job
    fn error(&mut self, path: &Path, error: &StripError);

    /// One combined call per poll cycle that completed at least one job
    fn success(&mut self, reports: &[StripReport]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_count() {
        assert_eq!(Status::from_in_flight(0), Status::Idle);
        assert_eq!(Status::from_in_flight(3), Status::Processing(3));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::Idle.text(), HINT_WAITING);
        let text = Status::Processing(2).text();
        assert!(text.contains("Processing 2 file(s)"));
        assert!(text.contains("正在处理2个文件"));
        assert!(text.contains("Keep dropping"));
    }
}
