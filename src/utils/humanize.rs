use humansize::{DECIMAL, format_size};

/// Format a byte count for display, e.g. `1.20 kB`
pub fn format_file_size(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1500), "1.50 kB");
    }
}
