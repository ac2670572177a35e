use serde::{Deserialize, Serialize};

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suffix inserted before the extension of the cleaned file
    pub suffix: String,
    /// zlib effort used when re-encoding
    pub compression: CompressionLevel,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_clear".to_string(),
            compression: CompressionLevel::Best,
        }
    }
}

/// Compression effort for the re-encoded PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Fast,
    Default,
    Best,
}

impl From<CompressionLevel> for png::Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => png::Compression::Fast,
            CompressionLevel::Default => png::Compression::Default,
            CompressionLevel::Best => png::Compression::Best,
        }
    }
}

/// Which metadata survives stripping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// tEXt, zTXt and iTXt chunks
    pub keep_text: bool,
    /// gAMA, cHRM and sRGB chunks
    pub keep_color: bool,
    /// pHYs chunk
    pub keep_physical: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            keep_text: true,
            keep_color: true,
            keep_physical: true,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Interval between two drains of the result channel
    pub poll_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
        }
    }
}
