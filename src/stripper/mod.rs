//! Metadata Stripper
//!
//! Re-encodes a PNG next to the original, keeping the pixel data untouched
//! and only the small set of metadata worth keeping.

pub mod metadata;

use crate::config::CompressionLevel;
use crate::error::StripError;
use metadata::{Keep, RetainedMetadata};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options applied to every strip operation
#[derive(Debug, Clone)]
pub struct StripOptions {
    pub suffix: String,
    pub compression: CompressionLevel,
    pub keep_text: bool,
    pub keep_color: bool,
    pub keep_physical: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            suffix: "_clear".to_string(),
            compression: CompressionLevel::Best,
            keep_text: true,
            keep_color: true,
            keep_physical: true,
        }
    }
}

/// Outcome of a successful strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripReport {
    pub output: PathBuf,
    pub input_size: u64,
    pub output_size: u64,
    /// False when the metadata-free fallback was used
    pub metadata_kept: bool,
}

impl StripReport {
    /// Bytes saved, zero if the output grew
    pub fn saved_bytes(&self) -> u64 {
        self.input_size.saturating_sub(self.output_size)
    }
}

/// Decoded image: raw samples plus the structural chunks needed to render them
struct DecodedImage {
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    palette: Option<Vec<u8>>,
    trns: Option<Vec<u8>>,
    data: Vec<u8>,
}

/// Derive the output path: `dir/photo.png` -> `dir/photo_clear.png`
pub fn output_path_for(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(file_name)
}

/// Strip metadata from one PNG, writing the result to the derived path.
///
/// Nothing is written unless encoding succeeded. An existing file at the
/// derived path is overwritten.
pub fn strip(path: &Path, options: &StripOptions) -> Result<StripReport, StripError> {
    let raw = path.as_os_str().to_string_lossy();
    if raw.trim().is_empty() {
        return Err(StripError::MalformedPath(raw.into_owned()));
    }
    if !path.exists() {
        return Err(StripError::NotFound(path.to_path_buf()));
    }

    let input_size = std::fs::metadata(path)?.len();
    let keep = Keep {
        text: options.keep_text,
        color: options.keep_color,
        physical: options.keep_physical,
    };
    let (image, retained) = decode(path, keep)?;
    let (bytes, metadata_kept) = encode_with_fallback(&image, &retained, options.compression)?;

    let output = output_path_for(path, &options.suffix);
    std::fs::write(&output, &bytes)?;

    info!(
        "Stripped {} -> {} ({} -> {} bytes)",
        path.display(),
        output.display(),
        input_size,
        bytes.len()
    );

    Ok(StripReport {
        output,
        input_size,
        output_size: bytes.len() as u64,
        metadata_kept,
    })
}

fn decode(path: &Path, keep: Keep) -> Result<(DecodedImage, RetainedMetadata), StripError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::IDENTITY);
    decoder.set_ignore_text_chunk(!keep.text);

    let mut reader = decoder.read_info()?;
    let mut data = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data)?;
    data.truncate(frame.buffer_size());

    // Text chunks may follow the image data
    if let Err(e) = reader.finish() {
        debug!("Ignoring trailing chunks of {}: {}", path.display(), e);
    }

    let info = reader.info();
    let image = DecodedImage {
        width: frame.width,
        height: frame.height,
        color_type: frame.color_type,
        bit_depth: frame.bit_depth,
        palette: info.palette.as_ref().map(|p| p.to_vec()),
        trns: info.trns.as_ref().map(|t| t.to_vec()),
        data,
    };
    let retained = RetainedMetadata::collect(info, keep);

    Ok((image, retained))
}

/// Encode with the retained metadata, falling back to bare pixels.
///
/// Returns the encoded bytes and whether the metadata made it in.
fn encode_with_fallback(
    image: &DecodedImage,
    retained: &RetainedMetadata,
    compression: CompressionLevel,
) -> Result<(Vec<u8>, bool), StripError> {
    if retained.is_empty() {
        return encode(image, None, compression)
            .map(|bytes| (bytes, true))
            .map_err(|e| StripError::EncodeFailed(e.to_string()));
    }

    match encode(image, Some(retained), compression) {
        Ok(bytes) => Ok((bytes, true)),
        Err(e) => {
            warn!("Encoding with metadata failed ({}), retrying without", e);
            encode(image, None, compression)
                .map(|bytes| (bytes, false))
                .map_err(|e| StripError::EncodeFailed(e.to_string()))
        }
    }
}

fn encode(
    image: &DecodedImage,
    retained: Option<&RetainedMetadata>,
    compression: CompressionLevel,
) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
        encoder.set_color(image.color_type);
        encoder.set_depth(image.bit_depth);
        encoder.set_compression(compression.into());
        if let Some(palette) = &image.palette {
            encoder.set_palette(palette.clone());
        }
        if let Some(trns) = &image.trns {
            encoder.set_trns(trns.clone());
        }
        if let Some(retained) = retained {
            retained.apply(&mut encoder)?;
        }

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.data)?;
        writer.finish()?;
    }
    Ok(out)
}
