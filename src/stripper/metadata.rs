use png::{PixelDimensions, ScaledFloat, SourceChromaticities, SrgbRenderingIntent};
use tracing::debug;

/// Text chunk kinds, re-emitted as the same kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEntry {
    Latin1 { keyword: String, text: String },
    CompressedLatin1 { keyword: String, text: String },
    Utf8 { keyword: String, text: String },
}

/// Ancillary data that survives stripping
#[derive(Debug, Clone, Default)]
pub struct RetainedMetadata {
    pub text: Vec<TextEntry>,
    pub gamma: Option<ScaledFloat>,
    pub chromaticities: Option<SourceChromaticities>,
    pub srgb: Option<SrgbRenderingIntent>,
    pub pixel_dims: Option<PixelDimensions>,
}

/// Selection of metadata groups to retain
#[derive(Debug, Clone, Copy)]
pub struct Keep {
    pub text: bool,
    pub color: bool,
    pub physical: bool,
}

impl RetainedMetadata {
    /// Collect the retained subset from a decoded header
    pub fn collect(info: &png::Info<'_>, keep: Keep) -> Self {
        let mut retained = RetainedMetadata::default();

        if keep.text {
            for chunk in &info.uncompressed_latin1_text {
                retained.text.push(TextEntry::Latin1 {
                    keyword: chunk.keyword.clone(),
                    text: chunk.text.clone(),
                });
            }
            for chunk in &info.compressed_latin1_text {
                match chunk.get_text() {
                    Ok(text) => retained.text.push(TextEntry::CompressedLatin1 {
                        keyword: chunk.keyword.clone(),
                        text,
                    }),
                    Err(e) => debug!("Dropping unreadable zTXt {:?}: {}", chunk.keyword, e),
                }
            }
            for chunk in &info.utf8_text {
                match chunk.get_text() {
                    Ok(text) => retained.text.push(TextEntry::Utf8 {
                        keyword: chunk.keyword.clone(),
                        text,
                    }),
                    Err(e) => debug!("Dropping unreadable iTXt {:?}: {}", chunk.keyword, e),
                }
            }
        }

        if keep.color {
            retained.gamma = info.source_gamma;
            retained.chromaticities = info.source_chromaticities;
            retained.srgb = info.srgb;
        }

        if keep.physical {
            retained.pixel_dims = info.pixel_dims;
        }

        debug!(
            "Retaining {} text chunk(s), gamma: {}, chromaticities: {}, srgb: {}, phys: {}",
            retained.text.len(),
            retained.gamma.is_some(),
            retained.chromaticities.is_some(),
            retained.srgb.is_some(),
            retained.pixel_dims.is_some()
        );
        retained
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.gamma.is_none()
            && self.chromaticities.is_none()
            && self.srgb.is_none()
            && self.pixel_dims.is_none()
    }

    /// Attach the retained chunks to an encoder
    pub fn apply<W: std::io::Write>(
        &self,
        encoder: &mut png::Encoder<'_, W>,
    ) -> Result<(), png::EncodingError> {
        // sRGB implies its own gAMA and cHRM
        if let Some(intent) = self.srgb {
            encoder.set_source_srgb(intent);
        } else {
            if let Some(gamma) = self.gamma {
                encoder.set_source_gamma(gamma);
            }
            if let Some(chromaticities) = self.chromaticities {
                encoder.set_source_chromaticities(chromaticities);
            }
        }
        encoder.set_pixel_dims(self.pixel_dims);

        for entry in &self.text {
            match entry {
                TextEntry::Latin1 { keyword, text } => {
                    encoder.add_text_chunk(keyword.clone(), text.clone())?
                }
                TextEntry::CompressedLatin1 { keyword, text } => {
                    encoder.add_ztxt_chunk(keyword.clone(), text.clone())?
                }
                TextEntry::Utf8 { keyword, text } => {
                    encoder.add_itxt_chunk(keyword.clone(), text.clone())?
                }
            }
        }
        Ok(())
    }
}
