//! Fixtures shared by unit tests.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Write a small RGB PNG carrying one text chunk
pub fn write_test_png(path: &Path) {
    let (width, height) = (4u32, 4u32);
    let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i * 13 % 256) as u8).collect();

    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .add_text_chunk("Software".to_string(), "test fixture".to_string())
        .unwrap();
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&pixels).unwrap();
    writer.finish().unwrap();
}

/// A 5x5 8-bit grayscale PNG stored with Adam7 interlacing.
///
/// The encoder only writes non-interlaced images, so the bytes are committed.
/// Pixel (x, y) holds `(x * 40 + y * 9) % 256`.
pub const INTERLACED_GRAY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
    0x44, 0x52, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x05, 0x08, 0x00, 0x00, 0x00,
    0x01, 0xDF, 0x03, 0x49, 0xAF, 0x00, 0x00, 0x00, 0x2D, 0x49, 0x44, 0x41, 0x54, 0x78,
    0xDA, 0x63, 0x60, 0x60, 0x58, 0xC0, 0xA0, 0x72, 0x84, 0x21, 0x80, 0xA1, 0x84, 0x41,
    0x28, 0x69, 0x13, 0x83, 0x46, 0x05, 0x83, 0x55, 0x17, 0x83, 0xCF, 0x1C, 0x06, 0x4E,
    0xC3, 0xC8, 0xC6, 0x95, 0x0C, 0xD2, 0xCE, 0xD9, 0x93, 0x77, 0x03, 0x00, 0x95, 0xCA,
    0x09, 0x93, 0x63, 0xAB, 0x92, 0x4B, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44,
    0xAE, 0x42, 0x60, 0x82,
];

/// Row-major pixels of `INTERLACED_GRAY_PNG`
pub fn interlaced_gray_pixels() -> Vec<u8> {
    (0..5u32)
        .flat_map(|y| (0..5u32).map(move |x| ((x * 40 + y * 9) % 256) as u8))
        .collect()
}

/// In-memory sink for log output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return what it logged
pub fn capture_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
