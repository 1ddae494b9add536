//! Raster buffers and the codec seam used by the commit pipeline.

use crate::artifact::ArtifactVersion;
use kurbo::Rect;
use thiserror::Error;

/// Codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("payload could not be decoded: {0}")]
    Decode(String),
    #[error("region could not be encoded: {0}")]
    Encode(String),
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Decoded raster pixels, RGBA8 row-major, at the artifact's native
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Wrap decoded pixels. The pixel slice length must match the
    /// dimensions exactly.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> CodecResult<Self> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(CodecError::Decode(format!(
                "{width}x{height} buffer needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer filled with one color. Handy for fixtures.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * Self::BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        let slice = &self.pixels[offset..offset + Self::BYTES_PER_PIXEL];
        Some([slice[0], slice[1], slice[2], slice[3]])
    }

    /// Extract a sub-region. The rect must lie fully inside the buffer.
    pub fn crop(&self, rect: SourceRect) -> CodecResult<RasterBuffer> {
        if rect.is_empty() {
            return Err(CodecError::Encode("source region has no pixels".into()));
        }
        if rect.x + rect.width > self.width || rect.y + rect.height > self.height {
            return Err(CodecError::Encode(format!(
                "region {rect:?} exceeds {}x{} buffer",
                self.width, self.height
            )));
        }

        let row_bytes = rect.width as usize * Self::BYTES_PER_PIXEL;
        let mut pixels = Vec::with_capacity(rect.height as usize * row_bytes);
        for row in rect.y..rect.y + rect.height {
            let start =
                (row as usize * self.width as usize + rect.x as usize) * Self::BYTES_PER_PIXEL;
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        RasterBuffer::new(rect.width, rect.height, pixels)
    }
}

/// An integer pixel rectangle in source (native) resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round an already-scaled display rect onto the source pixel grid.
    /// Edges are rounded as a pair so the width never drifts past `x1`.
    pub fn from_display(rect: Rect) -> Self {
        let x0 = rect.x0.round().max(0.0);
        let y0 = rect.y0.round().max(0.0);
        let x1 = rect.x1.round().max(x0);
        let y1 = rect.y1.round().max(y0);
        Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip to a buffer of the given dimensions.
    pub fn clipped_to(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

/// Codec seam between the commit pipeline and the host's raster machinery.
///
/// The pipeline owns an injected implementation, so tests run without a
/// real rendering surface.
pub trait RasterCodec {
    /// Decode an artifact's payload into pixels.
    fn decode(&self, artifact: &ArtifactVersion) -> CodecResult<RasterBuffer>;

    /// Encode a sub-region of the buffer in the given media type.
    fn encode_region(
        &self,
        buffer: &RasterBuffer,
        rect: SourceRect,
        media_type: &str,
    ) -> CodecResult<Vec<u8>>;
}
