//! Raw in-memory raster codec for the demo pipeline.

use brightroom_core::{
    ArtifactVersion, CodecError, CodecResult, RasterBuffer, RasterCodec, SourceRect,
};

/// Media type for uncompressed RGBA payloads with an 8-byte header.
pub const RAW_MEDIA_TYPE: &str = "image/x-raw";

const HEADER_LEN: usize = 8;

/// Codec for `image/x-raw` payloads: little-endian width and height, then
/// RGBA8 rows. Stands in for the host's real image codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl RawCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode a full buffer as a raw payload.
    pub fn encode(buffer: &RasterBuffer) -> Vec<u8> {
        let mut payload = Vec::with_capacity(HEADER_LEN + buffer.pixels().len());
        payload.extend_from_slice(&buffer.width().to_le_bytes());
        payload.extend_from_slice(&buffer.height().to_le_bytes());
        payload.extend_from_slice(buffer.pixels());
        payload
    }

    /// Wrap a buffer as a raw artifact version.
    pub fn artifact(buffer: &RasterBuffer) -> ArtifactVersion {
        ArtifactVersion::new(Self::encode(buffer), RAW_MEDIA_TYPE)
    }
}

impl RasterCodec for RawCodec {
    fn decode(&self, artifact: &ArtifactVersion) -> CodecResult<RasterBuffer> {
        if artifact.media_type() != RAW_MEDIA_TYPE {
            return Err(CodecError::UnsupportedMediaType(
                artifact.media_type().to_string(),
            ));
        }
        let payload = artifact.payload();
        if payload.len() < HEADER_LEN {
            return Err(CodecError::Decode("payload shorter than raw header".into()));
        }
        let width = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let height = u32::from_le_bytes([payload[4], payload[5], payload[6], payload[7]]);
        RasterBuffer::new(width, height, payload[HEADER_LEN..].to_vec())
    }

    fn encode_region(
        &self,
        buffer: &RasterBuffer,
        rect: SourceRect,
        media_type: &str,
    ) -> CodecResult<Vec<u8>> {
        if media_type != RAW_MEDIA_TYPE {
            return Err(CodecError::UnsupportedMediaType(media_type.to_string()));
        }
        Ok(Self::encode(&buffer.crop(rect)?))
    }
}
