//! Commit pipeline: a display-space region becomes a new artifact version.

use crate::artifact::ArtifactVersion;
use crate::geometry;
use crate::history::EditHistory;
use crate::raster::{CodecError, RasterCodec, SourceRect};
use kurbo::{Rect, Size};
use thiserror::Error;

/// Commit failures. All of them leave history unmodified.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Commit attempted with a non-positive region. Defensive: the region
    /// editor's invariants keep this unreachable.
    #[error("crop region has no area")]
    EmptyRegion,
    #[error("source region has no pixels")]
    SourceRegionEmpty,
    #[error("source artifact could not be decoded: {0}")]
    SourceDecode(#[source] CodecError),
    #[error("cropped region could not be encoded: {0}")]
    EncodeFailed(#[source] CodecError),
}

/// Turns a committed display-space region into a new artifact version and
/// pushes it onto the history.
///
/// The codec handle is injected at construction rather than reached for as
/// ambient state, so the pipeline is deterministic under test. Cropping is
/// the one genuinely destructive step: pixels outside the rectangle are
/// absent from the new version, while the previous version stays intact in
/// history.
#[derive(Debug)]
pub struct CommitPipeline<C> {
    codec: C,
}

impl<C: RasterCodec> CommitPipeline<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Crop `source` to `region` (display coordinates within `display`)
    /// and push the result onto `history`.
    pub fn commit(
        &self,
        source: &ArtifactVersion,
        region: Rect,
        display: Size,
        history: &mut EditHistory<ArtifactVersion>,
    ) -> Result<ArtifactVersion, CommitError> {
        if region.width() <= 0.0
            || region.height() <= 0.0
            || display.width <= 0.0
            || display.height <= 0.0
        {
            return Err(CommitError::EmptyRegion);
        }

        let buffer = self.codec.decode(source).map_err(CommitError::SourceDecode)?;

        // The axes may scale differently when the rendering is not at the
        // source aspect ratio.
        let scale_x = buffer.width() as f64 / display.width;
        let scale_y = buffer.height() as f64 / display.height;
        let source_rect =
            SourceRect::from_display(geometry::to_source_space(region, scale_x, scale_y))
                .clipped_to(buffer.width(), buffer.height());
        if source_rect.is_empty() {
            return Err(CommitError::SourceRegionEmpty);
        }

        let payload = self
            .codec
            .encode_region(&buffer, source_rect, source.media_type())
            .map_err(CommitError::EncodeFailed)?;

        let next = ArtifactVersion::with_annotation(
            payload,
            source.media_type(),
            format!("Cropped to {}x{}", source_rect.width, source_rect.height),
        );
        log::debug!(
            "committed {}x{} crop as version {}",
            source_rect.width,
            source_rect.height,
            next.id()
        );
        history.push(next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{CodecResult, RasterBuffer};

    /// Codec over a fixed native buffer; encodes crops as raw RGBA bytes.
    struct FixedCodec {
        native: RasterBuffer,
        fail_decode: bool,
    }

    impl FixedCodec {
        fn new(native: RasterBuffer) -> Self {
            Self {
                native,
                fail_decode: false,
            }
        }
    }

    impl RasterCodec for FixedCodec {
        fn decode(&self, _artifact: &ArtifactVersion) -> CodecResult<RasterBuffer> {
            if self.fail_decode {
                return Err(CodecError::Decode("corrupt payload".into()));
            }
            Ok(self.native.clone())
        }

        fn encode_region(
            &self,
            buffer: &RasterBuffer,
            rect: SourceRect,
            _media_type: &str,
        ) -> CodecResult<Vec<u8>> {
            Ok(buffer.crop(rect)?.pixels().to_vec())
        }
    }

    fn seeded_history(source: &ArtifactVersion) -> EditHistory<ArtifactVersion> {
        let mut history = EditHistory::new();
        history.reset(source.clone());
        history
    }

    #[test]
    fn test_commit_scales_display_to_source() {
        // 200x150 display over a 400x300 native buffer: scale 2 on both
        // axes.
        let pipeline = CommitPipeline::new(FixedCodec::new(RasterBuffer::filled(
            400,
            300,
            [1, 2, 3, 255],
        )));
        let source = ArtifactVersion::new(vec![0], "image/x-raw");
        let mut history = seeded_history(&source);

        let next = pipeline
            .commit(
                &source,
                Rect::new(50.0, 50.0, 150.0, 125.0),
                Size::new(200.0, 150.0),
                &mut history,
            )
            .unwrap();

        // 100x75 display units -> 200x150 source pixels.
        assert_eq!(next.payload().len(), 200 * 150 * 4);
        assert_eq!(next.media_type(), "image/x-raw");
        assert_eq!(next.annotation(), Some("Cropped to 200x150"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&next));
    }

    #[test]
    fn test_commit_rejects_empty_region() {
        let pipeline =
            CommitPipeline::new(FixedCodec::new(RasterBuffer::filled(10, 10, [0; 4])));
        let source = ArtifactVersion::new(vec![0], "image/x-raw");
        let mut history = seeded_history(&source);

        let result = pipeline.commit(
            &source,
            Rect::new(10.0, 10.0, 10.0, 40.0),
            Size::new(10.0, 10.0),
            &mut history,
        );

        assert!(matches!(result, Err(CommitError::EmptyRegion)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_rejects_subpixel_source_region() {
        // 100x100 display over a tiny 2x2 source: a hairline display
        // region rounds to zero source pixels.
        let pipeline = CommitPipeline::new(FixedCodec::new(RasterBuffer::filled(2, 2, [0; 4])));
        let source = ArtifactVersion::new(vec![0], "image/x-raw");
        let mut history = seeded_history(&source);

        let result = pipeline.commit(
            &source,
            Rect::new(10.0, 10.0, 10.4, 90.0),
            Size::new(100.0, 100.0),
            &mut history,
        );

        assert!(matches!(result, Err(CommitError::SourceRegionEmpty)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_reports_decode_failure() {
        let mut codec = FixedCodec::new(RasterBuffer::filled(10, 10, [0; 4]));
        codec.fail_decode = true;
        let pipeline = CommitPipeline::new(codec);
        let source = ArtifactVersion::new(vec![0], "image/x-raw");
        let mut history = seeded_history(&source);

        let result = pipeline.commit(
            &source,
            Rect::new(0.0, 0.0, 5.0, 5.0),
            Size::new(10.0, 10.0),
            &mut history,
        );

        assert!(matches!(result, Err(CommitError::SourceDecode(_))));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_clips_rounding_overflow() {
        // A region flush against the display edge must not index past the
        // buffer after scaling and rounding.
        let pipeline = CommitPipeline::new(FixedCodec::new(RasterBuffer::filled(
            3,
            3,
            [7, 7, 7, 255],
        )));
        let source = ArtifactVersion::new(vec![0], "image/x-raw");
        let mut history = seeded_history(&source);

        let next = pipeline
            .commit(
                &source,
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Size::new(100.0, 100.0),
                &mut history,
            )
            .unwrap();
        assert_eq!(next.payload().len(), 3 * 3 * 4);
    }
}
