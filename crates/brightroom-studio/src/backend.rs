//! Deterministic mock services standing in for the AI backend.
//!
//! Nothing here is intelligent: outputs are derived from the request and
//! source bytes through a seed mixer, so identical requests always produce
//! identical artifacts and tests stay reproducible.

use crate::codec::{RAW_MEDIA_TYPE, RawCodec};
use brightroom_core::{
    ArtifactVersion, BoxFuture, EffectConfig, JobId, JobService, JobStatus, RasterBuffer,
    RasterCodec, TransformBackend, TransformError, TransformRequest, TransformResult,
};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Media type for template and rewritten-text artifacts.
pub const TEXT_MEDIA_TYPE: &str = "text/plain";

/// splitmix32-style finisher for stable pseudo-random output.
pub(crate) fn mix32(mut x: u32) -> u32 {
    x = x.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Fold byte slices into a seed.
pub(crate) fn seed_bytes(parts: &[&[u8]]) -> u32 {
    let mut acc: u32 = 0x811C_9DC5;
    for part in parts {
        for &byte in *part {
            acc ^= byte as u32;
            acc = acc.wrapping_mul(0x0100_0193);
        }
        acc = acc.wrapping_add(0x9E37_79B9);
    }
    mix32(acc)
}

const TEXT_FLOURISHES: [&str; 4] = [
    "Refined with",
    "Rewritten as",
    "Expanded on",
    "Condensed to",
];

/// Mock transform backend.
///
/// Raw images get the effect's pixel configuration applied; text payloads
/// get a deterministic rewrite. A prompt without an effect derives its
/// look from the request seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTransformBackend;

impl MockTransformBackend {
    pub fn new() -> Self {
        Self
    }

    fn transform_image(
        source: &ArtifactVersion,
        request: &TransformRequest,
    ) -> TransformResult<ArtifactVersion> {
        let codec = RawCodec::new();
        let buffer = codec
            .decode(source)
            .map_err(|error| TransformError::Failed(error.to_string()))?;

        let config = match request.effect {
            Some(effect) => effect.config(),
            None => prompt_config(seed_bytes(&[
                source.payload(),
                request.annotation().as_bytes(),
            ])),
        };
        let styled = apply_config(&buffer, &config);

        Ok(ArtifactVersion::with_annotation(
            RawCodec::encode(&styled),
            RAW_MEDIA_TYPE,
            request.annotation(),
        ))
    }

    fn transform_text(
        source: &ArtifactVersion,
        request: &TransformRequest,
    ) -> TransformResult<ArtifactVersion> {
        let text = String::from_utf8(source.payload().to_vec())
            .map_err(|error| TransformError::Failed(error.to_string()))?;
        let seed = seed_bytes(&[source.payload(), request.annotation().as_bytes()]);
        let flourish = TEXT_FLOURISHES[(seed as usize) % TEXT_FLOURISHES.len()];
        let rewritten = format!("{text}\n\n{flourish} {}", request.annotation());

        Ok(ArtifactVersion::with_annotation(
            rewritten.into_bytes(),
            TEXT_MEDIA_TYPE,
            request.annotation(),
        ))
    }
}

impl TransformBackend for MockTransformBackend {
    fn transform(
        &self,
        source: &ArtifactVersion,
        request: &TransformRequest,
    ) -> BoxFuture<'_, TransformResult<ArtifactVersion>> {
        let source = source.clone();
        let request = request.clone();
        Box::pin(async move {
            match source.media_type() {
                RAW_MEDIA_TYPE => Self::transform_image(&source, &request),
                TEXT_MEDIA_TYPE => Self::transform_text(&source, &request),
                other => Err(TransformError::Unsupported(other.to_string())),
            }
        })
    }
}

/// Apply photo configuration per pixel: desaturate, contrast around
/// mid-gray, then gain and tint, clamped to channel range.
fn apply_config(buffer: &RasterBuffer, config: &EffectConfig) -> RasterBuffer {
    let mut pixels = Vec::with_capacity(buffer.pixels().len());
    for chunk in buffer.pixels().chunks_exact(RasterBuffer::BYTES_PER_PIXEL) {
        let rgb = [chunk[0] as f64, chunk[1] as f64, chunk[2] as f64];
        let luma = 0.2126 * rgb[0] + 0.7152 * rgb[1] + 0.0722 * rgb[2];
        for (channel, tint) in rgb.into_iter().zip(config.tint) {
            let mut value = luma + (channel - luma) * config.saturation;
            value = (value - 128.0) * config.contrast + 128.0;
            value *= config.gain * tint;
            pixels.push(value.clamp(0.0, 255.0) as u8);
        }
        pixels.push(chunk[3]);
    }
    match RasterBuffer::new(buffer.width(), buffer.height(), pixels) {
        Ok(styled) => styled,
        Err(_) => buffer.clone(),
    }
}

/// Derive a plausible look for a free-form prompt.
fn prompt_config(seed: u32) -> EffectConfig {
    let unit = |bits: u32| (bits & 0xFF) as f64 / 255.0;
    EffectConfig {
        gain: 0.9 + unit(seed) * 0.2,
        tint: [
            0.85 + unit(seed >> 8) * 0.3,
            0.85 + unit(seed >> 16) * 0.3,
            0.85 + unit(seed >> 24) * 0.3,
        ],
        contrast: 0.95 + unit(seed.rotate_left(5)) * 0.1,
        ..EffectConfig::default()
    }
}

/// Scripted generation service.
///
/// Every submitted job reports `Queued`, then `Running`, then completes
/// with an image derived from the prompt.
#[derive(Debug, Default)]
pub struct MockJobService {
    jobs: RwLock<HashMap<JobId, PendingJob>>,
}

#[derive(Debug)]
struct PendingJob {
    request: TransformRequest,
    polls_left: u8,
}

impl MockJobService {
    /// In-flight statuses a job reports before completing.
    const POLLS_BEFORE_COMPLETE: u8 = 2;
    /// Generated images are square thumbnails.
    const OUTPUT_SIZE: u32 = 64;

    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministically "generate" an image for a request.
    fn generate(request: &TransformRequest) -> ArtifactVersion {
        let annotation = request.annotation();
        let seed = seed_bytes(&[annotation.as_bytes()]);
        let size = Self::OUTPUT_SIZE;

        let mut pixels =
            Vec::with_capacity((size * size) as usize * RasterBuffer::BYTES_PER_PIXEL);
        for y in 0..size {
            for x in 0..size {
                let hashed = mix32(seed ^ (y << 8) ^ x);
                pixels.extend_from_slice(&[
                    (hashed & 0xFF) as u8,
                    ((hashed >> 8) & 0xFF) as u8,
                    ((hashed >> 16) & 0xFF) as u8,
                    255,
                ]);
            }
        }
        let buffer = match RasterBuffer::new(size, size, pixels) {
            Ok(buffer) => buffer,
            Err(_) => RasterBuffer::filled(size, size, [0, 0, 0, 255]),
        };
        ArtifactVersion::with_annotation(RawCodec::encode(&buffer), RAW_MEDIA_TYPE, annotation)
    }
}

impl JobService for MockJobService {
    fn submit(&self, request: &TransformRequest) -> BoxFuture<'_, JobId> {
        let request = request.clone();
        Box::pin(async move {
            let id = Uuid::new_v4();
            if let Ok(mut jobs) = self.jobs.write() {
                jobs.insert(
                    id,
                    PendingJob {
                        request,
                        polls_left: Self::POLLS_BEFORE_COMPLETE,
                    },
                );
            }
            log::debug!("queued generation job {id}");
            id
        })
    }

    fn status(&self, job: JobId) -> BoxFuture<'_, JobStatus> {
        Box::pin(async move {
            let mut jobs = match self.jobs.write() {
                Ok(jobs) => jobs,
                Err(error) => return JobStatus::Failed(format!("lock error: {error}")),
            };

            let polls_left = match jobs.get(&job) {
                Some(pending) => pending.polls_left,
                None => return JobStatus::Failed("unknown job".to_string()),
            };
            if polls_left > 0 {
                if let Some(pending) = jobs.get_mut(&job) {
                    pending.polls_left -= 1;
                }
                return if polls_left == Self::POLLS_BEFORE_COMPLETE {
                    JobStatus::Queued
                } else {
                    JobStatus::Running
                };
            }
            match jobs.remove(&job) {
                Some(pending) => JobStatus::Complete(Self::generate(&pending.request)),
                None => JobStatus::Failed("unknown job".to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brightroom_core::EffectKind;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    fn photo() -> ArtifactVersion {
        RawCodec::artifact(&RasterBuffer::filled(4, 4, [100, 150, 200, 255]))
    }

    #[test]
    fn test_effect_transform_is_deterministic() {
        let backend = MockTransformBackend::new();
        let source = photo();
        let request = TransformRequest::effect(EffectKind::Vintage);

        let first = block_on(backend.transform(&source, &request)).unwrap();
        let second = block_on(backend.transform(&source, &request)).unwrap();

        assert_eq!(first.payload(), second.payload());
        assert_ne!(first, second); // distinct versions, same bytes
        assert_eq!(first.annotation(), Some("Vintage"));
    }

    #[test]
    fn test_noir_desaturates() {
        let backend = MockTransformBackend::new();
        let styled = block_on(
            backend.transform(&photo(), &TransformRequest::effect(EffectKind::Noir)),
        )
        .unwrap();

        let buffer = RawCodec::new().decode(&styled).unwrap();
        let [r, g, b, _] = buffer.pixel(0, 0).unwrap();
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_unsupported_media_type() {
        let backend = MockTransformBackend::new();
        let source = ArtifactVersion::new(vec![0; 8], "video/mp4");
        let result = block_on(
            backend.transform(&source, &TransformRequest::effect(EffectKind::Enhance)),
        );
        assert!(matches!(result, Err(TransformError::Unsupported(_))));
    }

    #[test]
    fn test_text_rewrite_is_deterministic() {
        let backend = MockTransformBackend::new();
        let source = ArtifactVersion::new(b"draft copy".to_vec(), TEXT_MEDIA_TYPE);
        let request = TransformRequest::prompt("make it punchier");

        let first = block_on(backend.transform(&source, &request)).unwrap();
        let second = block_on(backend.transform(&source, &request)).unwrap();
        assert_eq!(first.payload(), second.payload());

        let text = String::from_utf8(first.payload().to_vec()).unwrap();
        assert!(text.starts_with("draft copy"));
        assert!(text.contains("make it punchier"));
    }

    #[test]
    fn test_job_walks_through_statuses() {
        let service = MockJobService::new();
        let request = TransformRequest::prompt("a quiet mountain lake");
        let id = block_on(service.submit(&request));

        assert!(matches!(block_on(service.status(id)), JobStatus::Queued));
        assert!(matches!(block_on(service.status(id)), JobStatus::Running));
        match block_on(service.status(id)) {
            JobStatus::Complete(version) => {
                assert_eq!(version.media_type(), RAW_MEDIA_TYPE);
                assert_eq!(version.annotation(), Some("a quiet mountain lake"));
            }
            other => panic!("expected completion, got {other:?}"),
        }

        // The job is gone once delivered.
        assert!(matches!(block_on(service.status(id)), JobStatus::Failed(_)));
    }

    #[test]
    fn test_generated_image_depends_on_prompt() {
        let a = MockJobService::generate(&TransformRequest::prompt("red dunes"));
        let b = MockJobService::generate(&TransformRequest::prompt("blue dunes"));
        assert_ne!(a.payload(), b.payload());

        let again = MockJobService::generate(&TransformRequest::prompt("red dunes"));
        assert_eq!(a.payload(), again.payload());
    }
}
