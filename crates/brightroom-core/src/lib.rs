//! BrightRoom Core Library
//!
//! Platform-agnostic editing logic for the BrightRoom creative studio:
//! the interactive crop region editor, drag session handling, the versioned
//! edit history shared by every panel, and the commit pipeline that turns a
//! committed region into a new artifact version.

pub mod artifact;
pub mod drag;
pub mod effects;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod input;
pub mod jobs;
pub mod pipeline;
pub mod raster;
pub mod region;
pub mod transform;

pub use artifact::{ArtifactVersion, VersionId};
pub use drag::{DragController, DragError, DragSession, DragState};
pub use effects::{EffectConfig, EffectKind};
pub use geometry::MIN_REGION_SIZE;
pub use handles::{Handle, HANDLE_HIT_TOLERANCE};
pub use history::{EditHistory, HistoryError};
pub use input::{ContainerBounds, PointerEvent, PointerInput};
pub use jobs::{JobId, JobPoll, JobService, JobStatus, PollOutcome};
pub use pipeline::{CommitError, CommitPipeline};
pub use raster::{CodecError, CodecResult, RasterBuffer, RasterCodec, SourceRect};
pub use region::{AspectRatio, RegionEditor, RegionError};
pub use transform::{
    BoxFuture, TransformBackend, TransformError, TransformRequest, TransformResult,
};
