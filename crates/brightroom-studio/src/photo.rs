//! Photo editing panel: crop, effects, reversible history.

use crate::codec::RawCodec;
use brightroom_core::{
    ArtifactVersion, AspectRatio, CommitError, CommitPipeline, ContainerBounds, EditHistory,
    EffectKind, Handle, PointerInput, RegionEditor, RegionError, TransformBackend,
    TransformError, TransformRequest,
};
use kurbo::Rect;
use thiserror::Error;

/// Photo panel errors.
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("no photo is loaded")]
    NoPhoto,
    #[error("another operation is still pending")]
    Busy,
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Slider offsets layered on the displayed version.
///
/// Purely view-side state: it follows the current version and resets
/// whenever that changes, so a freshly cropped or restyled photo always
/// starts from neutral sliders.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustments {
    pub brightness: f64,
    pub contrast: f64,
}

/// The photo editor panel: one loaded photo, its edit history, the crop
/// tool, and the effect backend.
///
/// Commits and transforms are mutually exclusive with each other; the
/// panel declines competing operations while one is pending.
pub struct PhotoPanel<B> {
    backend: B,
    history: EditHistory<ArtifactVersion>,
    editor: RegionEditor,
    pipeline: CommitPipeline<RawCodec>,
    adjustments: Adjustments,
    pending: bool,
}

impl<B: TransformBackend> PhotoPanel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            history: EditHistory::new(),
            editor: RegionEditor::new(),
            pipeline: CommitPipeline::new(RawCodec::new()),
            adjustments: Adjustments::default(),
            pending: false,
        }
    }

    /// Load a photo, discarding any prior editing session.
    pub fn load(&mut self, photo: ArtifactVersion) {
        self.editor.cancel();
        self.history.reset(photo);
        self.pending = false;
        self.sync_derived();
    }

    pub fn current(&self) -> Option<&ArtifactVersion> {
        self.history.current()
    }

    pub fn history(&self) -> &EditHistory<ArtifactVersion> {
        &self.history
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments;
    }

    pub fn is_busy(&self) -> bool {
        self.pending
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one version. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo().is_some();
        if changed {
            self.sync_derived();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo().is_some();
        if changed {
            self.sync_derived();
        }
        changed
    }

    // Crop workflow -------------------------------------------------------

    pub fn start_crop(&mut self, container: ContainerBounds) {
        self.editor.start(container);
    }

    pub fn is_cropping(&self) -> bool {
        self.editor.is_cropping()
    }

    pub fn crop_region(&self) -> Option<Rect> {
        self.editor.region()
    }

    pub fn set_aspect_lock(&mut self, lock: Option<AspectRatio>) {
        self.editor.set_aspect_lock(lock);
    }

    pub fn crop_pointer_down(
        &mut self,
        handle: Handle,
        input: &PointerInput,
    ) -> Result<(), PhotoError> {
        self.editor.on_handle_down(handle, input)?;
        Ok(())
    }

    pub fn crop_pointer_move(&mut self, input: &PointerInput) -> Option<Rect> {
        self.editor.on_pointer_move(input)
    }

    pub fn crop_pointer_up(&mut self, input: &PointerInput) -> Option<Rect> {
        self.editor.on_pointer_up(input)
    }

    pub fn crop_pointer_cancel(&mut self) {
        self.editor.on_pointer_cancel();
    }

    pub fn cancel_crop(&mut self) {
        self.editor.cancel();
    }

    /// Commit the crop selection as a new version.
    pub fn commit_crop(&mut self) -> Result<ArtifactVersion, PhotoError> {
        if self.pending {
            return Err(PhotoError::Busy);
        }
        let source = self.history.current().cloned().ok_or(PhotoError::NoPhoto)?;
        let (region, display) = self.editor.commit()?;
        let next = self
            .pipeline
            .commit(&source, region, display, &mut self.history)?;
        self.sync_derived();
        Ok(next)
    }

    /// Run an effect through the backend and record the result. On failure
    /// history is untouched and the prior version stays displayed.
    pub async fn apply_effect(&mut self, effect: EffectKind) -> Result<ArtifactVersion, PhotoError> {
        if self.pending {
            return Err(PhotoError::Busy);
        }
        let source = self.history.current().cloned().ok_or(PhotoError::NoPhoto)?;
        self.pending = true;
        let request = TransformRequest::effect(effect);
        let result = self.backend.transform(&source, &request).await;
        self.pending = false;

        match result {
            Ok(next) => {
                self.history.push(next.clone());
                self.sync_derived();
                Ok(next)
            }
            Err(error) => {
                log::warn!("effect {} failed: {error}", effect.label());
                Err(error.into())
            }
        }
    }

    fn sync_derived(&mut self) {
        self.adjustments = Adjustments::default();
    }
}
