//! The crop region editor.

use crate::drag::{DragController, DragError};
use crate::geometry;
use crate::handles::Handle;
use crate::input::{ContainerBounds, PointerInput};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fraction of the container covered by the initial crop region.
const DEFAULT_REGION_FRACTION: f64 = 0.8;

/// Region editor errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("crop mode is not active")]
    NotCropping,
    /// The selection has no area. Defensive: the region invariants keep
    /// this unreachable, but it is checked before anything destructive.
    #[error("crop region has no area")]
    EmptyRegion,
    #[error(transparent)]
    Drag(#[from] DragError),
}

/// An aspect ratio lock, `width : height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio::new(1.0, 1.0);
    pub const FOUR_THREE: AspectRatio = AspectRatio::new(4.0, 3.0);
    pub const THREE_TWO: AspectRatio = AspectRatio::new(3.0, 2.0);
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio::new(16.0, 9.0);
    pub const NINE_SIXTEEN: AspectRatio = AspectRatio::new(9.0, 16.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The ratio as `width / height`.
    pub fn value(self) -> f64 {
        self.width / self.height
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Interactive crop tool.
///
/// Owns the selection rectangle and aspect lock for the duration of one
/// cropping session; both are discarded on commit or cancel, never
/// persisted. Pointer events are delegated to the drag controller.
#[derive(Debug, Clone, Default)]
pub struct RegionEditor {
    container: Option<ContainerBounds>,
    region: Option<Rect>,
    lock: Option<AspectRatio>,
    drag: DragController,
}

impl RegionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cropping(&self) -> bool {
        self.region.is_some()
    }

    pub fn region(&self) -> Option<Rect> {
        self.region
    }

    pub fn aspect_lock(&self) -> Option<AspectRatio> {
        self.lock
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Enter cropping mode with a centered default selection covering 80%
    /// of the container. Silently does nothing until the artifact has
    /// renderable bounds.
    pub fn start(&mut self, container: ContainerBounds) {
        if !container.has_area() {
            log::debug!("crop start ignored: container has no area");
            return;
        }
        self.container = Some(container);
        self.region = Some(Self::default_region(&container));
        self.lock = None;
    }

    fn default_region(container: &ContainerBounds) -> Rect {
        let width = container.width * DEFAULT_REGION_FRACTION;
        let height = container.height * DEFAULT_REGION_FRACTION;
        let x = (container.width - width) / 2.0;
        let y = (container.height - height) / 2.0;
        Rect::new(x, y, x + width, y + height)
    }

    /// Set or clear the aspect lock.
    ///
    /// A new ratio refits the current region around its center (width
    /// authoritative, derived growth re-centered, shrunk to fit the
    /// container); clearing the lock restores the default region.
    pub fn set_aspect_lock(&mut self, lock: Option<AspectRatio>) {
        let (Some(container), Some(region)) = (self.container, self.region) else {
            return;
        };
        self.lock = lock;
        self.region = Some(match lock {
            Some(ratio) => {
                geometry::fit_ratio_in_bounds(region, ratio.value(), container.size())
            }
            None => Self::default_region(&container),
        });
    }

    /// Begin dragging a handle. Illegal while not in cropping mode.
    pub fn on_handle_down(
        &mut self,
        handle: Handle,
        input: &PointerInput,
    ) -> Result<(), RegionError> {
        let (Some(container), Some(region)) = (self.container, self.region) else {
            return Err(RegionError::NotCropping);
        };
        self.drag.begin(handle, input, &container, region)?;
        Ok(())
    }

    /// Route a pointer-move into the active drag. Returns the updated
    /// region, or `None` when no drag is in flight.
    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Option<Rect> {
        let container = self.container?;
        let updated = self
            .drag
            .update(input, &container, self.lock.map(AspectRatio::value))?;
        self.region = Some(updated);
        Some(updated)
    }

    /// Finish the active drag on pointer-up.
    pub fn on_pointer_up(&mut self, input: &PointerInput) -> Option<Rect> {
        let container = self.container?;
        if let Some(updated) =
            self.drag
                .end(input, &container, self.lock.map(AspectRatio::value))
        {
            self.region = Some(updated);
        }
        self.region
    }

    /// Abort the active drag on pointer-cancel. Cropping mode stays active.
    pub fn on_pointer_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Exit cropping mode, discarding the selection. History is untouched.
    pub fn cancel(&mut self) {
        self.drag.cancel();
        self.container = None;
        self.region = None;
        self.lock = None;
    }

    /// Exit cropping mode and hand the final region (with the display size
    /// it is relative to) to the commit pipeline.
    pub fn commit(&mut self) -> Result<(Rect, Size), RegionError> {
        let (Some(container), Some(region)) = (self.container, self.region) else {
            return Err(RegionError::NotCropping);
        };
        if region.width() <= 0.0 || region.height() <= 0.0 {
            return Err(RegionError::EmptyRegion);
        }
        let display = container.size();
        self.cancel();
        Ok((region, display))
    }
}
