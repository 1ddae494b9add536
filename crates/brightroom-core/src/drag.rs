//! Drag session lifecycle for handle manipulation.

use crate::geometry::{self, MIN_REGION_SIZE};
use crate::handles::Handle;
use crate::input::{ContainerBounds, PointerInput};
use kurbo::{Point, Rect, Vec2};
use thiserror::Error;

/// Drag errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    /// Only one drag may run at a time; a second pointer-down is rejected.
    #[error("a drag session is already active")]
    SessionActive,
    /// The input carried no usable pointer position.
    #[error("pointer input has no position")]
    NoPosition,
}

/// State of one active handle manipulation.
///
/// The anchor fields are captured at pointer-down and never mutated: every
/// update is recomputed from the anchor plus the current pointer delta, so
/// repeated moves cannot accumulate drift.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub handle: Handle,
    /// Pointer position at drag start, in local coordinates.
    pub anchor_pointer: Point,
    /// Region at drag start.
    pub anchor_region: Rect,
}

/// Idle -> Active -> Idle; the session object is discarded on exit.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Active(DragSession),
}

/// Translates pointer events into region updates while a session is active.
///
/// Everything is synchronous within one event-handling turn; move and up
/// events are ignored while idle, the analog of only binding global
/// listeners for the duration of a drag.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Active(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Begin a session on pointer-down over a handle.
    pub fn begin(
        &mut self,
        handle: Handle,
        input: &PointerInput,
        container: &ContainerBounds,
        region: Rect,
    ) -> Result<(), DragError> {
        if self.is_active() {
            log::debug!("pointer-down ignored: a drag session is already active");
            return Err(DragError::SessionActive);
        }
        let client = input.client_position().ok_or(DragError::NoPosition)?;
        self.state = DragState::Active(DragSession {
            handle,
            anchor_pointer: geometry::pointer_to_local(client, container),
            anchor_region: region,
        });
        Ok(())
    }

    /// Apply a pointer-move: delta from the anchor, handle resize or
    /// translation, optional aspect lock, then clamp. Returns the region to
    /// publish, or `None` while idle.
    pub fn update(
        &self,
        input: &PointerInput,
        container: &ContainerBounds,
        lock: Option<f64>,
    ) -> Option<Rect> {
        let DragState::Active(session) = &self.state else {
            return None;
        };
        let client = input.client_position()?;
        let local = geometry::pointer_to_local(client, container);
        let dx = local.x - session.anchor_pointer.x;
        let dy = local.y - session.anchor_pointer.y;
        let bounds = container.size();

        let region = if session.handle == Handle::Move {
            geometry::clamp_translation(session.anchor_region + Vec2::new(dx, dy), bounds)
        } else {
            let mut resized = geometry::resize_with_handle(session.anchor_region, session.handle, dx, dy);
            if let Some(ratio) = lock {
                resized = geometry::apply_aspect_lock(resized, ratio, session.handle);
            }
            geometry::clamp_region(resized, bounds, MIN_REGION_SIZE)
        };
        Some(region)
    }

    /// End the session on pointer-up. Returns the final region update.
    pub fn end(
        &mut self,
        input: &PointerInput,
        container: &ContainerBounds,
        lock: Option<f64>,
    ) -> Option<Rect> {
        let region = self.update(input, container, lock);
        self.state = DragState::Idle;
        region
    }

    /// Abort the session on pointer-cancel; the region is left as last
    /// published.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
