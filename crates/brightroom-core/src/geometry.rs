//! Pure geometry for the crop region editor.
//!
//! Regions live in the display coordinate space of the rendered artifact.
//! Every function here is stateless; the drag controller composes them into
//! resize -> aspect lock -> clamp for each pointer move.

use crate::handles::Handle;
use crate::input::ContainerBounds;
use kurbo::{Point, Rect, Size, Vec2};

/// Minimum crop region dimension in display units.
pub const MIN_REGION_SIZE: f64 = 20.0;

/// Fit a region inside `bounds`, capping edges rather than sliding it.
///
/// A resize that pushes past a bound stops growing there; the opposite edge
/// stays where it was. Inverted regions (an edge dragged past its opposite)
/// are normalized first, and `min_size` is enforced by expanding into
/// whatever space the bounds leave.
pub fn clamp_region(region: Rect, bounds: Size, min_size: f64) -> Rect {
    let mut x0 = region.x0.min(region.x1).max(0.0);
    let mut x1 = region.x0.max(region.x1).min(bounds.width);
    let mut y0 = region.y0.min(region.y1).max(0.0);
    let mut y1 = region.y0.max(region.y1).min(bounds.height);

    if x1 - x0 < min_size {
        x1 = (x0 + min_size).min(bounds.width);
        x0 = (x1 - min_size).max(0.0);
    }
    if y1 - y0 < min_size {
        y1 = (y0 + min_size).min(bounds.height);
        y0 = (y1 - min_size).max(0.0);
    }

    Rect::new(x0, y0, x1, y1)
}

/// Fit a moved region inside `bounds` by clamping its position only.
/// The size is preserved; this is the move-handle path.
pub fn clamp_translation(region: Rect, bounds: Size) -> Rect {
    let width = region.width();
    let height = region.height();
    let x = region.x0.clamp(0.0, (bounds.width - width).max(0.0));
    let y = region.y0.clamp(0.0, (bounds.height - height).max(0.0));
    Rect::new(x, y, x + width, y + height)
}

/// Apply raw pointer deltas to the anchor region per handle semantics.
///
/// Edges adjacent to the handle move by the delta; opposite edges stay
/// fixed, so a left or top handle changes position and size together.
/// `Move` translates the whole region.
pub fn resize_with_handle(anchor: Rect, handle: Handle, dx: f64, dy: f64) -> Rect {
    if handle == Handle::Move {
        return anchor + Vec2::new(dx, dy);
    }

    let mut region = anchor;
    if handle.affects_left() {
        region.x0 += dx;
    }
    if handle.affects_right() {
        region.x1 += dx;
    }
    if handle.affects_top() {
        region.y0 += dy;
    }
    if handle.affects_bottom() {
        region.y1 += dy;
    }
    region
}

/// Recompute one dimension of a freeform-resized region so that
/// `width / height == ratio`.
///
/// Corner and left/right handles treat width as authoritative and derive
/// height; top/bottom handles derive width from height. Growth on the
/// derived axis re-centers around the original center of that axis, except
/// that a handle touching the top edge grows upward and one touching the
/// left edge grows leftward, keeping the opposite edge anchored.
pub fn apply_aspect_lock(region: Rect, ratio: f64, handle: Handle) -> Rect {
    match handle {
        Handle::Top | Handle::Bottom => {
            let dw = region.height() * ratio - region.width();
            let (x0, x1) = if handle.affects_left() {
                (region.x0 - dw, region.x1)
            } else if handle.affects_right() {
                (region.x0, region.x1 + dw)
            } else {
                (region.x0 - dw / 2.0, region.x1 + dw / 2.0)
            };
            Rect::new(x0, region.y0, x1, region.y1)
        }
        _ => {
            let dh = region.width() / ratio - region.height();
            let (y0, y1) = if handle.affects_top() {
                (region.y0 - dh, region.y1)
            } else if handle.affects_bottom() {
                (region.y0, region.y1 + dh)
            } else {
                (region.y0 - dh / 2.0, region.y1 + dh / 2.0)
            };
            Rect::new(region.x0, y0, region.x1, y1)
        }
    }
}

/// Refit a region to `ratio` around its current center. Width is
/// authoritative and the derived vertical growth is re-centered; used when
/// the user picks an aspect lock outside of a drag.
pub fn fit_to_ratio(region: Rect, ratio: f64) -> Rect {
    let dh = region.width() / ratio - region.height();
    Rect::new(
        region.x0,
        region.y0 - dh / 2.0,
        region.x1,
        region.y1 + dh / 2.0,
    )
}

/// Refit a region to `ratio` and make it fit inside `bounds`.
///
/// Unlike [`clamp_region`], an overflow shrinks the region proportionally
/// around its center so the ratio survives, then the position is clamped.
/// This is the best-fit used when the user picks a lock from the toolbar.
pub fn fit_ratio_in_bounds(region: Rect, ratio: f64, bounds: Size) -> Rect {
    let fitted = fit_to_ratio(region, ratio);
    let scale = (bounds.width / fitted.width())
        .min(bounds.height / fitted.height())
        .min(1.0);

    let scaled = if scale < 1.0 {
        let center = fitted.center();
        let half_w = fitted.width() * scale / 2.0;
        let half_h = fitted.height() * scale / 2.0;
        Rect::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    } else {
        fitted
    };
    clamp_translation(scaled, bounds)
}

/// Map a client (screen) position into the container's local space.
pub fn pointer_to_local(client: Point, container: &ContainerBounds) -> Point {
    Point::new(client.x - container.left, client.y - container.top)
}

/// Scale a display-space rectangle into source (native) resolution.
pub fn to_source_space(rect: Rect, scale_x: f64, scale_y: f64) -> Rect {
    Rect::new(
        rect.x0 * scale_x,
        rect.y0 * scale_y,
        rect.x1 * scale_x,
        rect.y1 * scale_y,
    )
}
