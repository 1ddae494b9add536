//! Pointer input normalization for mouse and touch.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Screen-space bounding box of the rendered artifact, supplied by the
/// rendering layer each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Local-space size of the container.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Screen-space rectangle of the container.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Whether the artifact has renderable area yet.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Raw pointer input in client (screen) coordinates.
///
/// Touch input carries every active touch point; only the first one drives
/// the editor, so mouse and touch share a single code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    Mouse(Point),
    Touch(Vec<Point>),
}

impl PointerInput {
    /// The single client position this input normalizes to.
    pub fn client_position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse(position) => Some(*position),
            PointerInput::Touch(points) => points.first().copied(),
        }
    }
}

/// Pointer lifecycle events delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PointerInput),
    Move(PointerInput),
    Up(PointerInput),
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_bounds() {
        let bounds = ContainerBounds::new(100.0, 50.0, 400.0, 300.0);

        assert_eq!(bounds.size(), Size::new(400.0, 300.0));
        assert_eq!(bounds.to_rect(), Rect::new(100.0, 50.0, 500.0, 350.0));
        assert!(bounds.has_area());
        assert!(!ContainerBounds::new(0.0, 0.0, 0.0, 300.0).has_area());
    }

    #[test]
    fn test_mouse_position() {
        let input = PointerInput::Mouse(Point::new(12.0, 34.0));
        assert_eq!(input.client_position(), Some(Point::new(12.0, 34.0)));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let input = PointerInput::Touch(vec![Point::new(1.0, 2.0), Point::new(9.0, 9.0)]);
        assert_eq!(input.client_position(), Some(Point::new(1.0, 2.0)));

        let empty = PointerInput::Touch(Vec::new());
        assert_eq!(empty.client_position(), None);
    }
}
