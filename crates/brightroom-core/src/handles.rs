//! Manipulation handles for the crop region.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in display units.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// A control point on the crop region.
///
/// `Move` drags the whole region; the other eight resize the edge or
/// corner they are named after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handle {
    Move,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    /// The eight resize handles, corners first (hit-test priority order).
    pub const RESIZE: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::Top,
        Handle::Bottom,
        Handle::Left,
        Handle::Right,
    ];

    pub fn affects_left(self) -> bool {
        matches!(self, Handle::Left | Handle::TopLeft | Handle::BottomLeft)
    }

    pub fn affects_right(self) -> bool {
        matches!(self, Handle::Right | Handle::TopRight | Handle::BottomRight)
    }

    pub fn affects_top(self) -> bool {
        matches!(self, Handle::Top | Handle::TopLeft | Handle::TopRight)
    }

    pub fn affects_bottom(self) -> bool {
        matches!(self, Handle::Bottom | Handle::BottomLeft | Handle::BottomRight)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight
        )
    }

    pub fn is_edge(self) -> bool {
        matches!(
            self,
            Handle::Top | Handle::Bottom | Handle::Left | Handle::Right
        )
    }

    /// Position of a resize handle on the region outline: corner points and
    /// edge midpoints. `None` for `Move`, which has no fixed anchor.
    pub fn position(self, region: Rect) -> Option<Point> {
        let center = region.center();
        let point = match self {
            Handle::Move => return None,
            Handle::Top => Point::new(center.x, region.y0),
            Handle::Bottom => Point::new(center.x, region.y1),
            Handle::Left => Point::new(region.x0, center.y),
            Handle::Right => Point::new(region.x1, center.y),
            Handle::TopLeft => Point::new(region.x0, region.y0),
            Handle::TopRight => Point::new(region.x1, region.y0),
            Handle::BottomLeft => Point::new(region.x0, region.y1),
            Handle::BottomRight => Point::new(region.x1, region.y1),
        };
        Some(point)
    }
}

/// All resize handles with their positions, for rendering the overlay.
pub fn handle_positions(region: Rect) -> Vec<(Handle, Point)> {
    Handle::RESIZE
        .iter()
        .filter_map(|&handle| handle.position(region).map(|point| (handle, point)))
        .collect()
}

/// Find the handle at `point` in local coordinates, if any.
///
/// Corners win over edges; a point inside the region that hits no resize
/// handle grabs the whole region (`Move`).
pub fn hit_test(region: Rect, point: Point, tolerance: f64) -> Option<Handle> {
    for &handle in &Handle::RESIZE {
        let Some(position) = handle.position(region) else {
            continue;
        };
        let dx = point.x - position.x;
        let dy = point.y - position.y;
        if dx * dx + dy * dy <= tolerance * tolerance {
            return Some(handle);
        }
    }

    if region.contains(point) {
        return Some(Handle::Move);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Rect {
        Rect::new(10.0, 20.0, 110.0, 80.0)
    }

    #[test]
    fn test_edge_predicates() {
        assert!(Handle::TopLeft.affects_left());
        assert!(Handle::TopLeft.affects_top());
        assert!(!Handle::TopLeft.affects_right());
        assert!(Handle::Bottom.affects_bottom());
        assert!(!Handle::Move.affects_left());
        assert!(Handle::Right.is_edge());
        assert!(Handle::BottomRight.is_corner());
    }

    #[test]
    fn test_handle_positions() {
        let positions = handle_positions(region());
        assert_eq!(positions.len(), 8);

        assert_eq!(
            Handle::TopLeft.position(region()),
            Some(Point::new(10.0, 20.0))
        );
        assert_eq!(
            Handle::Bottom.position(region()),
            Some(Point::new(60.0, 80.0))
        );
        assert_eq!(Handle::Move.position(region()), None);
    }

    #[test]
    fn test_hit_test_corner_priority() {
        // The top-left corner also lies within tolerance of the top and
        // left edges; the corner must win.
        let hit = hit_test(region(), Point::new(12.0, 22.0), 10.0);
        assert_eq!(hit, Some(Handle::TopLeft));
    }

    #[test]
    fn test_hit_test_edges_and_interior() {
        assert_eq!(
            hit_test(region(), Point::new(60.0, 21.0), 6.0),
            Some(Handle::Top)
        );
        assert_eq!(
            hit_test(region(), Point::new(109.0, 50.0), 6.0),
            Some(Handle::Right)
        );
        assert_eq!(
            hit_test(region(), Point::new(60.0, 50.0), 6.0),
            Some(Handle::Move)
        );
        assert_eq!(hit_test(region(), Point::new(200.0, 200.0), 6.0), None);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Handle::BottomRight).unwrap();
        assert_eq!(json, "\"bottom_right\"");
        let back: Handle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Handle::BottomRight);
    }
}
