// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-drag tracking for panning.

use kurbo::{Point, Vec2};

/// Tracks a held pointer and reports movement since the previous event.
///
/// Feed the reported deltas to [`Camera::pan_by_device`](crate::Camera::pan_by_device).
/// Ending a drag does not undo the pan it produced.
///
/// ```rust
/// use kurbo::{Point, Vec2};
/// use understory_view2d::{Camera, PanDrag};
///
/// let mut camera = Camera::new();
/// let mut drag = PanDrag::new();
///
/// drag.on_down(Point::new(10.0, 10.0));
/// if let Some(delta) = drag.on_move(Point::new(15.0, 12.0)) {
///     camera.pan_by_device(delta);
/// }
/// drag.on_up();
///
/// assert_eq!(camera.pan(), Vec2::new(5.0, -2.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanDrag {
    /// Pointer position at the previous event while held.
    last: Option<Point>,
}

impl PanDrag {
    /// A drag that is not active.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Whether the pointer is currently held.
    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    /// Start a drag at `position`, replacing any drag in progress.
    pub fn on_down(&mut self, position: Point) {
        self.last = Some(position);
    }

    /// Record a move. Returns the device-space delta since the previous event
    /// if a drag is active.
    pub fn on_move(&mut self, position: Point) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let delta = position - *last;
        *last = position;
        Some(delta)
    }

    /// End the drag. Returns `true` if one was active.
    pub fn on_up(&mut self) -> bool {
        self.last.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_press_are_ignored() {
        let mut drag = PanDrag::new();
        assert_eq!(drag.on_move(Point::new(3.0, 4.0)), None);
        assert!(!drag.on_up());
    }

    #[test]
    fn deltas_are_frame_to_frame() {
        let mut drag = PanDrag::new();
        drag.on_down(Point::new(0.0, 0.0));
        assert_eq!(drag.on_move(Point::new(2.0, 1.0)), Some(Vec2::new(2.0, 1.0)));
        assert_eq!(drag.on_move(Point::new(5.0, 1.0)), Some(Vec2::new(3.0, 0.0)));
        assert!(drag.on_up());
        assert!(!drag.is_active());
    }
}
