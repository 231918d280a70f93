// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom camera.

use kurbo::{Affine, Point, Size, Vec2};

/// Default zoom, in tenths.
const DEFAULT_TENTHS: u16 = 10;
/// Largest zoom, in tenths (10.0).
const MAX_TENTHS: u16 = 100;
/// Zoom must stay strictly above this many tenths (0.1).
const FLOOR_TENTHS: u16 = 1;

/// Editor camera: pan offset plus notched zoom.
///
/// The view transform is
/// `translate(viewport_center) * scale(zoom, -zoom) * translate(pan)`:
/// the pan offset is in world units and is applied before zooming, and the
/// world origin sits at the viewport center when the pan is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    zoom_tenths: u16,
    pan: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Largest zoom factor.
    pub const MAX_ZOOM: f64 = 10.0;
    /// Zoom factors stay strictly above this value.
    pub const MIN_ZOOM_EXCLUSIVE: f64 = 0.1;
    /// Zoom change per scroll notch.
    pub const ZOOM_STEP: f64 = 0.1;

    /// Camera at zoom 1.0 with no pan.
    pub const fn new() -> Self {
        Self {
            zoom_tenths: DEFAULT_TENTHS,
            pan: Vec2::ZERO,
        }
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        f64::from(self.zoom_tenths) / 10.0
    }

    /// Current pan offset in world units.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Set the zoom, rounded to the nearest tenth and clamped to `(0.1, 10]`.
    ///
    /// Non-finite values reset to 1.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_tenths = if zoom.is_finite() {
            tenths_from_zoom(zoom)
        } else {
            DEFAULT_TENTHS
        };
    }

    /// Replace the pan offset.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
    }

    /// Zoom in one notch. Returns `false` if already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom_tenths >= MAX_TENTHS {
            return false;
        }
        self.zoom_tenths += 1;
        tracing::trace!(zoom = self.zoom(), "zoom in");
        true
    }

    /// Zoom out one notch. Returns `false` if that would reach 0.1 or below.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom_tenths <= FLOOR_TENTHS + 1 {
            return false;
        }
        self.zoom_tenths -= 1;
        tracing::trace!(zoom = self.zoom(), "zoom out");
        true
    }

    /// Apply one scroll event: positive deltas zoom in one notch, negative
    /// deltas zoom out one notch, zero does nothing.
    ///
    /// The magnitude of `delta` is ignored; each wheel event is one notch.
    pub fn scroll(&mut self, delta: f64) -> bool {
        if delta > 0.0 {
            self.zoom_in()
        } else if delta < 0.0 {
            self.zoom_out()
        } else {
            false
        }
    }

    /// Add a world-space offset to the pan.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Add a raw pointer delta (device pixels, Y down) to the pan.
    ///
    /// The delta is not divided by the zoom; the Y component is negated
    /// because the view flips Y.
    pub fn pan_by_device(&mut self, device_delta: Vec2) {
        self.pan_by(Vec2::new(device_delta.x, -device_delta.y));
    }

    /// Reset to zoom 1.0 and no pan.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// World-to-device transform for a viewport of the given size.
    pub fn view_transform(&self, viewport: Size) -> Affine {
        let zoom = self.zoom();
        Affine::translate(viewport.to_vec2() / 2.0)
            * Affine::scale_non_uniform(zoom, -zoom)
            * Affine::translate(self.pan)
    }

    /// Map a device point (origin top-left, Y down) into world space.
    pub fn device_to_layout(&self, device: Point, viewport: Size) -> Point {
        self.view_transform(viewport).inverse() * device
    }

    /// Map a world point into device space.
    pub fn layout_to_device(&self, layout: Point, viewport: Size) -> Point {
        self.view_transform(viewport) * layout
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "value is clamped to the u16 zoom range before the cast."
)]
fn tenths_from_zoom(zoom: f64) -> u16 {
    let clamped = (zoom * 10.0).clamp(f64::from(FLOOR_TENTHS + 1), f64::from(MAX_TENTHS));
    (clamped + 0.5) as u16
}
