// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle and rotation helpers shared by hit testing and drawing.

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size};

use crate::types::{HorizontalOrigin, Origin, Vec3, VerticalOrigin};

/// Local rectangle of a pane with the given size and origin anchor.
///
/// Pane space is Y-up: a `Top` origin puts the rectangle below the anchor
/// (`y` in `[-h, 0]`), a `Bottom` origin above it (`y` in `[0, h]`).
/// Non-finite or negative extents collapse to zero.
pub fn pane_rect(size: Size, origin: Origin) -> Rect {
    let w = extent(size.width);
    let h = extent(size.height);
    let (x0, x1) = match origin.x {
        HorizontalOrigin::Left => (0.0, w),
        HorizontalOrigin::Center => (-w / 2.0, w / 2.0),
        HorizontalOrigin::Right => (-w, 0.0),
    };
    let (y0, y1) = match origin.y {
        VerticalOrigin::Top => (-h, 0.0),
        VerticalOrigin::Center => (-h / 2.0, h / 2.0),
        VerticalOrigin::Bottom => (0.0, h),
    };
    Rect::new(x0, y0, x1, y1)
}

fn extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Corners of `rect` in top-left, top-right, bottom-right, bottom-left order.
///
/// "Top" is the larger `y`, since pane space is Y-up.
pub fn quad_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y0),
    ]
}

/// Flatten a 3D rotation (degrees, applied X then Y then Z) onto the XY plane.
///
/// A point `(x, y, 0)` is rotated by `Rz * Ry * Rx` and projected
/// orthographically by dropping `z`. With only a Z angle this is the ordinary
/// 2D rotation; X and Y angles foreshorten the pane the way a tilted card looks
/// when viewed head-on.
pub fn rotation_affine(degrees: Vec3) -> Affine {
    if degrees == Vec3::ZERO {
        return Affine::IDENTITY;
    }
    let to_rad = PI / 180.0;
    let (sx, cx) = ((degrees.x * to_rad).sin(), (degrees.x * to_rad).cos());
    let (sy, cy) = ((degrees.y * to_rad).sin(), (degrees.y * to_rad).cos());
    let (sz, cz) = ((degrees.z * to_rad).sin(), (degrees.z * to_rad).cos());
    Affine::new([
        cy * cz,
        cy * sz,
        sx * sy * cz - cx * sz,
        sx * sy * sz + cx * cz,
        0.0,
        0.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_rules() {
        let size = Size::new(10.0, 4.0);
        assert_eq!(
            pane_rect(size, Origin::default()),
            Rect::new(-5.0, -2.0, 5.0, 2.0)
        );
        assert_eq!(
            pane_rect(size, Origin::new(HorizontalOrigin::Left, VerticalOrigin::Top)),
            Rect::new(0.0, -4.0, 10.0, 0.0)
        );
        assert_eq!(
            pane_rect(
                size,
                Origin::new(HorizontalOrigin::Right, VerticalOrigin::Bottom)
            ),
            Rect::new(-10.0, 0.0, 0.0, 4.0)
        );
    }

    #[test]
    fn malformed_size_is_degenerate() {
        let r = pane_rect(Size::new(f64::NAN, -3.0), Origin::default());
        assert_eq!(r.area(), 0.0);
    }

    #[test]
    fn z_rotation_matches_kurbo() {
        let ours = rotation_affine(Vec3::new(0.0, 0.0, 30.0));
        let theirs = Affine::rotate(30.0 * PI / 180.0);
        for (a, b) in ours.as_coeffs().iter().zip(theirs.as_coeffs()) {
            assert!((a - b).abs() < 1e-12, "{a} != {b}");
        }
    }

    #[test]
    fn x_rotation_foreshortens_y() {
        let a = rotation_affine(Vec3::new(60.0, 0.0, 0.0));
        let p = a * Point::new(3.0, 2.0);
        assert!((p.x - 3.0).abs() < 1e-12, "x was {}", p.x);
        assert!((p.y - 1.0).abs() < 1e-12, "y was {}", p.y);
    }

    #[test]
    fn corner_order_starts_top_left() {
        let c = quad_corners(Rect::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(c[0], Point::new(0.0, 1.0));
        assert_eq!(c[2], Point::new(2.0, 0.0));
    }
}
