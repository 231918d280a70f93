// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background grid and origin axes.

use kurbo::Point;
use understory_pane_tree::Rgba8;

use crate::surface::DrawSurface;

/// Lines on each side of the origin, per direction.
pub const GRID_HALF_COUNT: i32 = 300;
/// Distance between grid lines in layout units.
pub const GRID_SPACING: f64 = 40.0;
/// Every this many lines, one is drawn thick.
pub const GRID_MAJOR_EVERY: usize = 7;
/// Length of each axis marker in layout units.
pub const AXIS_LENGTH: f64 = 20.0;

const MINOR_WIDTH: f64 = 1.0;
const MAJOR_WIDTH: f64 = 2.0;

/// Draw the grid in the current transform scope.
///
/// Lines run through `-300..=300` multiples of [`GRID_SPACING`] in both
/// directions; the seventh, fourteenth, ... line counted from the far edge is
/// thick.
pub fn draw_grid<S: DrawSurface + ?Sized>(surface: &mut S, color: Rgba8) {
    let extent = f64::from(GRID_HALF_COUNT) * GRID_SPACING;
    for (n, i) in (-GRID_HALF_COUNT..=GRID_HALF_COUNT).enumerate() {
        let width = if n % GRID_MAJOR_EVERY == GRID_MAJOR_EVERY - 1 {
            MAJOR_WIDTH
        } else {
            MINOR_WIDTH
        };
        let offset = f64::from(i) * GRID_SPACING;
        surface.draw_line(
            Point::new(-extent, offset),
            Point::new(extent, offset),
            color,
            width,
        );
        surface.draw_line(
            Point::new(offset, -extent),
            Point::new(offset, extent),
            color,
            width,
        );
    }
}

/// Draw the X (red) and Y (green) axis markers at the origin.
pub fn draw_axes<S: DrawSurface + ?Sized>(surface: &mut S) {
    surface.draw_line(Point::ZERO, Point::new(0.0, AXIS_LENGTH), Rgba8::GREEN, MINOR_WIDTH);
    surface.draw_line(Point::ZERO, Point::new(AXIS_LENGTH, 0.0), Rgba8::RED, MINOR_WIDTH);
}
