// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colors and line widths used when drawing a frame.

use understory_pane_tree::Rgba8;

/// Appearance of the editor preview.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Clear color; the root fill and grid derive from it.
    pub background: Rgba8,
    /// Outline and fill of selected panes.
    pub selected_color: Rgba8,
    /// Fill of unselected container panes.
    pub pane_color: Rgba8,
    /// Outline of the root pane when it is not selected.
    pub root_outline_color: Rgba8,
    /// Outline width of the root pane.
    pub root_outline_width: f64,
    /// Outline width of container panes.
    pub pane_outline_width: f64,
    /// How much lighter than the background the root fill is.
    pub lighten_amount: u8,
    /// How much darker than the background grid lines are.
    pub grid_darken_amount: u8,
    /// Draw the background grid.
    pub show_grid: bool,
    /// Draw the X/Y axis markers at the layout origin.
    pub show_axes: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::opaque(0x40, 0x40, 0x40),
            selected_color: Rgba8::RED,
            pane_color: Rgba8::WHITE,
            root_outline_color: Rgba8::BLACK,
            root_outline_width: 33.0,
            pane_outline_width: 3.0,
            lighten_amount: 10,
            grid_darken_amount: 20,
            show_grid: true,
            show_axes: true,
        }
    }
}

impl RenderStyle {
    /// Fill color of the root pane.
    pub fn root_fill(&self) -> Rgba8 {
        self.background.lighten(self.lighten_amount)
    }

    /// Color of grid lines.
    pub fn grid_color(&self) -> Rgba8 {
        self.background.darken(self.grid_darken_amount)
    }
}
