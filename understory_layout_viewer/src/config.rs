// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer configuration and its persistence hook.

use alloc::string::String;

use understory_pane_render::RenderStyle;
use understory_pane_tree::{HitTestOptions, Rgba8};

/// Settings owned by one viewer instance.
///
/// Injected at construction; the only field the viewer changes on its own is
/// [`background`](Self::background), through
/// [`LayoutViewer::update_background_color`](crate::LayoutViewer::update_background_color).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ViewerConfig {
    /// Clear color.
    pub background: Rgba8,
    /// Highlight for selected panes.
    pub selected_color: Rgba8,
    /// Fill of unselected container panes.
    pub pane_color: Rgba8,
    /// Root outline when the root is not selected.
    pub root_outline_color: Rgba8,
    /// Root outline width.
    pub root_outline_width: f64,
    /// Container outline width.
    pub pane_outline_width: f64,
    /// Root fill is the background lightened by this much.
    pub lighten_amount: u8,
    /// Grid lines are the background darkened by this much.
    pub grid_darken_amount: u8,
    /// Draw the background grid.
    pub show_grid: bool,
    /// Draw the origin axes.
    pub show_axes: bool,
    /// Picking behavior.
    pub hit_test: HitTestOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            background: style.background,
            selected_color: style.selected_color,
            pane_color: style.pane_color,
            root_outline_color: style.root_outline_color,
            root_outline_width: style.root_outline_width,
            pane_outline_width: style.pane_outline_width,
            lighten_amount: style.lighten_amount,
            grid_darken_amount: style.grid_darken_amount,
            show_grid: style.show_grid,
            show_axes: style.show_axes,
            hit_test: HitTestOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// The drawing subset of this configuration.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            background: self.background,
            selected_color: self.selected_color,
            pane_color: self.pane_color,
            root_outline_color: self.root_outline_color,
            root_outline_width: self.root_outline_width,
            pane_outline_width: self.pane_outline_width,
            lighten_amount: self.lighten_amount,
            grid_darken_amount: self.grid_darken_amount,
            show_grid: self.show_grid,
            show_axes: self.show_axes,
        }
    }
}

/// Failure reported by a [`SettingsStore`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The store could not persist the configuration.
    #[error("failed to save viewer settings: {0}")]
    Save(String),
}

/// Where the viewer persists configuration changes.
pub trait SettingsStore {
    /// Persist `config`.
    fn save(&mut self, config: &ViewerConfig) -> Result<(), SettingsError>;
}

/// A [`SettingsStore`] that keeps the last saved configuration in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    last: Option<ViewerConfig>,
    saves: usize,
}

impl MemorySettings {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently saved configuration.
    pub fn last(&self) -> Option<&ViewerConfig> {
        self.last.as_ref()
    }

    /// How many times [`SettingsStore::save`] was called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemorySettings {
    fn save(&mut self, config: &ViewerConfig) -> Result<(), SettingsError> {
        self.last = Some(*config);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_render_style() {
        let config = ViewerConfig::default();
        assert_eq!(config.render_style(), RenderStyle::default());
        assert_eq!(config.root_outline_width, 33.0);
        assert_eq!(config.pane_outline_width, 3.0);
        assert!(!config.hit_test.respect_visibility);
    }
}
