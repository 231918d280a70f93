// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewer instance.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use understory_pane_render::{DrawSurface, FrameStats, LayoutRenderer, TextureCache, TextureResource};
use understory_pane_tree::{Layout, PaneId, Rgba8};
use understory_selection::Selection;
use understory_view2d::{Camera, PanDrag};

use crate::config::{SettingsStore, ViewerConfig};
use crate::error::ViewerError;
use crate::input::{PointerButton, PointerEvent};

/// Interactive previewer for one layout at a time.
///
/// The host shell forwards its events (`on_*`), asks for frames with
/// [`paint`](Self::paint) whenever [`take_redraw_request`](Self::take_redraw_request)
/// returns `true`, and supplies a [`DrawSurface`] and texture resources.
///
/// Everything happens on the caller's thread. Inspector panels may read and
/// edit the selection between frames through [`selection_mut`](Self::selection_mut);
/// call [`update_viewport`](Self::update_viewport) afterwards.
#[derive(Debug)]
pub struct LayoutViewer<T> {
    layout: Option<Layout>,
    textures: TextureCache<T>,
    camera: Camera,
    selection: Selection<PaneId>,
    drag: PanDrag,
    config: ViewerConfig,
    renderer: LayoutRenderer,
    viewport: Size,
    redraw_requested: bool,
}

impl<T: TextureResource> LayoutViewer<T> {
    /// Create a viewer with no layout loaded.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            layout: None,
            textures: TextureCache::new(),
            camera: Camera::new(),
            selection: Selection::new(),
            drag: PanDrag::new(),
            renderer: LayoutRenderer::new(config.render_style()),
            config,
            viewport: Size::ZERO,
            redraw_requested: false,
        }
    }

    /// Replace the displayed layout and its textures.
    ///
    /// The layout is validated first. A layout with structural errors is
    /// rejected and the previous one stays loaded. On success the previous
    /// layout's textures are disposed and the selection is cleared; the
    /// camera is kept.
    pub fn reset_layout<I>(&mut self, layout: Layout, textures: I) -> Result<(), ViewerError>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        layout.validate()?;

        self.textures.dispose_all();
        for (name, texture) in textures {
            self.textures.insert(name, texture);
        }
        let missing: Vec<&str> = layout
            .texture_names
            .iter()
            .map(String::as_str)
            .filter(|name| !self.textures.contains(name))
            .collect();
        if !missing.is_empty() {
            tracing::debug!(layout = %layout.name, ?missing, "textures not provided; placeholders will be drawn");
        }

        tracing::debug!(layout = %layout.name, panes = layout.tree.len(), "layout loaded");
        self.selection.clear();
        self.drag = PanDrag::new();
        self.layout = Some(layout);
        self.update_viewport();
        Ok(())
    }

    /// The loaded layout.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// The loaded layout, for edits between frames. Requests a redraw.
    pub fn layout_mut(&mut self) -> Option<&mut Layout> {
        self.redraw_requested = true;
        self.layout.as_mut()
    }

    /// Ask for the view to be painted again.
    pub fn update_viewport(&mut self) {
        self.redraw_requested = true;
    }

    /// Whether a redraw was requested since the last call; clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    /// Change the background color, persist the configuration, and redraw.
    ///
    /// The color is applied even if persisting fails.
    pub fn update_background_color(
        &mut self,
        color: Rgba8,
        store: &mut impl SettingsStore,
    ) -> Result<(), ViewerError> {
        self.config.background = color;
        self.renderer.set_style(self.config.render_style());
        self.update_viewport();
        store.save(&self.config).map_err(|err| {
            tracing::warn!(%err, "background color not persisted");
            ViewerError::from(err)
        })
    }

    /// Draw the current frame onto `surface`.
    pub fn paint<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> Result<FrameStats, ViewerError> {
        let Some(layout) = &self.layout else {
            return Err(ViewerError::NoLayout);
        };
        let stats = self.renderer.render(
            surface,
            layout,
            &mut self.textures,
            &self.selection,
            &self.camera,
            self.viewport,
        )?;
        Ok(stats)
    }

    /// Handle a button press.
    ///
    /// The selection is cleared first. Alt with the primary button picks from
    /// the root (the root itself can be picked); the primary button alone
    /// starts a pan drag and picks among the root's children only. A hit
    /// becomes the sole selected pane. Returns the hit.
    pub fn on_pointer_down(&mut self, event: PointerEvent) -> Option<PaneId> {
        let cleared = self.selection.clear();
        let point = self.camera.device_to_layout(event.position, self.viewport);
        let options = self.config.hit_test;

        let hit = match &self.layout {
            Some(layout) if event.is_alt_pick() => {
                layout.tree.hit_test(layout.root, point, options)
            }
            Some(layout) if event.button == PointerButton::Primary => {
                self.drag.on_down(event.position);
                layout.tree.hit_test_children(layout.root, point, options)
            }
            _ => None,
        };

        if let Some(id) = hit {
            tracing::debug!(pane = ?id, x = point.x, y = point.y, "pane picked");
            self.selection.replace(id);
        }
        if cleared || hit.is_some() {
            self.update_viewport();
        }
        hit
    }

    /// Handle a button release. Ends a pan drag; the pan is kept.
    pub fn on_pointer_up(&mut self, event: PointerEvent) {
        if event.button == PointerButton::Primary {
            self.drag.on_up();
        }
    }

    /// Handle pointer motion. Pans while the primary button is held.
    pub fn on_pointer_move(&mut self, position: Point) {
        if let Some(delta) = self.drag.on_move(position) {
            self.camera.pan_by_device(delta);
            self.update_viewport();
        }
    }

    /// Handle one wheel event: positive zooms in a notch, negative out.
    pub fn on_scroll(&mut self, delta: f64) {
        if self.camera.scroll(delta) {
            self.update_viewport();
        }
    }

    /// Handle a resize of the drawing area.
    pub fn on_resize(&mut self, size: Size) {
        self.viewport = size;
        self.update_viewport();
    }

    /// Unload the layout and dispose its textures. Returns the layout.
    ///
    /// Confirming unsaved changes is up to the host before calling this.
    pub fn close(&mut self) -> Option<Layout> {
        self.textures.dispose_all();
        self.selection.clear();
        self.drag = PanDrag::new();
        let layout = self.layout.take();
        if let Some(layout) = &layout {
            tracing::debug!(layout = %layout.name, "layout closed");
        }
        layout
    }

    /// Currently selected panes.
    pub fn selection(&self) -> &Selection<PaneId> {
        &self.selection
    }

    /// Selected panes, for inspector edits between frames.
    pub fn selection_mut(&mut self) -> &mut Selection<PaneId> {
        &mut self.selection
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, for programmatic pan and zoom. Requests a redraw.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.redraw_requested = true;
        &mut self.camera
    }

    /// The configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Current viewport size in device pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Textures of the loaded layout.
    pub fn textures(&self) -> &TextureCache<T> {
        &self.textures
    }
}
