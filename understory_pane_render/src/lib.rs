// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pane_render --heading-base-level=0

//! Understory Pane Render: turns a pane tree into immediate-mode draw calls.
//!
//! [`LayoutRenderer::render`] walks a [`Layout`](understory_pane_tree::Layout)
//! from its root and submits every visible pane to a [`DrawSurface`]:
//!
//! - Each pane's transform composes onto its parent's (translate, rotate,
//!   scale). Every scope pushed on the surface is absolute and is closed by a
//!   [`TransformScope`] guard, including on error paths.
//! - Alpha inherits down the tree through [`effective_alpha`] and
//!   [`child_alpha`]. A pane that does not influence child alpha resets its
//!   children to fully opaque.
//! - Drawing dispatches on [`PaneKind`](understory_pane_tree::PaneKind):
//!   containers draw a solid quad in the pane or highlight color, pictures
//!   draw their corner colors and first texture, parts references draw their
//!   external sub-tree in place (or fall back to a container), windows are
//!   counted and skipped.
//! - Textures are resolved through a [`TextureCache`] and uploaded on first
//!   use. A texture that cannot be bound turns into a placeholder binding and
//!   the frame continues.
//!
//! Only structural problems abort a frame with a [`RenderError`].
//!
//! ```rust
//! use kurbo::Size;
//! use understory_pane_render::{
//!     ChannelSwizzle, LayoutRenderer, RecordingSurface, TextureCache, TextureError,
//!     TextureHandle, TextureResource,
//! };
//! use understory_pane_tree::{Layout, LocalPane, PaneTree};
//! use understory_selection::Selection;
//! use understory_view2d::Camera;
//!
//! struct NoTextures;
//!
//! impl TextureResource for NoTextures {
//!     fn upload(&mut self) -> Result<TextureHandle, TextureError> {
//!         Ok(TextureHandle(0))
//!     }
//!     fn channel_swizzle(&self) -> ChannelSwizzle {
//!         ChannelSwizzle::IDENTITY
//!     }
//!     fn dispose(&mut self) {}
//! }
//!
//! let mut tree = PaneTree::new();
//! let root = tree.insert(None, LocalPane { size: Size::new(64.0, 32.0), ..LocalPane::default() });
//! tree.insert(Some(root), LocalPane { size: Size::new(8.0, 8.0), ..LocalPane::default() });
//! let layout = Layout::new("menu.bflyt", tree, root);
//!
//! let mut surface = RecordingSurface::new();
//! let mut textures: TextureCache<NoTextures> = TextureCache::new();
//! let stats = LayoutRenderer::default()
//!     .render(
//!         &mut surface,
//!         &layout,
//!         &mut textures,
//!         &Selection::new(),
//!         &Camera::new(),
//!         Size::new(640.0, 480.0),
//!     )
//!     .unwrap();
//! assert_eq!(stats.drawn, 1);
//! assert_eq!(surface.depth(), 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alpha;
mod compose;
mod error;
mod overlay;
mod recording;
mod resolve;
mod style;
mod surface;
mod texture;

pub use alpha::{child_alpha, effective_alpha};
pub use compose::{FrameStats, LayoutRenderer};
pub use error::RenderError;
pub use overlay::{
    AXIS_LENGTH, GRID_HALF_COUNT, GRID_MAJOR_EVERY, GRID_SPACING, draw_axes, draw_grid,
};
pub use recording::{DrawCommand, RecordingSurface};
pub use resolve::{sampler_filter, sampler_params, sampler_wrap, texture_affine};
pub use style::RenderStyle;
pub use surface::{
    Channel, ChannelSwizzle, DrawSurface, Quad, SamplerFilter, SamplerParams, SamplerWrap,
    TextureBinding, TextureHandle, TransformScope, UNIT_TEX_COORDS,
};
pub use texture::{TextureCache, TextureError, TextureResource};
