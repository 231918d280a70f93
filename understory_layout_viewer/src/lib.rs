// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layout_viewer --heading-base-level=0

//! Understory Layout Viewer: an interactive previewer for pane layouts.
//!
//! [`LayoutViewer`] ties the pieces together for a host shell:
//!
//! - `understory_pane_tree` holds the layout and answers hit tests.
//! - `understory_view2d` provides the pan/zoom camera and the pan drag.
//! - `understory_selection` holds the picked panes.
//! - `understory_pane_render` draws frames onto the host's draw surface.
//!
//! The host forwards pointer, wheel and resize events, paints when a redraw is
//! requested, and decides how configuration is persisted by implementing
//! [`SettingsStore`].
//!
//! ```rust
//! use kurbo::Size;
//! use understory_layout_viewer::{LayoutViewer, Modifiers, PointerEvent, ViewerConfig};
//! use understory_pane_render::{
//!     ChannelSwizzle, RecordingSurface, TextureError, TextureHandle, TextureResource,
//! };
//! use understory_pane_tree::{Layout, LocalPane, PaneTransform, PaneTree};
//!
//! #[derive(Debug)]
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
//! let root = tree.insert(None, LocalPane::default());
//! let button = tree.insert(Some(root), LocalPane {
//!     transform: PaneTransform::from_translate(0.0, 40.0),
//!     size: Size::new(60.0, 20.0),
//!     ..LocalPane::default()
//! });
//!
//! let mut viewer: LayoutViewer<NoTextures> = LayoutViewer::new(ViewerConfig::default());
//! viewer.on_resize(Size::new(320.0, 240.0));
//! viewer.reset_layout(Layout::new("title.bflyt", tree, root), Vec::new()).unwrap();
//!
//! // Layout (0, 40) is 40 pixels above the viewport center.
//! let down = PointerEvent::primary((160.0, 80.0)).with_modifiers(Modifiers::ALT);
//! assert_eq!(viewer.on_pointer_down(down), Some(button));
//!
//! let mut surface = RecordingSurface::new();
//! if viewer.take_redraw_request() {
//!     viewer.paint(&mut surface).unwrap();
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod input;
mod viewer;

pub use config::{MemorySettings, SettingsError, SettingsStore, ViewerConfig};
pub use error::ViewerError;
pub use input::{Modifiers, PointerButton, PointerEvent};
pub use viewer::LayoutViewer;
