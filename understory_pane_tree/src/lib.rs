// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pane_tree --heading-base-level=0

//! Understory Pane Tree: a Kurbo-native tree of 2D layout panes.
//!
//! A layout resource describes its UI as a tree of rectangular panes. Each pane
//! carries a parent-relative transform (translate, rotate, scale), a size with an
//! origin anchor, an 8-bit alpha, and a kind-specific payload (plain container,
//! picture with corner colors and texture coordinates, parts reference to an
//! externally defined sub-tree, or window).
//!
//! This crate owns that tree and answers the geometric questions a previewer needs:
//!
//! - Where does a pane land? [`PaneTree::world_transform`] composes the ancestor chain.
//! - What rectangle does it cover? [`LocalPane::rect`] applies the origin rule.
//! - What is under the pointer? [`PaneTree::hit_test`] performs a depth-first,
//!   first-match-wins search in tree order.
//! - Is the structure sound? [`Layout::validate`] follows parts references and
//!   reports cycles as [`TreeError::CyclicPartsReference`].
//!
//! Drawing is not done here; see `understory_pane_render` for the traversal that
//! turns a tree into draw calls.
//!
//! ## Coordinate conventions
//!
//! Pane space is Y-up. A pane's rectangle is derived from its size and its
//! [`Origin`]: a `Top` origin places the pane below its anchor, a `Left` origin
//! places it to the right. Non-finite or negative sizes and scales collapse to
//! zero so malformed panes become degenerate rather than poisoning their subtree.
//!
//! ## API overview
//!
//! - [`PaneTree`]: arena of panes with generational [`PaneId`] handles.
//! - [`LocalPane`]: per-pane local data; [`PaneTransform`], [`PaneFlags`], [`Rgba8`].
//! - [`PaneKind`]: closed set of pane kinds with their payloads.
//! - [`Layout`]: a loaded layout resource (tree, root, texture names).
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_pane_tree::{HitTestOptions, LocalPane, PaneTree};
//!
//! let mut tree = PaneTree::new();
//! let root = tree.insert(None, LocalPane {
//!     size: Size::new(200.0, 100.0),
//!     ..LocalPane::default()
//! });
//! let child = tree.insert(Some(root), LocalPane {
//!     size: Size::new(20.0, 20.0),
//!     ..LocalPane::default()
//! });
//!
//! // The root's direct children are searched first-match-wins.
//! let hit = tree.hit_test_children(root, Point::new(5.0, 5.0), HitTestOptions::default());
//! assert_eq!(hit, Some(child));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod geometry;
mod hit;
mod kind;
mod layout;
mod tree;
mod types;

pub use error::TreeError;
pub use geometry::{pane_rect, quad_corners, rotation_affine};
pub use hit::HitTestOptions;
pub use kind::{
    CornerColors, FilterMode, Material, PaneKind, PartProperty, PartsRef, Picture, TexCoordSet,
    TextureRef, TextureTransform, Window, WrapMode,
};
pub use layout::Layout;
pub use tree::PaneTree;
pub use types::{
    HorizontalOrigin, LocalPane, Origin, PaneFlags, PaneId, PaneTransform, Rgba8, Vec3,
    VerticalOrigin,
};
