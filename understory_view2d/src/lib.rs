// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View2D: a small editor camera for 2D scenes.
//!
//! - [`Camera`] holds a pan offset and a zoom factor and turns them into a
//!   single view [`Affine`](kurbo::Affine) that wraps the whole scene. The view
//!   flips Y: device coordinates grow downward, world coordinates grow upward.
//! - Zoom moves in notches of one tenth and is kept as an integer count of
//!   tenths, so any sequence of notches lands on an exact value.
//! - [`PanDrag`] turns a held pointer into per-move deltas for
//!   [`Camera::pan_by_device`].
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_view2d::Camera;
//!
//! let viewport = Size::new(800.0, 600.0);
//! let mut camera = Camera::new();
//! camera.zoom_in();
//! assert_eq!(camera.zoom(), 1.1);
//!
//! // The viewport center always shows the point under the pan offset.
//! let center = camera.device_to_layout(Point::new(400.0, 300.0), viewport);
//! assert!(center.to_vec2().hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod pan;

pub use camera::Camera;
pub use pan::PanDrag;
