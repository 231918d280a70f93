// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha inheritance along the pane tree.

/// Effective alpha of a pane with own alpha `own` under a propagated
/// `parent` alpha.
///
/// A fully opaque parent passes `own` through unchanged; otherwise the two are
/// multiplied and divided by 255 with truncation.
///
/// ```rust
/// use understory_pane_render::effective_alpha;
///
/// assert_eq!(effective_alpha(200, 255), 200);
/// assert_eq!(effective_alpha(200, 128), 100);
/// ```
#[allow(
    clippy::cast_possible_truncation,
    reason = "product of two u8 values divided by 255 always fits in u8."
)]
pub const fn effective_alpha(own: u8, parent: u8) -> u8 {
    if parent == u8::MAX {
        return own;
    }
    (own as u16 * parent as u16 / 255) as u8
}

/// Alpha handed to a pane's children.
///
/// Panes that do not influence child alpha reset their subtree to fully opaque.
pub const fn child_alpha(effective: u8, influences_children: bool) -> u8 {
    if influences_children {
        effective
    } else {
        u8::MAX
    }
}
