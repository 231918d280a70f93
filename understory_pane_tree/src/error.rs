// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural errors reported by the pane tree.

use crate::types::PaneId;

/// Errors for structural problems in a pane tree or layout.
///
/// Missing textures or unresolved external layouts are not errors; they
/// degrade the preview locally. These variants describe trees that cannot be
/// traversed safely.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle does not refer to a live pane.
    #[error("pane {0:?} is not alive in this tree")]
    StalePane(PaneId),
    /// Reparenting would make a pane its own ancestor.
    #[error("moving pane {pane:?} under {parent:?} would make it its own ancestor")]
    WouldCreateCycle {
        /// Pane being moved.
        pane: PaneId,
        /// Requested new parent.
        parent: PaneId,
    },
    /// The pane exists but is not a parts pane.
    #[error("pane {0:?} is not a parts pane")]
    NotAPartsPane(PaneId),
    /// A parts reference leads back to a pane already on the traversal path.
    #[error("pane {owner:?} re-enters pane {target:?} on its own ancestor path")]
    CyclicPartsReference {
        /// The pane whose reference closes the cycle.
        owner: PaneId,
        /// The pane that was reached twice.
        target: PaneId,
    },
    /// The layout's root handle is not a live pane.
    #[error("layout root {0:?} is missing")]
    MissingRoot(PaneId),
}
