// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors that abort a frame.

use understory_pane_tree::TreeError;

/// A frame could not be produced.
///
/// Only structural problems end up here. Missing textures, unresolved parts
/// references and unsupported pane kinds degrade the affected pane instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The pane tree cannot be traversed safely.
    #[error("layout structure is invalid: {0}")]
    Structure(#[from] TreeError),
}
