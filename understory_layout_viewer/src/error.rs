// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported to the host shell.

use understory_pane_render::RenderError;
use understory_pane_tree::TreeError;

use crate::config::SettingsError;

/// Errors surfaced by [`LayoutViewer`](crate::LayoutViewer).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ViewerError {
    /// No layout is loaded.
    #[error("no layout is loaded")]
    NoLayout,
    /// The layout failed structural validation and was not loaded.
    #[error("layout rejected: {0}")]
    Structure(#[from] TreeError),
    /// A frame was aborted.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Persisting a configuration change failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
