// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A loaded layout resource.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::TreeError;
use crate::tree::PaneTree;
use crate::types::PaneId;

/// A loaded layout: its pane tree, the root pane, and the names of the
/// textures it references.
///
/// Parsing and saving the on-disk formats happens elsewhere; this is the
/// common shape every format variant is reduced to.
#[derive(Debug)]
pub struct Layout {
    /// Display name, usually the file name.
    pub name: String,
    /// All panes, including resolved external layouts and override panes.
    pub tree: PaneTree,
    /// The main root pane.
    pub root: PaneId,
    /// Texture names in the order the layout lists them.
    pub texture_names: Vec<String>,
}

impl Layout {
    /// Create a layout with no texture list.
    pub fn new(name: impl Into<String>, tree: PaneTree, root: PaneId) -> Self {
        Self {
            name: name.into(),
            tree,
            root,
            texture_names: Vec::new(),
        }
    }

    /// Builder-style texture list.
    #[must_use]
    pub fn with_textures<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texture_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Check the structure before the first traversal.
    ///
    /// Reports a missing root and parts references that lead back onto their
    /// own path. Unresolved references are not errors.
    pub fn validate(&self) -> Result<(), TreeError> {
        if !self.tree.is_alive(self.root) {
            return Err(TreeError::MissingRoot(self.root));
        }
        let result = self.tree.check_parts_cycles(self.root);
        if let Err(err) = &result {
            tracing::error!(layout = %self.name, %err, "layout failed structural validation");
        }
        result
    }
}
