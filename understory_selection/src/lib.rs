// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Selection: the set of currently selected items in an editor view.
//!
//! A [`Selection`] is keyed by identity. Keys are small copyable handles (for
//! example `understory_pane_tree::PaneId`), so two distinct items with equal
//! contents are still two selections. The set is unordered.
//!
//! The selection is meant to be owned by the view and lent out:
//!
//! - Pointer handling writes it (typically [`Selection::clear`] at the start of a
//!   gesture, then [`Selection::replace`] with the picked item).
//! - Drawing reads it through a shared reference, so it cannot change while a
//!   frame is being produced.
//! - Inspector panels may read or edit it between frames and use
//!   [`Selection::revision`] to notice changes they did not make.
//!
//! ```rust
//! use understory_selection::Selection;
//!
//! let mut selection: Selection<u32> = Selection::new();
//! selection.insert(7);
//! selection.replace(3);
//! assert!(selection.contains(&3));
//! assert!(!selection.contains(&7));
//! assert_eq!(selection.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::hash::Hash;

use hashbrown::HashSet;

/// A set of selected keys with a change counter.
#[derive(Clone, Debug)]
pub struct Selection<K> {
    items: HashSet<K>,
    revision: u64,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            items: HashSet::default(),
            revision: 0,
        }
    }
}

impl<K: Eq + Hash + Copy + core::fmt::Debug> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.items.contains(key)
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the selected keys in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.items.iter().copied()
    }

    /// Counter bumped on every change to the set.
    ///
    /// Operations that leave the set as it was do not bump it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Add `key`. Returns `true` if it was not already selected.
    pub fn insert(&mut self, key: K) -> bool {
        let added = self.items.insert(key);
        if added {
            self.bump();
        }
        added
    }

    /// Remove `key`. Returns `true` if it was selected.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.items.remove(key);
        if removed {
            self.bump();
        }
        removed
    }

    /// Flip the membership of `key`. Returns whether it is now selected.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.remove(&key) {
            false
        } else {
            self.insert(key)
        }
    }

    /// Deselect everything. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.bump();
        true
    }

    /// Make `key` the only selected item.
    pub fn replace(&mut self, key: K) {
        if self.items.len() == 1 && self.items.contains(&key) {
            return;
        }
        self.items.clear();
        self.items.insert(key);
        self.bump();
        tracing::debug!(?key, "selection replaced");
    }

    /// Keep only the keys for which `keep` returns `true`.
    ///
    /// Useful for dropping handles that went stale after an edit.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let before = self.items.len();
        self.items.retain(|k| keep(k));
        if self.items.len() != before {
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K: Eq + Hash + Copy + core::fmt::Debug> Extend<K> for Selection<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Eq + Hash + Copy + core::fmt::Debug> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut selection = Self::new();
        selection.extend(iter);
        selection
    }
}
