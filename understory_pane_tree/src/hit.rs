// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing over the pane tree.

use kurbo::{Affine, Point, Rect};

use crate::tree::PaneTree;
use crate::types::PaneId;

/// Options for [`PaneTree::hit_test`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitTestOptions {
    /// Skip panes (and their subtrees) that are not displayed in the editor.
    ///
    /// Off by default, so hidden panes can still be picked.
    pub respect_visibility: bool,
}

impl PaneTree {
    /// Find the first pane under `point`, searching `start` and its subtree.
    ///
    /// - `point` is in layout space: the space of `start`'s detached root's
    ///   parent, i.e. after removing any camera transform.
    /// - Search is depth-first pre-order. A pane that contains the point is
    ///   returned before any of its children are looked at, and earlier
    ///   siblings win over later ones.
    /// - Each pane is tested against its own rectangle under its world
    ///   transform. Panes with a singular transform (for example a zero scale)
    ///   never hit, but their children are still searched.
    /// - Parts references are not followed.
    pub fn hit_test(&self, start: PaneId, point: Point, options: HitTestOptions) -> Option<PaneId> {
        if !self.is_alive(start) {
            return None;
        }
        let parent_world = self
            .parent_of(start)
            .and_then(|p| self.world_transform(p))
            .unwrap_or(Affine::IDENTITY);
        self.hit_recursive(start, parent_world, point, options)
    }

    /// Like [`PaneTree::hit_test`], but `parent` itself is never a candidate;
    /// only its children and their subtrees are searched, in order.
    pub fn hit_test_children(
        &self,
        parent: PaneId,
        point: Point,
        options: HitTestOptions,
    ) -> Option<PaneId> {
        let world = self.world_transform(parent)?;
        self.children_of(parent)
            .iter()
            .find_map(|&child| self.hit_recursive(child, world, point, options))
    }

    fn hit_recursive(
        &self,
        id: PaneId,
        parent_world: Affine,
        point: Point,
        options: HitTestOptions,
    ) -> Option<PaneId> {
        let local = self.get(id)?;
        if options.respect_visibility && !local.displays_in_editor() {
            return None;
        }
        let world = parent_world * local.transform.to_affine();
        if contains(world, local.rect(), point) {
            return Some(id);
        }
        self.children_of(id)
            .iter()
            .find_map(|&child| self.hit_recursive(child, world, point, options))
    }
}

fn contains(world: Affine, rect: Rect, point: Point) -> bool {
    let det = world.determinant();
    if det == 0.0 || !det.is_finite() {
        return false;
    }
    rect.contains(world.inverse() * point)
}
