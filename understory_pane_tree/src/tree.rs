// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, structural checks.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Rect, Size};
use smallvec::SmallVec;

use crate::error::TreeError;
use crate::kind::{PartProperty, PaneKind};
use crate::types::{LocalPane, Origin, PaneFlags, PaneId, PaneTransform};

/// Arena of layout panes.
///
/// Panes are addressed by generational [`PaneId`] handles. A pane inserted
/// without a parent is a detached root; a layout's main root, the roots of
/// resolved external layouts, and parts override panes all live side by side
/// in the same arena.
///
/// Unlike a retained scene, nothing is cached: world transforms are composed
/// on demand from the ancestor chain, so edits between frames take effect
/// immediately.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Affine, Size};
/// use understory_pane_tree::{LocalPane, PaneTransform, PaneTree};
///
/// let mut tree = PaneTree::new();
/// let root = tree.insert(None, LocalPane {
///     transform: PaneTransform::from_translate(10.0, 0.0),
///     ..LocalPane::default()
/// });
/// let child = tree.insert(Some(root), LocalPane {
///     transform: PaneTransform::from_translate(0.0, 5.0),
///     size: Size::new(4.0, 4.0),
///     ..LocalPane::default()
/// });
///
/// assert_eq!(
///     tree.world_transform(child),
///     Some(Affine::translate((10.0, 5.0)))
/// );
/// ```
pub struct PaneTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for PaneTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("PaneTree")
            .field("panes_total", &total)
            .field("panes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for PaneTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<PaneId>,
    children: Vec<PaneId>,
    local: LocalPane,
}

impl Node {
    fn new(generation: u32, local: LocalPane) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl PaneTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new pane as the last child of `parent` (or as a detached root if `None`).
    ///
    /// Child order is drawing order and hit-test priority order.
    pub fn insert(&mut self, parent: Option<PaneId>, local: LocalPane) -> PaneId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "PaneId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "PaneId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = PaneId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a pane and its subtree.
    ///
    /// Parts references elsewhere that point into the removed subtree become
    /// stale and are treated as unresolved.
    pub fn remove(&mut self, id: PaneId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` to the end of `new_parent`'s children (or detach it if `None`).
    ///
    /// Fails without changing anything if either handle is stale or if
    /// `new_parent` lies inside the subtree of `id`.
    pub fn reparent(&mut self, id: PaneId, new_parent: Option<PaneId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StalePane(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::StalePane(p));
            }
            if self.is_ancestor_or_self(id, p) {
                return Err(TreeError::WouldCreateCycle {
                    pane: id,
                    parent: p,
                });
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        Ok(())
    }

    /// Local data of a live pane.
    pub fn get(&self, id: PaneId) -> Option<&LocalPane> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Update the pane's name.
    pub fn set_name(&mut self, id: PaneId, name: impl Into<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.name = name.into();
        }
    }

    /// Update the parent-relative transform.
    pub fn set_transform(&mut self, id: PaneId, transform: PaneTransform) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform = transform;
        }
    }

    /// Update the pane size.
    pub fn set_size(&mut self, id: PaneId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.size = size;
        }
    }

    /// Update the origin anchor.
    pub fn set_origin(&mut self, id: PaneId, origin: Origin) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.origin = origin;
        }
    }

    /// Update the pane's own alpha.
    pub fn set_alpha(&mut self, id: PaneId, alpha: u8) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.alpha = alpha;
        }
    }

    /// Update visibility and alpha inheritance flags.
    pub fn set_flags(&mut self, id: PaneId, flags: PaneFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Replace the pane's kind and payload.
    pub fn set_kind(&mut self, id: PaneId, kind: PaneKind) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.kind = kind;
        }
    }

    /// Point a parts pane at the root of its resolved external layout.
    ///
    /// No structural check happens here; [`PaneTree::check_parts_cycles`]
    /// (or [`Layout::validate`](crate::Layout::validate)) reports references
    /// that lead back onto their own path.
    pub fn set_external_part(
        &mut self,
        parts: PaneId,
        external: Option<PaneId>,
    ) -> Result<(), TreeError> {
        let Some(n) = self.node_opt_mut(parts) else {
            return Err(TreeError::StalePane(parts));
        };
        match &mut n.local.kind {
            PaneKind::PartsRef(r) => {
                r.external = external;
                Ok(())
            }
            _ => Err(TreeError::NotAPartsPane(parts)),
        }
    }

    /// Attach a named property override to a parts pane.
    pub fn add_part_property(
        &mut self,
        parts: PaneId,
        name: impl Into<String>,
        pane: Option<PaneId>,
    ) -> Result<(), TreeError> {
        let Some(n) = self.node_opt_mut(parts) else {
            return Err(TreeError::StalePane(parts));
        };
        match &mut n.local.kind {
            PaneKind::PartsRef(r) => {
                r.properties.push(PartProperty {
                    name: name.into(),
                    pane,
                });
                Ok(())
            }
            _ => Err(TreeError::NotAPartsPane(parts)),
        }
    }

    /// Parent-relative affine of a live pane.
    pub fn local_transform(&self, id: PaneId) -> Option<Affine> {
        self.get(id).map(|l| l.transform.to_affine())
    }

    /// Compose the transforms from the pane's detached root down to the pane.
    ///
    /// This is the chain used for drawing, without any camera. Returns `None`
    /// for stale identifiers.
    pub fn world_transform(&self, id: PaneId) -> Option<Affine> {
        if !self.is_alive(id) {
            return None;
        }
        let mut tf = Affine::IDENTITY;
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            tf = node.local.transform.to_affine() * tf;
            current = node.parent;
        }
        Some(tf)
    }

    /// Local rectangle of a live pane.
    pub fn pane_rect(&self, id: PaneId) -> Option<Rect> {
        self.get(id).map(LocalPane::rect)
    }

    /// Returns true if `id` refers to a live pane.
    ///
    /// A `PaneId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: PaneId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Number of live panes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree has no live panes.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Returns the parent of a pane if live, or `None` for detached roots or stale ids.
    pub fn parent_of(&self, id: PaneId) -> Option<PaneId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a pane in drawing order, or an empty slice if the pane is stale.
    pub fn children_of(&self, id: PaneId) -> &[PaneId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the next pane in depth-first traversal order.
    ///
    /// Returns `None` if no next pane exists or if the current pane is stale.
    /// Parts references are not followed.
    pub fn next_depth_first(&self, current: PaneId) -> Option<PaneId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }
        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Get the previous pane in depth-first traversal order.
    ///
    /// Returns `None` if no previous pane exists or if the current pane is stale.
    pub fn prev_depth_first(&self, current: PaneId) -> Option<PaneId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(prev_sibling) = self.prev_sibling(current) {
            return Some(self.last_in_subtree(prev_sibling));
        }
        self.parent_of(current)
    }

    /// Walk the tree under `root`, following parts references and override
    /// panes, and fail if any edge leads back onto the current path.
    ///
    /// Stale references are skipped: they only degrade drawing. Sharing the
    /// same external layout from several parts panes is fine.
    pub fn check_parts_cycles(&self, root: PaneId) -> Result<(), TreeError> {
        if !self.is_alive(root) {
            return Err(TreeError::StalePane(root));
        }
        let mut path: SmallVec<[PaneId; 16]> = SmallVec::new();
        self.check_cycles_recursive(root, root, &mut path)
    }

    // --- internals ---

    fn check_cycles_recursive(
        &self,
        id: PaneId,
        from: PaneId,
        path: &mut SmallVec<[PaneId; 16]>,
    ) -> Result<(), TreeError> {
        if path.contains(&id) {
            return Err(TreeError::CyclicPartsReference {
                owner: from,
                target: id,
            });
        }
        let Some(node) = self.node_opt(id) else {
            return Ok(());
        };
        path.push(id);
        for &child in &node.children {
            self.check_cycles_recursive(child, id, path)?;
        }
        if let PaneKind::PartsRef(parts) = &node.local.kind {
            for target in parts.targets() {
                self.check_cycles_recursive(target, id, path)?;
            }
        }
        path.pop();
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: PaneId, id: PaneId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent_of(c);
        }
        false
    }

    fn next_sibling(&self, node: PaneId) -> Option<PaneId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn prev_sibling(&self, node: PaneId) -> Option<PaneId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    fn last_in_subtree(&self, mut node: PaneId) -> PaneId {
        while let Some(&last_child) = self.node(node).children.last() {
            node = last_child;
        }
        node
    }

    /// Access a live pane; panics if `id` is stale.
    fn node(&self, id: PaneId) -> &Node {
        self.node_opt(id).expect("dangling PaneId")
    }

    fn node_opt(&self, id: PaneId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: PaneId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: PaneId, parent: PaneId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: PaneId, parent: PaneId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::PartsRef;
    use alloc::vec;
    use kurbo::{Point, Vec2};

    fn pane_at(x: f64, y: f64) -> LocalPane {
        LocalPane {
            transform: PaneTransform::from_translate(x, y),
            size: Size::new(10.0, 10.0),
            ..LocalPane::default()
        }
    }

    fn parts_pane() -> LocalPane {
        LocalPane {
            kind: PaneKind::PartsRef(PartsRef::default()),
            ..LocalPane::default()
        }
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let a = tree.insert(Some(root), LocalPane::default());

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.children_of(root).is_empty());

        // Insert new child; reuses the slot but the generation bumps.
        let b = tree.insert(Some(root), LocalPane::default());
        assert_eq!(a.0, b.0, "slot should be reused");
        assert_ne!(a, b, "old handle must not alias the new pane");
        assert!(tree.get(a).is_none());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_takes_subtree() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let a = tree.insert(Some(root), LocalPane::default());
        let a1 = tree.insert(Some(a), LocalPane::default());
        tree.remove(a);
        assert!(!tree.is_alive(a1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn world_transform_composes_parent_first() {
        let mut tree = PaneTree::new();
        let root = tree.insert(
            None,
            LocalPane {
                transform: PaneTransform {
                    scale: Vec2::new(2.0, 2.0),
                    ..PaneTransform::IDENTITY
                },
                ..LocalPane::default()
            },
        );
        let child = tree.insert(Some(root), pane_at(5.0, 0.0));
        let world = tree.world_transform(child).unwrap();
        // The child's translation is scaled by the parent.
        assert_eq!(world * Point::ZERO, Point::new(10.0, 0.0));
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let a = tree.insert(Some(root), LocalPane::default());
        let b = tree.insert(Some(a), LocalPane::default());

        assert_eq!(
            tree.reparent(a, Some(b)),
            Err(TreeError::WouldCreateCycle { pane: a, parent: b })
        );
        assert_eq!(
            tree.reparent(a, Some(a)),
            Err(TreeError::WouldCreateCycle { pane: a, parent: a })
        );
        assert_eq!(tree.parent_of(a), Some(root));

        tree.reparent(b, Some(root)).unwrap();
        assert_eq!(tree.children_of(root), &[a, b]);
    }

    #[test]
    fn depth_first_order() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let a = tree.insert(Some(root), LocalPane::default());
        let a1 = tree.insert(Some(a), LocalPane::default());
        let a2 = tree.insert(Some(a), LocalPane::default());
        let b = tree.insert(Some(root), LocalPane::default());

        let mut forward = vec![root];
        while let Some(next) = tree.next_depth_first(*forward.last().unwrap()) {
            forward.push(next);
        }
        assert_eq!(forward, vec![root, a, a1, a2, b]);

        let mut backward = vec![b];
        while let Some(prev) = tree.prev_depth_first(*backward.last().unwrap()) {
            backward.push(prev);
        }
        assert_eq!(backward, vec![b, a2, a1, a, root]);
    }

    #[test]
    fn parts_helpers_require_parts_pane() {
        let mut tree = PaneTree::new();
        let plain = tree.insert(None, LocalPane::default());
        assert_eq!(
            tree.set_external_part(plain, None),
            Err(TreeError::NotAPartsPane(plain))
        );
        let parts = tree.insert(None, parts_pane());
        tree.add_part_property(parts, "N_Icon", None).unwrap();
        let Some(PaneKind::PartsRef(r)) = tree.get(parts).map(|p| &p.kind) else {
            panic!("expected a parts pane");
        };
        assert_eq!(r.properties.len(), 1);
    }

    #[test]
    fn shared_external_is_not_a_cycle() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let external = tree.insert(None, pane_at(0.0, 0.0));
        tree.insert(Some(external), pane_at(1.0, 1.0));
        for _ in 0..2 {
            let p = tree.insert(Some(root), parts_pane());
            tree.set_external_part(p, Some(external)).unwrap();
        }
        assert_eq!(tree.check_parts_cycles(root), Ok(()));
    }

    #[test]
    fn parts_reference_to_ancestor_is_a_cycle() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let group = tree.insert(Some(root), LocalPane::default());
        let parts = tree.insert(Some(group), parts_pane());
        tree.set_external_part(parts, Some(group)).unwrap();

        assert_eq!(
            tree.check_parts_cycles(root),
            Err(TreeError::CyclicPartsReference {
                owner: parts,
                target: group,
            })
        );
    }

    #[test]
    fn indirect_cycle_through_external_layout() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let parts_a = tree.insert(Some(root), parts_pane());
        let external = tree.insert(None, LocalPane::default());
        let parts_b = tree.insert(Some(external), parts_pane());
        tree.set_external_part(parts_a, Some(external)).unwrap();
        tree.set_external_part(parts_b, Some(parts_a)).unwrap();

        assert!(matches!(
            tree.check_parts_cycles(root),
            Err(TreeError::CyclicPartsReference { owner, target })
                if owner == parts_b && target == parts_a
        ));
    }
}
