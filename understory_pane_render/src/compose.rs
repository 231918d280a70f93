// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame traversal: transform composition, alpha propagation, kind dispatch.

use kurbo::{Affine, Point, Rect, Size};
use smallvec::SmallVec;
use understory_pane_tree::{Layout, LocalPane, PaneId, PaneKind, PaneTree, TreeError};
use understory_selection::Selection;
use understory_view2d::Camera;

use crate::alpha::{child_alpha, effective_alpha};
use crate::error::RenderError;
use crate::overlay::{draw_axes, draw_grid};
use crate::resolve::{draw_solid, picture_quad};
use crate::style::RenderStyle;
use crate::surface::{DrawSurface, TransformScope};
use crate::texture::{TextureCache, TextureResource};

/// Counters for one rendered frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Panes that emitted geometry, the root excluded.
    pub drawn: usize,
    /// Subtrees skipped because their top pane is not displayed in the editor.
    pub hidden: usize,
    /// Panes of a kind that has no draw routine (windows).
    pub unsupported: usize,
    /// References to panes that are no longer in the tree.
    pub unresolved: usize,
}

/// What a pane inherits from the pane above it.
#[derive(Copy, Clone, Debug)]
struct Context {
    /// Absolute transform of the parent scope.
    transform: Affine,
    /// Alpha propagated by the parent.
    parent_alpha: u8,
    /// Parts pane whose transform folds into every pane of this sub-tree.
    part_pane: Option<PaneId>,
}

/// Draws a [`Layout`] onto a [`DrawSurface`].
///
/// The renderer only holds the style; everything else is lent per frame, so
/// the selection cannot change while a frame is drawn.
#[derive(Clone, Debug, Default)]
pub struct LayoutRenderer {
    style: RenderStyle,
}

impl LayoutRenderer {
    /// Create a renderer with the given style.
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Current style.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Replace the style.
    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    /// Draw one frame.
    ///
    /// In order: viewport and projection, clear, the root quads, grid and
    /// axes, then the pane tree from the root down. Textures are uploaded on
    /// first use.
    ///
    /// Fails only for structural problems: a missing root or a parts
    /// reference that leads back onto its own path. Calls made before the
    /// failure stay on the surface, and every transform scope is closed.
    pub fn render<S, T>(
        &self,
        surface: &mut S,
        layout: &Layout,
        textures: &mut TextureCache<T>,
        selection: &Selection<PaneId>,
        camera: &Camera,
        viewport: Size,
    ) -> Result<FrameStats, RenderError>
    where
        S: DrawSurface + ?Sized,
        T: TextureResource,
    {
        let style = &self.style;
        let Some(root) = layout.tree.get(layout.root) else {
            tracing::error!(layout = %layout.name, "layout root is missing");
            return Err(TreeError::MissingRoot(layout.root).into());
        };

        surface.set_viewport(viewport);
        surface.set_projection(Rect::from_origin_size(Point::ZERO, viewport));
        surface.clear(style.background);

        let view = camera.view_transform(viewport);
        self.draw_root(surface, layout.root, root, view, selection);
        if style.show_grid || style.show_axes {
            let mut scope = TransformScope::new(surface, view);
            if style.show_grid {
                draw_grid(&mut *scope, style.grid_color());
            }
            if style.show_axes {
                draw_axes(&mut *scope);
            }
        }

        let mut frame = Frame {
            tree: &layout.tree,
            style,
            selection,
            textures,
            path: SmallVec::new(),
            stats: FrameStats::default(),
        };
        let root_ctx = Context {
            transform: view,
            parent_alpha: u8::MAX,
            part_pane: None,
        };
        if let Err(err) = frame.render_pane(surface, layout.root, true, root_ctx) {
            tracing::error!(layout = %layout.name, %err, "frame aborted");
            return Err(err);
        }

        let stats = frame.stats;
        if stats.unsupported > 0 {
            tracing::warn!(count = stats.unsupported, "window panes are not drawn");
        }
        tracing::trace!(?stats, "frame rendered");
        Ok(stats)
    }

    /// The root draws a lightened fill and a wide outline under its own
    /// transform, independent of the selection palette for panes.
    fn draw_root<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        id: PaneId,
        root: &LocalPane,
        view: Affine,
        selection: &Selection<PaneId>,
    ) {
        let style = &self.style;
        let outline = if selection.contains(&id) {
            style.selected_color
        } else {
            style.root_outline_color
        };
        let mut scope = TransformScope::new(surface, view * root.transform.to_affine());
        draw_solid(
            &mut *scope,
            root.rect(),
            style.root_fill(),
            outline,
            style.root_outline_width,
        );
    }
}

struct Frame<'a, T> {
    tree: &'a PaneTree,
    style: &'a RenderStyle,
    selection: &'a Selection<PaneId>,
    textures: &'a mut TextureCache<T>,
    /// Panes on the active path, parts indirections included.
    path: SmallVec<[PaneId; 16]>,
    stats: FrameStats,
}

impl<T: TextureResource> Frame<'_, T> {
    fn render_pane<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        id: PaneId,
        is_root: bool,
        ctx: Context,
    ) -> Result<(), RenderError> {
        if self.path.contains(&id) {
            let owner = self.path.last().copied().unwrap_or(id);
            return Err(TreeError::CyclicPartsReference { owner, target: id }.into());
        }
        let tree = self.tree;
        let Some(pane) = tree.get(id) else {
            self.stats.unresolved += 1;
            tracing::trace!(pane = ?id, "skipping stale pane reference");
            return Ok(());
        };
        if !pane.displays_in_editor() {
            self.stats.hidden += 1;
            return Ok(());
        }

        let local = match ctx.part_pane.and_then(|p| tree.get(p)) {
            Some(owner) => pane.transform.folded_with(&owner.transform),
            None => pane.transform,
        };
        let transform = ctx.transform * local.to_affine();
        let alpha = effective_alpha(pane.alpha, ctx.parent_alpha);

        self.path.push(id);
        {
            let mut scope = TransformScope::new(surface, transform);
            if !is_root {
                self.draw_pane(&mut *scope, id, pane, alpha, ctx)?;
            }
            let child_ctx = Context {
                transform,
                parent_alpha: child_alpha(alpha, pane.influences_child_alpha()),
                part_pane: ctx.part_pane,
            };
            for &child in tree.children_of(id) {
                self.render_pane(&mut *scope, child, false, child_ctx)?;
            }
        }
        self.path.pop();
        Ok(())
    }

    fn draw_pane<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        id: PaneId,
        pane: &LocalPane,
        alpha: u8,
        ctx: Context,
    ) -> Result<(), RenderError> {
        tracing::trace!(pane = ?id, kind = pane.kind.name(), alpha, "draw pane");
        let rect = pane.rect();
        match &pane.kind {
            PaneKind::Container => {
                self.draw_container(surface, id, rect);
                self.stats.drawn += 1;
            }
            PaneKind::Picture(picture) => {
                let quad = picture_quad(rect, picture, alpha, self.textures);
                surface.fill_quad(&quad);
                self.stats.drawn += 1;
            }
            PaneKind::PartsRef(parts) => {
                // The external sub-tree and overrides compose from the parent
                // scope; the parts pane's own transform reaches the external
                // sub-tree through the part context only.
                match parts.external.filter(|&e| self.tree.is_alive(e)) {
                    Some(external) => {
                        let part_ctx = Context {
                            transform: ctx.transform,
                            parent_alpha: alpha,
                            part_pane: Some(id),
                        };
                        self.render_pane(surface, external, false, part_ctx)?;
                    }
                    None => {
                        if parts.external.is_some() {
                            self.stats.unresolved += 1;
                        }
                        self.draw_container(surface, id, rect);
                        self.stats.drawn += 1;
                    }
                }
                let override_ctx = Context {
                    transform: ctx.transform,
                    parent_alpha: alpha,
                    part_pane: None,
                };
                for target in parts.properties.iter().filter_map(|p| p.pane) {
                    self.render_pane(surface, target, false, override_ctx)?;
                }
            }
            PaneKind::Window(_) => {
                self.stats.unsupported += 1;
            }
        }
        Ok(())
    }

    fn draw_container<S: DrawSurface + ?Sized>(&self, surface: &mut S, id: PaneId, rect: Rect) {
        let color = if self.selection.contains(&id) {
            self.style.selected_color
        } else {
            self.style.pane_color
        };
        draw_solid(surface, rect, color, color, self.style.pane_outline_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use understory_pane_tree::{CornerColors, PaneFlags, PaneTransform, PartsRef, Picture, Rgba8};

    use crate::recording::{DrawCommand, RecordingSurface};
    use crate::surface::{ChannelSwizzle, TextureHandle};
    use crate::texture::TextureError;

    #[derive(Debug)]
    struct NoTexture;

    impl TextureResource for NoTexture {
        fn upload(&mut self) -> Result<TextureHandle, TextureError> {
            Ok(TextureHandle(0))
        }
        fn channel_swizzle(&self) -> ChannelSwizzle {
            ChannelSwizzle::IDENTITY
        }
        fn dispose(&mut self) {}
    }

    fn bare_style() -> RenderStyle {
        RenderStyle {
            show_grid: false,
            show_axes: false,
            ..RenderStyle::default()
        }
    }

    fn pane(x: f64, y: f64, kind: PaneKind) -> LocalPane {
        LocalPane {
            transform: PaneTransform::from_translate(x, y),
            size: Size::new(10.0, 10.0),
            kind,
            ..LocalPane::default()
        }
    }

    fn picture() -> PaneKind {
        PaneKind::Picture(Picture {
            corner_colors: CornerColors::uniform(Rgba8::WHITE),
            ..Picture::default()
        })
    }

    fn render(layout: &Layout, selection: &Selection<PaneId>) -> (RecordingSurface, Result<FrameStats, RenderError>) {
        let mut surface = RecordingSurface::new();
        let mut textures: TextureCache<NoTexture> = TextureCache::new();
        let result = LayoutRenderer::new(bare_style()).render(
            &mut surface,
            layout,
            &mut textures,
            selection,
            &Camera::new(),
            Size::new(200.0, 100.0),
        );
        (surface, result)
    }

    fn view() -> Affine {
        Camera::new().view_transform(Size::new(200.0, 100.0))
    }

    #[test]
    fn alpha_propagates_through_influencing_parents() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let child = tree.insert(
            Some(root),
            LocalPane {
                alpha: 128,
                ..pane(0.0, 0.0, PaneKind::Container)
            },
        );
        tree.insert(
            Some(child),
            LocalPane {
                alpha: 200,
                ..pane(0.0, 0.0, picture())
            },
        );
        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert_eq!(result.map(|st| st.drawn), Ok(2));
        let picture_alphas: alloc::vec::Vec<u8> = s
            .fills()
            .filter(|(_, q)| q.colors[0].a != 255)
            .map(|(_, q)| q.colors[0].a)
            .collect();
        assert_eq!(picture_alphas, [100]);
    }

    #[test]
    fn alpha_blocker_resets_descendants() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let blocker = tree.insert(
            Some(root),
            LocalPane {
                alpha: 10,
                flags: PaneFlags::DISPLAY_IN_EDITOR,
                ..pane(0.0, 0.0, PaneKind::Container)
            },
        );
        let mid = tree.insert(Some(blocker), pane(0.0, 0.0, PaneKind::Container));
        tree.insert(Some(mid), pane(0.0, 0.0, picture()));
        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert!(result.is_ok());
        let (_, last) = s.fills().last().unwrap();
        assert_eq!(last.colors[0].a, 255);
    }

    #[test]
    fn hidden_subtree_emits_nothing() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let hidden = tree.insert(
            Some(root),
            LocalPane {
                flags: PaneFlags::INFLUENCES_CHILD_ALPHA,
                ..pane(0.0, 0.0, PaneKind::Container)
            },
        );
        tree.insert(Some(hidden), pane(0.0, 0.0, picture()));
        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        let stats = result.unwrap();
        assert_eq!(stats.drawn, 0);
        assert_eq!(stats.hidden, 1);
        // Root fill and root outline only.
        assert_eq!(s.draw_count(), 2);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn unresolved_parts_pane_draws_like_a_container() {
        let mut a = PaneTree::new();
        let root_a = a.insert(None, LocalPane::default());
        a.insert(Some(root_a), pane(5.0, 5.0, PaneKind::Container));

        let mut b = PaneTree::new();
        let root_b = b.insert(None, LocalPane::default());
        b.insert(
            Some(root_b),
            pane(5.0, 5.0, PaneKind::PartsRef(PartsRef::default())),
        );

        let (sa, _) = render(&Layout::new("a", a, root_a), &Selection::new());
        let (sb, _) = render(&Layout::new("b", b, root_b), &Selection::new());
        assert_eq!(sa.commands(), sb.commands());
    }

    #[test]
    fn external_subtree_folds_the_parts_transform() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let parts = tree.insert(
            Some(root),
            pane(10.0, 0.0, PaneKind::PartsRef(PartsRef::default())),
        );
        let external = tree.insert(None, pane(1.0, 2.0, PaneKind::Container));
        tree.set_external_part(parts, Some(external)).unwrap();

        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert_eq!(result.map(|st| st.drawn), Ok(1));
        let folded = view() * Affine::translate(Vec2::new(11.0, 2.0));
        let own = view() * Affine::translate(Vec2::new(10.0, 0.0));
        assert!(s.fills().any(|(t, _)| t == folded));
        assert!(!s.fills().any(|(t, _)| t == own), "resolved parts pane must not draw itself");
    }

    #[test]
    fn parts_cycle_aborts_the_frame() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let parts = tree.insert(
            Some(root),
            pane(0.0, 0.0, PaneKind::PartsRef(PartsRef::default())),
        );
        tree.set_external_part(parts, Some(root)).unwrap();

        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert_eq!(
            result,
            Err(RenderError::Structure(TreeError::CyclicPartsReference {
                owner: parts,
                target: root,
            }))
        );
        assert_eq!(s.depth(), 0, "scopes must be closed on the error path");
    }

    #[test]
    fn override_panes_compose_from_the_parent_scope() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let parts = tree.insert(
            Some(root),
            LocalPane {
                alpha: 128,
                ..pane(10.0, 0.0, PaneKind::PartsRef(PartsRef::default()))
            },
        );
        let external = tree.insert(None, pane(1.0, 2.0, PaneKind::Container));
        let label = tree.insert(
            None,
            LocalPane {
                alpha: 200,
                ..pane(1.0, 0.0, picture())
            },
        );
        tree.set_external_part(parts, Some(external)).unwrap();
        tree.add_part_property(parts, "T_Label", Some(label)).unwrap();

        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert_eq!(result.map(|st| st.drawn), Ok(2));
        let fills: alloc::vec::Vec<(Affine, u8)> =
            s.fills().map(|(t, q)| (t, q.colors[0].a)).collect();

        let external_at = view() * Affine::translate(Vec2::new(11.0, 2.0));
        let override_at = view() * Affine::translate(Vec2::new(1.0, 0.0));
        let wrapped = view() * Affine::translate(Vec2::new(11.0, 0.0));
        let ext = fills.iter().position(|&(t, _)| t == external_at).unwrap();
        let ovr = fills.iter().position(|&(t, _)| t == override_at).unwrap();
        assert!(ext < ovr, "overrides draw after the external sub-tree");
        // 200 under the parts pane's 128.
        assert_eq!(fills[ovr].1, 100);
        assert!(
            !fills.iter().any(|&(t, _)| t == wrapped),
            "override must not be wrapped by the parts transform"
        );
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn override_back_to_an_ancestor_aborts_the_frame() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        let parts = tree.insert(
            Some(root),
            pane(0.0, 0.0, PaneKind::PartsRef(PartsRef::default())),
        );
        tree.add_part_property(parts, "back", Some(root)).unwrap();

        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        assert_eq!(
            result,
            Err(RenderError::Structure(TreeError::CyclicPartsReference {
                owner: parts,
                target: root,
            }))
        );
        assert_eq!(s.depth(), 0, "scopes must be closed on the error path");
    }

    #[test]
    fn hidden_root_still_draws_its_quads() {
        let mut tree = PaneTree::new();
        let root = tree.insert(
            None,
            LocalPane {
                flags: PaneFlags::INFLUENCES_CHILD_ALPHA,
                ..LocalPane::default()
            },
        );
        tree.insert(Some(root), pane(0.0, 0.0, PaneKind::Container));
        let (s, result) = render(&Layout::new("a", tree, root), &Selection::new());
        let stats = result.unwrap();
        assert_eq!(stats.drawn, 0);
        assert_eq!(stats.hidden, 1);
        // Root fill and root outline, nothing below.
        assert_eq!(s.draw_count(), 2);
    }

    #[test]
    fn selected_root_and_container_use_highlight() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, pane(0.0, 0.0, PaneKind::Container));
        let child = tree.insert(Some(root), pane(0.0, 0.0, PaneKind::Container));
        let selection: Selection<PaneId> = [root, child].into_iter().collect();
        let (s, _) = render(&Layout::new("a", tree, root), &selection);

        let strokes: alloc::vec::Vec<(Rgba8, f64)> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeQuad { color, width, .. } => Some((*color, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(strokes, [(Rgba8::RED, 33.0), (Rgba8::RED, 3.0)]);
        // The root fill is the lightened background, never the highlight.
        let (_, root_fill) = s.fills().next().unwrap();
        assert_eq!(root_fill.colors[0], bare_style().root_fill());
    }

    #[test]
    fn window_panes_are_counted_not_drawn() {
        let mut tree = PaneTree::new();
        let root = tree.insert(None, LocalPane::default());
        tree.insert(
            Some(root),
            pane(0.0, 0.0, PaneKind::Window(understory_pane_tree::Window { frame_count: 4 })),
        );
        let (_, result) = render(&Layout::new("a", tree, root), &Selection::new());
        let stats = result.unwrap();
        assert_eq!(stats.unsupported, 1);
        assert_eq!(stats.drawn, 0);
    }
}
