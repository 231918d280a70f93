// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`DrawSurface`] that keeps the calls it receives.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size};
use understory_pane_tree::Rgba8;

use crate::surface::{DrawSurface, Quad};

/// One recorded draw call.
///
/// Geometry commands carry the absolute transform that was current when they
/// were issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`DrawSurface::set_viewport`].
    SetViewport(Size),
    /// [`DrawSurface::set_projection`].
    SetProjection(Rect),
    /// [`DrawSurface::clear`].
    Clear(Rgba8),
    /// [`DrawSurface::push_transform`].
    PushTransform(Affine),
    /// [`DrawSurface::pop_transform`].
    PopTransform,
    /// [`DrawSurface::fill_quad`].
    FillQuad {
        /// Transform in effect.
        transform: Affine,
        /// The quad.
        quad: Quad,
    },
    /// [`DrawSurface::stroke_quad`].
    StrokeQuad {
        /// Transform in effect.
        transform: Affine,
        /// Loop corners.
        corners: [Point; 4],
        /// Line color.
        color: Rgba8,
        /// Line width.
        width: f64,
    },
    /// [`DrawSurface::draw_line`].
    Line {
        /// Transform in effect.
        transform: Affine,
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line color.
        color: Rgba8,
        /// Line width.
        width: f64,
    },
}

/// Records every call for later inspection.
///
/// Used by tests and by hosts that replay a frame onto a real backend.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    stack: Vec<Affine>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded calls, leaving the recording empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        self.stack.clear();
        core::mem::take(&mut self.commands)
    }

    /// Number of transform scopes currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The transform currently in effect.
    pub fn current_transform(&self) -> Affine {
        self.stack.last().copied().unwrap_or(Affine::IDENTITY)
    }

    /// Filled quads with the transform each was drawn under.
    pub fn fills(&self) -> impl Iterator<Item = (Affine, &Quad)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillQuad { transform, quad } => Some((*transform, quad)),
            _ => None,
        })
    }

    /// Number of recorded calls that produce pixels.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::FillQuad { .. }
                        | DrawCommand::StrokeQuad { .. }
                        | DrawCommand::Line { .. }
                )
            })
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_viewport(&mut self, size: Size) {
        self.commands.push(DrawCommand::SetViewport(size));
    }

    fn set_projection(&mut self, bounds: Rect) {
        self.commands.push(DrawCommand::SetProjection(bounds));
    }

    fn clear(&mut self, color: Rgba8) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn push_transform(&mut self, transform: Affine) {
        self.stack.push(transform);
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        if self.stack.pop().is_none() {
            tracing::warn!("pop_transform without a matching push");
        }
        self.commands.push(DrawCommand::PopTransform);
    }

    fn fill_quad(&mut self, quad: &Quad) {
        let transform = self.current_transform();
        self.commands.push(DrawCommand::FillQuad {
            transform,
            quad: quad.clone(),
        });
    }

    fn stroke_quad(&mut self, corners: &[Point; 4], color: Rgba8, width: f64) {
        let transform = self.current_transform();
        self.commands.push(DrawCommand::StrokeQuad {
            transform,
            corners: *corners,
            color,
            width,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        let transform = self.current_transform();
        self.commands.push(DrawCommand::Line {
            transform,
            from,
            to,
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TransformScope;

    #[test]
    fn scope_guard_restores_depth() {
        let mut s = RecordingSurface::new();
        {
            let mut outer = TransformScope::new(&mut s, Affine::translate((1.0, 0.0)));
            {
                let inner = TransformScope::new(&mut *outer, Affine::scale(2.0));
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.current_transform(), Affine::translate((1.0, 0.0)));
        }
        assert_eq!(s.depth(), 0);
        assert_eq!(s.commands().len(), 4);
    }

    #[test]
    fn geometry_records_current_transform() {
        let mut s = RecordingSurface::new();
        s.push_transform(Affine::scale(3.0));
        s.draw_line(Point::ZERO, Point::new(1.0, 0.0), Rgba8::RED, 1.0);
        s.pop_transform();
        assert_eq!(s.draw_count(), 1);
        assert!(matches!(
            s.commands()[1],
            DrawCommand::Line { transform, .. } if transform == Affine::scale(3.0)
        ));
    }
}
