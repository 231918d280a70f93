// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draw-call surface a frame is submitted to, and the vertex data it accepts.

use core::ops::{Deref, DerefMut};

use kurbo::{Affine, Point, Rect, Size};
use understory_pane_tree::Rgba8;

/// Opaque handle of an uploaded texture, as returned by
/// [`TextureResource::upload`](crate::TextureResource::upload).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Source channel for one output channel of a texture sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red source channel.
    Red,
    /// Green source channel.
    Green,
    /// Blue source channel.
    Blue,
    /// Alpha source channel.
    Alpha,
    /// Constant zero.
    Zero,
    /// Constant one.
    One,
}

/// Where each output channel of a sample is read from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelSwizzle {
    /// Output red.
    pub r: Channel,
    /// Output green.
    pub g: Channel,
    /// Output blue.
    pub b: Channel,
    /// Output alpha.
    pub a: Channel,
}

impl ChannelSwizzle {
    /// Every channel reads itself.
    pub const IDENTITY: Self = Self {
        r: Channel::Red,
        g: Channel::Green,
        b: Channel::Blue,
        a: Channel::Alpha,
    };
}

impl Default for ChannelSwizzle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Texture wrap behavior outside `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplerWrap {
    /// Clamp to the edge texel.
    #[default]
    ClampToEdge,
    /// Tile.
    Repeat,
    /// Tile, mirroring every other copy.
    MirroredRepeat,
}

/// Texture filtering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplerFilter {
    /// Nearest texel.
    Nearest,
    /// Bilinear.
    #[default]
    Linear,
}

/// Sampler state for a bound texture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SamplerParams {
    /// Wrap along `s` (u).
    pub wrap_s: SamplerWrap,
    /// Wrap along `t` (v).
    pub wrap_t: SamplerWrap,
    /// Minification filter.
    pub min_filter: SamplerFilter,
    /// Magnification filter.
    pub mag_filter: SamplerFilter,
}

/// What a quad is textured with.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum TextureBinding {
    /// Vertex colors only.
    #[default]
    None,
    /// An uploaded texture.
    Texture {
        /// The uploaded texture.
        handle: TextureHandle,
        /// Channel mapping reported by the texture resource.
        swizzle: ChannelSwizzle,
        /// Wrap and filter state.
        sampler: SamplerParams,
    },
    /// The surface's built-in test pattern, used when a texture could not be bound.
    Placeholder {
        /// Wrap and filter state.
        sampler: SamplerParams,
    },
}

/// A four-cornered, per-vertex colored and textured quad.
///
/// Corner order is top-left, top-right, bottom-right, bottom-left for all
/// three arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct Quad {
    /// Positions in the space of the current transform scope.
    pub corners: [Point; 4],
    /// Vertex colors.
    pub colors: [Rgba8; 4],
    /// Texture coordinates.
    pub tex_coords: [Point; 4],
    /// Texture to sample.
    pub texture: TextureBinding,
    /// Transform applied to texture coordinates before sampling.
    pub tex_transform: Option<Affine>,
}

/// Texture coordinates used for quads that do not carry their own.
pub const UNIT_TEX_COORDS: [Point; 4] = [
    Point::new(1.0, 1.0),
    Point::new(0.0, 1.0),
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
];

impl Quad {
    /// An untextured quad with the same color on every corner.
    pub fn solid(corners: [Point; 4], color: Rgba8) -> Self {
        Self {
            corners,
            colors: [color; 4],
            tex_coords: UNIT_TEX_COORDS,
            texture: TextureBinding::None,
            tex_transform: None,
        }
    }
}

/// Immediate-mode sink for one frame of draw calls.
///
/// Transform scopes nest, but every pushed transform is absolute: it maps the
/// coordinates of subsequent calls straight to device space. Use
/// [`TransformScope`] so that every push is matched by a pop.
pub trait DrawSurface {
    /// Size of the target in device pixels.
    fn set_viewport(&mut self, size: Size);
    /// Device-space rectangle mapped onto the target.
    fn set_projection(&mut self, bounds: Rect);
    /// Fill the whole target.
    fn clear(&mut self, color: Rgba8);
    /// Enter a scope whose coordinates map to device space through `transform`.
    fn push_transform(&mut self, transform: Affine);
    /// Leave the innermost scope.
    fn pop_transform(&mut self);
    /// Fill a quad.
    fn fill_quad(&mut self, quad: &Quad);
    /// Outline a closed four-point loop.
    fn stroke_quad(&mut self, corners: &[Point; 4], color: Rgba8, width: f64);
    /// Draw one line segment.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64);
}

/// A pushed transform that is popped again when the guard drops.
///
/// The guard derefs to the surface, so drawing continues through it.
#[derive(Debug)]
pub struct TransformScope<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> TransformScope<'a, S> {
    /// Push `transform` on `surface`.
    pub fn new(surface: &'a mut S, transform: Affine) -> Self {
        surface.push_transform(transform);
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for TransformScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for TransformScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for TransformScope<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_transform();
    }
}
