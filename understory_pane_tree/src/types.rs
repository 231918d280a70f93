// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the pane tree: identifiers, flags, colors, and local pane data.

use alloc::string::String;
use core::ops::Add;

use kurbo::{Affine, Rect, Size, Vec2};

use crate::geometry::{pane_rect, rotation_affine};
use crate::kind::PaneKind;

/// Identifier for a pane in the tree (generational).
///
/// Two handles compare equal only if they refer to the same slot in the same
/// generation, so `PaneId` equality is pane identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PaneId(pub(crate) u32, pub(crate) u32);

impl PaneId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Pane flags controlling editor visibility and alpha inheritance.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PaneFlags: u8 {
        /// Pane and its subtree are drawn in the editor preview.
        const DISPLAY_IN_EDITOR      = 0b0000_0001;
        /// Children inherit this pane's effective alpha. When clear, children
        /// start again from full opacity.
        const INFLUENCES_CHILD_ALPHA = 0b0000_0010;
    }
}

impl Default for PaneFlags {
    fn default() -> Self {
        Self::DISPLAY_IN_EDITOR | Self::INFLUENCES_CHILD_ALPHA
    }
}

/// An 8-bit-per-channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::opaque(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::opaque(0, 128, 0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Return the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Add `amount` to each color channel, saturating at 255. Alpha is kept.
    #[must_use]
    pub const fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }

    /// Subtract `amount` from each color channel, saturating at 0. Alpha is kept.
    #[must_use]
    pub const fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Scale this color's alpha by `alpha / 255` with truncating integer division.
    #[must_use]
    pub const fn scale_alpha(self, alpha: u8) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "product of two u8 values divided by 255 always fits in u8."
        )]
        let a = (self.a as u16 * alpha as u16 / 255) as u8;
        self.with_alpha(a)
    }
}

/// A three-component vector used for pane translation and rotation.
///
/// Only `x` and `y` of a translation take part in 2D composition; `z` is kept
/// so that round-tripping a layout does not lose data.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a new vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Parent-relative transform of a pane.
///
/// Applied as translate, then rotate, then scale (`T * R * S`). Rotation angles
/// are in degrees; see [`rotation_affine`] for how X and Y rotations flatten
/// onto the plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaneTransform {
    /// Translation; `z` is ignored by 2D composition.
    pub translate: Vec3,
    /// Rotation about the X, Y and Z axes, in degrees.
    pub rotate: Vec3,
    /// Scale along X and Y.
    pub scale: Vec2,
}

impl Default for PaneTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PaneTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translate: Vec3::ZERO,
        rotate: Vec3::ZERO,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Transform that only translates.
    pub const fn from_translate(x: f64, y: f64) -> Self {
        Self {
            translate: Vec3::new(x, y, 0.0),
            ..Self::IDENTITY
        }
    }

    /// Fold a parts owner's transform into this one.
    ///
    /// Translations and rotations add component-wise and scales multiply. This
    /// is not a matrix product: the owner's translation is not rotated or scaled
    /// by this pane's rotation and scale.
    #[must_use]
    pub fn folded_with(&self, owner: &Self) -> Self {
        Self {
            translate: owner.translate + self.translate,
            rotate: owner.rotate + self.rotate,
            scale: Vec2::new(owner.scale.x * self.scale.x, owner.scale.y * self.scale.y),
        }
    }

    /// The 2D affine for this transform.
    ///
    /// Non-finite translation and rotation components count as zero; negative
    /// or non-finite scale components collapse to zero.
    pub fn to_affine(&self) -> Affine {
        let translate = Vec2::new(finite_or_zero(self.translate.x), finite_or_zero(self.translate.y));
        let rotate = Vec3::new(
            finite_or_zero(self.rotate.x),
            finite_or_zero(self.rotate.y),
            finite_or_zero(self.rotate.z),
        );
        Affine::translate(translate)
            * rotation_affine(rotate)
            * Affine::scale_non_uniform(sane_scale(self.scale.x), sane_scale(self.scale.y))
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

fn sane_scale(v: f64) -> f64 {
    if v.is_finite() && v >= 0.0 { v } else { 0.0 }
}

/// Horizontal placement of a pane relative to its anchor point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalOrigin {
    /// Pane is centered on the anchor.
    #[default]
    Center,
    /// Anchor is the left edge.
    Left,
    /// Anchor is the right edge.
    Right,
}

/// Vertical placement of a pane relative to its anchor point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalOrigin {
    /// Pane is centered on the anchor.
    #[default]
    Center,
    /// Anchor is the top edge.
    Top,
    /// Anchor is the bottom edge.
    Bottom,
}

/// Origin anchor of a pane's rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Origin {
    /// Horizontal anchor.
    pub x: HorizontalOrigin,
    /// Vertical anchor.
    pub y: VerticalOrigin,
}

impl Origin {
    /// Create an origin from both anchors.
    pub const fn new(x: HorizontalOrigin, y: VerticalOrigin) -> Self {
        Self { x, y }
    }
}

/// Local data for a pane.
#[derive(Clone, Debug)]
pub struct LocalPane {
    /// Pane name as stored in the layout; not required to be unique.
    pub name: String,
    /// Transform relative to the parent pane.
    pub transform: PaneTransform,
    /// Width and height in pane units.
    pub size: Size,
    /// Where the rectangle sits relative to the pane's anchor point.
    pub origin: Origin,
    /// Own alpha, before inheritance.
    pub alpha: u8,
    /// Visibility and alpha inheritance flags.
    pub flags: PaneFlags,
    /// Kind-specific payload.
    pub kind: PaneKind,
}

impl Default for LocalPane {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: PaneTransform::IDENTITY,
            size: Size::ZERO,
            origin: Origin::default(),
            alpha: 255,
            flags: PaneFlags::default(),
            kind: PaneKind::Container,
        }
    }
}

impl LocalPane {
    /// The pane's local rectangle, derived from its size and origin.
    pub fn rect(&self) -> Rect {
        pane_rect(self.size, self.origin)
    }

    /// Whether this pane (and therefore its subtree) is drawn in the editor.
    pub fn displays_in_editor(&self) -> bool {
        self.flags.contains(PaneFlags::DISPLAY_IN_EDITOR)
    }

    /// Whether children inherit this pane's effective alpha.
    pub fn influences_child_alpha(&self) -> bool {
        self.flags.contains(PaneFlags::INFLUENCES_CHILD_ALPHA)
    }
}
