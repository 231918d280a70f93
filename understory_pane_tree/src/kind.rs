// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pane kinds and their payloads.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::types::{PaneId, Rgba8};

/// The closed set of pane kinds a layout can contain.
///
/// The layout root is not a kind of its own; it is whichever pane the
/// [`Layout`](crate::Layout) names as root, and it is drawn by a dedicated routine.
#[derive(Clone, Debug, Default)]
pub enum PaneKind {
    /// A plain pane that only groups and positions its children.
    #[default]
    Container,
    /// A textured or vertex-colored quad.
    Picture(Picture),
    /// A reference to an externally defined layout that is drawn in place.
    PartsRef(PartsRef),
    /// A bordered window frame. Drawing is not implemented.
    Window(Window),
}

impl PaneKind {
    /// Short, stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Picture(_) => "picture",
            Self::PartsRef(_) => "parts",
            Self::Window(_) => "window",
        }
    }
}

/// Vertex colors of a quad, one per corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CornerColors {
    /// Top-left corner.
    pub top_left: Rgba8,
    /// Top-right corner.
    pub top_right: Rgba8,
    /// Bottom-right corner.
    pub bottom_right: Rgba8,
    /// Bottom-left corner.
    pub bottom_left: Rgba8,
}

impl CornerColors {
    /// The same color on all four corners.
    pub const fn uniform(color: Rgba8) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_right: color,
            bottom_left: color,
        }
    }

    /// Colors in top-left, top-right, bottom-right, bottom-left order.
    pub const fn to_array(self) -> [Rgba8; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl Default for CornerColors {
    fn default() -> Self {
        Self::uniform(Rgba8::WHITE)
    }
}

/// One set of texture coordinates for a picture's four corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TexCoordSet {
    /// Top-left corner.
    pub top_left: Point,
    /// Top-right corner.
    pub top_right: Point,
    /// Bottom-right corner.
    pub bottom_right: Point,
    /// Bottom-left corner.
    pub bottom_left: Point,
}

impl TexCoordSet {
    /// Coordinates in top-left, top-right, bottom-right, bottom-left order.
    pub const fn to_array(self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }
}

impl Default for TexCoordSet {
    fn default() -> Self {
        Self {
            top_left: Point::new(0.0, 0.0),
            top_right: Point::new(1.0, 0.0),
            bottom_right: Point::new(1.0, 1.0),
            bottom_left: Point::new(0.0, 1.0),
        }
    }
}

/// Texture wrap mode as stored in the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Clamp to the edge texel.
    Clamp,
    /// Repeat the texture.
    Repeat,
    /// Repeat, mirroring every other tile.
    Mirror,
    /// A value this crate does not recognize.
    Unknown(u8),
}

impl WrapMode {
    /// Decode the raw file value (`0` clamp, `1` repeat, `2` mirror).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Clamp,
            1 => Self::Repeat,
            2 => Self::Mirror,
            other => Self::Unknown(other),
        }
    }
}

/// Texture filter mode as stored in the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Nearest-neighbor sampling.
    Near,
    /// Linear sampling.
    Linear,
    /// A value this crate does not recognize.
    Unknown(u8),
}

impl FilterMode {
    /// Decode the raw file value (`0` near, `1` linear).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Near,
            1 => Self::Linear,
            other => Self::Unknown(other),
        }
    }
}

/// A material's reference to one texture and how to sample it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureRef {
    /// Name of the texture in the layout's texture list.
    pub name: String,
    /// Horizontal wrap.
    pub wrap_u: WrapMode,
    /// Vertical wrap.
    pub wrap_v: WrapMode,
    /// Minification filter.
    pub min_filter: FilterMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
}

impl TextureRef {
    /// A clamped, linearly filtered reference to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wrap_u: WrapMode::Clamp,
            wrap_v: WrapMode::Clamp,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
        }
    }
}

/// Transform applied to texture coordinates, independent of the quad geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureTransform {
    /// Translation in texture space.
    pub translate: Vec2,
    /// Rotation in degrees.
    pub rotate: f64,
    /// Scale in texture space.
    pub scale: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotate: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

/// Surface description of a picture pane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    /// Material name, for logs and inspectors.
    pub name: String,
    /// Texture references; only the first is used for preview.
    pub texture_maps: Vec<TextureRef>,
    /// Texture coordinate transforms; only the first is used for preview.
    pub texture_transforms: Vec<TextureTransform>,
}

/// Payload of a picture pane.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Picture {
    /// Vertex colors.
    pub corner_colors: CornerColors,
    /// Texture coordinate sets; the first one is used when present.
    pub tex_coords: Vec<TexCoordSet>,
    /// Material, if the layout assigns one.
    pub material: Option<Material>,
}

/// A named override attached to a parts pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartProperty {
    /// Name of the pane being overridden in the external layout.
    pub name: String,
    /// Replacement pane drawn on top, if one was loaded.
    pub pane: Option<PaneId>,
}

/// Payload of a parts pane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartsRef {
    /// Name of the external layout.
    pub part_name: String,
    /// Root of the external layout once it has been resolved into this tree.
    pub external: Option<PaneId>,
    /// Property overrides.
    pub properties: Vec<PartProperty>,
}

impl PartsRef {
    /// Panes this reference draws in place: the external root, then every
    /// loaded override pane, in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.external
            .into_iter()
            .chain(self.properties.iter().filter_map(|p| p.pane))
    }
}

/// Payload of a window pane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    /// Number of frame pieces (1, 4 or 8).
    pub frame_count: u8,
}
