// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind draw parameters: quad corners, vertex colors, texture binding.

use kurbo::{Affine, Rect};
use understory_pane_tree::{
    FilterMode, Picture, Rgba8, TextureRef, TextureTransform, WrapMode, quad_corners,
};

use crate::surface::{
    DrawSurface, Quad, SamplerFilter, SamplerParams, SamplerWrap, TextureBinding, UNIT_TEX_COORDS,
};
use crate::texture::{TextureCache, TextureResource};

/// Backend wrap mode for a layout wrap mode. Unrecognized values clamp.
pub fn sampler_wrap(mode: WrapMode) -> SamplerWrap {
    match mode {
        WrapMode::Clamp | WrapMode::Unknown(_) => SamplerWrap::ClampToEdge,
        WrapMode::Repeat => SamplerWrap::Repeat,
        WrapMode::Mirror => SamplerWrap::MirroredRepeat,
    }
}

/// Backend filter for a layout filter mode. Unrecognized values are linear.
pub fn sampler_filter(mode: FilterMode) -> SamplerFilter {
    match mode {
        FilterMode::Near => SamplerFilter::Nearest,
        FilterMode::Linear | FilterMode::Unknown(_) => SamplerFilter::Linear,
    }
}

/// Sampler state described by a texture reference.
pub fn sampler_params(texture: &TextureRef) -> SamplerParams {
    SamplerParams {
        wrap_s: sampler_wrap(texture.wrap_u),
        wrap_t: sampler_wrap(texture.wrap_v),
        min_filter: sampler_filter(texture.min_filter),
        mag_filter: sampler_filter(texture.mag_filter),
    }
}

/// Texture-coordinate transform: scale, then rotate (degrees), then translate,
/// composed in that order.
pub fn texture_affine(t: &TextureTransform) -> Affine {
    Affine::scale_non_uniform(t.scale.x, t.scale.y)
        * Affine::rotate(t.rotate.to_radians())
        * Affine::translate(t.translate)
}

/// Fill and outline a rectangle in one uniform color, untextured.
pub(crate) fn draw_solid<S: DrawSurface + ?Sized>(
    surface: &mut S,
    rect: Rect,
    fill: Rgba8,
    outline: Rgba8,
    width: f64,
) {
    let quad = Quad::solid(quad_corners(rect), fill);
    surface.fill_quad(&quad);
    surface.stroke_quad(&quad.corners, outline, width);
}

/// The quad for a picture pane drawn at `alpha`.
///
/// Texture coordinates and binding come from the first coordinate set and the
/// first texture map. A texture that cannot be bound degrades to the
/// placeholder pattern; a picture without coordinate sets is untextured.
pub(crate) fn picture_quad<T: TextureResource>(
    rect: Rect,
    picture: &Picture,
    alpha: u8,
    textures: &mut TextureCache<T>,
) -> Quad {
    let colors = picture.corner_colors.to_array().map(|c| c.scale_alpha(alpha));
    let corners = quad_corners(rect);
    let Some(set) = picture.tex_coords.first() else {
        return Quad {
            corners,
            colors,
            tex_coords: UNIT_TEX_COORDS,
            texture: TextureBinding::None,
            tex_transform: None,
        };
    };

    let material = picture.material.as_ref();
    let map0 = material.and_then(|m| m.texture_maps.first());
    let sampler = map0.map(sampler_params).unwrap_or_default();
    let texture = match map0 {
        Some(map) => match textures.bind(&map.name) {
            Ok((handle, swizzle)) => TextureBinding::Texture {
                handle,
                swizzle,
                sampler,
            },
            Err(err) => {
                tracing::warn!(%err, "using placeholder texture");
                TextureBinding::Placeholder { sampler }
            }
        },
        None => TextureBinding::Placeholder { sampler },
    };
    let tex_transform = material
        .and_then(|m| m.texture_transforms.first())
        .map(texture_affine);

    Quad {
        corners,
        colors,
        tex_coords: set.to_array(),
        texture,
        tex_transform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::{Point, Vec2};
    use understory_pane_tree::{CornerColors, Material, TexCoordSet};

    use crate::surface::{ChannelSwizzle, TextureHandle};
    use crate::texture::TextureError;

    #[derive(Debug)]
    struct Ok1;

    impl TextureResource for Ok1 {
        fn upload(&mut self) -> Result<TextureHandle, TextureError> {
            Ok(TextureHandle(1))
        }
        fn channel_swizzle(&self) -> ChannelSwizzle {
            ChannelSwizzle::IDENTITY
        }
        fn dispose(&mut self) {}
    }

    fn textured(name: &str) -> Picture {
        let mut map = TextureRef::new(name);
        map.wrap_u = WrapMode::Mirror;
        map.wrap_v = WrapMode::Unknown(9);
        map.min_filter = FilterMode::Near;
        map.mag_filter = FilterMode::Unknown(4);
        Picture {
            corner_colors: CornerColors::uniform(Rgba8::WHITE.with_alpha(200)),
            tex_coords: vec![TexCoordSet::default()],
            material: Some(Material {
                name: "m".into(),
                texture_maps: vec![map],
                texture_transforms: vec![],
            }),
        }
    }

    #[test]
    fn wrap_and_filter_fallbacks() {
        let params = sampler_params(&textured("x").material.unwrap().texture_maps[0]);
        assert_eq!(params.wrap_s, SamplerWrap::MirroredRepeat);
        assert_eq!(params.wrap_t, SamplerWrap::ClampToEdge);
        assert_eq!(params.min_filter, SamplerFilter::Nearest);
        assert_eq!(params.mag_filter, SamplerFilter::Linear);
    }

    #[test]
    fn raw_file_values_decode_to_samplers() {
        let wraps: alloc::vec::Vec<SamplerWrap> =
            [0, 1, 2, 3, 255].map(|raw| sampler_wrap(WrapMode::from_raw(raw))).into();
        assert_eq!(
            wraps,
            [
                SamplerWrap::ClampToEdge,
                SamplerWrap::Repeat,
                SamplerWrap::MirroredRepeat,
                SamplerWrap::ClampToEdge,
                SamplerWrap::ClampToEdge,
            ]
        );
        assert_eq!(WrapMode::from_raw(3), WrapMode::Unknown(3));
        assert_eq!(WrapMode::from_raw(255), WrapMode::Unknown(255));

        let filters: alloc::vec::Vec<SamplerFilter> =
            [0, 1, 2, 255].map(|raw| sampler_filter(FilterMode::from_raw(raw))).into();
        assert_eq!(
            filters,
            [
                SamplerFilter::Nearest,
                SamplerFilter::Linear,
                SamplerFilter::Linear,
                SamplerFilter::Linear,
            ]
        );
        assert_eq!(FilterMode::from_raw(2), FilterMode::Unknown(2));
        assert_eq!(FilterMode::from_raw(255), FilterMode::Unknown(255));
    }

    #[test]
    fn bound_texture_and_scaled_alpha() {
        let mut cache = TextureCache::new();
        cache.insert("tex", Ok1);
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        let quad = picture_quad(rect, &textured("tex"), 128, &mut cache);
        assert!(matches!(
            quad.texture,
            TextureBinding::Texture { handle: TextureHandle(1), .. }
        ));
        assert!(quad.colors.iter().all(|c| c.a == 100));
        assert_eq!(quad.tex_coords, TexCoordSet::default().to_array());
    }

    #[test]
    fn missing_texture_uses_placeholder() {
        let mut cache: TextureCache<Ok1> = TextureCache::new();
        let quad = picture_quad(Rect::ZERO, &textured("gone"), 255, &mut cache);
        assert!(matches!(quad.texture, TextureBinding::Placeholder { .. }));
    }

    #[test]
    fn no_coordinate_sets_means_untextured() {
        let mut cache: TextureCache<Ok1> = TextureCache::new();
        let mut picture = textured("tex");
        picture.tex_coords.clear();
        let quad = picture_quad(Rect::ZERO, &picture, 255, &mut cache);
        assert_eq!(quad.texture, TextureBinding::None);
        assert_eq!(quad.tex_coords, UNIT_TEX_COORDS);
    }

    #[test]
    fn picture_quad_carries_the_first_texture_transform() {
        let mut cache: TextureCache<Ok1> = TextureCache::new();
        let first = TextureTransform {
            translate: Vec2::new(0.5, 0.25),
            rotate: 90.0,
            scale: Vec2::new(2.0, 3.0),
        };
        let mut picture = textured("tex");
        if let Some(material) = picture.material.as_mut() {
            material.texture_transforms = vec![first, TextureTransform::default()];
        }
        let quad = picture_quad(Rect::ZERO, &picture, 255, &mut cache);
        assert_eq!(quad.tex_transform, Some(texture_affine(&first)));

        picture.tex_coords.clear();
        let quad = picture_quad(Rect::ZERO, &picture, 255, &mut cache);
        assert_eq!(quad.tex_transform, None);
    }

    #[test]
    fn texture_transform_scales_after_translating() {
        let t = TextureTransform {
            translate: Vec2::new(1.0, 0.0),
            rotate: 0.0,
            scale: Vec2::new(2.0, 2.0),
        };
        assert_eq!(texture_affine(&t) * Point::ZERO, Point::new(2.0, 0.0));
    }
}
