use std::f32::consts::SQRT_2;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::Extent3d;
use bevy::render::render_resource::TextureDimension;
use bevy::render::render_resource::TextureFormat;

use super::constants::SPRITE_ALPHA_STOPS;
use super::constants::SPRITE_SIZE;
use super::constants::VIGNETTE_ALPHA_STOPS;
use crate::traits::UsizeExt;

/// Builds the soft round sprite every star is stamped with: white, opaque in the centre and
/// fading to transparent at the rim of the inscribed circle.
pub fn soft_point_sprite(size: u32) -> Image {
    let size = if size < 2 {
        warn!("sprite size {size} too small, using {SPRITE_SIZE}");
        SPRITE_SIZE
    } else {
        size
    };
    rgba_image(size, sprite_pixels(size as usize))
}

/// Black overlay that is clear in the middle and darkens toward the corners. Stretched over the
/// window it becomes an ellipse reaching the corners.
pub fn vignette_image(size: u32) -> Image {
    let size = size.max(2);
    rgba_image(size, vignette_pixels(size as usize))
}

fn rgba_image(size: u32, pixels: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width:                 size,
            height:                size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

/// RGBA8 rows of a `size`×`size` radial gradient, sampled at pixel centres
pub fn sprite_pixels(size: usize) -> Vec<u8> { radial_pixels(size, [255, 255, 255], 1.0, gradient_alpha) }

/// Like the sprite, but black, and the gradient's end sits on the corners instead of the rim
pub fn vignette_pixels(size: usize) -> Vec<u8> { radial_pixels(size, [0, 0, 0], SQRT_2, vignette_alpha) }

// `reach` is the gradient's end as a multiple of half the edge length
fn radial_pixels(size: usize, rgb: [u8; 3], reach: f32, alpha: impl Fn(f32) -> f32) -> Vec<u8> {
    let half = size.to_f32() * 0.5;
    let mut data = Vec::with_capacity(size * size * 4);

    for y in 0..size {
        for x in 0..size {
            let dx = x.to_f32() + 0.5 - half;
            let dy = y.to_f32() + 0.5 - half;
            let t = dx.hypot(dy) / (half * reach);
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], to_channel(alpha(t))]);
        }
    }
    data
}

/// Alpha at `t` = distance from the centre as a fraction of the radius. Linear between the
/// stops, zero outside the circle.
pub fn gradient_alpha(t: f32) -> f32 {
    if t >= 1.0 {
        return 0.0;
    }
    ramp(&SPRITE_ALPHA_STOPS, t)
}

/// Vignette darkness at `t` = distance from the centre as a fraction of the corner distance
pub fn vignette_alpha(t: f32) -> f32 { ramp(&VIGNETTE_ALPHA_STOPS, t) }

// piecewise linear through (t, alpha) stops, held at the last stop past the end
fn ramp(stops: &[(f32, f32)], t: f32) -> f32 {
    let t = t.max(0.0);
    stops
        .windows(2)
        .find_map(|pair| {
            let [(t0, a0), (t1, a1)] = [pair[0], pair[1]];
            (t <= t1).then(|| {
                let local = (t - t0) / (t1 - t0);
                (a1 - a0).mul_add(local, a0)
            })
        })
        .unwrap_or_else(|| stops.last().map_or(0.0, |&(_, alpha)| alpha))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to [0, 255] before the cast"
)]
fn to_channel(alpha: f32) -> u8 { (alpha.clamp(0.0, 1.0) * 255.0).round() as u8 }

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(pixels: &[u8], size: usize, x: usize, y: usize) -> u8 {
        pixels[(y * size + x) * 4 + 3]
    }

    #[test]
    fn gradient_hits_its_stops() {
        assert!((gradient_alpha(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((gradient_alpha(0.5) - 0.6).abs() < 1e-6);
        assert!((gradient_alpha(0.25) - 0.8).abs() < 1e-6);
        assert!((gradient_alpha(0.75) - 0.3).abs() < 1e-6);
        assert_eq!(gradient_alpha(1.0), 0.0);
        assert_eq!(gradient_alpha(1.7), 0.0);
    }

    #[test]
    fn gradient_falls_off_monotonically() {
        let mut previous = gradient_alpha(0.0);
        for step in 1..=100_usize {
            let alpha = gradient_alpha(step.to_f32() / 100.0);
            assert!(alpha <= previous);
            previous = alpha;
        }
    }

    #[test]
    fn sprite_is_white_with_a_bright_centre_and_clear_corners() {
        let size = SPRITE_SIZE as usize;
        let pixels = sprite_pixels(size);
        assert_eq!(pixels.len(), size * size * 4);
        assert!(pixels.chunks_exact(4).all(|px| px[..3] == [255, 255, 255]));

        assert!(alpha_at(&pixels, size, size / 2, size / 2) > 245);
        assert_eq!(alpha_at(&pixels, size, 0, 0), 0);
        assert_eq!(alpha_at(&pixels, size, size - 1, size - 1), 0);
        // the rim of the circle is nearly transparent
        assert!(alpha_at(&pixels, size, 0, size / 2) < 10);
    }

    #[test]
    fn sprite_is_radially_symmetric() {
        let size = 32;
        let pixels = sprite_pixels(size);
        for y in 0..size {
            for x in 0..size {
                let mirrored = alpha_at(&pixels, size, size - 1 - x, y);
                let transposed = alpha_at(&pixels, size, y, x);
                assert_eq!(alpha_at(&pixels, size, x, y), mirrored);
                assert_eq!(alpha_at(&pixels, size, x, y), transposed);
            }
        }
    }

    #[test]
    fn vignette_is_clear_inside_and_darkest_in_the_corners() {
        assert_eq!(vignette_alpha(0.0), 0.0);
        assert_eq!(vignette_alpha(0.45), 0.0);
        assert!((vignette_alpha(0.72) - 0.55).abs() < 1e-6);
        assert!((vignette_alpha(1.0) - 0.85).abs() < 1e-6);
        assert!((vignette_alpha(1.3) - 0.85).abs() < 1e-6);

        let size = 128;
        let pixels = vignette_pixels(size);
        assert!(pixels.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
        assert_eq!(alpha_at(&pixels, size, size / 2, size / 2), 0);
        // edge midpoints sit at 1/sqrt(2) of the corner distance, just short of the 0.72 stop
        let edge = alpha_at(&pixels, size, 0, size / 2);
        assert!(edge > 100 && edge < 140, "edge alpha {edge}");
        assert!(alpha_at(&pixels, size, 0, 0) > 200);
    }

    #[test]
    fn vignette_darkens_monotonically_along_the_diagonal() {
        let size = 64;
        let pixels = vignette_pixels(size);
        let mut previous = 0;
        for step in (0..size / 2).rev() {
            let alpha = alpha_at(&pixels, size, step, step);
            assert!(alpha >= previous);
            previous = alpha;
        }
    }

    #[test]
    fn tiny_sprite_request_falls_back_to_default_size() {
        let image = soft_point_sprite(1);
        assert_eq!(image.width(), SPRITE_SIZE);
        assert_eq!(image.height(), SPRITE_SIZE);
    }
}
