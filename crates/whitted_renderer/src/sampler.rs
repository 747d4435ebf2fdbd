//! Stratified per-pixel sampling.

use crate::integrator::ray_color;
use crate::{Color, Scene, Viewport};

/// Render a single pixel.
///
/// The pixel is split into a k×k grid (k = anti-aliasing factor) and one
/// primary ray is traced through each cell center; the colors are averaged.
/// With k = 1 this is a single ray through the pixel center. The pattern is
/// fixed, so the result is fully deterministic.
pub fn render_pixel(scene: &Scene, viewport: &Viewport, x: u32, y: u32) -> Color {
    let factor = scene.settings().anti_aliasing_factor;
    let mut pixel_color = Color::ZERO;

    for j in 0..factor {
        for i in 0..factor {
            let ray = viewport.sample_ray(x, y, i, j, factor);
            pixel_color += ray_color(scene, &ray, 0);
        }
    }

    // Average the samples
    pixel_color / (factor * factor) as f32
}
