//! Pinhole camera and the per-render viewport derived from it.

use std::fmt;

use crate::Ray;
use whitted_math::Vec3;

/// A pinhole camera with an orthonormal basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    position: Vec3,
    towards: Vec3,
    up: Vec3,
    right: Vec3,
    distance_to_plane: f32,
}

impl PinholeCamera {
    /// Create a camera at `position` looking along `towards`.
    ///
    /// `up` only needs to be roughly perpendicular to `towards`; the basis
    /// is re-orthogonalized.
    pub fn new(position: Vec3, towards: Vec3, up: Vec3, distance_to_plane: f32) -> Self {
        let towards = towards.normalize();
        let right = towards.cross(up).normalize();
        let up = right.cross(towards);

        Self {
            position,
            towards,
            up,
            right,
            distance_to_plane,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn towards(&self) -> Vec3 {
        self.towards
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// False when `towards` was zero or parallel to `up`.
    pub fn has_valid_basis(&self) -> bool {
        self.towards.is_finite()
            && self.right.is_finite()
            && self.up.is_finite()
            && self.distance_to_plane.is_finite()
            && self.distance_to_plane > 0.0
    }

    /// Project the camera onto a `width`×`height` image whose view plane is
    /// `view_plane_width` world units wide. Pixels are square.
    pub fn view(&self, width: u32, height: u32, view_plane_width: f32) -> Viewport {
        Viewport {
            origin: self.position,
            center: self.position + self.towards * self.distance_to_plane,
            right: self.right,
            up: self.up,
            pixel_size: view_plane_width / width as f32,
            width,
            height,
        }
    }
}

impl fmt::Display for PinholeCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {}, towards {}, up {}, plane distance {}",
            self.position, self.towards, self.up, self.distance_to_plane
        )
    }
}

/// The camera resolved against one render's resolution.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    origin: Vec3,
    center: Vec3,
    right: Vec3,
    up: Vec3,
    pixel_size: f32,
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// World-space side length of one pixel.
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// World-space center of pixel (x, y). Row 0 is the top of the image.
    pub fn pixel_center(&self, x: u32, y: u32) -> Vec3 {
        self.sample_point(x, y, 0, 0, 1)
    }

    /// Center of sub-cell (i, j) when pixel (x, y) is split into a
    /// `factor`×`factor` grid.
    pub fn sample_point(&self, x: u32, y: u32, i: u32, j: u32, factor: u32) -> Vec3 {
        let cell = 1.0 / factor as f32;
        let u = x as f32 + (i as f32 + 0.5) * cell - self.width as f32 / 2.0;
        let v = y as f32 + (j as f32 + 0.5) * cell - self.height as f32 / 2.0;
        self.center + (self.right * u - self.up * v) * self.pixel_size
    }

    /// Primary ray through sub-cell (i, j) of pixel (x, y).
    pub fn sample_ray(&self, x: u32, y: u32, i: u32, j: u32, factor: u32) -> Ray {
        Ray::through(self.origin, self.sample_point(x, y, i, j, factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PinholeCamera {
        PinholeCamera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 1.0)
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = PinholeCamera::new(
            Vec3::ZERO,
            Vec3::new(0.0, -0.2, -1.0),
            Vec3::Y,
            1.0,
        );
        assert!(camera.has_valid_basis());
        assert!(camera.towards().dot(camera.up()).abs() < 1e-6);
        assert!(camera.towards().dot(camera.right()).abs() < 1e-6);
        assert!((camera.up().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_parallel_up_is_degenerate() {
        let camera = PinholeCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Y, 1.0);
        assert!(!camera.has_valid_basis());
    }

    #[test]
    fn test_default_orientation() {
        let camera = camera();
        assert!((camera.right() - Vec3::X).length() < 1e-6);
        assert!((camera.up() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_pixel_centers_are_symmetric() {
        let view = camera().view(4, 2, 2.0);
        assert_eq!(view.pixel_size(), 0.5);

        // Top-left and bottom-right mirror each other around the plane center
        let top_left = view.pixel_center(0, 0);
        let bottom_right = view.pixel_center(3, 1);
        assert!((top_left - Vec3::new(-0.75, 0.25, -1.0)).length() < 1e-6);
        assert!((bottom_right - Vec3::new(0.75, -0.25, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_sub_samples_average_to_center() {
        let view = camera().view(5, 5, 1.0);
        for factor in 1..=3 {
            let mut sum = Vec3::ZERO;
            for j in 0..factor {
                for i in 0..factor {
                    sum += view.sample_point(2, 1, i, j, factor);
                }
            }
            let mean = sum / (factor * factor) as f32;
            assert!((mean - view.pixel_center(2, 1)).length() < 1e-6);
        }
    }

    #[test]
    fn test_sub_samples_stay_inside_pixel() {
        let view = camera().view(3, 3, 3.0);
        let center = view.pixel_center(1, 1);
        for j in 0..3 {
            for i in 0..3 {
                let p = view.sample_point(1, 1, i, j, 3);
                assert!((p.x - center.x).abs() < 0.5);
                assert!((p.y - center.y).abs() < 0.5);
            }
        }
    }

    #[test]
    fn test_center_ray_looks_forward() {
        let view = camera().view(3, 3, 1.0);
        let ray = view.sample_ray(1, 1, 0, 0, 1);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-6);
    }
}
