// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod optics;
mod ray;

pub use interval::Interval;
pub use optics::{reflect, refract};
pub use ray::Ray;

/// Color type alias (linear RGB, unclamped until write-out)
pub type Color = Vec3;
