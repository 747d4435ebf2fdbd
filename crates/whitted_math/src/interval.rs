/// A closed range of ray parameters.
///
/// Intersection queries take an interval and only report roots that lie
/// strictly inside it (see [`Interval::surrounds`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Every strictly positive parameter.
    pub const fn positive() -> Self {
        Self::new(0.0, f32::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval, used to clamp color channels.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
