use serde::{Deserialize, Serialize};

/// A point of the (unbounded) fractal plane.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn mid_point(&self, other: PlanePoint) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Scales the point about `focus` so that `focus` stays fixed.
    #[must_use]
    pub fn scale_about(&self, focus: PlanePoint, factor_x: f64, factor_y: f64) -> Self {
        Self::new(
            focus.x - focus.x * factor_x + self.x * factor_x,
            focus.y - focus.y * factor_y + self.y * factor_y,
        )
    }
}
