use crate::core::data::plane_point::PlanePoint;
use crate::core::data::plane_rect::PlaneRect;

/// Maps image pixel coordinates onto the fractal plane.
///
/// Pixel `(column, row)` lands on `origin + (column * delta_x, row * delta_y)`, so the
/// mapping is identical for every slice of the same image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelGeometry {
    origin: PlanePoint,
    delta_x: f64,
    delta_y: f64,
}

impl PixelGeometry {
    #[must_use]
    pub const fn new(origin: PlanePoint, delta_x: f64, delta_y: f64) -> Self {
        Self {
            origin,
            delta_x,
            delta_y,
        }
    }

    /// Spreads `bounds` over an image of `image_width`×`image_height` pixels.
    #[must_use]
    pub fn from_bounds(bounds: PlaneRect, image_width: u32, image_height: u32) -> Self {
        Self {
            origin: bounds.top_left(),
            delta_x: bounds.width() / f64::from(image_width.max(1)),
            delta_y: bounds.height() / f64::from(image_height.max(1)),
        }
    }

    #[must_use]
    pub fn origin(&self) -> PlanePoint {
        self.origin
    }

    #[must_use]
    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    #[must_use]
    pub fn delta_y(&self) -> f64 {
        self.delta_y
    }

    #[inline]
    #[must_use]
    pub fn point(&self, column: i32, row: i32) -> PlanePoint {
        PlanePoint::new(
            self.origin.x + f64::from(column) * self.delta_x,
            self.origin.y + f64::from(row) * self.delta_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bounds_divides_extent_by_image_size() {
        let bounds =
            PlaneRect::new(PlanePoint::new(-2.0, -1.0), PlanePoint::new(2.0, 1.0)).unwrap();
        let geometry = PixelGeometry::from_bounds(bounds, 400, 100);

        assert_eq!(geometry.delta_x(), 0.01);
        assert_eq!(geometry.delta_y(), 0.02);
        assert_eq!(geometry.origin(), PlanePoint::new(-2.0, -1.0));
    }

    #[test]
    fn test_point_is_relative_to_image_origin() {
        let geometry = PixelGeometry::new(PlanePoint::new(1.0, 2.0), 0.5, 0.25);

        assert_eq!(geometry.point(0, 0), PlanePoint::new(1.0, 2.0));
        assert_eq!(geometry.point(4, 8), PlanePoint::new(3.0, 4.0));
    }
}
