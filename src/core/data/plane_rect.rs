use crate::core::data::plane_point::PlanePoint;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaneRectError {
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for PlaneRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "plane rect size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for PlaneRectError {}

/// Axis-aligned region of the fractal plane, `top_left` holding the smaller coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneRect {
    top_left: PlanePoint,
    bottom_right: PlanePoint,
}

impl PlaneRect {
    pub fn new(top_left: PlanePoint, bottom_right: PlanePoint) -> Result<Self, PlaneRectError> {
        let width = bottom_right.x - top_left.x;
        let height = bottom_right.y - top_left.y;

        // negated comparison so NaN extents are rejected too
        if !(width > 0.0 && height > 0.0) {
            return Err(PlaneRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    #[must_use]
    pub const fn unit_square() -> Self {
        Self {
            top_left: PlanePoint::new(0.0, 0.0),
            bottom_right: PlanePoint::new(1.0, 1.0),
        }
    }

    #[must_use]
    pub fn top_left(&self) -> PlanePoint {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> PlanePoint {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    #[must_use]
    pub fn centre(&self) -> PlanePoint {
        self.top_left.mid_point(self.bottom_right)
    }

    #[must_use]
    pub fn contains_point(&self, point: PlanePoint) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn within(&self, outer: PlaneRect) -> bool {
        outer.contains_point(self.top_left) && outer.contains_point(self.bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_rect_new_valid() {
        let top_left = PlanePoint::new(-2.2, -1.2);
        let bottom_right = PlanePoint::new(1.0, 1.2);

        let rect = PlaneRect::new(top_left, bottom_right).unwrap();

        assert_eq!(rect.top_left(), top_left);
        assert_eq!(rect.bottom_right(), bottom_right);
    }

    #[test]
    fn test_plane_rect_dimensions_must_be_positive() {
        let zero_width = PlaneRect::new(PlanePoint::new(0.0, 0.0), PlanePoint::new(0.0, 100.0));
        let negative_height =
            PlaneRect::new(PlanePoint::new(0.0, 0.0), PlanePoint::new(100.0, -10.0));

        assert_eq!(
            zero_width,
            Err(PlaneRectError::InvalidSize {
                width: 0.0,
                height: 100.0
            })
        );
        assert_eq!(
            negative_height,
            Err(PlaneRectError::InvalidSize {
                width: 100.0,
                height: -10.0
            })
        );
    }

    #[test]
    fn test_plane_rect_rejects_nan() {
        let rect = PlaneRect::new(PlanePoint::new(f64::NAN, 0.0), PlanePoint::new(1.0, 1.0));
        assert!(rect.is_err());
    }

    #[test]
    fn test_plane_rect_dimensions() {
        let rect = PlaneRect::new(PlanePoint::new(-2.5, -1.0), PlanePoint::new(1.0, 1.0)).unwrap();

        assert_eq!(rect.width(), 3.5);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(rect.centre(), PlanePoint::new(-0.75, 0.0));
    }

    #[test]
    fn test_plane_rect_within() {
        let unit = PlaneRect::new(PlanePoint::new(0.0, 0.0), PlanePoint::new(1.0, 1.0)).unwrap();
        let inner = PlaneRect::new(PlanePoint::new(0.25, 0.0), PlanePoint::new(1.0, 0.5)).unwrap();
        let outer = PlaneRect::new(PlanePoint::new(-0.1, 0.0), PlanePoint::new(0.5, 0.5)).unwrap();

        assert!(inner.within(unit));
        assert!(!outer.within(unit));
    }
}
