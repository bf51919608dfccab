use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    InvalidSize { width: i64, height: i64 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "pixel rect size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for PixelRectError {}

/// Inclusive rectangle of pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let width = i64::from(bottom_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(bottom_right.y) - i64::from(top_left.y) + 1;

        if width < 1 || height < 1 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    pub fn with_size(top_left: Point, width: u32, height: u32) -> Result<Self, PixelRectError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(PixelRectError::InvalidSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        }

        Self::new(
            top_left,
            Point {
                x: top_left.x + (width - 1) as i32,
                y: top_left.y + (height - 1) as i32,
            },
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn contains_rect(&self, other: PixelRect) -> bool {
        self.contains_point(other.top_left) && self.contains_point(other.bottom_right)
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_new_valid() {
        let top_left = Point { x: 0, y: 0 };
        let bottom_right = Point { x: 100, y: 100 };
        let rect = PixelRect::new(top_left, bottom_right).unwrap();

        assert_eq!(rect.top_left(), top_left);
        assert_eq!(rect.bottom_right(), bottom_right);
        assert_eq!(rect.width(), 101);
        assert_eq!(rect.height(), 101);
    }

    #[test]
    fn test_single_pixel_rect_is_valid() {
        let rect = PixelRect::new(Point { x: 4, y: 4 }, Point { x: 4, y: 4 }).unwrap();

        assert_eq!(rect.width(), 1);
        assert_eq!(rect.height(), 1);
        assert_eq!(rect.size(), 1);
    }

    #[test]
    fn test_inverted_rect_is_rejected() {
        let result = PixelRect::new(Point { x: 10, y: 0 }, Point { x: 0, y: 5 });

        assert_eq!(
            result,
            Err(PixelRectError::InvalidSize {
                width: -9,
                height: 6
            })
        );
    }

    #[test]
    fn test_with_size() {
        let rect = PixelRect::with_size(Point { x: 3, y: 2 }, 5, 4).unwrap();

        assert_eq!(rect.bottom_right(), Point { x: 7, y: 5 });
        assert_eq!(rect.width(), 5);
        assert_eq!(rect.height(), 4);
    }

    #[test]
    fn test_with_size_zero_is_rejected() {
        assert!(PixelRect::with_size(Point { x: 0, y: 0 }, 0, 4).is_err());
        assert!(PixelRect::with_size(Point { x: 0, y: 0 }, 4, 0).is_err());
    }

    #[test]
    fn test_contains_point() {
        let rect = PixelRect::new(Point { x: -10, y: -5 }, Point { x: 100, y: 200 }).unwrap();

        assert!(rect.contains_point(Point { x: 50, y: 50 }));
        assert!(rect.contains_point(Point { x: -10, y: -5 }));
        assert!(rect.contains_point(Point { x: 100, y: 200 }));
        assert!(!rect.contains_point(Point { x: 101, y: 50 }));
        assert!(!rect.contains_point(Point { x: 50, y: -6 }));
    }

    #[test]
    fn test_contains_rect() {
        let outer = PixelRect::with_size(Point { x: 0, y: 0 }, 10, 10).unwrap();
        let inner = PixelRect::with_size(Point { x: 5, y: 0 }, 5, 10).unwrap();
        let overflowing = PixelRect::with_size(Point { x: 6, y: 0 }, 5, 10).unwrap();

        assert!(outer.contains_rect(inner));
        assert!(!outer.contains_rect(overflowing));
    }
}
