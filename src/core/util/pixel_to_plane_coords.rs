use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::plane_point::PlanePoint;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToPlaneCoordsError {
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

impl fmt::Display for PixelToPlaneCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideRect { point, pixel_rect } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the rectangle with coords top-left: (x: {}, y: {}) bottom-right: (x: {}, y: {})",
                    point.x,
                    point.y,
                    pixel_rect.top_left().x,
                    pixel_rect.top_left().y,
                    pixel_rect.bottom_right().x,
                    pixel_rect.bottom_right().y
                )
            }
        }
    }
}

impl Error for PixelToPlaneCoordsError {}

/// Maps a pixel to the plane point at its top-left corner.
///
/// One pixel spans `plane_rect.width() / pixel_rect.width()` plane units, the same step the
/// renderer uses, so the pixel one past the right edge would land on `bottom_right`.
pub fn pixel_to_plane_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    plane_rect: PlaneRect,
) -> Result<PlanePoint, PixelToPlaneCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToPlaneCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    let relative_pixel_x = f64::from(pixel_position.x - pixel_rect.top_left().x);
    let relative_pixel_y = f64::from(pixel_position.y - pixel_rect.top_left().y);
    let (step_x, step_y) = pixel_delta_to_plane(1.0, 1.0, pixel_rect, plane_rect);

    Ok(PlanePoint::new(
        plane_rect.top_left().x + relative_pixel_x * step_x,
        plane_rect.top_left().y + relative_pixel_y * step_y,
    ))
}

/// Converts a pointer movement in pixels to the matching plane distance.
#[must_use]
pub fn pixel_delta_to_plane(
    dx: f64,
    dy: f64,
    pixel_rect: PixelRect,
    plane_rect: PlaneRect,
) -> (f64, f64) {
    (
        dx * plane_rect.width() / f64::from(pixel_rect.width()),
        dy * plane_rect.height() / f64::from(pixel_rect.height()),
    )
}

/// Squashes an unbounded scroll delta into a zoom scale in `(-1, 1)`.
#[must_use]
pub fn scroll_norm(delta: f64) -> f64 {
    2.0 * delta.atan() / PI
}
