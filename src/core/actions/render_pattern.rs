use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::data::point::Point;
use crate::core::fractals::discrete::algorithm::DiscreteFractal;
use log::debug;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum RenderPatternError {
    Cancelled(Cancelled),
    LatticeTooLarge { base: u32, depth: u32 },
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for RenderPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::LatticeTooLarge { base, depth } => {
                write!(f, "lattice of {}^{} cells does not fit in 64 bits", base, depth)
            }
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for RenderPatternError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::LatticeTooLarge { .. } => None,
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<Cancelled> for RenderPatternError {
    fn from(c: Cancelled) -> Self {
        Self::Cancelled(c)
    }
}

impl From<PixelBufferError> for RenderPatternError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Colours used to paint a discrete fractal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PatternStyle {
    pub fill: Colour,
    pub background: Colour,
}

impl Default for PatternStyle {
    fn default() -> Self {
        Self {
            fill: Colour::BLUE_VIOLET,
            background: Colour::BLACK,
        }
    }
}

/// Smallest `(depth, base^depth)` with `base^depth >= cells`. A base of one never grows.
fn lattice_size(base: u32, cells: f64) -> Result<(u32, u64), RenderPatternError> {
    let mut depth = 0;
    let mut size: u64 = 1;

    if base <= 1 {
        return Ok((depth, size));
    }

    while (size as f64) < cells {
        size = size
            .checked_mul(u64::from(base))
            .ok_or(RenderPatternError::LatticeTooLarge { base, depth: depth + 1 })?;
        depth += 1;
    }

    Ok((depth, size))
}

/// Paints the part of `fractal` visible through `bounds` (a window on the unit square) into
/// an image covering `image`.
///
/// The unit square is treated as a lattice of `base^n` cells per axis, with `n` the smallest
/// depth giving at least one cell per pixel. Every lattice cell inside the window is tested
/// and contained cells paint their pixel with `style.fill`.
pub fn render_pattern<C>(
    fractal: &DiscreteFractal,
    bounds: PlaneRect,
    image: PixelRect,
    style: PatternStyle,
    cancel: &C,
) -> Result<PixelBuffer, RenderPatternError>
where
    C: CancelToken + ?Sized,
{
    let image_width = f64::from(image.width());
    let image_height = f64::from(image.height());

    let fractal_width = image_width / bounds.width();
    let fractal_height = image_height / bounds.height();

    let (depth_x, _) = lattice_size(fractal.base_width(), fractal_width)?;
    let (depth_y, _) = lattice_size(fractal.base_height(), fractal_height)?;
    let depth = depth_x.max(depth_y);

    let lattice_width = u64::from(fractal.base_width())
        .checked_pow(depth)
        .ok_or(RenderPatternError::LatticeTooLarge {
            base: fractal.base_width(),
            depth,
        })?;
    let lattice_height = u64::from(fractal.base_height())
        .checked_pow(depth)
        .ok_or(RenderPatternError::LatticeTooLarge {
            base: fractal.base_height(),
            depth,
        })?;

    let scale_x = lattice_width as f64 / fractal_width;
    let scale_y = lattice_height as f64 / fractal_height;

    let dx = (bounds.top_left().x * lattice_width as f64) as u64;
    let dy = (bounds.top_left().y * lattice_height as f64) as u64;
    let end_x = dx as f64 + image_width * scale_x;
    let end_y = dy as f64 + image_height * scale_y;

    debug!(
        "pattern lattice {}x{} (depth {}), window at {},{}",
        lattice_width, lattice_height, depth, dx, dy
    );

    let mut buffer = PixelBuffer::new(image);
    buffer.fill_block(
        image.top_left(),
        image.width().max(image.height()),
        style.background,
    )?;

    let left = image.top_left().x;
    let top = image.top_left().y;

    let mut j = dy;
    while (j as f64) < end_y {
        let mut i = dx;
        while (i as f64) < end_x {
            if fractal.contains_in(i, j, lattice_width, lattice_height) {
                let pixel = Point {
                    x: left + ((i - dx) as f64 / scale_x) as i32,
                    y: top + ((j - dy) as f64 / scale_y) as i32,
                };

                if image.contains_point(pixel) {
                    buffer.set_pixel(pixel, style.fill)?;
                }
            }
            i += 1;
        }

        if cancel.is_cancelled() {
            return Err(Cancelled.into());
        }
        j += 1;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::plane_point::PlanePoint;
    use crate::core::fractals::discrete::presets::PatternPreset;

    const STYLE: PatternStyle = PatternStyle {
        fill: Colour::BLUE_VIOLET,
        background: Colour::BLACK,
    };

    fn image(width: u32, height: u32) -> PixelRect {
        PixelRect::with_size(Point { x: 0, y: 0 }, width, height).unwrap()
    }

    fn pixel(buffer: &PixelBuffer, x: i32, y: i32) -> Colour {
        buffer.pixel(Point { x, y }).unwrap()
    }

    #[test]
    fn test_lattice_size_is_smallest_covering_power() {
        assert_eq!(lattice_size(2, 8.0).unwrap(), (3, 8));
        assert_eq!(lattice_size(2, 9.0).unwrap(), (4, 16));
        assert_eq!(lattice_size(3, 1.0).unwrap(), (0, 1));
        assert_eq!(lattice_size(1, 1000.0).unwrap(), (0, 1));
    }

    #[test]
    fn test_lattice_size_overflow_is_an_error() {
        assert!(matches!(
            lattice_size(2, f64::MAX),
            Err(RenderPatternError::LatticeTooLarge { base: 2, .. })
        ));
    }

    #[test]
    fn test_sierpinski_over_unit_square() {
        let fractal = PatternPreset::Sierpinski.fractal().unwrap();

        let buffer = render_pattern(
            &fractal,
            PlaneRect::unit_square(),
            image(8, 8),
            STYLE,
            &NeverCancel,
        )
        .unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let expected = if x & !y == 0 { STYLE.fill } else { STYLE.background };
                assert_eq!(pixel(&buffer, x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zoomed_window_offsets_lattice() {
        let fractal = PatternPreset::Sierpinski.fractal().unwrap();
        let bounds = PlaneRect::new(PlanePoint::new(0.5, 0.5), PlanePoint::new(1.0, 1.0)).unwrap();

        let buffer = render_pattern(&fractal, bounds, image(4, 4), STYLE, &NeverCancel).unwrap();

        // pixel (x, y) shows lattice cell (4 + x, 4 + y) of an 8x8 lattice
        assert_eq!(pixel(&buffer, 0, 0), STYLE.fill);
        assert_eq!(pixel(&buffer, 1, 0), STYLE.background);
        assert_eq!(pixel(&buffer, 3, 3), STYLE.fill);
    }

    #[test]
    fn test_empty_origin_cell_clears_corner() {
        let fractal = PatternPreset::Cross.fractal().unwrap();

        let buffer = render_pattern(
            &fractal,
            PlaneRect::unit_square(),
            image(9, 9),
            STYLE,
            &NeverCancel,
        )
        .unwrap();

        assert!(fractal.contains(1, 0));
        assert_eq!(pixel(&buffer, 1, 0), STYLE.background);
        assert_eq!(pixel(&buffer, 4, 1), STYLE.fill);
    }

    #[test]
    fn test_cancelled_render_returns_cancelled() {
        let fractal = PatternPreset::Sponge.fractal().unwrap();
        let cancel = || true;

        let result = render_pattern(
            &fractal,
            PlaneRect::unit_square(),
            image(27, 27),
            STYLE,
            &cancel,
        );

        assert!(matches!(result, Err(RenderPatternError::Cancelled(_))));
    }
}
