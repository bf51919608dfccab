use crate::core::data::plane_rect::PlaneRect;
use crate::core::navigation::frame::{NavigationFrame, PlaneKind};
use log::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl NavigationFrame {
    /// Chooses the image size for a screen and adjusts the frame to match its aspect ratio.
    ///
    /// Continuous frames are padded on one axis, after the padding added by the previous
    /// fit is removed, and render at the full screen size. Discrete frames keep their bounds
    /// and render at [`discrete_image_size`].
    pub fn fit_to_screen(&mut self, screen_width: u32, screen_height: u32) -> ImageSize {
        let screen_width = screen_width.max(1);
        let screen_height = screen_height.max(1);

        match self.kind() {
            PlaneKind::Discrete {
                base_width,
                base_height,
            } => discrete_image_size(screen_width, screen_height, base_width, base_height),
            PlaneKind::Continuous { .. } => {
                self.pad_to_aspect(screen_width, screen_height);
                ImageSize {
                    width: screen_width,
                    height: screen_height,
                }
            }
        }
    }

    fn pad_to_aspect(&mut self, screen_width: u32, screen_height: u32) {
        let (old_fraction_x, old_fraction_y) = self.padding;
        let unpadded = padded(
            self.bounds(),
            -self.width() * old_fraction_x,
            -self.height() * old_fraction_y,
        );

        let Some(unpadded) = unpadded else {
            return;
        };

        let width = unpadded.width();
        let height = unpadded.height();
        let screen_x = f64::from(screen_width);
        let screen_y = f64::from(screen_height);

        let (image_width, image_height) = if screen_x * height < screen_y * width {
            (screen_x, ((screen_x * height) / width).round().max(1.0))
        } else {
            (((screen_y * width) / height).round().max(1.0), screen_y)
        };

        let pad_x = width * (screen_x - image_width) / (2.0 * image_width);
        let pad_y = height * (screen_y - image_height) / (2.0 * image_height);

        if let Some(bounds) = padded(unpadded, pad_x, pad_y) {
            self.padding = (pad_x / bounds.width(), pad_y / bounds.height());
            self.set_bounds(bounds);
            debug!(
                "fitted frame to {}x{} screen, padding {:.6} x {:.6}",
                screen_width, screen_height, pad_x, pad_y
            );
        }
    }
}

fn padded(rect: PlaneRect, pad_x: f64, pad_y: f64) -> Option<PlaneRect> {
    PlaneRect::new(
        rect.top_left().translate(-pad_x, -pad_y),
        rect.bottom_right().translate(pad_x, pad_y),
    )
    .ok()
}

/// Image size for a discrete fractal: `base^n` on each axis, `n = ln(min screen) / ln(max base)`.
#[must_use]
pub fn discrete_image_size(
    screen_width: u32,
    screen_height: u32,
    base_width: u32,
    base_height: u32,
) -> ImageSize {
    let base = base_width.max(base_height);

    if base <= 1 {
        return ImageSize {
            width: 1,
            height: 1,
        };
    }

    let n = f64::from(screen_width.min(screen_height).max(1)).ln() / f64::from(base).ln();

    ImageSize {
        width: (f64::from(base_width).powf(n).round() as u32).max(1),
        height: (f64::from(base_height).powf(n).round() as u32).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::plane_point::PlanePoint;

    fn mandelbrot_frame() -> NavigationFrame {
        NavigationFrame::continuous(
            PlaneRect::new(PlanePoint::new(-2.2, -1.2), PlanePoint::new(1.0, 1.2)).unwrap(),
        )
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_matching_aspect_adds_no_padding() {
        let mut frame = mandelbrot_frame();

        let size = frame.fit_to_screen(400, 300);

        assert_eq!(size, ImageSize { width: 400, height: 300 });
        assert_close(frame.width(), 3.2);
        assert_close(frame.height(), 2.4);
    }

    #[test]
    fn test_wide_screen_pads_horizontally() {
        let mut frame = mandelbrot_frame();

        let size = frame.fit_to_screen(800, 300);

        assert_eq!(size, ImageSize { width: 800, height: 300 });
        assert_close(frame.top_left().x, -3.8);
        assert_close(frame.bottom_right().x, 2.6);
        assert_close(frame.height(), 2.4);
    }

    #[test]
    fn test_tall_screen_pads_vertically() {
        let mut frame = mandelbrot_frame();

        frame.fit_to_screen(400, 600);

        assert_close(frame.width(), 3.2);
        assert_close(frame.height(), 4.8);
        assert_close(frame.bounds().centre().y, 0.0);
    }

    #[test]
    fn test_repeated_fits_do_not_accumulate_padding() {
        let mut frame = mandelbrot_frame();

        frame.fit_to_screen(800, 300);
        frame.fit_to_screen(800, 300);
        frame.fit_to_screen(800, 300);

        assert_close(frame.width(), 6.4);

        frame.fit_to_screen(400, 300);

        assert_close(frame.top_left().x, -2.2);
        assert_close(frame.bottom_right().x, 1.0);
    }

    #[test]
    fn test_discrete_fit_keeps_bounds() {
        let mut frame = NavigationFrame::discrete(2, 2);
        let before = frame.bounds();

        let size = frame.fit_to_screen(512, 1024);

        assert_eq!(size, ImageSize { width: 512, height: 512 });
        assert_eq!(frame.bounds(), before);
    }

    #[test]
    fn test_discrete_image_size_uses_largest_base() {
        let size = discrete_image_size(729, 1000, 3, 3);
        assert_eq!(size.width, 729);
        assert_eq!(size.width, size.height);

        let size = discrete_image_size(100, 100, 1, 1);
        assert_eq!(size, ImageSize { width: 1, height: 1 });
    }
}
