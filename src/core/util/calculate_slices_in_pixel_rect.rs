use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::num::NonZeroU32;

/// Splits `pixel_rect` into vertical slices of equal width, one per worker.
///
/// The last slice absorbs the width remainder. Never returns more slices than columns.
pub fn calculate_slices_in_pixel_rect(max_slices: NonZeroU32, pixel_rect: PixelRect) -> Vec<PixelRect> {
    let count = max_slices.get().min(pixel_rect.width());
    let slice_width = pixel_rect.width() / count;
    let remainder = pixel_rect.width() % count;
    let top_left = pixel_rect.top_left();

    (0..count)
        .filter_map(|index| {
            let width = if index == count - 1 {
                slice_width + remainder
            } else {
                slice_width
            };
            let origin = Point {
                x: top_left.x + (index * slice_width) as i32,
                y: top_left.y,
            };

            PixelRect::with_size(origin, width, pixel_rect.height()).ok()
        })
        .collect()
}
