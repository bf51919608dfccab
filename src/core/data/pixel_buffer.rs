use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize * 3
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
    TileOutsideBounds {
        tile: PixelRect,
        pixel_rect: PixelRect,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of PixelRect bounds top:{}, left:{}, bottom:{}, right:{}",
                    pixel.x,
                    pixel.y,
                    pixel_rect.top_left().y,
                    pixel_rect.top_left().x,
                    pixel_rect.bottom_right().y,
                    pixel_rect.bottom_right().x
                )
            }
            Self::TileOutsideBounds { tile, pixel_rect } => {
                write!(
                    f,
                    "tile {}x{} at x:{}, y:{} does not fit in {}x{} buffer",
                    tile.width(),
                    tile.height(),
                    tile.top_left().x,
                    tile.top_left().y,
                    pixel_rect.width(),
                    pixel_rect.height()
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB pixels covering a [`PixelRect`], row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        let total_bytes = pixel_rect_to_buffer_size(pixel_rect);

        Self {
            pixel_rect,
            buffer: vec![0; total_bytes],
        }
    }

    pub fn from_data(
        pixel_rect: PixelRect,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.buffer
    }

    fn index_of(&self, pixel: Point) -> usize {
        let relative_x = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (pixel.y - self.pixel_rect.top_left().y) as usize;

        (relative_y * self.pixel_rect.width() as usize + relative_x) * 3
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let index = self.index_of(pixel);

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let index = self.index_of(pixel);

        Ok(Colour::rgb(
            self.buffer[index],
            self.buffer[index + 1],
            self.buffer[index + 2],
        ))
    }

    /// Paints a `size`×`size` block whose top-left corner is `origin`, clipped to the buffer.
    pub fn fill_block(
        &mut self,
        origin: Point,
        size: u32,
        colour: Colour,
    ) -> Result<(), PixelBufferError> {
        if !self.pixel_rect.contains_point(origin) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel: origin,
                pixel_rect: self.pixel_rect,
            });
        }

        let right = (origin.x + size as i32 - 1).min(self.pixel_rect.bottom_right().x);
        let bottom = (origin.y + size as i32 - 1).min(self.pixel_rect.bottom_right().y);

        for y in origin.y..=bottom {
            let start = self.index_of(Point { x: origin.x, y });
            let end = self.index_of(Point { x: right, y }) + 3;

            for px in self.buffer[start..end].chunks_exact_mut(3) {
                px[0] = colour.r;
                px[1] = colour.g;
                px[2] = colour.b;
            }
        }

        Ok(())
    }

    /// Copies `tile` into this buffer at the tile's own position.
    pub fn blit(&mut self, tile: &PixelBuffer) -> Result<(), PixelBufferError> {
        let tile_rect = tile.pixel_rect();

        if !self.pixel_rect.contains_rect(tile_rect) {
            return Err(PixelBufferError::TileOutsideBounds {
                tile: tile_rect,
                pixel_rect: self.pixel_rect,
            });
        }

        let row_bytes = tile_rect.width() as usize * 3;

        for (row, src) in tile.buffer.chunks_exact(row_bytes).enumerate() {
            let start = self.index_of(Point {
                x: tile_rect.top_left().x,
                y: tile_rect.top_left().y + row as i32,
            });
            self.buffer[start..start + row_bytes].copy_from_slice(src);
        }

        Ok(())
    }
}
