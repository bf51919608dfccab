use crate::controllers::ports::file_presenter::{FilePresenterError, FilePresenterPort};
use crate::core::data::pixel_buffer::PixelBuffer;
use image::{ImageFormat, RgbImage};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct PngFilePresenter;

impl FilePresenterPort for PngFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), FilePresenterError> {
        let width = buffer.pixel_rect().width();
        let height = buffer.pixel_rect().height();

        let image = RgbImage::from_raw(width, height, buffer.buffer().clone()).ok_or(
            FilePresenterError::BufferSize {
                width,
                height,
                bytes: buffer.buffer_size(),
            },
        )?;

        image.save_with_format(filepath, ImageFormat::Png)?;

        Ok(())
    }
}
