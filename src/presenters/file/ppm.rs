use crate::controllers::ports::file_presenter::{FilePresenterError, FilePresenterPort};
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary (P6) portable pixmap writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PpmFilePresenter;

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), FilePresenterError> {
        let mut file = BufWriter::new(File::create(filepath)?);
        let width = buffer.pixel_rect().width();
        let height = buffer.pixel_rect().height();

        // P6: binary RGB, then width, height and max colour value
        writeln!(file, "P6")?;
        writeln!(file, "{} {}", width, height)?;
        writeln!(file, "255")?;
        file.write_all(buffer.buffer())?;
        file.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::pixel_rect::PixelRect;
    use crate::core::data::point::Point;

    #[test]
    fn test_writes_header_and_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ppm");
        let mut buffer =
            PixelBuffer::new(PixelRect::with_size(Point { x: 0, y: 0 }, 2, 1).unwrap());
        buffer.set_pixel(Point { x: 1, y: 0 }, Colour::RED).unwrap();

        PpmFilePresenter.present(&buffer, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[0, 0, 0, 255, 0, 0]);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.ppm");
        let buffer = PixelBuffer::new(PixelRect::with_size(Point { x: 0, y: 0 }, 1, 1).unwrap());

        let result = PpmFilePresenter.present(&buffer, &path);

        assert!(matches!(result, Err(FilePresenterError::Io(_))));
    }
}
