use crate::core::data::pixel_buffer::PixelBuffer;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum FilePresenterError {
    Io(io::Error),
    Encode(image::ImageError),
    BufferSize { width: u32, height: u32, bytes: usize },
}

impl fmt::Display for FilePresenterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "write failed: {}", err),
            Self::Encode(err) => write!(f, "encoding failed: {}", err),
            Self::BufferSize {
                width,
                height,
                bytes,
            } => write!(
                f,
                "{} bytes do not form a {}x{} RGB image",
                bytes, width, height
            ),
        }
    }
}

impl Error for FilePresenterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::BufferSize { .. } => None,
        }
    }
}

impl From<io::Error> for FilePresenterError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for FilePresenterError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err)
    }
}

pub trait FilePresenterPort: Send + Sync {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> Result<(), FilePresenterError>;
}
