use crate::controllers::ports::file_presenter::FilePresenterError;
use crate::controllers::renderer::errors::RendererError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExportError {
    UnsupportedFormat { path: PathBuf },
    Renderer(RendererError),
    Thread(io::Error),
    Presenter(FilePresenterError),
    /// The one-shot render stopped on an error.
    Render { reason: String },
    /// The one-shot render ended without producing an image.
    Aborted,
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path } => {
                write!(f, "cannot export {}: use a .png or .ppm file", path.display())
            }
            Self::Renderer(err) => write!(f, "export render failed: {}", err),
            Self::Thread(err) => write!(f, "failed to spawn export thread: {}", err),
            Self::Presenter(err) => write!(f, "export failed: {}", err),
            Self::Render { reason } => write!(f, "export render failed: {}", reason),
            Self::Aborted => write!(f, "export aborted before the image was finished"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Renderer(err) => Some(err),
            Self::Thread(err) => Some(err),
            Self::Presenter(err) => Some(err),
            Self::UnsupportedFormat { .. } | Self::Render { .. } | Self::Aborted => None,
        }
    }
}

impl From<RendererError> for ExportError {
    fn from(err: RendererError) -> Self {
        Self::Renderer(err)
    }
}

impl From<FilePresenterError> for ExportError {
    fn from(err: FilePresenterError) -> Self {
        Self::Presenter(err)
    }
}
