use crate::controllers::renderer::job::RenderJobError;
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum RendererError {
    ThreadPool(rayon::ThreadPoolBuildError),
    ConsumerThread(io::Error),
    InvalidJob(RenderJobError),
    Stopped,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "failed to build worker pool: {}", err),
            Self::ConsumerThread(err) => write!(f, "failed to spawn consumer thread: {}", err),
            Self::InvalidJob(err) => write!(f, "invalid render job: {}", err),
            Self::Stopped => write!(f, "renderer has been stopped"),
        }
    }
}

impl Error for RendererError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
            Self::ConsumerThread(err) => Some(err),
            Self::InvalidJob(err) => Some(err),
            Self::Stopped => None,
        }
    }
}

impl From<RenderJobError> for RendererError {
    fn from(err: RenderJobError) -> Self {
        Self::InvalidJob(err)
    }
}
