use crate::core::data::plane_rect::PlaneRectError;
use crate::core::fractals::continuous::errors::ContinuousFractalError;
use crate::core::fractals::discrete::errors::DiscreteFractalError;
use crate::core::gradient::errors::GradientError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Fractal(ContinuousFractalError),
    Pattern(DiscreteFractalError),
    Gradient(GradientError),
    Bounds(PlaneRectError),
    UnknownOrbit { name: String },
    InvalidZoom { zoom: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config {}: {}", path.display(), source)
            }
            Self::Fractal(err) => write!(f, "invalid fractal: {}", err),
            Self::Pattern(err) => write!(f, "invalid pattern: {}", err),
            Self::Gradient(err) => write!(f, "invalid gradient: {}", err),
            Self::Bounds(err) => write!(f, "invalid bounds: {}", err),
            Self::UnknownOrbit { name } => write!(f, "unknown orbit '{}'", name),
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom must be a positive finite factor, got {}", zoom)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Fractal(err) => Some(err),
            Self::Pattern(err) => Some(err),
            Self::Gradient(err) => Some(err),
            Self::Bounds(err) => Some(err),
            Self::UnknownOrbit { .. } | Self::InvalidZoom { .. } => None,
        }
    }
}

impl From<ContinuousFractalError> for ConfigError {
    fn from(err: ContinuousFractalError) -> Self {
        Self::Fractal(err)
    }
}

impl From<DiscreteFractalError> for ConfigError {
    fn from(err: DiscreteFractalError) -> Self {
        Self::Pattern(err)
    }
}

impl From<GradientError> for ConfigError {
    fn from(err: GradientError) -> Self {
        Self::Gradient(err)
    }
}

impl From<PlaneRectError> for ConfigError {
    fn from(err: PlaneRectError) -> Self {
        Self::Bounds(err)
    }
}
