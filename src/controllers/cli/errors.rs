use crate::config::errors::ConfigError;
use crate::controllers::export::errors::ExportError;
use crate::controllers::renderer::errors::RendererError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Renderer(RendererError),
    Export(ExportError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{}", err),
            Self::Renderer(err) => write!(f, "renderer failed: {}", err),
            Self::Export(err) => write!(f, "export failed: {}", err),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Renderer(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<RendererError> for CliError {
    fn from(err: RendererError) -> Self {
        Self::Renderer(err)
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::Export(err)
    }
}
