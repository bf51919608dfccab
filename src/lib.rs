pub mod config;
pub mod controllers;
pub mod core;
pub mod presenters;

pub use config::settings::RendererConfig;
pub use controllers::cli::args::CliArgs;
pub use controllers::cli::cli_controller::CliController;
pub use controllers::export::export::{ExportFormat, ExportHandle};
pub use controllers::renderer::job::RenderJob;
pub use controllers::renderer::ports::presenter::{
    NoopPresenter, RenderCallbacks, RenderPresenterPort,
};
pub use controllers::renderer::renderer::Renderer;
pub use controllers::renderer::settings::RenderSettings;
pub use controllers::renderer::state::RenderState;
pub use crate::core::fractals::fractal_spec::FractalSpec;
pub use crate::core::gradient::engine::GradientEngine;
pub use presenters::file::png::PngFilePresenter;
pub use presenters::file::ppm::PpmFilePresenter;
