use crate::config::settings::RendererConfig;
use crate::controllers::cli::args::CliArgs;
use crate::controllers::cli::errors::CliError;
use crate::controllers::renderer::ports::presenter::NoopPresenter;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Renders a single image from command-line arguments.
pub struct CliController {
    args: CliArgs,
}

impl CliController {
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    pub fn config(&self) -> Result<RendererConfig, CliError> {
        let mut config = match &self.args.config {
            Some(path) => RendererConfig::load(path)?,
            None => RendererConfig::default(),
        };
        self.args.apply(&mut config);

        Ok(config)
    }

    /// Blocks until the image is written and returns its path.
    pub fn run(&self) -> Result<PathBuf, CliError> {
        let config = self.config()?;
        let (width, height) = (config.screen.width, config.screen.height);
        let renderer = config.build()?.into_renderer(Arc::new(NoopPresenter))?;

        info!(
            "rendering {}x{} to {}",
            width,
            height,
            self.args.output.display()
        );
        let start = Instant::now();

        let path = renderer
            .export(width, height, self.args.output.clone())?
            .wait()?;

        info!("wrote {} in {:.2?}", path.display(), start.elapsed());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::export::errors::ExportError;
    use clap::Parser;
    use std::io::Write;

    fn controller(args: &[&str]) -> CliController {
        let args = CliArgs::try_parse_from(std::iter::once("fractal_navigator").chain(args.iter().copied()))
            .unwrap();
        CliController::new(args)
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("view.png");
        let output_arg = output.to_str().unwrap().to_string();

        let path = controller(&[
            "--size",
            "32x24",
            "--max-iterations",
            "50",
            "--sample",
            "1",
            "--workers",
            "2",
            "--output",
            &output_arg,
        ])
        .run()
        .unwrap();

        assert_eq!(path, output);
        let image = image::open(&output).unwrap();
        assert_eq!((image.width(), image.height()), (32, 24));
    }

    #[test]
    fn test_config_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&config_path).unwrap();
        file.write_all(br#"{ "sample": 4, "refinement_steps": 2 }"#)
            .unwrap();
        let config_arg = config_path.to_str().unwrap().to_string();

        let config = controller(&["--config", &config_arg, "--sample", "1"])
            .config()
            .unwrap();

        assert_eq!(config.sample, 1);
        assert_eq!(config.refinement_steps, 2);
    }

    #[test]
    fn test_unsupported_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output_arg = dir.path().join("view.bmp").to_str().unwrap().to_string();

        let result = controller(&["--size", "8x6", "--output", &output_arg]).run();

        assert!(matches!(
            result,
            Err(CliError::Export(ExportError::UnsupportedFormat { .. }))
        ));
    }
}
