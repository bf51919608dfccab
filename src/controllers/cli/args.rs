use crate::config::settings::{FractalConfig, MandelbrotConfig, PatternConfig, RendererConfig};
use crate::core::fractals::continuous::orbit::OrbitKind;
use clap::Parser;
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

/// Renders a fractal view and writes it to an image file.
#[derive(Debug, Parser)]
#[command(name = "fractal_navigator", version, about)]
pub struct CliArgs {
    /// JSON renderer configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Image size, e.g. 1024x768
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Output file; the extension picks PNG or PPM
    #[arg(long, short, default_value = "fractal.png")]
    pub output: PathBuf,

    /// An orbit (quadratic, cubic, burning-ship) or a pattern (sierpinski, sponge, ...)
    #[arg(long)]
    pub fractal: Option<String>,

    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Samples per pixel axis
    #[arg(long)]
    pub sample: Option<u32>,

    /// Progressive refinement steps
    #[arg(long)]
    pub steps: Option<u32>,

    /// Worker threads; 0 uses every core
    #[arg(long)]
    pub workers: Option<u32>,

    /// View centre in plane coordinates, e.g. -0.75,0.1
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub center: Option<(f64, f64)>,

    /// Magnification about the view centre
    #[arg(long)]
    pub zoom: Option<f64>,
}

fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let (left, right) = s.split_once(separator)?;
    match (T::from_str(left.trim()), T::from_str(right.trim())) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    parse_pair(s, 'x').ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    parse_pair(s, ',').ok_or_else(|| format!("expected X,Y, got '{}'", s))
}

impl CliArgs {
    /// Applies every flag that was given on top of `config`.
    pub fn apply(&self, config: &mut RendererConfig) {
        if let Some((width, height)) = self.size {
            config.screen.width = width;
            config.screen.height = height;
        }

        if let Some(name) = &self.fractal {
            config.fractal = match (OrbitKind::from_name(name), &config.fractal) {
                (Some(_), FractalConfig::Mandelbrot(current)) => {
                    FractalConfig::Mandelbrot(MandelbrotConfig {
                        orbit: name.clone(),
                        ..current.clone()
                    })
                }
                (Some(_), FractalConfig::Pattern(_)) => {
                    FractalConfig::Mandelbrot(MandelbrotConfig {
                        orbit: name.clone(),
                        ..MandelbrotConfig::default()
                    })
                }
                (None, _) => FractalConfig::Pattern(PatternConfig {
                    preset: name.clone(),
                    rows: None,
                }),
            };
        }

        if let Some(max_iterations) = self.max_iterations {
            match &mut config.fractal {
                FractalConfig::Mandelbrot(mandelbrot) => mandelbrot.max_iterations = max_iterations,
                FractalConfig::Pattern(_) => {
                    warn!("--max-iterations has no effect on a pattern fractal")
                }
            }
        }

        if let Some(sample) = self.sample {
            config.sample = sample;
        }
        if let Some(steps) = self.steps {
            config.refinement_steps = steps;
        }
        if let Some(workers) = self.workers {
            config.workers = Some(workers);
        }
        if let Some((x, y)) = self.center {
            config.view.center = Some([x, y]);
        }
        if let Some(zoom) = self.zoom {
            config.view.zoom = zoom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("fractal_navigator").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair::<u32>("640x480", 'x'), Some((640, 480)));
        assert_eq!(parse_pair::<f64>("-0.5, 1", ','), Some((-0.5, 1.0)));
        assert_eq!(parse_pair::<u32>("640", 'x'), None);
        assert_eq!(parse_pair::<u32>("640xabc", 'x'), None);
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let args = parse(&[]);
        let mut config = RendererConfig::default();

        args.apply(&mut config);

        assert_eq!(config, RendererConfig::default());
        assert_eq!(args.output, PathBuf::from("fractal.png"));
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--size",
            "320x200",
            "--max-iterations",
            "900",
            "--sample",
            "2",
            "--steps",
            "0",
            "--workers",
            "3",
            "--center",
            "-0.75,0.1",
            "--zoom",
            "8",
            "-o",
            "out.ppm",
        ]);
        let mut config = RendererConfig::default();

        args.apply(&mut config);

        assert_eq!((config.screen.width, config.screen.height), (320, 200));
        assert_eq!(config.sample, 2);
        assert_eq!(config.refinement_steps, 0);
        assert_eq!(config.workers, Some(3));
        assert_eq!(config.view.center, Some([-0.75, 0.1]));
        assert_eq!(config.view.zoom, 8.0);
        assert_eq!(args.output, PathBuf::from("out.ppm"));
        match config.fractal {
            FractalConfig::Mandelbrot(mandelbrot) => assert_eq!(mandelbrot.max_iterations, 900),
            FractalConfig::Pattern(_) => panic!("expected a mandelbrot config"),
        }
    }

    #[test]
    fn test_fractal_name_selects_pattern() {
        let args = parse(&["--fractal", "sponge", "--max-iterations", "10"]);
        let mut config = RendererConfig::default();

        args.apply(&mut config);

        assert_eq!(
            config.fractal,
            FractalConfig::Pattern(PatternConfig {
                preset: "sponge".to_string(),
                rows: None,
            })
        );
    }

    #[test]
    fn test_orbit_name_keeps_mandelbrot_parameters() {
        let args = parse(&["--fractal", "burning-ship", "--max-iterations", "64"]);
        let mut config = RendererConfig::default();

        args.apply(&mut config);

        match config.fractal {
            FractalConfig::Mandelbrot(mandelbrot) => {
                assert_eq!(mandelbrot.orbit, "burning-ship");
                assert_eq!(mandelbrot.max_iterations, 64);
            }
            FractalConfig::Pattern(_) => panic!("expected a mandelbrot config"),
        }
    }

    #[test]
    fn test_bad_size_is_rejected() {
        let result = CliArgs::try_parse_from(["fractal_navigator", "--size", "wide"]);

        assert!(result.is_err());
    }
}
