use crate::config::errors::ConfigError;
use crate::controllers::renderer::errors::RendererError;
use crate::controllers::renderer::ports::presenter::RenderPresenterPort;
use crate::controllers::renderer::renderer::Renderer;
use crate::controllers::renderer::settings::{
    DEFAULT_REFINEMENT_STEPS, DEFAULT_SAMPLE, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH,
    RenderSettings,
};
use crate::core::actions::render_pattern::PatternStyle;
use crate::core::data::colour::Colour;
use crate::core::data::plane_point::PlanePoint;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::fractals::continuous::algorithm::{
    ContinuousFractal, DEFAULT_BOTTOM_RIGHT, DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOP_LEFT,
};
use crate::core::fractals::continuous::orbit::OrbitKind;
use crate::core::fractals::discrete::algorithm::DiscreteFractal;
use crate::core::fractals::discrete::presets::PatternPreset;
use crate::core::fractals::fractal_spec::FractalSpec;
use crate::core::gradient::control_point::{ControlPoint, Interpolation};
use crate::core::gradient::engine::GradientEngine;
use crate::core::gradient::gradient::GradientBuilder;
use crate::core::gradient::presets::GradientPreset;
use crate::core::navigation::frame::{NavigationFrame, PlaneKind};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

/// Everything needed to start a renderer, as read from a JSON document.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub screen: ScreenConfig,
    pub sample: u32,
    pub refinement_steps: u32,
    /// `None` or `0` sizes the pool from the available cores.
    pub workers: Option<u32>,
    pub fractal: FractalConfig,
    pub view: ViewConfig,
    pub gradient: GradientConfig,
    pub pattern_style: PatternStyleConfig,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FractalConfig {
    Mandelbrot(MandelbrotConfig),
    Pattern(PatternConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandelbrotConfig {
    pub max_iterations: u32,
    pub escape_radius: f64,
    /// `quadratic`, `cubic` or `burning-ship`.
    pub orbit: String,
    pub top_left: [f64; 2],
    pub bottom_right: [f64; 2],
}

/// A discrete pattern, either named or spelled out as rows of 0/1 cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub preset: String,
    /// Takes precedence over `preset`.
    pub rows: Option<Vec<Vec<u8>>>,
}

/// Initial viewport relative to the fractal's natural frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub center: Option<[f64; 2]>,
    /// Magnification; `2.0` shows half the width.
    pub zoom: f64,
}

/// Unset fields keep the preset's own values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    pub preset: String,
    pub points: Option<Vec<ControlPoint>>,
    pub interpolation: Option<Interpolation>,
    pub spread: Option<f64>,
    pub offset: Option<f64>,
    pub dead_colour: Option<Colour>,
    /// Smooths the control points into a Bezier table of this density.
    pub bezier_density: Option<u32>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternStyleConfig {
    pub fill: Colour,
    pub background: Colour,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            sample: DEFAULT_SAMPLE,
            refinement_steps: DEFAULT_REFINEMENT_STEPS,
            workers: None,
            fractal: FractalConfig::default(),
            view: ViewConfig::default(),
            gradient: GradientConfig::default(),
            pattern_style: PatternStyleConfig::default(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self::Mandelbrot(MandelbrotConfig::default())
    }
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            orbit: "quadratic".to_string(),
            top_left: [DEFAULT_TOP_LEFT.x, DEFAULT_TOP_LEFT.y],
            bottom_right: [DEFAULT_BOTTOM_RIGHT.x, DEFAULT_BOTTOM_RIGHT.y],
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            preset: PatternPreset::default().display_name().to_string(),
            rows: None,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: None,
            zoom: 1.0,
        }
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            preset: GradientPreset::default().display_name().to_string(),
            points: None,
            interpolation: None,
            spread: None,
            offset: None,
            dead_colour: None,
            bezier_density: None,
        }
    }
}

impl Default for PatternStyleConfig {
    fn default() -> Self {
        let style = PatternStyle::default();
        Self {
            fill: style.fill,
            background: style.background,
        }
    }
}

/// Validated core values built from a [`RendererConfig`].
#[derive(Debug)]
pub struct RenderSetup {
    pub fractal: FractalSpec,
    pub frame: NavigationFrame,
    pub gradient: Arc<GradientEngine>,
    pub settings: RenderSettings,
}

impl RenderSetup {
    pub fn into_renderer(
        self,
        presenter: Arc<dyn RenderPresenterPort>,
    ) -> Result<Renderer, RendererError> {
        Renderer::with_frame(
            self.fractal,
            self.frame,
            self.gradient,
            self.settings,
            presenter,
        )
    }
}

impl RendererConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());

        Ok(config)
    }

    pub fn build(&self) -> Result<RenderSetup, ConfigError> {
        let fractal = self.fractal.build()?;
        let max_position = match &fractal {
            FractalSpec::Continuous(continuous) => continuous.max_iterations(),
            FractalSpec::Discrete(_) => DEFAULT_MAX_ITERATIONS,
        };
        let gradient = self.gradient.build(f64::from(max_position))?;
        let frame = self.view.apply(fractal.default_frame())?;

        let settings = RenderSettings {
            screen_width: self.screen.width,
            screen_height: self.screen.height,
            sample: self.sample,
            refinement_steps: self.refinement_steps,
            workers: self.workers.and_then(NonZeroU32::new),
            pattern_style: PatternStyle {
                fill: self.pattern_style.fill,
                background: self.pattern_style.background,
            },
        };

        Ok(RenderSetup {
            fractal,
            frame,
            gradient: Arc::new(gradient),
            settings,
        })
    }
}

impl FractalConfig {
    fn build(&self) -> Result<FractalSpec, ConfigError> {
        match self {
            Self::Mandelbrot(config) => config.build().map(FractalSpec::from),
            Self::Pattern(config) => config.build().map(FractalSpec::from),
        }
    }
}

impl MandelbrotConfig {
    fn build(&self) -> Result<ContinuousFractal, ConfigError> {
        let orbit = OrbitKind::from_name(&self.orbit).ok_or_else(|| ConfigError::UnknownOrbit {
            name: self.orbit.clone(),
        })?;
        let bounds = PlaneRect::new(
            PlanePoint::new(self.top_left[0], self.top_left[1]),
            PlanePoint::new(self.bottom_right[0], self.bottom_right[1]),
        )?;

        Ok(ContinuousFractal::new(
            self.escape_radius,
            self.max_iterations,
            orbit.into(),
            bounds,
        )?)
    }
}

impl PatternConfig {
    fn build(&self) -> Result<DiscreteFractal, ConfigError> {
        match &self.rows {
            Some(rows) => Ok(DiscreteFractal::from_rows(rows)?),
            None => Ok(PatternPreset::from_name(&self.preset)?.fractal()?),
        }
    }
}

impl GradientConfig {
    fn build(&self, max_position: f64) -> Result<GradientEngine, ConfigError> {
        let mut builder = GradientPreset::from_name(&self.preset)?.builder(max_position);

        if let Some(points) = &self.points {
            builder = builder.points(points.clone());
        }
        if let Some(interpolation) = self.interpolation {
            builder = builder.interpolation(interpolation);
        }
        if let Some(spread) = self.spread {
            builder = builder.spread(spread);
        }
        if let Some(offset) = self.offset {
            builder = builder.offset(offset);
        }
        if let Some(dead_colour) = self.dead_colour {
            builder = builder.dead_colour(dead_colour);
        }
        if let Some(density) = self.bezier_density {
            builder = builder.bezier(density);
        }

        Ok(GradientEngine::new(builder.build()?))
    }
}

impl ViewConfig {
    fn apply(&self, mut frame: NavigationFrame) -> Result<NavigationFrame, ConfigError> {
        if !(self.zoom > 0.0 && self.zoom.is_finite()) {
            return Err(ConfigError::InvalidZoom { zoom: self.zoom });
        }

        if let Some([x, y]) = self.center {
            let centre = frame.bounds().centre();
            if !frame.translate(x - centre.x, y - centre.y) {
                warn!("cannot centre the view on ({}, {})", x, y);
            }
        }

        if self.zoom != 1.0 {
            let shrink = 1.0 / self.zoom - 1.0;
            let scale = match frame.kind() {
                PlaneKind::Continuous { .. } => shrink,
                PlaneKind::Discrete { base_width, .. } => shrink / f64::from(base_width),
            };
            let centre = frame.bounds().centre();
            if !frame.zoom(scale, centre) {
                warn!("zoom {} is out of range; keeping the natural view", self.zoom);
            }
        }

        Ok(frame)
    }
}
