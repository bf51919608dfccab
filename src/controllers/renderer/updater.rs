use crate::controllers::renderer::errors::RendererError;
use crate::controllers::renderer::renderer::Renderer;
use crate::core::actions::render_pattern::PatternStyle;

/// Collects several parameter changes and applies them with a single restart.
///
/// ```ignore
/// renderer.updater().sample(3).refinement_steps(4).max_iterations(800).update()?;
/// ```
#[must_use = "nothing changes until update() is called"]
pub struct RenderUpdater<'a> {
    renderer: &'a mut Renderer,
    sample: Option<u32>,
    refinement_steps: Option<u32>,
    max_iterations: Option<u32>,
    escape_radius: Option<f64>,
    screen_size: Option<(u32, u32)>,
    pattern_style: Option<PatternStyle>,
}

impl Renderer {
    pub fn updater(&mut self) -> RenderUpdater<'_> {
        RenderUpdater {
            renderer: self,
            sample: None,
            refinement_steps: None,
            max_iterations: None,
            escape_radius: None,
            screen_size: None,
            pattern_style: None,
        }
    }
}

impl RenderUpdater<'_> {
    pub fn sample(mut self, sample: u32) -> Self {
        self.sample = Some(sample);
        self
    }

    pub fn refinement_steps(mut self, refinement_steps: u32) -> Self {
        self.refinement_steps = Some(refinement_steps);
        self
    }

    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn escape_radius(mut self, escape_radius: f64) -> Self {
        self.escape_radius = Some(escape_radius);
        self
    }

    pub fn screen_size(mut self, width: u32, height: u32) -> Self {
        self.screen_size = Some((width, height));
        self
    }

    pub fn pattern_style(mut self, pattern_style: PatternStyle) -> Self {
        self.pattern_style = Some(pattern_style);
        self
    }

    /// Applies every recorded change, then restarts once. Returns the new generation.
    pub fn update(self) -> Result<u64, RendererError> {
        let renderer = self.renderer;

        if let Some(sample) = self.sample {
            renderer.set_sample(sample);
        }
        if let Some(refinement_steps) = self.refinement_steps {
            renderer.set_refinement_steps(refinement_steps);
        }
        if let Some(max_iterations) = self.max_iterations {
            renderer.set_max_iterations(max_iterations);
        }
        if let Some(escape_radius) = self.escape_radius {
            renderer.set_escape_radius(escape_radius);
        }
        if let Some(pattern_style) = self.pattern_style {
            renderer.set_pattern_style(pattern_style);
        }
        if let Some((width, height)) = self.screen_size {
            renderer.resize(width, height);
        }

        renderer.restart()
    }
}
