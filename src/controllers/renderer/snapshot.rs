use crate::controllers::renderer::job::RenderJob;
use crate::core::actions::render_pattern::PatternStyle;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::fractals::fractal_spec::FractalSpec;
use crate::core::gradient::gradient::Gradient;
use std::sync::Arc;

/// Everything a render pass reads, fixed when the pass is dispatched.
///
/// Workers share one snapshot behind an `Arc`; later changes to the renderer only reach
/// the next pass.
#[derive(Debug)]
pub struct RenderSnapshot {
    generation: u64,
    fractal: FractalSpec,
    bounds: PlaneRect,
    gradient: Arc<Gradient>,
    job: RenderJob,
    pattern_style: PatternStyle,
}

impl RenderSnapshot {
    pub fn new(
        generation: u64,
        fractal: FractalSpec,
        bounds: PlaneRect,
        gradient: Arc<Gradient>,
        job: RenderJob,
        pattern_style: PatternStyle,
    ) -> Self {
        Self {
            generation,
            fractal,
            bounds,
            gradient,
            job,
            pattern_style,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn fractal(&self) -> &FractalSpec {
        &self.fractal
    }

    #[must_use]
    pub fn bounds(&self) -> PlaneRect {
        self.bounds
    }

    #[must_use]
    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    #[must_use]
    pub fn job(&self) -> RenderJob {
        self.job
    }

    #[must_use]
    pub fn pattern_style(&self) -> PatternStyle {
        self.pattern_style
    }
}
