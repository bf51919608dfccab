use crate::core::actions::render_pattern::PatternStyle;
use crate::core::util::calculate_workers_for_slicing::calculate_workers_for_slicing;
use std::num::NonZeroU32;

pub const DEFAULT_SCREEN_WIDTH: u32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 600;
pub const DEFAULT_SAMPLE: u32 = 3;
pub const DEFAULT_REFINEMENT_STEPS: u32 = 4;

/// Renderer parameters that are not part of the fractal, frame or gradient.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderSettings {
    pub screen_width: u32,
    pub screen_height: u32,
    pub sample: u32,
    pub refinement_steps: u32,
    /// `None` sizes the pool from the available cores.
    pub workers: Option<NonZeroU32>,
    pub pattern_style: PatternStyle,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            sample: DEFAULT_SAMPLE,
            refinement_steps: DEFAULT_REFINEMENT_STEPS,
            workers: None,
            pattern_style: PatternStyle::default(),
        }
    }
}

impl RenderSettings {
    #[must_use]
    pub fn worker_count(&self) -> NonZeroU32 {
        self.workers.unwrap_or_else(calculate_workers_for_slicing)
    }
}
