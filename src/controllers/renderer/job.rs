use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use log::warn;
use std::error::Error;
use std::fmt;
use std::num::NonZeroU32;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderJobError {
    InvalidImage(PixelRectError),
}

impl fmt::Display for RenderJobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(err) => write!(f, "invalid image size: {}", err),
        }
    }
}

impl Error for RenderJobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidImage(err) => Some(err),
        }
    }
}

/// Shape of one render pass. Immutable once dispatched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RenderJob {
    image: PixelRect,
    sample: u32,
    refinement_steps: u32,
    worker_count: NonZeroU32,
}

impl RenderJob {
    /// A `sample` below 1 is clamped to 1 with a warning.
    pub fn new(
        image_width: u32,
        image_height: u32,
        sample: u32,
        refinement_steps: u32,
        worker_count: NonZeroU32,
    ) -> Result<Self, RenderJobError> {
        let image = PixelRect::with_size(Point { x: 0, y: 0 }, image_width, image_height)
            .map_err(RenderJobError::InvalidImage)?;

        let sample = if sample < 1 {
            warn!("sample must be at least 1, got {}; using 1", sample);
            1
        } else {
            sample
        };

        Ok(Self {
            image,
            sample,
            refinement_steps,
            worker_count,
        })
    }

    #[must_use]
    pub fn image(&self) -> PixelRect {
        self.image
    }

    #[must_use]
    pub fn image_width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn image_height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn sample(&self) -> u32 {
        self.sample
    }

    #[must_use]
    pub fn refinement_steps(&self) -> u32 {
        self.refinement_steps
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroU32 {
        self.worker_count
    }
}
