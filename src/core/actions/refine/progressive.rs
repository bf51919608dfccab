use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::refine::geometry::PixelGeometry;
use crate::core::actions::refine::oversample::PixelColourer;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use log::debug;
use std::error::Error;
use std::fmt;

/// Refinement steps beyond this are clamped.
pub const MAX_REFINEMENT_STEPS: u32 = 16;

#[derive(Debug)]
pub enum RefineError {
    Cancelled(Cancelled),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for RefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for RefineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<Cancelled> for RefineError {
    fn from(c: Cancelled) -> Self {
        Self::Cancelled(c)
    }
}

impl From<PixelBufferError> for RefineError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Describes a completed refinement pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Zero-based pass index.
    pub pass: u32,
    /// Edge length of the blocks painted during this pass.
    pub block_size: u32,
}

impl PassReport {
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.pass == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.block_size == 1
    }
}

/// Renders `slice` coarse-to-fine, handing the slice buffer to `on_pass` after every pass.
///
/// The first pass samples a grid of spacing `2^refinement_steps` and paints a full block per
/// sample. Each following pass halves the block size and only samples grid positions the
/// coarser passes skipped, so every pixel is evaluated exactly once and the last pass leaves
/// the same buffer a single full-resolution pass would.
///
/// Cancellation is polled after every scanline. A cancelled slice returns
/// [`RefineError::Cancelled`] without reporting the pass it was in.
pub fn refine_slice<P, C, F>(
    slice: PixelRect,
    geometry: PixelGeometry,
    refinement_steps: u32,
    colourer: &P,
    cancel: &C,
    mut on_pass: F,
) -> Result<PixelBuffer, RefineError>
where
    P: PixelColourer + ?Sized,
    C: CancelToken + ?Sized,
    F: FnMut(&PixelBuffer, PassReport),
{
    let mut buffer = PixelBuffer::new(slice);
    let step = 1u32 << refinement_steps.min(MAX_REFINEMENT_STEPS);
    let width = slice.width();
    let height = slice.height();
    let left = slice.top_left().x;
    let top = slice.top_left().y;

    let mut block = step;
    let mut pass = 0;

    // offsets past the slice edge have no samples
    let offset_rows = step.min(height);
    let offset_columns = step.min(width);

    while block > 0 {
        for ky in (0..offset_rows).step_by(block as usize) {
            for kx in (0..offset_columns).step_by(block as usize) {
                let visited_earlier = kx % (2 * block) == 0 && ky % (2 * block) == 0;

                if visited_earlier && block != step {
                    continue;
                }

                for j in (ky..height).step_by(step as usize) {
                    let row = top + j as i32;

                    for i in (kx..width).step_by(step as usize) {
                        let column = left + i as i32;
                        let colour = colourer.colour_at(geometry.point(column, row));

                        buffer.fill_block(Point { x: column, y: row }, block, colour)?;
                    }

                    if cancel.is_cancelled() {
                        return Err(Cancelled.into());
                    }
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(Cancelled.into());
        }

        debug!(
            "slice at x:{} pass {} done (block {})",
            left, pass, block
        );

        on_pass(&buffer, PassReport { pass, block_size: block });

        block /= 2;
        pass += 1;
    }

    Ok(buffer)
}
