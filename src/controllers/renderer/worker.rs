use crate::controllers::renderer::events::RenderMessage;
use crate::controllers::renderer::snapshot::RenderSnapshot;
use crate::core::actions::cancellation::CancellationToken;
use crate::core::actions::completion::CompletionTracker;
use crate::core::actions::refine::geometry::PixelGeometry;
use crate::core::actions::refine::oversample::ColourSampler;
use crate::core::actions::refine::progressive::{RefineError, refine_slice};
use crate::core::actions::render_pattern::{RenderPatternError, render_pattern};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::fractals::continuous::algorithm::ContinuousFractal;
use crate::core::fractals::discrete::algorithm::DiscreteFractal;
use crate::core::fractals::fractal_spec::FractalSpec;
use crate::core::util::calculate_slices_in_pixel_rect::calculate_slices_in_pixel_rect;
use log::{debug, error, info};
use rayon::ThreadPool;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Instant;

/// State shared by the tasks of one render pass.
struct RenderPass {
    snapshot: RenderSnapshot,
    cancel: CancellationToken,
    sender: Sender<RenderMessage>,
    first_pass: CompletionTracker,
    finished: CompletionTracker,
}

/// Splits the snapshot's image into tasks and queues them on `pool`.
///
/// Continuous fractals get one vertical slice per worker; discrete fractals render as a
/// single task. Every task reports tiles and completion through `sender`.
pub(crate) fn dispatch(
    pool: &ThreadPool,
    snapshot: RenderSnapshot,
    cancel: CancellationToken,
    sender: &Sender<RenderMessage>,
) {
    let generation = snapshot.generation();
    let job = snapshot.job();

    let tasks = match snapshot.fractal() {
        FractalSpec::Continuous(_) => calculate_slices_in_pixel_rect(job.worker_count(), job.image()),
        FractalSpec::Discrete(_) => vec![job.image()],
    };
    let target = tasks.len() as u32;

    info!(
        "render {} started: {}x{}, sample {}, {} refinement step(s), {} task(s)",
        generation,
        job.image_width(),
        job.image_height(),
        job.sample(),
        job.refinement_steps(),
        target
    );

    let first_pass_sender = sender.clone();
    let finished_sender = sender.clone();
    let started = Instant::now();

    let pass = Arc::new(RenderPass {
        snapshot,
        cancel,
        sender: sender.clone(),
        first_pass: CompletionTracker::new(target, move || {
            let _ = first_pass_sender.send(RenderMessage::FirstPassDone { generation });
        }),
        finished: CompletionTracker::new(target, move || {
            info!("render {} finished in {:?}", generation, started.elapsed());
            let _ = finished_sender.send(RenderMessage::Finished { generation });
        }),
    });

    for task in tasks {
        let pass = Arc::clone(&pass);
        pool.spawn(move || pass.run(task));
    }
}

impl RenderPass {
    fn run(&self, area: PixelRect) {
        match self.snapshot.fractal() {
            FractalSpec::Continuous(fractal) => self.refine(fractal, area),
            FractalSpec::Discrete(fractal) => self.paint_pattern(fractal, area),
        }
    }

    fn send_tile(&self, tile: PixelBuffer) {
        let generation = self.snapshot.generation();

        if self
            .sender
            .send(RenderMessage::Tile { generation, tile })
            .is_err()
        {
            debug!("render {}: consumer gone, tile dropped", generation);
        }
    }

    fn fail(&self, reason: String) {
        let generation = self.snapshot.generation();
        error!("render {}: {}", generation, reason);

        let _ = self.sender.send(RenderMessage::Failed { generation, reason });
    }

    fn refine(&self, fractal: &ContinuousFractal, slice: PixelRect) {
        let job = self.snapshot.job();
        let geometry =
            PixelGeometry::from_bounds(self.snapshot.bounds(), job.image_width(), job.image_height());
        let sampler = ColourSampler::new(
            fractal,
            self.snapshot.gradient(),
            job.sample(),
            geometry.delta_x(),
            geometry.delta_y(),
        );

        let result = refine_slice(
            slice,
            geometry,
            job.refinement_steps(),
            &sampler,
            &self.cancel,
            |buffer, report| {
                self.send_tile(buffer.clone());

                if report.is_first() {
                    self.first_pass.finished();
                }
                if report.is_last() {
                    self.finished.finished();
                }
            },
        );

        match result {
            Ok(_) => {}
            Err(RefineError::Cancelled(_)) => {
                debug!(
                    "render {}: slice at x:{} cancelled",
                    self.snapshot.generation(),
                    slice.top_left().x
                );
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn paint_pattern(&self, fractal: &DiscreteFractal, image: PixelRect) {
        let result = render_pattern(
            fractal,
            self.snapshot.bounds(),
            image,
            self.snapshot.pattern_style(),
            &self.cancel,
        );

        match result {
            Ok(buffer) => {
                self.send_tile(buffer);
                self.first_pass.finished();
                self.finished.finished();
            }
            Err(RenderPatternError::Cancelled(_)) => {
                debug!("render {}: pattern cancelled", self.snapshot.generation());
            }
            Err(err) => self.fail(err.to_string()),
        }
    }
}
