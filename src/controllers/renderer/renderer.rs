use crate::controllers::renderer::consumer::{Display, spawn_consumer};
use crate::controllers::renderer::errors::RendererError;
use crate::controllers::renderer::events::RenderMessage;
use crate::controllers::renderer::job::{RenderJob, RenderJobError};
use crate::controllers::renderer::ports::presenter::RenderPresenterPort;
use crate::controllers::renderer::settings::RenderSettings;
use crate::controllers::renderer::snapshot::RenderSnapshot;
use crate::controllers::renderer::state::RenderState;
use crate::controllers::renderer::worker::dispatch;
use crate::core::actions::cancellation::CancellationToken;
use crate::core::actions::render_pattern::PatternStyle;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::plane_point::PlanePoint;
use crate::core::data::point::Point;
use crate::core::fractals::continuous::algorithm::ContinuousFractal;
use crate::core::fractals::continuous::orbit::OrbitFn;
use crate::core::fractals::fractal_spec::FractalSpec;
use crate::core::gradient::engine::GradientEngine;
use crate::core::navigation::fit::ImageSize;
use crate::core::navigation::frame::NavigationFrame;
use crate::core::util::pixel_to_plane_coords::{
    pixel_delta_to_plane, pixel_to_plane_coords, scroll_norm,
};
use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroU32;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Progressive, cancellable renderer for one fractal view.
///
/// Parameter changes are recorded immediately but only reach the image on the next
/// [`generate`](Self::generate) or [`restart`](Self::restart); screen size changes restart
/// on their own. Workers hand finished tiles to a single consumer thread, which is the only
/// writer of the display buffer and the only caller of the presenter.
pub struct Renderer {
    display: Arc<Display>,
    sender: Sender<RenderMessage>,
    consumer: Option<JoinHandle<()>>,
    pool: Option<ThreadPool>,
    workers: NonZeroU32,
    cancel: CancellationToken,
    fractal: FractalSpec,
    frame: NavigationFrame,
    gradient: Arc<GradientEngine>,
    settings: RenderSettings,
    image_size: ImageSize,
}

fn image_rect(size: ImageSize) -> Result<PixelRect, RenderJobError> {
    PixelRect::with_size(Point { x: 0, y: 0 }, size.width, size.height)
        .map_err(RenderJobError::InvalidImage)
}

impl Renderer {
    /// A renderer showing the whole of `fractal`.
    pub fn new(
        fractal: FractalSpec,
        gradient: Arc<GradientEngine>,
        settings: RenderSettings,
        presenter: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, RendererError> {
        let frame = fractal.default_frame();
        Self::with_frame(fractal, frame, gradient, settings, presenter)
    }

    pub fn with_frame(
        fractal: FractalSpec,
        mut frame: NavigationFrame,
        gradient: Arc<GradientEngine>,
        settings: RenderSettings,
        presenter: Arc<dyn RenderPresenterPort>,
    ) -> Result<Self, RendererError> {
        let image_size = frame.fit_to_screen(settings.screen_width, settings.screen_height);
        let image = PixelBuffer::new(image_rect(image_size)?);
        let workers = settings.worker_count();

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.get() as usize)
            .thread_name(|index| format!("render-worker-{}", index))
            .build()
            .map_err(RendererError::ThreadPool)?;

        let (sender, receiver) = mpsc::channel();
        let display = Arc::new(Display::new(image, presenter));
        let consumer =
            spawn_consumer(Arc::clone(&display), receiver).map_err(RendererError::ConsumerThread)?;

        let renderer = Self {
            display,
            sender,
            consumer: Some(consumer),
            pool: Some(pool),
            workers,
            cancel: CancellationToken::new(),
            fractal,
            frame,
            gradient,
            settings,
            image_size,
        };
        renderer.sync_gradient_range();

        Ok(renderer)
    }

    /// Starts a pass for `job`, cancelling the one in flight. Returns the new generation.
    ///
    /// The previous workers are not joined; they notice the cancellation at their next
    /// scanline and exit without reporting.
    pub fn generate(&mut self, job: RenderJob) -> Result<u64, RendererError> {
        let Some(pool) = &self.pool else {
            return Err(RendererError::Stopped);
        };

        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        let (generation, replaced) = {
            let mut image = self.display.image.lock().unwrap();
            let generation = self.display.generation.fetch_add(1, Ordering::AcqRel) + 1;
            self.display.state.store(RenderState::Rendering);

            let replaced = image.pixel_rect() != job.image();
            if replaced {
                *image = PixelBuffer::new(job.image());
            }

            (generation, replaced)
        };

        if replaced {
            let _ = self.sender.send(RenderMessage::ImageReplaced { generation });
        }

        let snapshot = RenderSnapshot::new(
            generation,
            self.fractal.clone(),
            self.frame.bounds(),
            self.gradient.snapshot(),
            job,
            self.settings.pattern_style,
        );

        dispatch(pool, snapshot, self.cancel.clone(), &self.sender);

        Ok(generation)
    }

    /// Cancels whatever is running and renders the current parameters.
    pub fn restart(&mut self) -> Result<u64, RendererError> {
        let job = self.current_job()?;
        self.generate(job)
    }

    /// Flips the cancellation flag of the running pass. Tiles still queued are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();

        let _image = self.display.image.lock().unwrap();
        if self.display.state.load().is_active() {
            self.display.state.store(RenderState::Cancelled);
        }
    }

    /// Cancels, releases the worker pool and joins the consumer thread.
    pub fn stop(&mut self) {
        self.cancel();

        if self.pool.take().is_some() {
            debug!("worker pool released");
        }

        if let Some(consumer) = self.consumer.take() {
            let _ = self.sender.send(RenderMessage::Shutdown);
            let _ = consumer.join();
        }
    }

    /// The job [`restart`](Self::restart) would run.
    pub fn current_job(&self) -> Result<RenderJob, RenderJobError> {
        RenderJob::new(
            self.image_size.width,
            self.image_size.height,
            self.settings.sample,
            self.settings.refinement_steps,
            self.workers,
        )
    }

    /// A copy of the display buffer.
    #[must_use]
    pub fn image_buffer(&self) -> PixelBuffer {
        self.display.image.lock().unwrap().clone()
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.display.state.load()
    }

    /// `true` once every worker of the current pass has painted its first pass.
    #[must_use]
    pub fn is_first_pass_done(&self) -> bool {
        matches!(
            self.state(),
            RenderState::FirstPassDone | RenderState::Finished
        )
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state() == RenderState::Finished
    }

    /// Id of the latest pass; 0 before the first one.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.display.generation.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    #[must_use]
    pub fn fractal(&self) -> &FractalSpec {
        &self.fractal
    }

    #[must_use]
    pub fn frame(&self) -> &NavigationFrame {
        &self.frame
    }

    #[must_use]
    pub fn gradient(&self) -> &Arc<GradientEngine> {
        &self.gradient
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroU32 {
        self.workers
    }

    /// Mutable access to the frame for navigation commands.
    pub fn frame_mut(&mut self) -> &mut NavigationFrame {
        &mut self.frame
    }

    pub fn set_sample(&mut self, sample: u32) {
        if sample < 1 {
            warn!("sample must be at least 1, got {}; using 1", sample);
        }

        self.settings.sample = sample.max(1);
    }

    pub fn set_refinement_steps(&mut self, refinement_steps: u32) {
        self.settings.refinement_steps = refinement_steps;
    }

    pub fn set_pattern_style(&mut self, pattern_style: PatternStyle) {
        self.settings.pattern_style = pattern_style;
    }

    /// Replaces the fractal and resets the frame to show all of it.
    pub fn set_fractal(&mut self, fractal: FractalSpec) {
        self.frame = fractal.default_frame();
        self.fractal = fractal;
        self.refit();
        self.sync_gradient_range();
    }

    pub fn set_orbit(&mut self, orbit: OrbitFn) {
        match &mut self.fractal {
            FractalSpec::Continuous(fractal) => fractal.set_orbit(orbit),
            FractalSpec::Discrete(_) => debug!("orbit ignored for a discrete fractal"),
        }
    }

    /// Also rescales the gradient so its period follows the iteration count.
    pub fn set_max_iterations(&mut self, max_iterations: u32) {
        self.with_continuous(|fractal| fractal.set_max_iterations(max_iterations));
    }

    pub fn increase_max_iterations(&mut self, by: u32) {
        self.with_continuous(|fractal| fractal.increase_max_iterations(by));
    }

    pub fn decrease_max_iterations(&mut self, by: u32) {
        self.with_continuous(|fractal| fractal.decrease_max_iterations(by));
    }

    pub fn set_escape_radius(&mut self, escape_radius: f64) {
        self.with_continuous(|fractal| fractal.set_escape_radius(escape_radius));
    }

    pub fn increase_escape_radius(&mut self, by: f64) {
        self.with_continuous(|fractal| fractal.increase_escape_radius(by));
    }

    pub fn decrease_escape_radius(&mut self, by: f64) {
        self.with_continuous(|fractal| fractal.decrease_escape_radius(by));
    }

    /// Refits the frame to a new screen and restarts.
    pub fn set_screen_size(&mut self, width: u32, height: u32) -> Result<u64, RendererError> {
        self.resize(width, height);
        self.restart()
    }

    /// Zooms about `focus`; see [`NavigationFrame::zoom`].
    pub fn zoom(&mut self, scale: f64, focus: PlanePoint) -> bool {
        self.frame.zoom(scale, focus)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        self.frame.translate(dx, dy)
    }

    /// Zooms about the plane point under `pixel` by a normalised scroll delta.
    pub fn zoom_at_pixel(&mut self, scroll_delta: f64, pixel: Point) -> bool {
        let Ok(image) = image_rect(self.image_size) else {
            return false;
        };

        match pixel_to_plane_coords(pixel, image, self.frame.bounds()) {
            Ok(focus) => self.frame.zoom(scroll_norm(scroll_delta), focus),
            Err(err) => {
                debug!("zoom ignored: {}", err);
                false
            }
        }
    }

    /// Pans by a pointer movement measured in image pixels.
    pub fn translate_by_pixels(&mut self, dx: f64, dy: f64) -> bool {
        let Ok(image) = image_rect(self.image_size) else {
            return false;
        };

        let (plane_dx, plane_dy) = pixel_delta_to_plane(dx, dy, image, self.frame.bounds());
        self.frame.translate(plane_dx, plane_dy)
    }

    /// A stopped-on-drop copy of this renderer's view for an image of `width`×`height`.
    ///
    /// The copy renders in a single pass with the same sample and shares the current
    /// gradient snapshot.
    pub(crate) fn one_shot(
        &self,
        width: u32,
        height: u32,
        presenter: Arc<dyn RenderPresenterPort>,
    ) -> Result<Renderer, RendererError> {
        let settings = RenderSettings {
            screen_width: width,
            screen_height: height,
            refinement_steps: 0,
            workers: Some(self.workers),
            ..self.settings
        };
        let gradient = Arc::new(GradientEngine::from_snapshot(self.gradient.snapshot()));

        Self::with_frame(
            self.fractal.clone(),
            self.frame,
            gradient,
            settings,
            presenter,
        )
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.settings.screen_width = width;
        self.settings.screen_height = height;
        self.refit();
    }

    fn refit(&mut self) {
        self.image_size = self
            .frame
            .fit_to_screen(self.settings.screen_width, self.settings.screen_height);
        debug!(
            "image size {}x{} for screen {}x{}",
            self.image_size.width,
            self.image_size.height,
            self.settings.screen_width,
            self.settings.screen_height
        );
    }

    fn with_continuous(&mut self, change: impl FnOnce(&mut ContinuousFractal)) {
        match &mut self.fractal {
            FractalSpec::Continuous(fractal) => {
                change(fractal);
                self.sync_gradient_range();
            }
            FractalSpec::Discrete(_) => debug!("iteration parameters ignored for a discrete fractal"),
        }
    }

    /// Keeps the gradient's dead zone at the iteration cap.
    fn sync_gradient_range(&self) {
        if let FractalSpec::Continuous(fractal) = &self.fractal {
            let max_position = f64::from(fractal.max_iterations());

            if self.gradient.snapshot().max_position() != max_position {
                if let Err(err) = self.gradient.set_max_position(max_position) {
                    warn!("gradient not rescaled: {}", err);
                }
            }
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::plane_rect::PlaneRect;
    use crate::core::fractals::continuous::algorithm::DEFAULT_ESCAPE_RADIUS;
    use crate::core::fractals::discrete::presets::PatternPreset;
    use crate::core::gradient::presets::GradientPreset;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicU64;
    use std::thread;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct RecordingPresenter {
        replaced: AtomicU64,
        tiles: AtomicU64,
        first_passes: Mutex<Vec<u64>>,
        finished: Mutex<Vec<u64>>,
    }

    impl RenderPresenterPort for RecordingPresenter {
        fn image_replaced(&self, _generation: u64, _image: &PixelBuffer) {
            self.replaced.fetch_add(1, Ordering::SeqCst);
        }

        fn tile_applied(&self, _generation: u64, _tile: PixelRect) {
            self.tiles.fetch_add(1, Ordering::SeqCst);
        }

        fn first_pass_done(&self, generation: u64) {
            self.first_passes.lock().unwrap().push(generation);
        }

        fn finished(&self, generation: u64, _image: &PixelBuffer) {
            self.finished.lock().unwrap().push(generation);
        }
    }

    fn gradient() -> Arc<GradientEngine> {
        Arc::new(GradientEngine::new(
            GradientPreset::Classic.builder(100.0).build().unwrap(),
        ))
    }

    fn settings(width: u32, height: u32, refinement_steps: u32) -> RenderSettings {
        RenderSettings {
            screen_width: width,
            screen_height: height,
            sample: 1,
            refinement_steps,
            workers: NonZeroU32::new(2),
            pattern_style: PatternStyle::default(),
        }
    }

    fn mandelbrot(settings: RenderSettings) -> (Renderer, Arc<RecordingPresenter>) {
        let presenter = Arc::new(RecordingPresenter::default());
        let renderer = Renderer::new(
            FractalSpec::default(),
            gradient(),
            settings,
            Arc::clone(&presenter) as Arc<dyn RenderPresenterPort>,
        )
        .unwrap();

        (renderer, presenter)
    }

    fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(20);

        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }

        condition()
    }

    #[test]
    fn test_generate_runs_to_finished() {
        let (mut renderer, presenter) = mandelbrot(settings(40, 30, 2));

        assert_eq!(renderer.state(), RenderState::Idle);
        assert_eq!(renderer.restart().unwrap(), 1);
        assert!(wait_until(|| renderer.is_finished()));

        assert!(renderer.is_first_pass_done());
        assert_eq!(renderer.generation(), 1);
        assert_eq!(renderer.image_buffer().pixel_rect().width(), 40);
        assert_eq!(renderer.image_buffer().pixel_rect().height(), 30);
        assert_eq!(*presenter.first_passes.lock().unwrap(), vec![1]);
        assert_eq!(*presenter.finished.lock().unwrap(), vec![1]);
        // two slices, three passes each
        assert_eq!(presenter.tiles.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_progressive_render_equals_single_pass() {
        let progressive_settings = RenderSettings {
            sample: 2,
            ..settings(48, 36, 3)
        };
        let direct_settings = RenderSettings {
            sample: 2,
            ..settings(48, 36, 0)
        };

        let (mut progressive, _) = mandelbrot(progressive_settings);
        let (mut direct, _) = mandelbrot(direct_settings);

        progressive.restart().unwrap();
        direct.restart().unwrap();

        assert!(wait_until(|| progressive.is_finished() && direct.is_finished()));
        assert_eq!(progressive.image_buffer(), direct.image_buffer());
    }

    #[test]
    fn test_restart_supersedes_previous_generation() {
        let (mut renderer, presenter) = mandelbrot(settings(40, 30, 3));

        renderer.restart().unwrap();
        let latest = renderer.restart().unwrap();

        assert_eq!(latest, 2);
        assert!(wait_until(|| renderer.is_finished()));
        assert_eq!(renderer.generation(), 2);
        assert_eq!(presenter.finished.lock().unwrap().last(), Some(&2));
    }

    #[test]
    fn test_cancel_freezes_display_buffer() {
        let slow_orbit = OrbitFn::custom(|z: Complex| {
            thread::sleep(Duration::from_micros(200));
            z * z
        });
        let bounds = PlaneRect::new(PlanePoint::new(-0.1, -0.1), PlanePoint::new(0.1, 0.1)).unwrap();
        let fractal = ContinuousFractal::new(DEFAULT_ESCAPE_RADIUS, 10, slow_orbit, bounds).unwrap();
        let presenter = Arc::new(RecordingPresenter::default());
        let mut renderer = Renderer::new(
            FractalSpec::from(fractal),
            gradient(),
            settings(32, 32, 2),
            Arc::clone(&presenter) as Arc<dyn RenderPresenterPort>,
        )
        .unwrap();

        renderer.restart().unwrap();
        assert!(wait_until(|| presenter.tiles.load(Ordering::SeqCst) > 0));

        renderer.cancel();
        let tiles = presenter.tiles.load(Ordering::SeqCst);
        let image = renderer.image_buffer();

        thread::sleep(Duration::from_millis(300));

        assert_eq!(renderer.state(), RenderState::Cancelled);
        assert!(!renderer.is_finished());
        assert_eq!(presenter.tiles.load(Ordering::SeqCst), tiles);
        assert_eq!(renderer.image_buffer(), image);
        assert!(presenter.finished.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_when_idle_keeps_idle() {
        let (renderer, _) = mandelbrot(settings(8, 6, 0));

        renderer.cancel();

        assert_eq!(renderer.state(), RenderState::Idle);
    }

    #[test]
    fn test_stopped_renderer_rejects_generate() {
        let (mut renderer, _) = mandelbrot(settings(8, 6, 0));

        renderer.stop();

        assert!(matches!(renderer.restart(), Err(RendererError::Stopped)));
    }

    #[test]
    fn test_discrete_render_paints_pattern() {
        let presenter = Arc::new(RecordingPresenter::default());
        let mut renderer = Renderer::new(
            FractalSpec::from(PatternPreset::Sierpinski.fractal().unwrap()),
            gradient(),
            settings(64, 64, 3),
            Arc::clone(&presenter) as Arc<dyn RenderPresenterPort>,
        )
        .unwrap();

        assert_eq!(renderer.image_size(), ImageSize { width: 64, height: 64 });

        renderer.restart().unwrap();
        assert!(wait_until(|| renderer.is_finished()));

        let image = renderer.image_buffer();
        assert_eq!(image.pixel(Point { x: 0, y: 0 }).unwrap(), Colour::BLUE_VIOLET);
        assert_eq!(image.pixel(Point { x: 1, y: 0 }).unwrap(), Colour::BLACK);
        assert_eq!(image.pixel(Point { x: 3, y: 3 }).unwrap(), Colour::BLUE_VIOLET);
        assert_eq!(*presenter.first_passes.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_max_iterations_drive_gradient_range() {
        let (mut renderer, _) = mandelbrot(settings(8, 6, 0));

        assert_eq!(renderer.gradient().snapshot().max_position(), 500.0);

        renderer.set_max_iterations(800);
        assert_eq!(renderer.gradient().snapshot().max_position(), 800.0);

        renderer.decrease_max_iterations(1000);
        assert_eq!(renderer.gradient().snapshot().max_position(), 1.0);
    }

    #[test]
    fn test_sample_below_one_is_clamped() {
        let (mut renderer, _) = mandelbrot(settings(8, 6, 0));

        renderer.set_sample(0);

        assert_eq!(renderer.settings().sample, 1);
    }

    #[test]
    fn test_updater_applies_changes_with_one_restart() {
        let (mut renderer, _) = mandelbrot(settings(40, 30, 3));

        let generation = renderer
            .updater()
            .sample(2)
            .refinement_steps(1)
            .max_iterations(50)
            .screen_size(20, 15)
            .update()
            .unwrap();

        assert_eq!(generation, 1);
        assert_eq!(renderer.generation(), 1);
        assert_eq!(renderer.settings().sample, 2);
        assert_eq!(renderer.settings().refinement_steps, 1);
        assert_eq!(renderer.image_size(), ImageSize { width: 20, height: 15 });
        assert!(wait_until(|| renderer.is_finished()));
    }

    #[test]
    fn test_screen_size_change_replaces_image() {
        let (mut renderer, presenter) = mandelbrot(settings(40, 30, 1));

        renderer.restart().unwrap();
        assert!(wait_until(|| renderer.is_finished()));

        renderer.set_screen_size(20, 15).unwrap();
        assert!(wait_until(|| renderer.is_finished() && renderer.generation() == 2));

        assert_eq!(renderer.image_buffer().pixel_rect().width(), 20);
        assert_eq!(presenter.replaced.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zoom_at_pixel_keeps_point_under_cursor() {
        let (mut renderer, _) = mandelbrot(settings(40, 30, 0));
        let width_before = renderer.frame().width();

        assert!(renderer.zoom_at_pixel(-1.0, Point { x: 20, y: 15 }));

        let bounds = renderer.frame().bounds();
        assert!(renderer.frame().width() < width_before);
        assert!(bounds.contains_point(PlanePoint::new(-0.6, 0.0)));
        assert!(!renderer.zoom_at_pixel(-1.0, Point { x: 40, y: 0 }));
    }

    #[test]
    fn test_translate_by_pixels_moves_by_plane_delta() {
        let (mut renderer, _) = mandelbrot(settings(40, 30, 0));
        let before = renderer.frame().top_left();

        assert!(renderer.translate_by_pixels(10.0, 0.0));

        let after = renderer.frame().top_left();
        assert!((after.x - before.x - 0.8).abs() < 1e-9);
        assert_eq!(after.y, before.y);
    }

    #[test]
    fn test_set_fractal_resets_frame() {
        let (mut renderer, _) = mandelbrot(settings(64, 48, 0));
        renderer.zoom(-0.5, PlanePoint::new(0.0, 0.0));

        renderer.set_fractal(FractalSpec::from(PatternPreset::Sponge.fractal().unwrap()));

        assert_eq!(renderer.frame().bounds(), PlaneRect::unit_square());
        assert!(renderer.fractal().is_discrete());
    }
}
