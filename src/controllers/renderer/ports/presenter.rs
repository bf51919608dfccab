use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;

/// Observer of a renderer's display buffer.
///
/// Every method is called from the renderer's consumer thread while the image lock is
/// held, so implementations must not call back into the renderer.
pub trait RenderPresenterPort: Send + Sync {
    /// The image was reallocated for a new size.
    fn image_replaced(&self, _generation: u64, _image: &PixelBuffer) {}

    fn tile_applied(&self, _generation: u64, _tile: PixelRect) {}

    fn first_pass_done(&self, _generation: u64) {}

    fn finished(&self, _generation: u64, _image: &PixelBuffer) {}

    /// The pass stopped on an error; no `finished` follows for this generation.
    fn failed(&self, _generation: u64, _reason: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl RenderPresenterPort for NoopPresenter {}

type ImageCallback = Box<dyn Fn(u64, &PixelBuffer) + Send + Sync>;
type GenerationCallback = Box<dyn Fn(u64) + Send + Sync>;
type FailureCallback = Box<dyn Fn(u64, &str) + Send + Sync>;

/// [`RenderPresenterPort`] built from closures.
#[derive(Default)]
pub struct RenderCallbacks {
    on_image_replaced: Option<ImageCallback>,
    on_first_pass_done: Option<GenerationCallback>,
    on_finished: Option<ImageCallback>,
    on_failed: Option<FailureCallback>,
}

impl RenderCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_image_replaced<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, &PixelBuffer) + Send + Sync + 'static,
    {
        self.on_image_replaced = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_first_pass_done<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.on_first_pass_done = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_finished<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, &PixelBuffer) + Send + Sync + 'static,
    {
        self.on_finished = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_failed<F>(mut self, callback: F) -> Self
    where
        F: Fn(u64, &str) + Send + Sync + 'static,
    {
        self.on_failed = Some(Box::new(callback));
        self
    }
}

impl RenderPresenterPort for RenderCallbacks {
    fn image_replaced(&self, generation: u64, image: &PixelBuffer) {
        if let Some(callback) = &self.on_image_replaced {
            callback(generation, image);
        }
    }

    fn first_pass_done(&self, generation: u64) {
        if let Some(callback) = &self.on_first_pass_done {
            callback(generation);
        }
    }

    fn finished(&self, generation: u64, image: &PixelBuffer) {
        if let Some(callback) = &self.on_finished {
            callback(generation, image);
        }
    }

    fn failed(&self, generation: u64, reason: &str) {
        if let Some(callback) = &self.on_failed {
            callback(generation, reason);
        }
    }
}
