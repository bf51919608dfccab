use crate::core::data::colour::Colour;
use crate::core::gradient::control_point::Interpolation;
use crate::core::gradient::errors::GradientError;
use crate::core::gradient::gradient::Gradient;
use std::sync::{Arc, RwLock};

/// Shared, lock-guarded gradient.
///
/// Every setter takes the write lock; a render pass reads one [`snapshot`](Self::snapshot)
/// and never sees later changes.
#[derive(Debug)]
pub struct GradientEngine {
    current: RwLock<Arc<Gradient>>,
}

impl GradientEngine {
    #[must_use]
    pub fn new(gradient: Gradient) -> Self {
        Self {
            current: RwLock::new(Arc::new(gradient)),
        }
    }

    /// Starts from an existing snapshot without copying its table.
    #[must_use]
    pub fn from_snapshot(gradient: Arc<Gradient>) -> Self {
        Self {
            current: RwLock::new(gradient),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Gradient> {
        Arc::clone(&self.current.read().unwrap())
    }

    #[must_use]
    pub fn interpolate(&self, position: f64) -> Colour {
        self.current.read().unwrap().interpolate(position)
    }

    fn update<R>(&self, change: impl FnOnce(&mut Gradient) -> R) -> R {
        let mut guard = self.current.write().unwrap();
        change(Arc::make_mut(&mut guard))
    }

    pub fn replace(&self, gradient: Gradient) {
        *self.current.write().unwrap() = Arc::new(gradient);
    }

    pub fn set_offset(&self, offset: f64) {
        self.update(|g| g.set_offset(offset));
    }

    pub fn set_spread(&self, spread: f64) {
        self.update(|g| g.set_spread(spread));
    }

    pub fn set_interpolation(&self, interpolation: Interpolation) {
        self.update(|g| g.set_interpolation(interpolation));
    }

    pub fn set_dead_colour(&self, dead_colour: Colour) {
        self.update(|g| g.set_dead_colour(dead_colour));
    }

    pub fn set_max_position(&self, max_position: f64) -> Result<(), GradientError> {
        self.update(|g| g.set_max_position(max_position))
    }
}
