use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::plane_point::PlanePoint;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::fractals::continuous::errors::ContinuousFractalError;
use crate::core::fractals::continuous::orbit::OrbitFn;
use log::warn;
use std::f64::consts::LN_2;

pub const DEFAULT_MAX_ITERATIONS: u32 = 500;
pub const DEFAULT_ESCAPE_RADIUS: f64 = (1u64 << 30) as f64;
pub const DEFAULT_TOP_LEFT: PlanePoint = PlanePoint::new(-2.2, -1.2);
pub const DEFAULT_BOTTOM_RIGHT: PlanePoint = PlanePoint::new(1.0, 1.2);

/// Escape-time fractal over the complex plane.
///
/// `compute` returns the smoothed escape value, or exactly `max_iterations` for points that
/// never escape.
#[derive(Debug, Clone)]
pub struct ContinuousFractal {
    escape_radius: f64,
    max_iterations: u32,
    orbit: OrbitFn,
    natural_bounds: PlaneRect,
}

impl ContinuousFractal {
    pub fn new(
        escape_radius: f64,
        max_iterations: u32,
        orbit: OrbitFn,
        natural_bounds: PlaneRect,
    ) -> Result<Self, ContinuousFractalError> {
        if max_iterations == 0 {
            return Err(ContinuousFractalError::ZeroMaxIterationsError);
        }

        if !(escape_radius > 0.0 && escape_radius.is_finite()) {
            return Err(ContinuousFractalError::InvalidEscapeRadius {
                radius: escape_radius,
            });
        }

        Ok(Self {
            escape_radius,
            max_iterations,
            orbit,
            natural_bounds,
        })
    }

    /// The classic Mandelbrot set with the default parameters.
    #[must_use]
    pub fn mandelbrot() -> Self {
        Self {
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            orbit: OrbitFn::default(),
            natural_bounds: default_bounds(),
        }
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn orbit(&self) -> &OrbitFn {
        &self.orbit
    }

    #[must_use]
    pub fn natural_bounds(&self) -> PlaneRect {
        self.natural_bounds
    }

    pub fn set_orbit(&mut self, orbit: OrbitFn) {
        self.orbit = orbit;
    }

    /// Values below one are clamped to one.
    pub fn set_max_iterations(&mut self, max_iterations: u32) {
        if max_iterations == 0 {
            warn!("max iterations must be at least 1, clamping");
        }

        self.max_iterations = max_iterations.max(1);
    }

    pub fn increase_max_iterations(&mut self, by: u32) {
        self.max_iterations = self.max_iterations.saturating_add(by);
    }

    pub fn decrease_max_iterations(&mut self, by: u32) {
        self.set_max_iterations(self.max_iterations.saturating_sub(by));
    }

    /// Values below one, and non-finite values, are clamped to one.
    pub fn set_escape_radius(&mut self, escape_radius: f64) {
        if escape_radius >= 1.0 && escape_radius.is_finite() {
            self.escape_radius = escape_radius;
        } else {
            warn!(
                "escape radius {} out of range, clamping to at least 1",
                escape_radius
            );
            self.escape_radius = 1.0;
        }
    }

    pub fn increase_escape_radius(&mut self, by: f64) {
        self.set_escape_radius(self.escape_radius + by);
    }

    pub fn decrease_escape_radius(&mut self, by: f64) {
        self.set_escape_radius(self.escape_radius - by);
    }

    #[must_use]
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        if self.orbit.is_quadratic() && in_main_cardioid(x, y) {
            return f64::from(self.max_iterations);
        }

        let c = Complex::new(x, y);
        let mut z = Complex::new(0.0, 0.0);
        let mut iteration = 0;

        while z.magnitude_squared() < self.escape_radius && iteration < self.max_iterations {
            z = self.orbit.apply(z) + c;
            iteration += 1;
        }

        if iteration < self.max_iterations {
            let log_modulus = z.magnitude_squared().ln() / 2.0;
            let nu = (log_modulus / LN_2).ln() / LN_2;
            f64::from(iteration) + 1.0 - nu
        } else {
            f64::from(self.max_iterations)
        }
    }
}

impl FractalAlgorithm for ContinuousFractal {
    type Success = f64;

    #[inline]
    fn compute(&self, point: PlanePoint) -> f64 {
        self.evaluate(point.x, point.y)
    }
}

fn default_bounds() -> PlaneRect {
    PlaneRect::new(DEFAULT_TOP_LEFT, DEFAULT_BOTTOM_RIGHT)
        .unwrap_or_else(|_| PlaneRect::unit_square())
}

/// Closed-form test for the main cardioid of `z² + c`. Points on the real axis report false.
#[must_use]
pub fn in_main_cardioid(x: f64, y: f64) -> bool {
    if y == 0.0 {
        return false;
    }

    let shifted = x - 0.25;
    let q = shifted * shifted + y * y;

    q * (q + shifted) <= 0.25 * y * y
}
