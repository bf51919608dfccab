use crate::core::data::complex::Complex;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitKind {
    #[default]
    Quadratic,
    Cubic,
    BurningShip,
}

impl OrbitKind {
    pub const ALL: &'static [Self] = &[Self::Quadratic, Self::Cubic, Self::BurningShip];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Quadratic => "Mandelbrot",
            Self::Cubic => "Multibrot (cubic)",
            Self::BurningShip => "Burning ship",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mandelbrot" | "quadratic" => Some(Self::Quadratic),
            "cubic" | "multibrot" => Some(Self::Cubic),
            "burning-ship" | "burning_ship" | "burningship" => Some(Self::BurningShip),
            _ => None,
        }
    }
}

type OrbitClosure = dyn Fn(Complex) -> Complex + Send + Sync;

/// The map `z -> f(z)` iterated as `z(n+1) = f(z(n)) + c`.
#[derive(Clone)]
pub enum OrbitFn {
    Builtin(OrbitKind),
    Custom(Arc<OrbitClosure>),
}

impl OrbitFn {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Complex) -> Complex + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, z: Complex) -> Complex {
        match self {
            Self::Builtin(OrbitKind::Quadratic) => z * z,
            Self::Builtin(OrbitKind::Cubic) => z * z * z,
            Self::Builtin(OrbitKind::BurningShip) => {
                let folded = z.abs_components();
                folded * folded
            }
            Self::Custom(f) => f(z),
        }
    }

    /// Whether this is `z²`, for which the main cardioid has a closed form.
    #[must_use]
    pub fn is_quadratic(&self) -> bool {
        matches!(self, Self::Builtin(OrbitKind::Quadratic))
    }
}

impl Default for OrbitFn {
    fn default() -> Self {
        Self::Builtin(OrbitKind::Quadratic)
    }
}

impl fmt::Debug for OrbitFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(kind) => write!(f, "OrbitFn::Builtin({:?})", kind),
            Self::Custom(_) => write!(f, "OrbitFn::Custom(..)"),
        }
    }
}

impl From<OrbitKind> for OrbitFn {
    fn from(kind: OrbitKind) -> Self {
        Self::Builtin(kind)
    }
}
