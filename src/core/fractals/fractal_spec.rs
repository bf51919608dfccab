use crate::core::fractals::continuous::algorithm::ContinuousFractal;
use crate::core::fractals::discrete::algorithm::DiscreteFractal;
use crate::core::navigation::frame::NavigationFrame;

/// The fractal being rendered.
#[derive(Debug, Clone)]
pub enum FractalSpec {
    Continuous(ContinuousFractal),
    Discrete(DiscreteFractal),
}

impl FractalSpec {
    /// A frame showing the whole fractal.
    #[must_use]
    pub fn default_frame(&self) -> NavigationFrame {
        match self {
            Self::Continuous(fractal) => NavigationFrame::continuous(fractal.natural_bounds()),
            Self::Discrete(fractal) => {
                NavigationFrame::discrete(fractal.base_width(), fractal.base_height())
            }
        }
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete(_))
    }
}

impl Default for FractalSpec {
    fn default() -> Self {
        Self::Continuous(ContinuousFractal::mandelbrot())
    }
}

impl From<ContinuousFractal> for FractalSpec {
    fn from(fractal: ContinuousFractal) -> Self {
        Self::Continuous(fractal)
    }
}

impl From<DiscreteFractal> for FractalSpec {
    fn from(fractal: DiscreteFractal) -> Self {
        Self::Discrete(fractal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::plane_rect::PlaneRect;
    use crate::core::fractals::discrete::presets::PatternPreset;
    use crate::core::navigation::frame::PlaneKind;

    #[test]
    fn test_default_is_mandelbrot_over_natural_bounds() {
        let spec = FractalSpec::default();
        let frame = spec.default_frame();

        assert!(!spec.is_discrete());
        assert_eq!(frame.width(), 1.0 - -2.2);
        assert!(matches!(frame.kind(), PlaneKind::Continuous { .. }));
    }

    #[test]
    fn test_discrete_frame_covers_unit_square() {
        let spec = FractalSpec::from(PatternPreset::SpaceInvader.fractal().unwrap());
        let frame = spec.default_frame();

        assert!(spec.is_discrete());
        assert_eq!(frame.bounds(), PlaneRect::unit_square());
        assert_eq!(
            frame.kind(),
            PlaneKind::Discrete {
                base_width: 11,
                base_height: 9
            }
        );
    }
}
