use crate::core::actions::ports::colour_map::ColourMap;
use crate::core::actions::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::plane_point::PlanePoint;

/// Colour distance above which a pixel gets the full sub-sample grid.
pub const OVERSAMPLE_THRESHOLD: f64 = 0.05;

/// Produces the colour of one pixel whose top-left corner sits at `point`.
pub trait PixelColourer: Sync {
    fn colour_at(&self, point: PlanePoint) -> Colour;
}

/// Evaluates a fractal through a colour map with adaptive oversampling.
///
/// With `sample == 1` each pixel costs one evaluation. Otherwise the opposite sub-sample
/// corner is evaluated too, and only when the two disagree does the sampler fill in the
/// remaining `sample² − 2` positions before averaging.
pub struct ColourSampler<'a, A, M> {
    algorithm: &'a A,
    colour_map: &'a M,
    sample: u32,
    delta_x: f64,
    delta_y: f64,
}

impl<'a, A, M> ColourSampler<'a, A, M>
where
    A: FractalAlgorithm<Success = f64>,
    M: ColourMap<T = f64>,
{
    /// `delta_x`/`delta_y` are the plane extent of one pixel. A `sample` of 0 is treated as 1.
    pub fn new(algorithm: &'a A, colour_map: &'a M, sample: u32, delta_x: f64, delta_y: f64) -> Self {
        Self {
            algorithm,
            colour_map,
            sample: sample.max(1),
            delta_x,
            delta_y,
        }
    }

    #[must_use]
    pub fn sample(&self) -> u32 {
        self.sample
    }

    fn colour_of(&self, x: f64, y: f64) -> Colour {
        self.colour_map
            .map(self.algorithm.compute(PlanePoint::new(x, y)))
    }
}

impl<A, M> PixelColourer for ColourSampler<'_, A, M>
where
    A: FractalAlgorithm<Success = f64> + Sync,
    M: ColourMap<T = f64> + Sync,
{
    fn colour_at(&self, point: PlanePoint) -> Colour {
        let first = self.colour_of(point.x, point.y);

        if self.sample == 1 {
            return first;
        }

        let s = f64::from(self.sample);
        let corner = self.colour_of(
            point.x + self.delta_x * (s - 1.0) / s,
            point.y + self.delta_y * (s - 1.0) / s,
        );

        let mut average = ColourAverage::default();
        average.add(first);
        average.add(corner);

        if f64::from(first.distance(corner)) > OVERSAMPLE_THRESHOLD {
            for p in 1..self.sample * self.sample - 1 {
                let column = f64::from(p % self.sample);
                let row = f64::from(p / self.sample);

                average.add(self.colour_of(
                    point.x + self.delta_x * column / s,
                    point.y + self.delta_y * row / s,
                ));
            }
        }

        average.average()
    }
}

#[derive(Debug, Default)]
struct ColourAverage {
    r: u32,
    g: u32,
    b: u32,
    count: u32,
}

impl ColourAverage {
    fn add(&mut self, colour: Colour) {
        self.r += u32::from(colour.r);
        self.g += u32::from(colour.g);
        self.b += u32::from(colour.b);
        self.count += 1;
    }

    fn average(&self) -> Colour {
        let count = self.count.max(1);

        Colour::rgb(
            (self.r / count) as u8,
            (self.g / count) as u8,
            (self.b / count) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Returns the x coordinate and counts calls.
    #[derive(Default)]
    struct StubAlgorithm {
        calls: AtomicU32,
    }

    impl FractalAlgorithm for StubAlgorithm {
        type Success = f64;

        fn compute(&self, point: PlanePoint) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            point.x
        }
    }

    /// Black left of 0.5, white from there on.
    struct StepMap;

    impl ColourMap for StepMap {
        type T = f64;

        fn map(&self, value: f64) -> Colour {
            if value < 0.5 {
                Colour::BLACK
            } else {
                Colour::rgb(255, 255, 255)
            }
        }
    }

    #[test]
    fn test_single_sample_evaluates_once() {
        let algorithm = StubAlgorithm::default();
        let sampler = ColourSampler::new(&algorithm, &StepMap, 1, 1.0, 1.0);

        assert_eq!(sampler.colour_at(PlanePoint::new(0.0, 0.0)), Colour::BLACK);
        assert_eq!(algorithm.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_sample_behaves_as_one() {
        let algorithm = StubAlgorithm::default();
        let sampler = ColourSampler::new(&algorithm, &StepMap, 0, 1.0, 1.0);

        assert_eq!(sampler.sample(), 1);
    }

    #[test]
    fn test_flat_pixel_uses_two_samples() {
        let algorithm = StubAlgorithm::default();
        let sampler = ColourSampler::new(&algorithm, &StepMap, 3, 0.1, 0.1);

        let colour = sampler.colour_at(PlanePoint::new(0.0, 0.0));

        assert_eq!(colour, Colour::BLACK);
        assert_eq!(algorithm.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_edge_pixel_uses_full_grid() {
        let algorithm = StubAlgorithm::default();
        let sampler = ColourSampler::new(&algorithm, &StepMap, 3, 1.0, 1.0);

        let colour = sampler.colour_at(PlanePoint::new(0.0, 0.0));

        // corner plus the two sub-samples in the rightmost column are white
        assert_eq!(algorithm.calls.load(Ordering::SeqCst), 9);
        assert_eq!(colour, Colour::rgb(85, 85, 85));
    }
}
