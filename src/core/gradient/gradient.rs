use crate::core::actions::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::gradient::bezier::bezier_table;
use crate::core::gradient::control_point::{ControlPoint, Interpolation, sort_control_points};
use crate::core::gradient::errors::GradientError;
use log::warn;
use std::sync::Arc;

pub const DEFAULT_SPREAD: f64 = 100.0;
pub const DEFAULT_OFFSET: f64 = 0.0;
pub const DEFAULT_DENSITY: u32 = 5;

/// Maps escape values to colours through a lookup table.
///
/// Positions at or beyond `max_position` map to the dead colour. Cloning shares the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    table: Arc<[Colour]>,
    interpolation: Interpolation,
    spread: f64,
    offset: f64,
    dead_colour: Colour,
    max_position: f64,
    step_size: f64,
}

impl Gradient {
    pub fn new(
        table: Vec<Colour>,
        interpolation: Interpolation,
        max_position: f64,
    ) -> Result<Self, GradientError> {
        if table.len() < 2 {
            return Err(GradientError::TooFewColours { count: table.len() });
        }

        let mut gradient = Self {
            table: table.into(),
            interpolation,
            spread: DEFAULT_SPREAD,
            offset: DEFAULT_OFFSET,
            dead_colour: Colour::BLACK,
            max_position: 0.0,
            step_size: 0.0,
        };
        gradient.set_max_position(max_position)?;

        Ok(gradient)
    }

    #[must_use]
    pub fn table(&self) -> &[Colour] {
        &self.table
    }

    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn dead_colour(&self) -> Colour {
        self.dead_colour
    }

    #[must_use]
    pub fn max_position(&self) -> f64 {
        self.max_position
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    pub fn set_dead_colour(&mut self, dead_colour: Colour) {
        self.dead_colour = dead_colour;
    }

    /// Stored modulo the maximum position.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = if self.max_position > 0.0 {
            offset % self.max_position
        } else {
            offset
        };
    }

    /// Non-positive spreads fall back to the default with a warning.
    pub fn set_spread(&mut self, spread: f64) {
        if spread > 0.0 && spread.is_finite() {
            self.spread = spread;
        } else {
            warn!(
                "colour spread must be greater than 0, got {}; using {}",
                spread, DEFAULT_SPREAD
            );
            self.spread = DEFAULT_SPREAD;
        }
    }

    /// Must follow every change of the fractal's maximum iteration count.
    pub fn set_max_position(&mut self, max_position: f64) -> Result<(), GradientError> {
        if max_position < 0.0 || max_position.is_nan() {
            return Err(GradientError::NegativeMaxPosition { max_position });
        }

        self.max_position = max_position;
        self.step_size = max_position / (self.table.len() - 1) as f64;
        if max_position > 0.0 {
            self.offset %= max_position;
        }

        Ok(())
    }

    #[must_use]
    pub fn interpolate(&self, position: f64) -> Colour {
        if !(position < self.max_position) {
            return self.dead_colour;
        }

        let mut position = (position + self.offset) % self.max_position;
        if position < 0.0 {
            position += self.max_position;
        }

        let segments = self.table.len() - 1;

        let (index, t) = match self.interpolation {
            Interpolation::Linear => {
                let warped = self.max_position
                    - self.max_position / (1.0 + position / self.spread);
                (
                    (warped / self.step_size) as usize,
                    (warped % self.step_size) / self.step_size,
                )
            }
            Interpolation::Cyclic => {
                let segment = self.spread / segments as f64;
                (
                    ((position / segment) as usize) % segments,
                    (position % segment) / segment,
                )
            }
        };

        let index = index.min(segments - 1);

        self.table[index].lerp(self.table[index + 1], t)
    }
}

impl ColourMap for Gradient {
    type T = f64;

    #[inline]
    fn map(&self, value: f64) -> Colour {
        self.interpolate(value)
    }
}

/// Assembles a [`Gradient`] from control points.
///
/// Without a density the control colours are used as the table directly; with one, three or
/// more control points are smoothed through [`bezier_table`].
#[derive(Debug, Clone)]
pub struct GradientBuilder {
    points: Vec<ControlPoint>,
    density: Option<u32>,
    interpolation: Interpolation,
    spread: f64,
    offset: f64,
    dead_colour: Colour,
    max_position: f64,
}

impl GradientBuilder {
    #[must_use]
    pub fn new(max_position: f64) -> Self {
        Self {
            points: vec![
                ControlPoint::new(0.0, Colour::RED),
                ControlPoint::new(1.0, Colour::BLUE),
            ],
            density: None,
            interpolation: Interpolation::Cyclic,
            spread: DEFAULT_SPREAD,
            offset: DEFAULT_OFFSET,
            dead_colour: Colour::BLACK,
            max_position,
        }
    }

    #[must_use]
    pub fn points(mut self, points: Vec<ControlPoint>) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn bezier(mut self, density: u32) -> Self {
        self.density = Some(density);
        self
    }

    #[must_use]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn dead_colour(mut self, dead_colour: Colour) -> Self {
        self.dead_colour = dead_colour;
        self
    }

    pub fn build(self) -> Result<Gradient, GradientError> {
        let mut points = self.points;

        if points.len() < 2 {
            return Err(GradientError::TooFewColours {
                count: points.len(),
            });
        }

        if let Some(point) = points
            .iter()
            .find(|p| !(p.position >= 0.0 && p.position.is_finite()))
        {
            return Err(GradientError::InvalidPosition {
                position: point.position,
            });
        }

        sort_control_points(&mut points);

        let table = match self.density {
            Some(0) => return Err(GradientError::ZeroDensity),
            Some(_) if points.len() > 2 && points[points.len() - 1].position <= 0.0 => {
                return Err(GradientError::EmptyPositionRange);
            }
            Some(density) => bezier_table(&points, density, self.interpolation),
            None => points.iter().map(|p| p.colour).collect(),
        };

        let mut gradient = Gradient::new(table, self.interpolation, self.max_position)?;
        gradient.set_spread(self.spread);
        gradient.set_offset(self.offset);
        gradient.set_dead_colour(self.dead_colour);

        Ok(gradient)
    }
}
