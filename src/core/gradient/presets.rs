use crate::core::data::colour::Colour;
use crate::core::gradient::control_point::{ControlPoint, Interpolation};
use crate::core::gradient::errors::GradientError;
use crate::core::gradient::gradient::GradientBuilder;

#[must_use]
pub fn classic_control_points() -> Vec<ControlPoint> {
    vec![
        ControlPoint::new(0.0, Colour::rgb(0, 7, 100)),
        ControlPoint::new(1.0, Colour::rgb(32, 107, 203)),
        ControlPoint::new(2.0, Colour::rgb(237, 255, 255)),
        ControlPoint::new(3.0, Colour::rgb(255, 160, 0)),
        ControlPoint::new(4.0, Colour::rgb(160, 100, 0)),
        ControlPoint::new(5.0, Colour::rgb(0, 0, 0)),
        ControlPoint::new(6.0, Colour::rgb(0, 3, 50)),
        ControlPoint::new(7.0, Colour::rgb(0, 7, 100)),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientPreset {
    /// Deep blue through white and orange, looping back to blue.
    #[default]
    Classic,
    RedBlue,
}

impl GradientPreset {
    pub const ALL: &'static [Self] = &[Self::Classic, Self::RedBlue];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::RedBlue => "red-blue",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, GradientError> {
        let wanted = name.to_ascii_lowercase().replace('_', "-");

        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.display_name() == wanted)
            .ok_or_else(|| GradientError::UnknownPreset {
                name: name.to_string(),
            })
    }

    /// A builder preloaded with the preset; callers still choose the table density.
    #[must_use]
    pub fn builder(self, max_position: f64) -> GradientBuilder {
        match self {
            Self::Classic => GradientBuilder::new(max_position)
                .points(classic_control_points())
                .interpolation(Interpolation::Cyclic)
                .spread(100.0)
                .dead_colour(Colour::BLACK),
            Self::RedBlue => GradientBuilder::new(max_position),
        }
    }
}
