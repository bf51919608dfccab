use std::{error::Error, fmt};

#[derive(Debug, PartialEq)]
pub enum GradientError {
    TooFewColours { count: usize },
    NegativeMaxPosition { max_position: f64 },
    ZeroDensity,
    InvalidPosition { position: f64 },
    EmptyPositionRange,
    UnknownPreset { name: String },
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewColours { count } => {
                write!(f, "a gradient needs at least 2 colours, got {}", count)
            }
            Self::NegativeMaxPosition { max_position } => {
                write!(f, "maximum position must not be negative, got {}", max_position)
            }
            Self::ZeroDensity => write!(f, "Bezier density must be greater than zero"),
            Self::InvalidPosition { position } => write!(
                f,
                "control point positions must be finite and not negative, got {}",
                position
            ),
            Self::EmptyPositionRange => {
                write!(f, "Bezier smoothing needs a control point past position 0")
            }
            Self::UnknownPreset { name } => write!(f, "unknown gradient preset '{}'", name),
        }
    }
}

impl Error for GradientError {}
