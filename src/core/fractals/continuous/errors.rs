use std::{error::Error, fmt};

#[derive(Debug, PartialEq)]
pub enum ContinuousFractalError {
    ZeroMaxIterationsError,
    InvalidEscapeRadius { radius: f64 },
}

impl fmt::Display for ContinuousFractalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidEscapeRadius { radius } => {
                write!(f, "Escape radius must be positive and finite, got {}", radius)
            }
        }
    }
}

impl Error for ContinuousFractalError {}
