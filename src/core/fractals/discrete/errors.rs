use std::{error::Error, fmt};

#[derive(Debug, PartialEq, Eq)]
pub enum DiscreteFractalError {
    InvalidBase { width: usize, height: usize },
    RaggedRows { row: usize, expected: usize, found: usize },
    UnknownPreset { name: String },
}

impl fmt::Display for DiscreteFractalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBase { width, height } => {
                write!(f, "base pattern must be at least 1x1, got {}x{}", width, height)
            }
            Self::RaggedRows {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "base pattern row {} has {} cells, expected {}",
                    row, found, expected
                )
            }
            Self::UnknownPreset { name } => write!(f, "unknown pattern preset '{}'", name),
        }
    }
}

impl Error for DiscreteFractalError {}
