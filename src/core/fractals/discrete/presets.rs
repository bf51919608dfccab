use crate::core::fractals::discrete::algorithm::DiscreteFractal;
use crate::core::fractals::discrete::errors::DiscreteFractalError;

pub const SIERPINSKI: &[&[u8]] = &[&[1, 0], &[1, 1]];

pub const SPONGE: &[&[u8]] = &[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]];

pub const SNOWFLAKE: &[&[u8]] = &[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]];

pub const CROSS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]];

pub const SPACE_INVADER: &[&[u8]] = &[
    &[0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0],
    &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    &[0, 0, 1, 0, 1, 1, 1, 0, 1, 0, 0],
    &[0, 1, 1, 0, 1, 1, 1, 0, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 0, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternPreset {
    #[default]
    Sierpinski,
    Sponge,
    Snowflake,
    Cross,
    SpaceInvader,
}

impl PatternPreset {
    pub const ALL: &'static [Self] = &[
        Self::Sierpinski,
        Self::Sponge,
        Self::Snowflake,
        Self::Cross,
        Self::SpaceInvader,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sierpinski => "sierpinski",
            Self::Sponge => "sponge",
            Self::Snowflake => "snowflake",
            Self::Cross => "cross",
            Self::SpaceInvader => "space-invader",
        }
    }

    #[must_use]
    pub const fn rows(self) -> &'static [&'static [u8]] {
        match self {
            Self::Sierpinski => SIERPINSKI,
            Self::Sponge => SPONGE,
            Self::Snowflake => SNOWFLAKE,
            Self::Cross => CROSS,
            Self::SpaceInvader => SPACE_INVADER,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, DiscreteFractalError> {
        let wanted = name.to_ascii_lowercase().replace('_', "-");

        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.display_name() == wanted)
            .ok_or_else(|| DiscreteFractalError::UnknownPreset {
                name: name.to_string(),
            })
    }

    pub fn fractal(self) -> Result<DiscreteFractal, DiscreteFractalError> {
        DiscreteFractal::from_rows(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_builds() {
        for preset in PatternPreset::ALL {
            let fractal = preset.fractal().unwrap();
            assert_eq!(fractal.base_height() as usize, preset.rows().len());
        }
    }

    #[test]
    fn test_space_invader_dimensions() {
        let fractal = PatternPreset::SpaceInvader.fractal().unwrap();

        assert_eq!(fractal.base_width(), 11);
        assert_eq!(fractal.base_height(), 9);
    }

    #[test]
    fn test_sponge_has_hollow_centre() {
        let fractal = PatternPreset::Sponge.fractal().unwrap();

        assert!(!fractal.contains(1, 1));
        assert!(!fractal.contains(4, 4));
        assert!(fractal.contains(2, 2));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            PatternPreset::from_name("Space_Invader").unwrap(),
            PatternPreset::SpaceInvader
        );
        assert_eq!(
            PatternPreset::from_name("carpet"),
            Err(DiscreteFractalError::UnknownPreset {
                name: "carpet".to_string()
            })
        );
    }
}
