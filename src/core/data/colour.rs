use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const BLUE_VIOLET: Colour = Colour::rgb(138, 43, 226);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Largest per-channel absolute difference between two colours.
    #[must_use]
    pub fn distance(&self, other: Colour) -> u8 {
        self.r
            .abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }

    /// Blends towards `other`; `t` is expected in `[0, 1]`. Channels are truncated, not rounded.
    #[must_use]
    pub fn lerp(&self, other: Colour, t: f64) -> Colour {
        let channel = |a: u8, b: u8| -> u8 {
            let value = f64::from(a) + t * (f64::from(b) - f64::from(a));
            value.clamp(0.0, 255.0) as u8
        };

        Colour {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl From<[u8; 3]> for Colour {
    fn from(value: [u8; 3]) -> Self {
        Colour::rgb(value[0], value[1], value[2])
    }
}
