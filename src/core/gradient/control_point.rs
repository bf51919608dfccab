use crate::core::data::colour::Colour;
use serde::{Deserialize, Serialize};

/// A colour pinned at a position along the gradient.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: f64,
    pub colour: Colour,
}

impl ControlPoint {
    #[must_use]
    pub const fn new(position: f64, colour: Colour) -> Self {
        Self { position, colour }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// The table repeats every `spread` units.
    #[default]
    Cyclic,
    /// The table is stretched once over the whole range, warped towards low positions.
    Linear,
}

/// Sorts control points by position; NaN positions sort last.
pub fn sort_control_points(points: &mut [ControlPoint]) {
    points.sort_by(|a, b| a.position.total_cmp(&b.position));
}
