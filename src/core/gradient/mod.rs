pub mod bezier;
pub mod control_point;
pub mod engine;
pub mod errors;
pub mod gradient;
pub mod presets;
