pub mod cancellation;
pub mod completion;
pub mod ports;
pub mod refine;
pub mod render_pattern;
