pub mod continuous;
pub mod discrete;
pub mod fractal_spec;
