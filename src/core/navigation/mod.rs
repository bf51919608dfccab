pub mod fit;
pub mod frame;
