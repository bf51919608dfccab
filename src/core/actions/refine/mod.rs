pub mod geometry;
pub mod oversample;
pub mod progressive;
