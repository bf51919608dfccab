pub mod colour;
pub mod complex;
pub mod pixel_buffer;
pub mod pixel_rect;
pub mod plane_point;
pub mod plane_rect;
pub mod point;
