pub mod calculate_slices_in_pixel_rect;
pub mod calculate_workers_for_slicing;
pub mod pixel_to_plane_coords;
