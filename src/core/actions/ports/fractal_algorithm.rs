use crate::core::data::plane_point::PlanePoint;

/// Something that can be evaluated at a point of the fractal plane.
pub trait FractalAlgorithm {
    type Success;

    fn compute(&self, point: PlanePoint) -> Self::Success;
}
