use nalgebra::{Point3, Vector3};

use crate::{
    building::Primitive,
    geometry::{AABB, BoundingBox},
    util::Float,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere<T: Float> {
    pub center: Point3<T>,
    pub radius: T,
}

impl<T: Float> Primitive for Sphere<T> {
    type Scalar = T;

    fn bounding_box(&self) -> BoundingBox<T> {
        let r_vec = Vector3::repeat(self.radius);
        AABB {
            min: self.center - r_vec,
            max: self.center + r_vec,
        }
    }

    fn center(&self) -> Point3<T> {
        self.center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn bounding_box_of_sphere() {
        let sphere = Sphere {
            center: Point3::new(1.0, 2.0, 3.0),
            radius: 0.5,
        };
        let bounds = sphere.bounding_box();
        assert!(bounds.min == Point3::new(0.5, 1.5, 2.5));
        assert!(bounds.max == Point3::new(1.5, 2.5, 3.5));
        assert!(bounds.center() == sphere.center());
    }

    #[test]
    fn zero_radius_is_degenerate_box() {
        let sphere = Sphere {
            center: Point3::new(-1.0f32, 0.0, 1.0),
            radius: 0.0,
        };
        let bounds = sphere.bounding_box();
        assert!(bounds.min == bounds.max);
        assert!(!bounds.is_empty());
    }
}
