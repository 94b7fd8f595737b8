mod aabb;
mod sphere;
mod triangle;

pub use aabb::AABB;
pub use sphere::Sphere;
pub use triangle::Triangle;

pub use nalgebra::{Point3, Vector3};

/// Axis aligned bounding box in 3D.
pub type BoundingBox<T> = AABB<Point3<T>>;
