use std::ops::Index;

use nalgebra::Point3;

use crate::{
    building::Primitive,
    geometry::{AABB, BoundingBox},
    util::Float,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle<Point>([Point; 3]);

impl<Point> Triangle<Point> {
    pub fn new(a: Point, b: Point, c: Point) -> Triangle<Point> {
        Triangle([a, b, c])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> Triangle<Point2> {
        Triangle([f(&self[0]), f(&self[1]), f(&self[2])])
    }
}

impl<Point> Index<usize> for Triangle<Point> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T: Float> Triangle<Point3<T>> {
    pub fn centroid(&self) -> Point3<T> {
        let three = T::one() + T::one() + T::one();
        Point3::from((self[0].coords + self[1].coords + self[2].coords) / three)
    }
}

impl<T: Float> Primitive for Triangle<Point3<T>> {
    type Scalar = T;

    fn bounding_box(&self) -> BoundingBox<T> {
        let mut bounds = AABB::new(self[0], self[0]);
        bounds.extend(&self[1]);
        bounds.extend(&self[2]);
        bounds
    }

    fn center(&self) -> Point3<T> {
        self.centroid()
    }
}
