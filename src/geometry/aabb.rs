use std::ops::Sub;

use nalgebra::{ClosedAddAssign, ClosedDivAssign, Point, Point3, Scalar, Vector3};
use num_traits::One;

use crate::util::Float;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AABB<Point> {
    pub min: Point,
    pub max: Point,
}

impl<Point> AABB<Point> {
    pub fn new(min: Point, max: Point) -> AABB<Point> {
        AABB { min, max }
    }

    pub fn map<Point2, F: FnMut(&Point) -> Point2>(&self, mut f: F) -> AABB<Point2> {
        AABB {
            min: f(&self.min),
            max: f(&self.max),
        }
    }

    pub fn zip_map<Point2, Point3, F: FnMut(&Point, &Point2) -> Point3>(
        &self,
        rhs: &AABB<Point2>,
        mut f: F,
    ) -> AABB<Point3> {
        AABB {
            min: f(&self.min, &rhs.min),
            max: f(&self.max, &rhs.max),
        }
    }
}

impl<T: Float> AABB<Point3<T>> {
    /// Box that contains nothing, min is at +infinity and max at -infinity.
    /// Extending it by a point gives a box containing just that point.
    pub fn empty() -> Self {
        AABB {
            min: Point3::new(T::infinity(), T::infinity(), T::infinity()),
            max: Point3::new(T::neg_infinity(), T::neg_infinity(), T::neg_infinity()),
        }
    }

    /// Smallest box containing all the points, None if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<T>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = AABB::new(*first, *first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(self.max.iter()).any(|(min, max)| min > max)
    }

    /// Grows the box to contain `point`.
    pub fn extend(&mut self, point: &Point3<T>) {
        self.min = self.min.coords.zip_map(&point.coords, T::min).into();
        self.max = self.max.coords.zip_map(&point.coords, T::max).into();
    }

    pub fn union(&self, other: &Self) -> Self {
        AABB {
            min: self.min.coords.zip_map(&other.min.coords, T::min).into(),
            max: self.max.coords.zip_map(&other.max.coords, T::max).into(),
        }
    }

    pub fn contains(&self, point: &Point3<T>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    /// Index of the axis along which the box is the longest.
    pub fn largest_axis(&self) -> usize {
        let size: Vector3<T> = self.size();
        (1..3).fold(0, |best, i| if size[i] > size[best] { i } else { best })
    }
}

impl<Point: Sub + Copy> AABB<Point> {
    pub fn size(&self) -> Point::Output {
        self.max - self.min
    }
}

impl<T: Scalar + ClosedAddAssign + ClosedDivAssign + One, const D: usize> AABB<Point<T, D>> {
    pub fn center(&self) -> Point<T, D> {
        let two = T::one() + T::one();
        let avg_coords = (&self.min.coords + &self.max.coords) / two;
        Point::from(avg_coords)
    }
}

impl<Point> From<[Point; 2]> for AABB<Point> {
    fn from(value: [Point; 2]) -> Self {
        let [min, max] = value;
        AABB { min, max }
    }
}

impl<Point> From<(Point, Point)> for AABB<Point> {
    fn from(value: (Point, Point)) -> Self {
        let (min, max) = value;
        AABB { min, max }
    }
}
