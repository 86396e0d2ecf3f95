use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {
    /// Lossless-enough conversion of a sample count into the primitive, used for averaging.
    fn from_count(cnt: usize) -> Self;
}
impl Primitive for f32 {
    #[inline(always)] fn from_count(cnt: usize) -> Self { cnt as f32 }
}
impl Primitive for f64 {
    #[inline(always)] fn from_count(cnt: usize) -> Self { cnt as f64 }
}


/// A single two-dimensional sample. Samples and centroids share this type.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T,
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Value of this point on the given axis.
    #[inline(always)]
    pub fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}
impl<T: Primitive> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}
impl<T: Primitive> From<Point<T>> for (T, T) {
    fn from(p: Point<T>) -> Self {
        (p.x, p.y)
    }
}


/// The two coordinate axes of a [`Point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}
impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];
}
impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}


/// A centroid together with the samples that were assigned to it in the last iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<T: Primitive> {
    pub centroid: Point<T>,
    pub points: Vec<Point<T>>,
}
impl<T: Primitive> Cluster<T> {
    /// Sum of squared distances from all points of this cluster to its centroid.
    pub fn squared_error(&self) -> T {
        self.points.iter()
            .map(|p| crate::distances::squared_distance(p, &self.centroid))
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversions() {
        let p: Point<f64> = (1.5, -2.0).into();
        assert_eq!(p, Point::new(1.5, -2.0));
        assert_eq!(p.get(Axis::X), 1.5);
        assert_eq!(p.get(Axis::Y), -2.0);
        let (x, y): (f64, f64) = p.into();
        assert_eq!((x, y), (1.5, -2.0));
    }

    #[test]
    fn cluster_squared_error() {
        let cluster = Cluster {
            centroid: Point::new(0.0f64, 0.0),
            points: vec![Point::new(1.0, 0.0), Point::new(0.0, -2.0), Point::new(3.0, 4.0)],
        };
        assert_eq!(cluster.squared_error(), 1.0 + 4.0 + 25.0);

        let empty = Cluster { centroid: Point::new(1.0f32, 1.0), points: vec![] };
        assert_eq!(empty.squared_error(), 0.0);
    }

    #[test]
    fn primitive_from_count() {
        assert_eq!(f64::from_count(200), 200.0);
        assert_eq!(f32::from_count(3), 3.0);
    }
}
