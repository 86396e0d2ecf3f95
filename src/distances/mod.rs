use crate::memory::{Point, Primitive};

mod euclideandistance;

pub use euclideandistance::EuclideanDistance;

/// Metric used to decide which centroid a sample belongs to.
pub trait DistanceFunction<T: Primitive>: Sync + Send {
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T;
}

/// Squared euclidean distance, used wherever only sums or comparisons are needed.
#[inline(always)]
pub fn squared_distance<T: Primitive>(a: &Point<T>, b: &Point<T>) -> T {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}
