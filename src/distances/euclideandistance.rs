use crate::distances::squared_distance;
use crate::{DistanceFunction, Point, Primitive};

#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T {
        squared_distance(a, b).sqrt()
    }
}
