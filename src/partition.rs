use crate::error::{KMeansError, Result};
use crate::helpers;
use crate::{DistanceFunction, Point, Primitive};

/// Index of the centroid closest to **sample**. On exact ties, the lowest index wins.
#[inline(always)]
pub(crate) fn nearest_centroid<T: Primitive, D: DistanceFunction<T>>(sample: &Point<T>, centroids: &[Point<T>], distance: &D) -> usize {
    centroids.iter()
        .map(|c| distance.distance(sample, c))
        .enumerate()
        .fold((0, T::infinity()), |(best_idx, best_dist), (idx, dist)| {
            if dist < best_dist { (idx, dist) } else { (best_idx, best_dist) }
        }).0
}

/// Voronoi partition of **samples** by their nearest centroid.
///
/// Returns one centroid index per sample, in sample order. Ties are broken by first occurrence.
///
/// ## Panics
/// If **centroids** is empty.
pub fn voronoi<T: Primitive, D: DistanceFunction<T>>(samples: &[Point<T>], centroids: &[Point<T>], distance: &D) -> Vec<usize> {
    assert!(!centroids.is_empty(), "voronoi partition requires at least one centroid");
    samples.iter()
        .map(|s| nearest_centroid(s, centroids, distance))
        .collect()
}

/// Center of **points**: the arithmetic mean along each axis.
///
/// ## Errors
/// [`KMeansError::EmptyCluster`] if **points** is empty.
pub fn centroid<T: Primitive>(points: &[Point<T>]) -> Result<Point<T>> {
    if points.is_empty() {
        return Err(KMeansError::EmptyCluster);
    }
    Ok(Point::new(
        helpers::mean(points.iter().map(|p| p.x), points.len()),
        helpers::mean(points.iter().map(|p| p.y), points.len()),
    ))
}
