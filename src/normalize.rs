use crate::error::{KMeansError, Result};
use crate::helpers;
use crate::memory::{Axis, Point, Primitive};

/// Mean and range (max - min) of all samples along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScale<T: Primitive> {
    pub mean: T,
    pub range: T,
}
impl<T: Primitive> AxisScale<T> {
    fn of(samples: &[Point<T>], axis: Axis) -> Self {
        let values = samples.iter().map(|s| s.get(axis));
        let (min, max) = values.clone()
            .fold((T::infinity(), T::neg_infinity()), |(min, max), v| (min.min(v), max.max(v)));
        Self {
            mean: helpers::mean(values, samples.len()),
            range: max - min,
        }
    }

    /// Scale a raw value of this axis.
    #[inline(always)]
    pub fn apply(&self, v: T) -> T {
        (v - self.mean) / self.range
    }

    /// Map a normalized value (e.g. a centroid coordinate) back onto the raw scale of this axis.
    #[inline(always)]
    pub fn revert(&self, v: T) -> T {
        v * self.range + self.mean
    }
}

/// Per-axis scales of **samples**, in the order x, y. These are the scales [`normalize`] applies.
///
/// ## Errors
/// - [`KMeansError::EmptyDataset`] if **samples** is empty
/// - [`KMeansError::NonFiniteSample`] for the first sample with an infinite or NaN coordinate
/// - [`KMeansError::DegenerateAxis`] if all samples share the same value on one axis. This includes
///   every single-sample dataset. There is no fallback scaling for constant features.
pub fn axis_scales<T: Primitive>(samples: &[Point<T>]) -> Result<[AxisScale<T>; 2]> {
    if samples.is_empty() {
        return Err(KMeansError::EmptyDataset);
    }
    if let Some(index) = samples.iter().position(|s| !s.x.is_finite() || !s.y.is_finite()) {
        return Err(KMeansError::NonFiniteSample { index });
    }
    let scales = Axis::ALL.map(|axis| AxisScale::of(samples, axis));
    for (axis, scale) in Axis::ALL.iter().zip(scales.iter()) {
        if scale.range == T::zero() {
            return Err(KMeansError::DegenerateAxis { axis: *axis });
        }
    }
    Ok(scales)
}

/// Feature scaling: for each axis independently, subtract the axis mean and divide by the axis range.
///
/// The returned samples have the same length and order as the input. Fails under the same
/// conditions as [`axis_scales`].
pub fn normalize<T: Primitive>(samples: &[Point<T>]) -> Result<Vec<Point<T>>> {
    let [sx, sy] = axis_scales(samples)?;
    tracing::debug!(
        sample_cnt = samples.len(),
        mean_x = %sx.mean, range_x = %sx.range,
        mean_y = %sy.mean, range_y = %sy.range,
        "normalized samples"
    );
    Ok(samples.iter()
        .map(|s| Point::new(sx.apply(s.x), sy.apply(s.y)))
        .collect())
}
