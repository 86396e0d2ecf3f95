use crate::memory::{Point, Primitive};

/// Arithmetic mean of all values yielded by `values`, given their amount `cnt`.
#[inline(always)]
pub(crate) fn mean<T: Primitive>(values: impl Iterator<Item = T>, cnt: usize) -> T {
    values.sum::<T>() / T::from_count(cnt)
}

/// Group samples by their assigned centroid index. `assignments` has to hold one entry per sample.
pub(crate) fn group_by_assignment<T: Primitive>(samples: &[Point<T>], assignments: &[usize], k: usize) -> Vec<Vec<Point<T>>> {
    debug_assert_eq!(samples.len(), assignments.len());
    let mut groups = vec![Vec::new(); k];
    samples.iter()
        .zip(assignments.iter().cloned())
        .for_each(|(s, centroid_id)| groups[centroid_id].push(*s));
    groups
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-9))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{Point, Primitive};
	use rand::prelude::*;

	/// Points of the square around the origin, used by a lot of the smaller tests.
	pub fn unit_square<T: Primitive>() -> Vec<Point<T>> {
		let (one, zero) = (T::one(), T::zero());
		vec![
			Point::new(one, one),
			Point::new(one, zero - one),
			Point::new(zero - one, zero - one),
			Point::new(zero - one, one),
		]
	}

	/// Uniformly distributed random samples from a seeded generator.
	pub fn random_points(seed: u64, cnt: usize) -> Vec<Point<f64>> {
		let mut rnd = rand::rngs::StdRng::seed_from_u64(seed);
		(0..cnt).map(|_| Point::new(rnd.gen_range(-10.0, 10.0), rnd.gen_range(-10.0, 10.0))).collect()
	}

	/// The bundled 200 record dataset.
	pub const CLUSTER_TXT: &str = include_str!("../data/cluster.txt");

	pub fn assert_points_approx_eq<T: Primitive>(actual: &[Point<T>], should: &[Point<T>], tol: T) {
		assert_eq!(actual.len(), should.len());
		for (a, s) in actual.iter().zip(should.iter()) {
			assert_approx_eq!(a.x, s.x, tol);
			assert_approx_eq!(a.y, s.y, tol);
		}
	}
}
