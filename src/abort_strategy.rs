use crate::memory::*;

/// Enum with possible abort strategies.
/// These strategies specify when a running k-means calculation stops before its iteration budget is used up.
/// The iteration that triggers the abort is still applied to the result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbortStrategy<T: Primitive> {
	/// Never abort early: every calculation runs exactly `max_iter` iterations.
	FixedIterations,
	/// This strategy aborts the calculation directly after an iteration in which no centroid moved farther
	/// than **epsilon** (euclidean distance between its old and new position).
	/// ## Fields:
	/// - **epsilon**: Largest centroid movement that is still considered "converged"
	CentroidShift { epsilon: T },
	/// This strategy aborts the calculation directly after an iteration produced no improvement of the
	/// error where `improvement > threshold`.
	/// ## Fields:
	/// - **threshold**: Threshold, used to detect an improvement (`improvement > threshold`)
	NoImprovement { threshold: T },
}
impl<T: Primitive> Default for AbortStrategy<T> {
	fn default() -> Self { AbortStrategy::FixedIterations }
}
impl<T: Primitive> AbortStrategy<T> {
	pub(crate) fn create_logic(&self) -> Box<dyn AbortStrategyLogic<T>> {
		match *self {
			AbortStrategy::FixedIterations => Box::new(FixedIterationsLogic),
			AbortStrategy::CentroidShift{epsilon} => Box::new(CentroidShiftLogic { epsilon }),
			AbortStrategy::NoImprovement{threshold} => Box::new(NoImprovementLogic {
				threshold,
				prev_error: T::infinity()
			})
		}
	}
}

pub(crate) trait AbortStrategyLogic<T: Primitive> {
	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **error**: The new error (distsum), after the iteration
	/// - **max_shift**: The largest distance any centroid moved during the iteration
	/// ## Returns
	/// - **true** if the calculation should continue
	/// - **false** if the calculation should abort
	fn next(&mut self, error: T, max_shift: T) -> bool;
}


pub(crate) struct FixedIterationsLogic;
impl<T: Primitive> AbortStrategyLogic<T> for FixedIterationsLogic {
	fn next(&mut self, _error: T, _max_shift: T) -> bool { true }
}


pub(crate) struct CentroidShiftLogic<T: Primitive> {
	epsilon: T
}
impl<T: Primitive> AbortStrategyLogic<T> for CentroidShiftLogic<T> {
	fn next(&mut self, _error: T, max_shift: T) -> bool {
		max_shift > self.epsilon
	}
}


pub(crate) struct NoImprovementLogic<T: Primitive> {
	threshold: T,
	prev_error: T
}
impl<T: Primitive> AbortStrategyLogic<T> for NoImprovementLogic<T> {
	fn next(&mut self, error: T, _max_shift: T) -> bool {
		let improvement = self.prev_error - error;
		self.prev_error = error;
		improvement > self.threshold
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn test_fixed_iterations_f32() { test_fixed_iterations::<f32>(); }
	#[test] fn test_fixed_iterations_f64() { test_fixed_iterations::<f64>(); }

	fn test_fixed_iterations<T: Primitive>() {
		let mut abort_strategy = AbortStrategy::<T>::FixedIterations.create_logic();
		for error in [3000.0, 3000.0, 3001.0, 0.0] {
			assert_eq!(abort_strategy.next(T::from(error).unwrap(), T::zero()), true);
		}
	}

	#[test] fn test_centroid_shift_f32() { test_centroid_shift::<f32>(); }
	#[test] fn test_centroid_shift_f64() { test_centroid_shift::<f64>(); }

	fn test_centroid_shift<T: Primitive>() {
		let error = T::from(10.0).unwrap();
		let mut abort_strategy = AbortStrategy::CentroidShift { epsilon: T::from(0.001).unwrap() }.create_logic();
		assert_eq!(abort_strategy.next(error, T::from(0.5).unwrap()), true);
		assert_eq!(abort_strategy.next(error, T::from(0.0011).unwrap()), true);
		assert_eq!(abort_strategy.next(error, T::from(0.001).unwrap()), false);

		let mut abort_strategy = AbortStrategy::CentroidShift { epsilon: T::zero() }.create_logic();
		assert_eq!(abort_strategy.next(error, T::from(1e-3).unwrap()), true);
		assert_eq!(abort_strategy.next(error, T::zero()), false);
	}

	#[test] fn test_no_improvement_f32() { test_no_improvement::<f32>(); }
	#[test] fn test_no_improvement_f64() { test_no_improvement::<f64>(); }

	fn test_no_improvement<T: Primitive>() {
		let shift = T::one();
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: T::from(0.0005).unwrap() }.create_logic();
			assert_eq!(abort_strategy.next( T::from(3000.0).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(3000.0).unwrap(), shift ), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: T::from(0.5).unwrap() }.create_logic();
			assert_eq!(abort_strategy.next( T::from(30.0).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(29.75).unwrap(), shift ), false);
		}
		{
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: T::from(0.5).unwrap() }.create_logic();
			assert_eq!(abort_strategy.next( T::from(30.0).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(20.0).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(19.25).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(19.0).unwrap(), shift ), false);
		}
		{ // a worse error is never an improvement
			let mut abort_strategy = AbortStrategy::NoImprovement { threshold: T::zero() }.create_logic();
			assert_eq!(abort_strategy.next( T::from(30.0).unwrap(), shift ), true);
			assert_eq!(abort_strategy.next( T::from(31.0).unwrap(), shift ), false);
		}
	}
}
