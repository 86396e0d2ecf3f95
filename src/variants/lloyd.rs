use crate::distances::squared_distance;
use crate::error::{KMeansError, Result};
use crate::{helpers, partition, memory::*};
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState};
use tracing::{debug, trace};

pub(crate) struct Lloyd<T, D> {
	_p: std::marker::PhantomData<(T, D)>
}
impl<T: Primitive, D: DistanceFunction<T>> Lloyd<T, D> {
    /// Move every centroid into the mean of its assigned samples.
    /// Returns the new distance sum, the largest centroid movement and the sample groups the centroids were computed from.
    fn update_centroids(data: &KMeans<T, D>, state: &mut KMeansState<T>, iteration: usize) -> Result<(T, T, Vec<Vec<Point<T>>>)> {
        let groups = helpers::group_by_assignment(&data.samples, &state.assignments, state.k);

        let mut max_shift = T::zero();
        for (centroid_id, (c, group)) in state.centroids.iter_mut().zip(groups.iter()).enumerate() {
            // An empty cluster is not re-seeded or dropped, it aborts the calculation
            let new_c = partition::centroid(group)
                .map_err(|_| KMeansError::UnassignedCentroid { centroid: centroid_id, iteration })?;
            max_shift = max_shift.max(squared_distance(c, &new_c).sqrt());
            *c = new_c;
        }
        state.centroid_frequency.iter_mut()
            .zip(groups.iter())
            .for_each(|(freq, group)| *freq = group.len());

        let new_distsum = state.centroids.iter()
            .zip(groups.iter())
            .map(|(c, group)| group.iter().map(|s| squared_distance(s, c)).sum::<T>())
            .sum();
        Ok((new_distsum, max_shift, groups))
    }

    pub fn calculate<'a, F>(data: &KMeans<T, D>, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        data.validate(k, max_iter)?;

        let mut state = KMeansState::new(data.sample_cnt(), k);

        // Initialize clusters and notify subscriber
        init(data, &mut state, config)?;
        if state.centroids.len() != k {
            return Err(KMeansError::InvalidSeed { expected: k, found: state.centroids.len() });
        }
        (config.init_done)(&state);
        debug!(k, max_iter, sample_cnt = data.sample_cnt(), "centroids initialized");

        let mut abort_strategy = config.abort_strategy.create_logic();
        let mut groups = Vec::new();
        for i in 1..=max_iter {
            state.assignments = data.update_cluster_assignments(&state.centroids, config.parallel);
            let (new_distsum, max_shift, new_groups) = Self::update_centroids(data, &mut state, i)?;
            groups = new_groups;

            // Notify subscriber about finished iteration
            (config.iteration_done)(&state, i, new_distsum);
            trace!(k, iteration = i, distsum = %new_distsum, max_shift = %max_shift, "iteration done");

            state.distsum = new_distsum;
            state.iterations = i;
            if !abort_strategy.next(new_distsum, max_shift) {
                debug!(k, iteration = i, "abort strategy stopped the calculation");
                break;
            }
        }

        state.clusters = state.centroids.iter().cloned()
            .zip(groups.into_iter())
            .map(|(centroid, points)| Cluster { centroid, points })
            .collect();
        debug!(k, iterations = state.iterations, distsum = %state.distsum, "k-means finished");
        Ok(state)
    }
}
