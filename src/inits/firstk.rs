use crate::error::{KMeansError, Result};
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState, Primitive};

#[inline(always)]
pub fn calculate<T, D>(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>) -> Result<()>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    // init methods are public and can be called outside of a validated run
    let seeds = kmean.samples.get(..state.k)
        .ok_or(KMeansError::InvalidK { k: state.k, sample_cnt: kmean.sample_cnt() })?;
    state.centroids.clear();
    state.centroids.extend_from_slice(seeds);
    Ok(())
}
