use crate::error::{KMeansError, Result};
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState, Point, Primitive};

#[inline(always)]
pub fn calculate<T, D>(
    _kmean: &KMeans<T, D>, state: &mut KMeansState<T>, _config: &KMeansConfig<'_, T>, computed: &[Point<T>],
) -> Result<()>
where
    T: Primitive,
    D: DistanceFunction<T>,
{
    if computed.len() != state.k {
        return Err(KMeansError::InvalidSeed { expected: state.k, found: computed.len() });
    }
    state.centroids.clear();
    state.centroids.extend_from_slice(computed);
    Ok(())
}
