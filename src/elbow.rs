use crate::error::{KMeansError, Result};
use crate::memory::Primitive;
use crate::{DistanceFunction, KMeans, KMeansConfig, KMeansState};
use rayon::prelude::*;
use tracing::info;

/// Total squared error per amount of clusters, in the order the sweep was run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorTable<T: Primitive> {
    entries: Vec<(usize, T)>,
}
impl<T: Primitive> ErrorTable<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, k: usize, error: T) {
        self.entries.push((k, error));
    }

    /// Error of the run with **k** clusters, if that k was part of the sweep.
    pub fn get(&self, k: usize) -> Option<T> {
        self.entries.iter().find(|(ek, _)| *ek == k).map(|(_, e)| *e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.entries.iter().cloned()
    }

    pub fn ks(&self) -> Vec<usize> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn errors(&self) -> Vec<T> {
        self.entries.iter().map(|(_, e)| *e).collect()
    }

    /// Largest error of all entries, `None` for an empty table.
    pub fn max_error(&self) -> Option<T> {
        self.entries.iter().map(|(_, e)| *e).fold(None, |max, e| match max {
            Some(m) if m >= e => Some(m),
            _ => Some(e),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
impl<T: Primitive> FromIterator<(usize, T)> for ErrorTable<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}


fn validate_sweep<T: Primitive, D: DistanceFunction<T>>(kmean: &KMeans<T, D>, ks: &[usize], max_iter: usize) -> Result<()> {
    ks.iter().try_for_each(|&k| kmean.validate(k, max_iter))?;
    if max_iter == 0 {
        return Err(KMeansError::InvalidIterations);
    }
    Ok(())
}

/// One run of the sweep. The error is the distance sum of the final clusters.
fn run_k<'a, T, D, F>(kmean: &KMeans<T, D>, k: usize, max_iter: usize, init: &F, config: &KMeansConfig<'a, T>) -> Result<(usize, T)>
where
    T: Primitive,
    D: DistanceFunction<T>,
    for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()>,
{
    let state = kmean.kmeans_lloyd(k, max_iter, init, config)
        .map_err(|e| KMeansError::RunFailed { k, source: Box::new(e) })?;
    info!(k, iterations = state.iterations, error = %state.distsum, "elbow sweep entry");
    Ok((k, state.distsum))
}

pub(crate) fn calculate<'a, T, D, F>(kmean: &KMeans<T, D>, ks: &[usize], max_iter: usize, init: &F, config: &KMeansConfig<'a, T>) -> Result<ErrorTable<T>>
where
    T: Primitive,
    D: DistanceFunction<T>,
    for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> + Sync,
{
    validate_sweep(kmean, ks, max_iter)?;
    if !config.parallel {
        return ks.iter().map(|&k| run_k(kmean, k, max_iter, init, config)).collect();
    }
    // Every run owns its state, so they can be calculated independently. Collect in sweep order,
    // so the first failing k (not the first one to finish) is reported.
    let results: Vec<Result<(usize, T)>> = ks.par_iter()
        .map(|&k| run_k(kmean, k, max_iter, init, config))
        .collect();
    results.into_iter().collect()
}


/// Lazy elbow sweep, as returned by [`KMeans::elbow_iter`]. Each call to `next()` runs k-means for the
/// next k of the sweep. Clone it, to restart the sweep from its current position.
pub struct ElbowSweep<'s, 'a, T: Primitive, D: DistanceFunction<T>, F> {
    kmean: &'s KMeans<T, D>,
    ks: &'s [usize],
    max_iter: usize,
    init: &'s F,
    config: &'s KMeansConfig<'a, T>,
    next_idx: usize,
}
impl<'s, 'a, T: Primitive, D: DistanceFunction<T>, F> Clone for ElbowSweep<'s, 'a, T, D, F> {
    fn clone(&self) -> Self {
        Self { next_idx: self.next_idx, ..*self }
    }
}
impl<'s, 'a, T, D, F> ElbowSweep<'s, 'a, T, D, F>
where
    T: Primitive,
    D: DistanceFunction<T>,
    for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()>,
{
    pub(crate) fn new(kmean: &'s KMeans<T, D>, ks: &'s [usize], max_iter: usize, init: &'s F, config: &'s KMeansConfig<'a, T>) -> Result<Self> {
        validate_sweep(kmean, ks, max_iter)?;
        Ok(Self { kmean, ks, max_iter, init, config, next_idx: 0 })
    }
}
impl<'s, 'a, T, D, F> Iterator for ElbowSweep<'s, 'a, T, D, F>
where
    T: Primitive,
    D: DistanceFunction<T>,
    for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()>,
{
    type Item = Result<(usize, T)>;

    fn next(&mut self) -> Option<Self::Item> {
        let k = *self.ks.get(self.next_idx)?;
        self.next_idx += 1;
        Some(run_k(self.kmean, k, self.max_iter, self.init, self.config))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ks.len() - self.next_idx;
        (remaining, Some(remaining))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing::*;
    use crate::{input, EuclideanDistance, Point};

    fn fixture() -> KMeans<f64> {
        let raw = input::parse_points(CLUSTER_TXT).unwrap();
        KMeans::normalized(&raw, EuclideanDistance).unwrap()
    }

    #[test]
    fn error_never_increases_with_k() {
        let kmean = fixture();
        let ks: Vec<usize> = (1..=10).collect();
        let table = kmean.elbow(&ks, 100, KMeans::init_first_k, &KMeansConfig::default()).unwrap();

        assert_eq!(table.ks(), ks);
        let errors = table.errors();
        for w in errors.windows(2) {
            assert!(w[1] <= w[0], "error increased: {:?}", errors);
        }
        assert_approx_eq!(table.get(1).unwrap(), 31.052355757079443, 1e-9);
        assert_approx_eq!(table.get(5).unwrap(), 1.8297867302377409, 1e-9);
        assert_eq!(table.max_error(), table.get(1));
    }

    #[test]
    fn keeps_sweep_order() {
        let kmean = fixture();
        let table = kmean.elbow(&[6, 2, 4], 20, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
        assert_eq!(table.ks(), vec![6, 2, 4]);
        assert!(table.get(2).unwrap() > table.get(4).unwrap());
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn parallel_sweep_matches_sequential() {
        let kmean = fixture();
        let ks: Vec<usize> = (2..=10).collect();
        let sequential = kmean.elbow(&ks, 50, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
        let conf = KMeansConfig::build().parallel(true).build();
        let parallel = kmean.elbow(&ks, 50, KMeans::init_first_k, &conf).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn lazy_sweep_matches_eager() {
        let kmean = fixture();
        let ks = [2, 3, 4, 5];
        let conf = KMeansConfig::default();
        let init = KMeans::<f64, EuclideanDistance>::init_first_k;
        let eager = kmean.elbow(&ks, 30, init, &conf).unwrap();

        let mut sweep = kmean.elbow_iter(&ks, 30, &init, &conf).unwrap();
        assert_eq!(sweep.size_hint(), (4, Some(4)));
        let first = sweep.next().unwrap().unwrap();
        assert_eq!(first, (2, eager.get(2).unwrap()));

        // restart from the current position
        let rest: ErrorTable<f64> = sweep.clone().collect::<Result<_>>().unwrap();
        assert_eq!(rest.ks(), vec![3, 4, 5]);
        let rest_again: ErrorTable<f64> = sweep.collect::<Result<_>>().unwrap();
        assert_eq!(rest, rest_again);
        assert_eq!(rest.errors(), eager.errors()[1..].to_vec());
    }

    #[test]
    fn invalid_sweeps_fail_before_running() {
        let kmean = KMeans::new(unit_square::<f64>(), EuclideanDistance);
        let conf = KMeansConfig::default();
        let res = kmean.elbow(&[1, 2, 5], 10, KMeans::init_first_k, &conf);
        assert!(matches!(res, Err(KMeansError::InvalidK { k: 5, sample_cnt: 4 })));
        let res = kmean.elbow(&[0], 10, KMeans::init_first_k, &conf);
        assert!(matches!(res, Err(KMeansError::InvalidK { k: 0, .. })));
        let res = kmean.elbow(&[1, 2], 0, KMeans::init_first_k, &conf);
        assert!(matches!(res, Err(KMeansError::InvalidIterations)));
        let init = KMeans::<f64, EuclideanDistance>::init_first_k;
        assert!(kmean.elbow_iter(&[3, 9], 10, &init, &conf).is_err());

        let table = kmean.elbow(&[], 0, KMeans::init_first_k, &conf);
        assert!(matches!(table, Err(KMeansError::InvalidIterations)));
        // an empty sweep yields an empty table
        let table = kmean.elbow(&[], 10, KMeans::init_first_k, &conf).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_error(), None);
    }

    #[test]
    fn failing_run_names_k() {
        let samples = vec![
            Point::new(0.0f64, 0.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0),
        ];
        let kmean = KMeans::new(samples, EuclideanDistance);
        for parallel in [false, true] {
            let conf = KMeansConfig::build().parallel(parallel).build();
            let res = kmean.elbow(&[1, 2, 3], 10, KMeans::init_first_k, &conf);
            match res {
                Err(KMeansError::RunFailed { k, source }) => {
                    assert_eq!(k, 2);
                    assert!(matches!(*source, KMeansError::UnassignedCentroid { centroid: 1, iteration: 1 }));
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn table_accessors() {
        let mut table = ErrorTable::new();
        table.push(2, 10.0f64);
        table.push(3, 12.5);
        table.push(4, 3.0);
        assert_eq!(table.len(), 3);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(2, 10.0), (3, 12.5), (4, 3.0)]);
        assert_eq!(table.max_error(), Some(12.5));
        assert_eq!(table.get(4), Some(3.0));
    }
}
