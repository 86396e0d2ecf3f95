use crate::elbow::{ElbowSweep, ErrorTable};
use crate::error::{KMeansError, Result};
use crate::memory::*;
use crate::partition::{nearest_centroid, voronoi};
use crate::{normalize, AbortStrategy, DistanceFunction, EuclideanDistance};
use rayon::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a (dyn Fn(&KMeansState<T>) + Sync);
pub type IterationDoneCallbackFn<'a, T> = &'a (dyn Fn(&KMeansState<T>, usize, T) + Sync);

/// This is a structure holding various configuration options for k-means calculations and error sweeps,
/// such as the abort-strategy, whether to use the rayon thread-pool, or a couple of callbacks, that can be
/// set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration (starting at 1)
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// The abort-strategy to use for the running calculation
    pub(crate) abort_strategy: AbortStrategy<T>,
    /// Whether cluster assignments and elbow sweeps are spread over the rayon thread-pool
    pub(crate) parallel: bool,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            abort_strategy: AbortStrategy::FixedIterations,
            parallel: false,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("abort_strategy", &self.abort_strategy)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the abort-strategy to use during a running k-means calculation. For more information,
    /// see documentation of [`AbortStrategy`].
    /// ## Default
    /// [`AbortStrategy::FixedIterations`]: every run performs exactly `max_iter` iterations.
    pub fn abort_strategy(mut self, abort_strategy: AbortStrategy<T>) -> Self {
        self.config.abort_strategy = abort_strategy; self
    }
    /// Spread the nearest-centroid search and the runs of an elbow sweep over the rayon thread-pool.
    /// Results are merged in input order and are identical to the sequential calculation.
    /// ## Default
    /// `false`
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// This is the internally used data-structure, storing the current state during calculation, as
/// well as the final result, as returned by the API.
/// All mutations are done in this structure, making [`KMeans`] immutable, and therefore allowing
/// it to be used in parallel, without having to duplicate the input-data.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters that were requested when calculating this k-means result
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids (SSE)
/// - **centroids**: Calculated cluster centers
/// - **centroid_frequency**: Amount of samples in each centroid
/// - **assignments**: Vector mapping each sample to the centroid it was assigned to in the last iteration
/// - **clusters**: Each final centroid, paired with the samples of the last assignment
/// - **iterations**: Amount of iterations that were actually run
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<Point<T>>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub clusters: Vec<Cluster<T>>,
    pub iterations: usize,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::infinity(),
            centroids: Vec::with_capacity(k),
            centroid_frequency: vec![0usize; k],
            assignments: vec![0usize; sample_cnt],
            clusters: Vec::new(),
            iterations: 0,
        }
    }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the (already normalized) samples you want to operate on,
/// or use [`KMeans::normalized`] to have raw samples scaled first. The primitive type of the passed samples
/// will be the type used internally for all calculations, as well as the result as stored in the returned
/// [`KMeansState`] and [`ErrorTable`] structures.
///
/// ## Supported calculations
/// - k-Means clustering (Lloyd) [`KMeans::kmeans_lloyd`]
/// - Elbow-method error sweep over multiple k [`KMeans::elbow`], [`KMeans::elbow_iter`]
///
/// ## Supported initialization methods
/// - First-k samples [`KMeans::init_first_k`]
/// - Precomputed centroids [`KMeans::init_precomputed`]
pub struct KMeans<T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    pub(crate) samples: Vec<Point<T>>,
    pub(crate) distance: D,
}
impl<T: Primitive, D: DistanceFunction<T>> KMeans<T, D> {
    /// Create a new instance of the [`KMeans`] structure. The samples are used as they are.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples, in the order that decides seeding and assignment indices
    /// - **distance**: The metric used for the nearest-centroid search
    pub fn new(samples: Vec<Point<T>>, distance: D) -> Self {
        Self { samples, distance }
    }

    /// Normalize **samples** (see [`normalize`]) and create a [`KMeans`] instance from the result.
    pub fn normalized(samples: &[Point<T>], distance: D) -> Result<Self> {
        Ok(Self::new(normalize(samples)?, distance))
    }

    pub fn samples(&self) -> &[Point<T>] {
        &self.samples
    }

    pub fn sample_cnt(&self) -> usize {
        self.samples.len()
    }

    /// Reject sweep parameters before any iteration begins.
    pub(crate) fn validate(&self, k: usize, max_iter: usize) -> Result<()> {
        if k == 0 || k > self.samples.len() {
            return Err(KMeansError::InvalidK { k, sample_cnt: self.samples.len() });
        }
        if max_iter == 0 {
            return Err(KMeansError::InvalidIterations);
        }
        Ok(())
    }

    pub(crate) fn update_cluster_assignments(&self, centroids: &[Point<T>], parallel: bool) -> Vec<usize> {
        if !parallel {
            return voronoi(&self.samples, centroids, &self.distance);
        }
        assert!(!centroids.is_empty());
        // manually calculate work-packet size, because rayon does not do static scheduling (which is more apropriate here)
        let work_packet_size = (self.samples.len() / rayon::current_num_threads()).max(1);
        self.samples.par_iter()
            .with_min_len(work_packet_size)
            .map(|s| nearest_centroid(s, centroids, &self.distance))
            .collect()
    }


    /// Normal K-Means algorithm implementation (Lloyd). Each iteration assigns all samples to their nearest
    /// centroid, and then moves every centroid into the mean of its assigned samples.
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for (`1 <= k <= sample_cnt`)
    /// - **max_iter**: Amount of iterations. Unless an abort-strategy is configured, exactly this many are run.
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// Instance of [`KMeansState`], containing the final state (result).
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidK`] / [`KMeansError::InvalidIterations`] before anything is calculated
    /// - [`KMeansError::UnassignedCentroid`] when a centroid loses all of its samples
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_elbow::*;
    ///
    /// let samples = vec![
    ///     Point::new(0.0f64, 0.0), Point::new(10.0, 10.0), Point::new(0.5, 0.0), Point::new(10.0, 9.5),
    /// ];
    /// let kmean = KMeans::new(samples, EuclideanDistance);
    /// let result = kmean.kmeans_lloyd(2, 10, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
    ///
    /// assert_eq!(result.assignments, vec![0, 1, 0, 1]);
    /// println!("Centroids: {:?}", result.centroids);
    /// println!("Error: {}", result.distsum);
    /// ```
    pub fn kmeans_lloyd<'a, F>(&self, k: usize, max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<KMeansState<T>>
                where for<'c> F: FnOnce(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        crate::variants::Lloyd::calculate(self, k, max_iter, init, config)
    }

    /// Elbow-method sweep: run [`KMeans::kmeans_lloyd`] once for every value in **ks** and collect the
    /// total squared error of each run into an [`ErrorTable`] (in sweep order).
    ///
    /// All values of **ks** and **max_iter** are validated before the first run starts. A failing run
    /// aborts the sweep with [`KMeansError::RunFailed`], naming the k that failed.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_elbow::*;
    ///
    /// let raw = vec![
    ///     Point::new(1.0f64, 1.0), Point::new(9.0, 8.0), Point::new(1.5, 2.0),
    ///     Point::new(8.0, 9.0), Point::new(2.0, 1.5), Point::new(9.0, 9.0),
    /// ];
    /// let kmean = KMeans::normalized(&raw, EuclideanDistance).unwrap();
    /// let table = kmean.elbow(&[1, 2, 3], 100, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
    ///
    /// assert_eq!(table.ks(), vec![1, 2, 3]);
    /// assert!(table.get(2).unwrap() < table.get(1).unwrap());
    /// ```
    pub fn elbow<'a, F>(&self, ks: &[usize], max_iter: usize, init: F, config: &KMeansConfig<'a, T>) -> Result<ErrorTable<T>>
                where for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> + Sync {
        crate::elbow::calculate(self, ks, max_iter, &init, config)
    }

    /// Lazy variant of [`KMeans::elbow`]: yields one `(k, error)` entry per value in **ks**, calculating
    /// each run only when it is requested. The returned iterator can be cloned to restart the sweep.
    ///
    /// Parameters are validated eagerly, so an invalid sweep fails before any run.
    pub fn elbow_iter<'s, 'a, F>(&'s self, ks: &'s [usize], max_iter: usize, init: &'s F, config: &'s KMeansConfig<'a, T>) -> Result<ElbowSweep<'s, 'a, T, D, F>>
                where for<'c> F: Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> {
        ElbowSweep::new(self, ks, max_iter, init, config)
    }

    /// First-k initialization method.
    ///
    /// ## Description
    /// Uses (copies of) the first k samples, in sample order, as initial centroids. This is deterministic
    /// and reproducible, but no diversity check is performed: duplicate samples at the start of the dataset
    /// lead to duplicate centroids.
    ///
    /// ## Note
    /// This method is not meant for direct invocation. Pass a reference to it, to an instance-method of [`KMeans`].
    pub fn init_first_k(kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>) -> Result<()> {
        crate::inits::firstk::calculate(kmean, state, config)
    }

    /// Precomputed initialization method
    ///
    /// ## Description
    /// Uses the given **centroids** as initial centroids. Their amount has to match the requested k.
    pub fn init_precomputed(centroids: Vec<Point<T>>)
            -> impl for<'c> Fn(&KMeans<T, D>, &mut KMeansState<T>, &KMeansConfig<'c, T>) -> Result<()> + Sync {
        move |kmean: &KMeans<T, D>, state: &mut KMeansState<T>, config: &KMeansConfig<'_, T>| {
            crate::inits::precomputed::calculate(kmean, state, config, &centroids)
        }
    }
}
