//! # kmeans-elbow - API documentation
//!
//! kmeans-elbow is a small rust library for k-means-clustering of two-dimensional samples, and for
//! the elbow-method: sweeping the amount of clusters k and recording the total squared error of each run.
//!
//! ## Design target
//! Results are meant to be reproducible. Centroids are seeded deterministically (first-k, or precomputed),
//! ties between equally distant centroids always go to the lower index, and a k-means run performs exactly
//! the requested amount of iterations unless an [`AbortStrategy`] says otherwise.
//! Parallel execution (via rayon) is opt-in and yields the same results as the sequential calculation.
//!
//! ## Pipeline
//! 1. Samples are loaded ([`input::load_points`]) and normalized per axis ([`normalize`]), so both
//!    coordinates contribute on a comparable scale.
//! 2. [`KMeans::kmeans_lloyd`] alternates between assigning all samples to their nearest centroid ([`voronoi`])
//!    and moving every centroid into the mean of its samples ([`centroid`]).
//! 3. [`KMeans::elbow`] repeats this for every k of a sweep and collects the errors into an [`ErrorTable`],
//!    which can be rendered with the functions in [`report`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_elbow::*;
//!
//! let raw: Vec<Point<f64>> = input::parse_points("1;1\n1.5;2\n9;8\n8;9\n2;1.5\n9;9\n").unwrap();
//! let kmean = KMeans::normalized(&raw, EuclideanDistance).unwrap();
//!
//! let table = kmean.elbow(&[1, 2, 3], 100, KMeans::init_first_k, &KMeansConfig::default()).unwrap();
//! print!("{}", report::render_table(&table));
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans_elbow::*;
//!
//! let samples = vec![
//!     Point::new(0.0f64, 0.0), Point::new(10.0, 10.0), Point::new(0.5, 0.0), Point::new(10.0, 9.5),
//! ];
//! let conf = KMeansConfig::<f64>::build()
//!     .init_done(&|_| println!("Initialization completed."))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!             nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!     .abort_strategy(AbortStrategy::CentroidShift { epsilon: 1e-9 })
//!     .build();
//!
//! let kmean = KMeans::new(samples, EuclideanDistance);
//! let result = kmean.kmeans_lloyd(2, 1000, KMeans::init_first_k, &conf).unwrap();
//!
//! println!("Centroids: {:?}", result.centroids);
//! println!("Cluster-Assignments: {:?}", result.assignments);
//! println!("Error: {}", result.distsum);
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It is generic over the underlying primitive type and
//! the [`DistanceFunction`] used for assignments, and takes the (already normalized) samples into its ownership.
//! Calling one of its instance-methods does not mutate it, every calculation keeps its own [`KMeansState`].
//!
//! The initialization-methods are static methods within the [`KMeans`] struct, which are simply passed in as reference.

#[macro_use] mod helpers;
mod memory;
mod error;
mod api;
mod distances;
mod normalize;
mod partition;
mod variants;
mod inits;
mod abort_strategy;
mod elbow;
pub mod input;
pub mod report;

pub use abort_strategy::AbortStrategy;
pub use api::{KMeansState, KMeansConfig, KMeansConfigBuilder, KMeans, InitDoneCallbackFn, IterationDoneCallbackFn};
pub use distances::{DistanceFunction, EuclideanDistance, squared_distance};
pub use elbow::{ElbowSweep, ErrorTable};
pub use error::{KMeansError, Result};
pub use memory::{Axis, Cluster, Point, Primitive};
pub use normalize::{axis_scales, normalize, AxisScale};
pub use partition::{centroid, voronoi};
