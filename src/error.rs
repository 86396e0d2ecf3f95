use crate::memory::Axis;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KMeansError>;

/// Error types for normalization, clustering and error sweeps.
#[derive(Error, Debug)]
pub enum KMeansError {
    /// No samples were given at all
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A sample has an infinite or NaN coordinate
    #[error("Sample {index} has a non-finite coordinate")]
    NonFiniteSample { index: usize },

    /// All samples share the same value on one axis, so it can not be range-scaled
    #[error("Degenerate {axis} axis: all samples have the same value (range is 0)")]
    DegenerateAxis { axis: Axis },

    /// The mean of an empty set of points was requested
    #[error("Can not compute the centroid of an empty cluster")]
    EmptyCluster,

    /// A centroid ended up without any samples during an update step
    #[error("Centroid {centroid} has no assigned samples in iteration {iteration}")]
    UnassignedCentroid { centroid: usize, iteration: usize },

    /// The requested amount of clusters is outside of `[1, sample_cnt]`
    #[error("Invalid k value {k}: must be within [1, {sample_cnt}]")]
    InvalidK { k: usize, sample_cnt: usize },

    /// The iteration budget has to be positive
    #[error("Invalid iteration budget: must be greater than 0")]
    InvalidIterations,

    /// A seeding method produced the wrong amount of centroids
    #[error("Invalid seed: expected {expected} centroids, got {found}")]
    InvalidSeed { expected: usize, found: usize },

    /// One run of an elbow sweep failed
    #[error("K-Means run for k={k} failed: {source}")]
    RunFailed {
        k: usize,
        #[source]
        source: Box<KMeansError>,
    },

    /// A line of the input file is not of the form `x;y`
    #[error("Malformed input on line {line}: {content:?}")]
    Parse { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KMeansError {
    /// For [`KMeansError::RunFailed`], the innermost error that caused the run to fail.
    pub fn root_cause(&self) -> &KMeansError {
        match self {
            KMeansError::RunFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
