//! kmeans-elbow CLI
//!
//! Loads a file of `x;y` samples, normalizes them, runs k-means for every k of the sweep
//! and prints the total squared error per k. Exits with code 1 on any error.

use clap::{error::ErrorKind, CommandFactory, Parser};
use kmeans_elbow::{input, report, AbortStrategy, KMeans, KMeansConfig, KMeansError, EuclideanDistance};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Elbow-method sweep over k-means clusterings of two-dimensional samples
#[derive(Parser, Debug)]
#[command(name = "kmeans-elbow")]
#[command(version)]
#[command(about = "Print the k-means squared error for a sweep of cluster counts")]
struct Cli {
    /// Sample file, one `x;y` record per line
    input: PathBuf,

    /// Explicit list of cluster counts, e.g. `--k 2,4,8`
    #[arg(long = "k", value_delimiter = ',', conflicts_with_all = ["min_k", "max_k"])]
    ks: Vec<usize>,

    /// Smallest k of the sweep
    #[arg(long, default_value_t = 2)]
    min_k: usize,

    /// Largest k of the sweep (inclusive)
    #[arg(long, default_value_t = 10)]
    max_k: usize,

    /// Iterations per k-means run
    #[arg(short, long, default_value_t = 1000)]
    iterations: usize,

    /// Stop a run once no centroid moves farther than this distance
    #[arg(long)]
    early_stop: Option<f64>,

    /// Spread the sweep over all cores
    #[arg(long)]
    parallel: bool,

    /// Also print the errors as a bar chart
    #[arg(long)]
    chart: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Cluster counts to sweep. An explicit `--k` list wins over the `--min-k`/`--max-k` range.
    fn sweep(&self) -> Result<Vec<usize>, clap::Error> {
        if !self.ks.is_empty() {
            return Ok(self.ks.clone());
        }
        if self.min_k > self.max_k {
            return Err(Cli::command().error(
                ErrorKind::ValueValidation,
                format!("--min-k ({}) must not be greater than --max-k ({})", self.min_k, self.max_k),
            ));
        }
        Ok((self.min_k..=self.max_k).collect())
    }
}

fn run(cli: &Cli, ks: &[usize]) -> Result<(), KMeansError> {
    let raw = input::load_points::<f64>(&cli.input)?;
    let kmean = KMeans::normalized(&raw, EuclideanDistance)?;

    let abort_strategy = match cli.early_stop {
        Some(epsilon) => AbortStrategy::CentroidShift { epsilon },
        None => AbortStrategy::FixedIterations,
    };
    let conf = KMeansConfig::build()
        .abort_strategy(abort_strategy)
        .parallel(cli.parallel)
        .build();
    info!(samples = kmean.sample_cnt(), ?ks, iterations = cli.iterations, "starting elbow sweep");

    let table = kmean.elbow(ks, cli.iterations, KMeans::init_first_k, &conf)?;
    print!("{}", report::render_table(&table));
    if cli.chart {
        println!();
        print!("{}", report::render_bar_chart(&table, 50));
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let ks = cli.sweep().unwrap_or_else(|e| e.exit());

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli, &ks) {
        error!(error = %e, "elbow sweep failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
