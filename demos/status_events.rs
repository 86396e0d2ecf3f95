use kmeans_elbow::*;

fn main() -> Result<()> {
    let raw: Vec<Point<f64>> = input::load_points(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cluster.txt"))?;
    let kmean = KMeans::normalized(&raw, EuclideanDistance)?;

	let conf = KMeansConfig::<f64>::build()
		.init_done(&|s| println!("Initialization completed: {:?}", s.centroids))
		.iteration_done(&|s, nr, new_distsum|
			println!("Iteration {} - Error: {:.4} -> {:.4} | Improvement: {:.4}",
				nr, s.distsum, new_distsum, s.distsum - new_distsum))
		.abort_strategy(AbortStrategy::NoImprovement { threshold: 1e-12 })
		.build();

    // Stop as soon as an iteration no longer improves the error
    let result = kmean.kmeans_lloyd(5, 1000, KMeans::init_first_k, &conf)?;

    println!("Centroids: {:?}", result.centroids);
    println!("Cluster sizes: {:?}", result.centroid_frequency);
    println!("Error: {} after {} iterations", result.distsum, result.iterations);
    Ok(())
}
