use kmeans_elbow::*;

fn main() -> Result<()> {
    let raw: Vec<Point<f64>> = input::load_points(concat!(env!("CARGO_MANIFEST_DIR"), "/data/cluster.txt"))?;
    let kmean = KMeans::normalized(&raw, EuclideanDistance)?;
    let ks: Vec<usize> = (1..=10).collect();

    // Lazy sweep: every entry is calculated when it is requested
    let init = KMeans::<f64, EuclideanDistance>::init_first_k;
    let conf = KMeansConfig::default();
    let mut table = ErrorTable::new();
    for entry in kmean.elbow_iter(&ks, 1000, &init, &conf)? {
        let (k, error) = entry?;
        println!("k={:<2} error={:.6}", k, error);
        table.push(k, error);
    }

    print!("{}", report::render_bar_chart(&table, 60));
    Ok(())
}
