use kernclust::{OnlineConfig, ShorterInput};
use rand::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Stream points from three blobs, plus a little uniform noise, through an
    // engine that may hold at most 12 clusters. Memory stays fixed no matter
    // how long the stream runs.
    let centers = [[0.0, 0.0], [40.0, 5.0], [10.0, 60.0]];
    let mut rng = StdRng::seed_from_u64(7);

    let mut engine = OnlineConfig::new(12)
        .with_sigma(1e-2)
        .with_shorter_input(ShorterInput::Reject)
        .build()?;

    for step in 0..5_000 {
        let point = if step % 50 == 0 {
            // Noise.
            vec![rng.random_range(-20.0..80.0), rng.random_range(-20.0..80.0)]
        } else {
            let c = centers[rng.random_range(0..centers.len())];
            vec![
                c[0] + rng.random_range(-2.0..2.0),
                c[1] + rng.random_range(-2.0..2.0),
            ]
        };
        engine.cluster(&point)?;
    }

    println!(
        "points={} clusters={} merges={}",
        engine.n_points(),
        engine.len(),
        engine.n_merges()
    );

    let trimmed = engine.trimmed_clusters();
    println!("trimmed={}", trimmed.len());
    for c in trimmed {
        println!("  {c}");
    }

    Ok(())
}
