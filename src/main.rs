//! DPForge: DP-means clustering CLI
//!
//! This is the main entrypoint that orchestrates data loading, model
//! fitting, reporting, and visualization.

use anyhow::Result;
use clap::Parser;
use dpforge::{fit_dpmeans, load_features, viz, Args};
use std::time::Instant;

fn main() -> Result<()> {
    // Progress from the fit loop goes through the log facade to stderr,
    // keeping stdout free for the result tables.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.verbose() {
        println!("DPForge - DP-means clustering");
        println!("=============================\n");
    }

    let start_time = Instant::now();

    // Step 1: Load the feature matrix
    if args.verbose() {
        println!("Step 1: Loading data");
        println!("  Input file: {}", args.input);
        if let Some(id) = &args.id_column {
            println!("  Id column: {}", id);
        }
    }

    let data_start = Instant::now();
    let data = load_features(&args.input, args.id_column.as_deref())?;
    let data_time = data_start.elapsed();

    println!(
        "✓ Data loaded: {} points, {} features",
        data.n_samples(),
        data.n_features()
    );
    if args.verbose() {
        println!("  Loading time: {:.2}s", data_time.as_secs_f64());
        println!("  Features: {}", data.feature_names.join(", "));
    }

    // Step 2: Fit the DP-means model
    if args.verbose() {
        println!("\nStep 2: Fitting DP-means model");
        println!("  Lambda: {}", args.lambda);
        println!("  Max iterations: {}", args.max_iters);
        println!("  Tolerance: {}", args.tolerance);
    }

    let fit_start = Instant::now();
    let fit = fit_dpmeans(
        &data.features,
        args.lambda,
        args.max_iters,
        args.tolerance,
        args.verbose(),
    )?;
    let fit_time = fit_start.elapsed();

    println!(
        "✓ Model fitted: {} clusters in {} iterations",
        fit.n_clusters(),
        fit.iter
    );
    if args.verbose() {
        println!("  Fitting time: {:.2}s", fit_time.as_secs_f64());
    }

    // Step 3: Report statistics and render plots
    if args.verbose() {
        println!("\nStep 3: Generating report");
        println!("  Output file: {}", args.output);
    }

    viz::generate_visualization_report(&data, &fit, &args.output)?;
    viz::print_assignments(&data, &fit);

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
