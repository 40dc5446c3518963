//! Visualization functions using Plotters for cluster analysis

use crate::data::FeatureMatrix;
use crate::model::DpMeansFit;
use plotters::prelude::*;

/// Create scatter plot of the first two feature columns colored by cluster
///
/// The cluster count is not known in advance with DP-means, so colors come
/// from a rotating palette instead of a fixed list.
///
/// # Arguments
/// * `data` - Feature matrix with column names
/// * `fit` - Fitted DP-means model with cluster assignments
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
pub fn create_cluster_visualization(
    data: &FeatureMatrix,
    fit: &DpMeansFit,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    if data.n_features() < 2 {
        anyhow::bail!("need at least two feature columns to draw a scatter plot");
    }

    let title = plot_title.unwrap_or("DP-means Clustering (Colored by Cluster)");

    let x_values: Vec<f64> = data.features.column(0).to_vec();
    let y_values: Vec<f64> = data.features.column(1).to_vec();

    // Calculate plot bounds with some padding
    let x_min = x_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = x_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let y_min = y_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let y_max = y_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let x_pad = ((x_max - x_min) * 0.05).max(0.5);
    let y_pad = ((y_max - y_min) * 0.05).max(0.5);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )?;

    chart
        .configure_mesh()
        .x_desc(data.feature_names[0].as_str())
        .y_desc(data.feature_names[1].as_str())
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // Plot data points colored by cluster (assignments are 1-indexed)
    for (i, (&x, &y)) in x_values.iter().zip(y_values.iter()).enumerate() {
        let color = Palette99::pick(fit.cluster[i] - 1);
        chart.draw_series(std::iter::once(Circle::new((x, y), 4, color.filled())))?;
    }

    // Plot centers as larger squares
    let dx = x_pad * 0.3;
    let dy = y_pad * 0.3;
    for (cluster_idx, center) in fit.centers.outer_iter().enumerate() {
        let cx = center[0];
        let cy = center[1];
        let color = Palette99::pick(cluster_idx);

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(cx - dx, cy - dy), (cx + dx, cy + dy)],
                color.filled(),
            )))?
            .label(format!("Cluster {} center", cluster_idx + 1))
            .legend(move |(x, y)| {
                Rectangle::new(
                    [(x, y), (x + 10, y + 10)],
                    Palette99::pick(cluster_idx).filled(),
                )
            });
    }

    chart.configure_series_labels().draw()?;

    root.present()?;
    println!("Cluster visualization saved to: {}", output_path);

    Ok(())
}

/// Create a simple bar chart of cluster sizes
pub fn create_cluster_size_chart(fit: &DpMeansFit, output_path: &str) -> crate::Result<()> {
    let max_size = *fit.size.iter().max().unwrap_or(&1) as f64;
    let k = fit.n_clusters();

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Cluster Sizes", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.5..(k as f64 + 0.5), 0f64..(max_size * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Cluster")
        .y_desc("Number of Points")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // One bar per cluster, 1-indexed to match the assignment vector
    for (cluster_idx, &size) in fit.size.iter().enumerate() {
        let center = (cluster_idx + 1) as f64;
        let color = Palette99::pick(cluster_idx);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(center - 0.4, 0.0), (center + 0.4, size as f64)],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Cluster size chart saved to: {}", output_path);

    Ok(())
}

/// Print cluster statistics to console
pub fn print_cluster_statistics(data: &FeatureMatrix, fit: &DpMeansFit) {
    println!("\n=== Cluster Statistics ===");
    println!("Number of clusters: {}", fit.n_clusters());
    println!("Total points: {}", data.n_samples());
    println!("Iterations: {}", fit.iter);
    println!(
        "Termination: {}",
        if fit.converged {
            "converged"
        } else {
            "iteration limit"
        }
    );
    println!("Penalized objective (totss): {:.4}", fit.totss);
    println!("Total within-cluster sum of squares: {:.4}", fit.tot_withinss);

    println!("\nCluster sizes:");
    for (i, &size) in fit.size.iter().enumerate() {
        let percentage = (size as f64 / data.n_samples() as f64) * 100.0;
        println!(
            "  Cluster {}: {} points ({:.1}%), withinss = {:.4}",
            i + 1,
            size,
            percentage,
            fit.withinss[i]
        );
    }

    println!("\nCluster centers:");
    print!("  Cluster");
    for name in &data.feature_names {
        print!(" | {:>12}", name);
    }
    println!();
    for (i, center) in fit.centers.outer_iter().enumerate() {
        print!("  {:7}", i + 1);
        for value in center.iter() {
            print!(" | {:12.4}", value);
        }
        println!();
    }
}

/// Print the assignment vector with row identifiers when the input had them
pub fn print_assignments(data: &FeatureMatrix, fit: &DpMeansFit) {
    let Some(labels) = &data.row_labels else {
        return;
    };

    println!("\nAssignments:");
    for (label, cluster) in labels.iter().zip(fit.cluster.iter()) {
        println!("  {}: cluster {}", label, cluster);
    }
}

/// Generate a comprehensive visualization report
pub fn generate_visualization_report(
    data: &FeatureMatrix,
    fit: &DpMeansFit,
    base_output_path: &str,
) -> crate::Result<()> {
    // Main cluster plot
    if data.n_features() >= 2 {
        create_cluster_visualization(data, fit, base_output_path, None)?;
    } else {
        log::warn!("fewer than two feature columns; skipping the scatter plot");
    }

    // Cluster size chart
    let size_chart_path = base_output_path.replace(".png", "_sizes.png");
    create_cluster_size_chart(fit, &size_chart_path)?;

    // Print statistics
    print_cluster_statistics(data, fit);

    Ok(())
}
