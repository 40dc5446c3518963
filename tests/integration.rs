//! Integration tests for DPForge

use dpforge::{fit_dpmeans, load_features, viz};
use ndarray::array;
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a test CSV file with two well-separated groups of points
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "sample,x,y").unwrap();

    // Group near the origin
    writeln!(file, "a1,0.00,0.00").unwrap();
    writeln!(file, "a2,0.10,0.00").unwrap();
    writeln!(file, "a3,0.00,0.10").unwrap();
    writeln!(file, "a4,0.10,0.10").unwrap();
    writeln!(file, "a5,0.05,0.05").unwrap();
    writeln!(file, "a6,0.02,0.08").unwrap();

    // Group near (8, 8)
    writeln!(file, "b1,8.00,8.00").unwrap();
    writeln!(file, "b2,8.10,8.00").unwrap();
    writeln!(file, "b3,8.00,8.10").unwrap();
    writeln!(file, "b4,8.10,8.10").unwrap();
    writeln!(file, "b5,8.05,8.05").unwrap();
    writeln!(file, "b6,8.02,8.08").unwrap();

    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    // Load the feature matrix
    let data = load_features(file_path, Some("sample")).unwrap();
    assert_eq!(data.features.shape(), &[12, 2]);
    assert_eq!(data.feature_names, vec!["x", "y"]);
    let labels = data.row_labels.as_ref().unwrap();
    assert_eq!(labels.len(), 12);
    assert_eq!(labels[0], "a1");
    assert_eq!(labels[11], "b6");

    // Fit with a threshold between the group spread and the group distance
    let fit = fit_dpmeans(&data.features, 4.0, 100, 1e-3, false).unwrap();

    assert_eq!(fit.n_clusters(), 2);
    assert!(fit.converged);
    assert_eq!(fit.cluster.len(), 12);

    // The two input groups end up in two different clusters
    let first = fit.cluster[0];
    let second = fit.cluster[6];
    assert_ne!(first, second);
    assert!(fit.cluster[..6].iter().all(|&c| c == first));
    assert!(fit.cluster[6..].iter().all(|&c| c == second));

    // Cluster sizes sum to the number of points, none empty
    assert_eq!(fit.size.iter().sum::<usize>(), 12);
    assert!(fit.size.iter().all(|&s| s > 0));
    assert_eq!(fit.ifault, 0);
}

#[test]
fn test_prediction_on_new_points() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let data = load_features(file_path, Some("sample")).unwrap();
    let fit = fit_dpmeans(&data.features, 4.0, 100, 1e-3, false).unwrap();

    let near_origin = array![0.05, 0.02];
    let near_far_group = array![7.9, 8.2];

    let a = fit.predict(near_origin.view()).unwrap();
    let b = fit.predict(near_far_group.view()).unwrap();

    assert_eq!(a, fit.cluster[0]);
    assert_eq!(b, fit.cluster[6]);
    assert_ne!(a, b);
}

#[test]
fn test_visualization_report() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let data = load_features(file_path, Some("sample")).unwrap();
    let fit = fit_dpmeans(&data.features, 4.0, 100, 1e-3, false).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let plot_path = out_dir.path().join("clusters.png");
    let plot_str = plot_path.to_str().unwrap();

    viz::generate_visualization_report(&data, &fit, plot_str).unwrap();

    assert!(plot_path.exists());
    assert!(out_dir.path().join("clusters_sizes.png").exists());
}

#[test]
fn test_repeat_fit_is_identical() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let data = load_features(file_path, Some("sample")).unwrap();
    let a = fit_dpmeans(&data.features, 4.0, 100, 1e-3, false).unwrap();
    let b = fit_dpmeans(&data.features, 4.0, 100, 1e-3, false).unwrap();

    assert_eq!(a.cluster, b.cluster);
    assert_eq!(a.centers, b.centers);
    assert_eq!(a.size, b.size);
    assert_eq!(a.iter, b.iter);
}

#[test]
fn test_huge_lambda_collapses_to_one_cluster() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let data = load_features(file_path, Some("sample")).unwrap();
    // Larger than any pairwise squared distance (max is ~131)
    let fit = fit_dpmeans(&data.features, 1000.0, 100, 1e-3, false).unwrap();

    assert_eq!(fit.n_clusters(), 1);
    assert!(fit.converged);
    assert_eq!(fit.size, vec![12]);
}

#[test]
fn test_invalid_lambda_fails_before_iterating() {
    let test_file = create_test_csv();
    let file_path = test_file.path().to_str().unwrap();

    let data = load_features(file_path, Some("sample")).unwrap();
    let err = fit_dpmeans(&data.features, -2.0, 100, 1e-3, false).unwrap_err();
    assert!(err.to_string().contains("lambda"));
}
