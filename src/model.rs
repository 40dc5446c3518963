//! DP-means clustering implementation
//!
//! DP-means is a nonparametric relative of k-means: instead of fixing the
//! number of clusters up front, a point that is farther than `lambda`
//! (squared Euclidean) from every existing center founds a new cluster.
//! The loop alternates assignment and center updates until the penalized
//! objective `sum(withinss) + lambda * k` stops decreasing.

use log::info;
use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::error::DpMeansError;

/// Fitted DP-means model.
///
/// Field names follow the conventional partition-clustering output shape.
/// Note that `totss` holds the final *penalized* objective
/// (`sum(withinss) + lambda * k`), not the raw total sum of squares, and
/// `betweenss` holds the sum of `withinss`. Both are inherited quirks of
/// the interface this mirrors.
#[derive(Debug, Clone)]
pub struct DpMeansFit {
    /// Cluster centers, one row per cluster (k, n_features)
    pub centers: Array2<f64>,
    /// Per-point cluster assignment, 1-indexed
    pub cluster: Vec<usize>,
    /// Final penalized objective
    pub totss: f64,
    /// Per-cluster within-cluster sum of squares
    pub withinss: Vec<f64>,
    /// Sum of `withinss`
    pub betweenss: f64,
    /// Identical to `betweenss`, retained for interface compatibility
    pub tot_withinss: f64,
    /// Per-cluster member counts
    pub size: Vec<usize>,
    /// Iterations actually executed
    pub iter: usize,
    /// Status flag, always 0 (no fault path is defined)
    pub ifault: i32,
    /// Whether the objective delta fell below tolerance before the
    /// iteration limit
    pub converged: bool,
}

impl DpMeansFit {
    /// Number of clusters found.
    pub fn n_clusters(&self) -> usize {
        self.centers.nrows()
    }

    /// Classify a new point by its nearest center, 1-indexed.
    pub fn predict(&self, point: ArrayView1<f64>) -> Result<usize, DpMeansError> {
        if point.len() != self.centers.ncols() {
            return Err(DpMeansError::invalid_input(format!(
                "point has {} features, model was fitted on {}",
                point.len(),
                self.centers.ncols()
            )));
        }

        let mut closest = 0;
        let mut min_distance = f64::INFINITY;
        for (idx, center) in self.centers.outer_iter().enumerate() {
            let distance = squared_distance(point, center);
            if distance < min_distance {
                min_distance = distance;
                closest = idx;
            }
        }
        Ok(closest + 1)
    }
}

/// Fit a DP-means model.
///
/// # Arguments
/// * `features` - Data matrix, one row per point (n_samples, n_features)
/// * `lambda` - Cluster creation threshold on squared Euclidean distance
/// * `max_iter` - Maximum number of assign/update iterations
/// * `tol` - Minimum objective decrease required to keep iterating
/// * `verbose` - Emit per-iteration progress on the diagnostic stream
///
/// # Returns
/// * Fitted [`DpMeansFit`] with assignments and objective breakdown
pub fn fit_dpmeans(
    features: &Array2<f64>,
    lambda: f64,
    max_iter: usize,
    tol: f64,
    verbose: bool,
) -> Result<DpMeansFit, DpMeansError> {
    validate_input(features, lambda)?;
    validate_config(max_iter, tol)?;

    let n_samples = features.nrows();

    // Seed a single cluster at the global feature mean.
    let global_mean = features
        .mean_axis(Axis(0))
        .ok_or_else(|| DpMeansError::invalid_input("data matrix has zero rows"))?;
    let mut centers: Vec<Array1<f64>> = vec![global_mean];
    let mut assignments = vec![0usize; n_samples];

    let mut withinss: Vec<f64> = Vec::new();
    let mut objective = f64::INFINITY;
    let mut previous_objective = f64::INFINITY;
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=max_iter {
        assign_points(features, &mut centers, lambda, &mut assignments);
        withinss = update_centers(features, &mut assignments, &mut centers)?;

        let k = centers.len();
        objective = withinss.iter().sum::<f64>() + lambda * k as f64;
        iterations = iteration;

        if verbose {
            info!(
                "After iteration {}: clusters = {}, penalized sum of squares = {:.4}",
                iteration, k, objective
            );
        }

        // The stopping test only looks at the delta's sign and magnitude;
        // it needs a previous objective, so it first applies at iteration 2.
        if iteration > 1 && previous_objective - objective <= tol {
            converged = true;
            break;
        }
        previous_objective = objective;
    }

    if verbose {
        if converged {
            info!("Reached convergence");
        } else {
            info!("Reached iteration limit");
        }
    }

    let k = centers.len();
    let n_features = features.ncols();
    let mut size = vec![0usize; k];
    for &label in &assignments {
        size[label - 1] += 1;
    }

    let mut flat = Vec::with_capacity(k * n_features);
    for center in &centers {
        flat.extend(center.iter().copied());
    }
    let centers = Array2::from_shape_vec((k, n_features), flat).map_err(|e| {
        DpMeansError::inconsistent_state(format!("center matrix has wrong shape: {e}"))
    })?;

    let tot_withinss = withinss.iter().sum::<f64>();

    Ok(DpMeansFit {
        centers,
        cluster: assignments,
        totss: objective,
        withinss,
        betweenss: tot_withinss,
        tot_withinss,
        size,
        iter: iterations,
        ifault: 0,
        converged,
    })
}

/// Assign every point to its nearest center, founding a new cluster when no
/// center is within `lambda`.
///
/// Points are processed strictly in row order: a cluster founded mid-pass
/// keeps its founding point as the center for the rest of the pass and can
/// absorb subsequent points. This ordering is part of the contract, so the
/// loop must stay sequential.
fn assign_points(
    features: &Array2<f64>,
    centers: &mut Vec<Array1<f64>>,
    lambda: f64,
    assignments: &mut [usize],
) {
    for (i, point) in features.outer_iter().enumerate() {
        let mut closest = 0;
        let mut min_distance = f64::INFINITY;
        for (idx, center) in centers.iter().enumerate() {
            let distance = squared_distance(point, center.view());
            // Strict comparison keeps ties on the lowest cluster index.
            if distance < min_distance {
                min_distance = distance;
                closest = idx;
            }
        }

        if min_distance <= lambda {
            assignments[i] = closest + 1;
        } else {
            centers.push(point.to_owned());
            assignments[i] = centers.len();
        }
    }
}

/// Recompute each cluster's center as the mean of its current members and
/// return the per-cluster within-cluster sum of squares against the new
/// centers.
///
/// The cluster set is re-derived from the assignment vector: a cluster that
/// retained no members in the last pass (possible once points migrate, and
/// for the seed cluster on the very first pass) is dropped and the survivors
/// are renumbered compactly, rewriting `assignments` in place.
fn update_centers(
    features: &Array2<f64>,
    assignments: &mut [usize],
    centers: &mut Vec<Array1<f64>>,
) -> Result<Vec<f64>, DpMeansError> {
    let k = centers.len();
    let n_features = features.ncols();

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &label) in assignments.iter().enumerate() {
        if label == 0 || label > k {
            return Err(DpMeansError::inconsistent_state(format!(
                "point {i} assigned to nonexistent cluster {label} (k = {k})"
            )));
        }
        members[label - 1].push(i);
    }

    let mut new_centers: Vec<Array1<f64>> = Vec::with_capacity(k);
    let mut withinss: Vec<f64> = Vec::with_capacity(k);

    for group in members.iter().filter(|g| !g.is_empty()) {
        let mut mean = Array1::<f64>::zeros(n_features);
        for &i in group {
            mean += &features.row(i);
        }
        mean /= group.len() as f64;

        let label = new_centers.len() + 1;
        let mut ss = 0.0;
        for &i in group {
            assignments[i] = label;
            ss += squared_distance(features.row(i), mean.view());
        }

        new_centers.push(mean);
        withinss.push(ss);
    }

    if new_centers.is_empty() {
        return Err(DpMeansError::inconsistent_state(
            "no cluster retained any members",
        ));
    }

    *centers = new_centers;
    Ok(withinss)
}

fn validate_input(features: &Array2<f64>, lambda: f64) -> Result<(), DpMeansError> {
    if !(lambda > 0.0) {
        return Err(DpMeansError::invalid_input(format!(
            "lambda must be positive, got {lambda}"
        )));
    }
    if features.nrows() == 0 {
        return Err(DpMeansError::invalid_input("data matrix has zero rows"));
    }
    if features.ncols() == 0 {
        return Err(DpMeansError::invalid_input("data matrix has zero columns"));
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(DpMeansError::invalid_input(
            "data matrix contains non-finite values",
        ));
    }
    Ok(())
}

fn validate_config(max_iter: usize, tol: f64) -> Result<(), DpMeansError> {
    if max_iter < 1 {
        return Err(DpMeansError::invalid_configuration(
            "max_iter must be at least 1",
        ));
    }
    if !(tol >= 0.0) {
        return Err(DpMeansError::invalid_configuration(format!(
            "tol must be non-negative, got {tol}"
        )));
    }
    Ok(())
}

/// Squared Euclidean distance between two points.
fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
}
