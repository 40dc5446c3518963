//! Data loading: CSV to ndarray feature matrix using Polars

use anyhow::Context;
use ndarray::Array2;
use polars::prelude::*;

/// Feature matrix with boundary metadata.
///
/// Column names and row labels never enter the fit; they only annotate
/// output (printed centers, labeled assignments).
#[derive(Debug)]
pub struct FeatureMatrix {
    /// Numeric features, one row per data point (n_samples, n_features)
    pub features: Array2<f64>,
    /// Input column names, in feature order
    pub feature_names: Vec<String>,
    /// Optional row identifiers from the id column
    pub row_labels: Option<Vec<String>>,
}

impl FeatureMatrix {
    /// Number of data points.
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Load a CSV file into a feature matrix.
///
/// Every column must be numeric and free of missing values, except an
/// optional `id_column` which is pulled out as row labels instead of a
/// feature.
///
/// # Arguments
/// * `file_path` - Path to the CSV file
/// * `id_column` - Column holding row identifiers, excluded from features
///
/// # Returns
/// * `FeatureMatrix` with features, column names, and optional row labels
pub fn load_features(file_path: &str, id_column: Option<&str>) -> crate::Result<FeatureMatrix> {
    let df = CsvReader::from_path(file_path)
        .with_context(|| format!("failed to open {file_path}"))?
        .has_header(true)
        .finish()
        .with_context(|| format!("failed to read {file_path}"))?;

    if df.height() == 0 {
        anyhow::bail!("no data rows found in {}", file_path);
    }

    let row_labels = match id_column {
        Some(name) => {
            let series = df
                .column(name)
                .with_context(|| format!("id column '{name}' not found"))?;
            let labels: Vec<String> = series
                .cast(&DataType::Utf8)?
                .utf8()?
                .into_iter()
                .map(|v| v.unwrap_or("").to_string())
                .collect();
            Some(labels)
        }
        None => None,
    };

    let mut feature_names = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for series in df.get_columns() {
        if id_column == Some(series.name()) {
            continue;
        }
        if !series.dtype().is_numeric() {
            anyhow::bail!(
                "column '{}' is not numeric; pass --id-column to treat it as a row label",
                series.name()
            );
        }
        if series.null_count() > 0 {
            anyhow::bail!(
                "column '{}' contains {} missing values",
                series.name(),
                series.null_count()
            );
        }

        let values: Vec<f64> = series
            .cast(&DataType::Float64)?
            .f64()?
            .into_no_null_iter()
            .collect();
        feature_names.push(series.name().to_string());
        columns.push(values);
    }

    if columns.is_empty() {
        anyhow::bail!("no numeric feature columns found in {}", file_path);
    }

    // Assemble row-major from the per-column vectors.
    let n_samples = df.height();
    let n_features = columns.len();
    let mut data = Vec::with_capacity(n_samples * n_features);
    for row in 0..n_samples {
        for column in &columns {
            data.push(column[row]);
        }
    }
    let features = Array2::from_shape_vec((n_samples, n_features), data)?;

    Ok(FeatureMatrix {
        features,
        feature_names,
        row_labels,
    })
}
