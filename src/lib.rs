//! DPForge: DP-means clustering as a CLI and library
//!
//! DP-means is a nonparametric generalization of k-means: rather than fixing
//! the number of clusters, a distance threshold `lambda` controls when a
//! point founds a new cluster, so k is discovered from the data.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_features, FeatureMatrix};
pub use error::DpMeansError;
pub use model::{fit_dpmeans, DpMeansFit};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
