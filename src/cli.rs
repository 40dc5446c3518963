//! Command-line interface definitions and argument parsing

use clap::Parser;

/// DP-means clustering CLI: cluster a numeric CSV without fixing k
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "data.csv")]
    pub input: String,

    /// Cluster creation threshold on squared Euclidean distance
    #[arg(short, long)]
    pub lambda: f64,

    /// Column holding row identifiers, excluded from the features
    #[arg(long)]
    pub id_column: Option<String>,

    /// Output path for the visualization plot
    #[arg(short, long, default_value = "cluster_plot.png")]
    pub output: String,

    /// Maximum iterations for the DP-means loop
    #[arg(long, default_value = "100")]
    pub max_iters: usize,

    /// Minimum decrease in the penalized objective to keep iterating
    #[arg(long, default_value = "1e-3")]
    pub tolerance: f64,

    /// Suppress per-iteration progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Progress output is on by default; `--quiet` turns it off.
    pub fn verbose(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["dpforge", "--lambda", "2.5"]).unwrap();

        assert_eq!(args.input, "data.csv");
        assert_eq!(args.lambda, 2.5);
        assert_eq!(args.id_column, None);
        assert_eq!(args.output, "cluster_plot.png");
        assert_eq!(args.max_iters, 100);
        assert_eq!(args.tolerance, 1e-3);
        assert!(args.verbose());
    }

    #[test]
    fn test_lambda_required() {
        let result = Args::try_parse_from(["dpforge", "--input", "data.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_disables_verbose() {
        let args = Args::try_parse_from(["dpforge", "--lambda", "1.0", "--quiet"]).unwrap();
        assert!(!args.verbose());
    }
}
