//! Command line argument parsing for the tweetvec CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ml::DEFAULT_TEST_FRACTION;

/// tweetvec - feature extraction and vectorization for tweets
#[derive(Parser, Debug, Clone)]
#[command(name = "tweetvec")]
#[command(about = "Derive numeric feature vectors from tweets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TweetvecArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Feature configuration file (JSON)
    #[arg(short, long, env = "TWEETVEC_CONFIG")]
    pub config: Option<PathBuf>,

    /// VADER sentiment lexicon (overrides the configuration)
    #[arg(long, env = "TWEETVEC_SENTIMENT_LEXICON")]
    pub sentiment_lexicon: Option<PathBuf>,

    /// NRC emotion lexicon (overrides the configuration)
    #[arg(long, env = "TWEETVEC_EMOTION_LEXICON")]
    pub emotion_lexicon: Option<PathBuf>,

    /// Evaluate feature steps on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TweetvecArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Derive the features of a single tweet
    Features(FeaturesArgs),

    /// Turn a CSV dataset into a feature matrix
    Vectorize(VectorizeArgs),

    /// Split a dataset, fit a classifier and report its error rates
    Train(TrainArgs),
}

/// Arguments for deriving the features of one tweet
#[derive(clap::Args, Debug, Clone)]
pub struct FeaturesArgs {
    /// Tweet text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Creation timestamp in the configured datetime format (defaults to now)
    #[arg(long)]
    pub created: Option<String>,
}

/// Arguments shared by commands that read a CSV dataset
#[derive(clap::Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Input CSV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// Keep the first column instead of dropping it as a row index
    #[arg(long)]
    pub no_index_column: bool,
}

/// Arguments for vectorizing a dataset
#[derive(clap::Args, Debug, Clone)]
pub struct VectorizeArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Output CSV file for the feature matrix
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Append the label column to the matrix
    #[arg(long)]
    pub keep_labels: bool,
}

/// Arguments for training and validating a classifier
#[derive(clap::Args, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Fraction of rows held out for validation
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    pub test_fraction: f64,

    /// Seed of the train/test shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = TweetvecArgs::parse_from(["tweetvec", "features", "hello"]);
        assert_eq!(args.verbosity(), 1);

        let args = TweetvecArgs::parse_from(["tweetvec", "-vv", "features", "hello"]);
        assert_eq!(args.verbosity(), 2);

        let args = TweetvecArgs::parse_from(["tweetvec", "-q", "-vvv", "features", "hello"]);
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_parse_vectorize() {
        let args = TweetvecArgs::parse_from([
            "tweetvec",
            "-f",
            "json",
            "vectorize",
            "tweets.csv",
            "-o",
            "matrix.csv",
            "--keep-labels",
            "-d",
            ";",
        ]);

        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Vectorize(vectorize) => {
                assert_eq!(vectorize.dataset.input, PathBuf::from("tweets.csv"));
                assert_eq!(vectorize.output, PathBuf::from("matrix.csv"));
                assert_eq!(vectorize.dataset.delimiter, ';');
                assert!(vectorize.keep_labels);
                assert!(!vectorize.dataset.no_index_column);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_train_defaults() {
        let args = TweetvecArgs::parse_from(["tweetvec", "train", "tweets.csv"]);
        match args.command {
            Command::Train(train) => {
                assert_eq!(train.test_fraction, DEFAULT_TEST_FRACTION);
                assert_eq!(train.seed, 42);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
