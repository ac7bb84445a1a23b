//! Command implementations for the tweetvec CLI.

use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use chrono::Local;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::FeatureConfig;
use crate::document::converter::BatchConverter;
use crate::document::converter::csv::CsvBatchConverter;
use crate::document::{Batch, Document};
use crate::error::{Result, TweetvecError};
use crate::features::{FeatureComposer, FeatureRecord};
use crate::ml::{Classifier, NearestCentroidClassifier, error_rate, train_test_split};
use crate::vectorize::Vectorizer;

/// Execute a CLI command.
pub fn execute_command(args: TweetvecArgs) -> Result<()> {
    match &args.command {
        Command::Features(features_args) => derive_features(features_args.clone(), &args),
        Command::Vectorize(vectorize_args) => vectorize_dataset(vectorize_args.clone(), &args),
        Command::Train(train_args) => train_classifier(train_args.clone(), &args),
    }
}

/// Build the feature configuration from the config file and global flags.
pub fn load_config(cli_args: &TweetvecArgs) -> Result<FeatureConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            FeatureConfig::from_file(path)?
        }
        None => FeatureConfig::default(),
    };

    if let Some(path) = &cli_args.sentiment_lexicon {
        config = config.with_sentiment_lexicon(path);
    }
    if let Some(path) = &cli_args.emotion_lexicon {
        config = config.with_emotion_lexicon(path);
    }
    if cli_args.sequential {
        config = config.with_parallel(false);
    }

    Ok(config)
}

/// Derive the features of one tweet.
fn derive_features(args: FeaturesArgs, cli_args: &TweetvecArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let composer = FeatureComposer::from_config(&config)?;

    let created = match args.created {
        Some(created) => created,
        None => current_timestamp(&config.datetime_format)?,
    };

    let columns = vec![config.text_column.clone(), config.created_column.clone()];
    let batch = Batch::from_rows(
        columns,
        vec![
            Document::builder()
                .add_text(config.text_column.as_str(), args.text.as_str())
                .add_text(config.created_column.as_str(), created.as_str())
                .build(),
        ],
    );

    let augmented = composer.augment(&batch)?;
    let features = augmented.columns()[batch.columns().len()..]
        .iter()
        .map(|column| {
            let value = augmented
                .value(0, column)
                .map(|v| v.to_f64())
                .unwrap_or_default();
            (column.clone(), value)
        })
        .collect::<FeatureRecord>();

    let result = FeaturesResult {
        text: args.text,
        created,
        features,
    };

    output_result("Derived features", &result, cli_args)
}

/// Turn a CSV dataset into a feature matrix CSV.
fn vectorize_dataset(args: VectorizeArgs, cli_args: &TweetvecArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(cli_args)?;
    let composer = FeatureComposer::from_config(&config)?;
    let batch = read_dataset(&args.dataset, &config)?;

    let mut vectorizer = Vectorizer::with_config(batch, composer, config);
    let extraction = vectorizer.extract(args.keep_labels)?;

    let file = File::create(&args.output)?;
    extraction
        .matrix
        .write_csv(BufWriter::new(file), extraction.labels.as_deref())?;

    let (rows, columns) = extraction.matrix.shape();
    let result = VectorizeResult {
        input: args.dataset.input.display().to_string(),
        output: args.output.display().to_string(),
        rows,
        columns,
        labels_kept: args.keep_labels,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result(
        &format!("Wrote feature matrix to {}", args.output.display()),
        &result,
        cli_args,
    )
}

/// Split a dataset, fit a nearest-centroid classifier and report its error
/// on both halves.
fn train_classifier(args: TrainArgs, cli_args: &TweetvecArgs) -> Result<()> {
    let start_time = Instant::now();
    let config = load_config(cli_args)?;
    let composer = FeatureComposer::from_config(&config)?;
    let batch = read_dataset(&args.dataset, &config)?;

    let (train, test) = train_test_split(
        &batch,
        &config.label_column,
        args.test_fraction,
        args.seed,
    )?;
    if train.is_empty() || test.is_empty() {
        return Err(TweetvecError::invalid_argument(format!(
            "dataset of {} rows is too small to split",
            batch.len()
        )));
    }
    info!(
        "Split {} rows into {} train and {} test rows",
        batch.len(),
        train.len(),
        test.len()
    );

    let mut vectorizer = Vectorizer::with_config(train, composer, config);
    let train_set = vectorizer.extract(true)?;
    vectorizer.set_source(test);
    let test_set = vectorizer.extract(true)?;

    let train_labels = labels_of(train_set.labels)?;
    let test_labels = labels_of(test_set.labels)?;

    let mut classifier = NearestCentroidClassifier::new();
    classifier.fit(&train_set.matrix, &train_labels)?;

    let training_error = error_rate(&classifier.predict(&train_set.matrix)?, &train_labels)?;
    let validation_error = error_rate(&classifier.predict(&test_set.matrix)?, &test_labels)?;

    let result = TrainingResult {
        classifier: classifier.name().to_string(),
        classes: classifier.classes().into_iter().map(String::from).collect(),
        features: train_set.matrix.n_cols(),
        train_rows: train_labels.len(),
        test_rows: test_labels.len(),
        training_error,
        validation_error,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };

    output_result("Trained classifier", &result, cli_args)
}

fn read_dataset(args: &DatasetArgs, config: &FeatureConfig) -> Result<Batch> {
    if !args.input.exists() {
        return Err(TweetvecError::invalid_argument(format!(
            "input file not found: {}",
            args.input.display()
        )));
    }

    let converter = CsvBatchConverter::new()
        .with_delimiter(args.delimiter)?
        .with_index_column(!args.no_index_column)
        .with_text_columns([config.text_column.as_str(), config.created_column.as_str()]);

    let batch = converter.convert(&args.input)?;
    info!(
        "Loaded {} rows with {} columns from {}",
        batch.len(),
        batch.columns().len(),
        display_name(&args.input)
    );
    Ok(batch)
}

fn current_timestamp(format: &str) -> Result<String> {
    let mut timestamp = String::new();
    write!(timestamp, "{}", Local::now().naive_local().format(format))
        .map_err(|_| TweetvecError::config(format!("invalid datetime format '{format}'")))?;
    Ok(timestamp)
}

fn labels_of(labels: Option<Vec<String>>) -> Result<Vec<String>> {
    labels.ok_or_else(|| TweetvecError::model("extraction returned no labels"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
