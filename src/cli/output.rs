//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TweetvecArgs};
use crate::error::Result;
use crate::features::FeatureRecord;

/// Result structure for single-tweet feature derivation.
#[derive(Debug, Serialize)]
pub struct FeaturesResult {
    pub text: String,
    pub created: String,
    pub features: FeatureRecord,
}

/// Result structure for dataset vectorization.
#[derive(Debug, Serialize, Deserialize)]
pub struct VectorizeResult {
    pub input: String,
    pub output: String,
    pub rows: usize,
    pub columns: usize,
    pub labels_kept: bool,
    pub duration_ms: u64,
}

/// Result structure for classifier training and validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub classifier: String,
    pub classes: Vec<String>,
    pub features: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub training_error: f64,
    pub validation_error: f64,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TweetvecArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &TweetvecArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("FeaturesResult") => {
            output_features_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("TrainingResult") => {
            output_training_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output derived features in human format.
fn output_features_human(value: &serde_json::Value, _args: &TweetvecArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(text) = obj.get("text").and_then(|t| t.as_str()) {
            println!("Text: {text}");
        }
        if let Some(created) = obj.get("created").and_then(|c| c.as_str()) {
            println!("Created: {created}");
        }

        if let Some(features) = obj.get("features").and_then(|f| f.as_object()) {
            println!();
            println!("Features:");
            println!("─────────");

            let width = features.keys().map(|k| k.len()).max().unwrap_or(0);
            for (name, feature) in features {
                println!("{name:<width$}  {}", format_value(feature));
            }
        }
    }
    Ok(())
}

/// Output training results in human format.
fn output_training_human(value: &serde_json::Value, _args: &TweetvecArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Training Results:");
        println!("═════════════════");

        if let Some(classifier) = obj.get("classifier").and_then(|c| c.as_str()) {
            println!("Classifier: {classifier}");
        }
        if let Some(classes) = obj.get("classes") {
            println!("Classes: {}", format_value(classes));
        }
        if let Some(features) = obj.get("features").and_then(|f| f.as_u64()) {
            println!("Features: {features}");
        }
        if let (Some(train), Some(test)) = (
            obj.get("train_rows").and_then(|t| t.as_u64()),
            obj.get("test_rows").and_then(|t| t.as_u64()),
        ) {
            println!("Rows: {train} train / {test} test");
        }

        println!();
        if let Some(error) = obj.get("training_error").and_then(|e| e.as_f64()) {
            println!("Training error:   {}", format_percent(error));
        }
        if let Some(error) = obj.get("validation_error").and_then(|e| e.as_f64()) {
            println!("Validation error: {}", format_percent(error));
        }

        if let Some(duration) = obj.get("duration_ms").and_then(|d| d.as_u64()) {
            println!();
            println!("Duration: {duration}ms");
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &TweetvecArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TweetvecArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a rate in `[0, 1]` as a percentage.
fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}
