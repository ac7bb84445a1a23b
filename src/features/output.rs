//! Analyzer output types.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered list of named scalar features.
///
/// Each key becomes its own column when the record is expanded into a batch.
/// Keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    entries: Vec<(String, f64)>,
}

impl FeatureRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        FeatureRecord::default()
    }

    /// Create an empty record with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        FeatureRecord {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry, replacing the value if the key already exists.
    pub fn insert<S: Into<String>>(&mut self, key: S, value: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<S: Into<String>>(mut self, key: S, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, f64)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut record = FeatureRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// The result of applying one analyzer to one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureOutput {
    /// A single value, stored under the step's target column.
    Scalar(f64),
    /// Named values, each stored under its own column.
    Record(FeatureRecord),
}

impl FeatureOutput {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            FeatureOutput::Scalar(value) => Some(*value),
            FeatureOutput::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&FeatureRecord> {
        match self {
            FeatureOutput::Scalar(_) => None,
            FeatureOutput::Record(record) => Some(record),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureOutput::Scalar(_) => "scalar",
            FeatureOutput::Record(_) => "record",
        }
    }
}

impl From<f64> for FeatureOutput {
    fn from(value: f64) -> Self {
        FeatureOutput::Scalar(value)
    }
}

impl From<FeatureRecord> for FeatureOutput {
    fn from(record: FeatureRecord) -> Self {
        FeatureOutput::Record(record)
    }
}

impl fmt::Display for FeatureOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureOutput::Scalar(value) => write!(f, "{value}"),
            FeatureOutput::Record(record) => {
                write!(f, "{{")?;
                for (i, (key, value)) in record.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
