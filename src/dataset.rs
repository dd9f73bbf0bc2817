//! Dataset CSV loading.
//!
//! The dataset file drives the whole run: one row per output asset group,
//! naming the points CSV to convert and carrying the rendering parameters
//! for it. Lines starting with `#` are comments. Empty cells parse to
//! `None` rather than a NaN sentinel, so "no fade target" and "fade target
//! named X" stay distinguishable by type.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or parsing the dataset file.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("malformed dataset row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// Type discriminator of a dataset row.
///
/// `stars` rows produce a speck file plus a RenderableStars asset,
/// `labels` rows a label file plus a RenderablePointCloud asset, and
/// `anchor` rows a standalone camera-anchor asset. Anything else is
/// skipped with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Stars,
    Labels,
    Anchor,
    Unrecognized(String),
}

impl RowKind {
    fn parse(raw: &str) -> Self {
        match raw {
            "stars" => RowKind::Stars,
            "labels" => RowKind::Labels,
            "anchor" => RowKind::Anchor,
            other => RowKind::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Stars => write!(f, "stars"),
            RowKind::Labels => write!(f, "labels"),
            RowKind::Anchor => write!(f, "anchor"),
            RowKind::Unrecognized(other) => write!(f, "{other}"),
        }
    }
}

fn de_row_kind<'de, D>(deserializer: D) -> Result<RowKind, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(RowKind::parse(&raw))
}

/// One dataset row: a points CSV and how to render it.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRow {
    /// Points CSV path, relative to the dataset file.
    pub csv_file: String,

    /// What to emit for this row.
    #[serde(rename = "type", deserialize_with = "de_row_kind")]
    pub kind: RowKind,

    /// Scene node whose `Fade` property gets toggled when the camera
    /// crosses the proximity threshold of this row's node.
    #[serde(default)]
    pub fade_target: Option<String>,

    /// Label visibility flag, 1 or 0 in the file.
    #[serde(default)]
    pub enabled: Option<i64>,

    /// Points-file column holding the label display text.
    #[serde(default)]
    pub label_column: Option<String>,
    #[serde(default)]
    pub label_size: Option<f64>,
    #[serde(default)]
    pub label_minsize: Option<f64>,
    #[serde(default)]
    pub label_maxsize: Option<f64>,

    /// Broadcast to every point of the speck file.
    #[serde(default)]
    pub lum: Option<f64>,
    #[serde(default)]
    pub absmag: Option<f64>,
    #[serde(default)]
    pub colorb_v: Option<f64>,

    /// RenderableStars appearance parameters, copied verbatim into the
    /// asset file.
    #[serde(default, rename = "MagnitudeExponent")]
    pub magnitude_exponent: Option<f64>,
    #[serde(default)]
    pub core_multiplier: Option<f64>,
    #[serde(default)]
    pub core_gamma: Option<f64>,
    #[serde(default)]
    pub core_scale: Option<f64>,
    #[serde(default)]
    pub glare_multiplier: Option<f64>,
    #[serde(default)]
    pub glare_gamma: Option<f64>,
    #[serde(default)]
    pub glare_scale: Option<f64>,
}

impl DatasetRow {
    /// Normalized visibility flag. The CSV stores an integer; only 1
    /// means enabled, anything else (including a missing cell) does not.
    pub fn is_enabled(&self) -> bool {
        self.enabled == Some(1)
    }
}

/// Load the dataset file, preserving row order.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRow>, DatasetError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|source| DatasetError::Read {
            path: path.display().to_string(),
            source,
        })?;
    collect_rows(reader)
}

/// Parse dataset rows from an already-open reader.
pub fn parse_dataset<R: Read>(input: R) -> Result<Vec<DatasetRow>, DatasetError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_reader(input);
    collect_rows(reader)
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<DatasetRow>, DatasetError> {
    let mut rows = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: DatasetRow = result.map_err(|source| DatasetError::Row {
            row: index + 1,
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}
