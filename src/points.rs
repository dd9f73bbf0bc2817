//! Point-set loading and the centroid/recentering transform.
//!
//! All points in a dataset share one coordinate frame with its origin at
//! 0,0,0. To let the camera target a group of points without a stand-in
//! node per group, each set is translated so its own centroid sits at the
//! local origin; the emitted asset carries the centroid back as a static
//! translation on the position node. Recentering must therefore be exactly
//! reversible: `original = recentered + centroid` per component.

use nalgebra::Vector3;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors from loading or parsing a points file.
#[derive(Error, Debug)]
pub enum PointsError {
    #[error("failed to read points file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("points file is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed points row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: column '{column}' is not a number: '{value}'")]
    BadCoordinate {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// NaN or infinite coordinates would silently poison the centroid, so
    /// they are rejected up front.
    #[error("row {row}: column '{column}' is not finite")]
    NonFinite { row: usize, column: &'static str },
}

const COORDINATE_COLUMNS: [&str; 3] = ["x", "y", "z"];

/// Synthetic name for an unnamed leading column. It is effectively the
/// point identifier in the source exports.
const ID_COLUMN: &str = "ID";

/// One source file's worth of points: parsed positions plus the raw text
/// cells the label emitter draws display strings from.
#[derive(Debug, Clone)]
pub struct PointSet {
    columns: Vec<String>,
    positions: Vec<Vector3<f64>>,
    cells: Vec<Vec<String>>,
}

impl PointSet {
    /// Load a points CSV from disk.
    pub fn load(path: &Path) -> Result<Self, PointsError> {
        let reader = csv::Reader::from_path(path).map_err(|source| PointsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv(reader)
    }

    /// Parse a points CSV from an already-open reader.
    pub fn parse<R: Read>(input: R) -> Result<Self, PointsError> {
        Self::from_csv(csv::Reader::from_reader(input))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, PointsError> {
        let mut columns: Vec<String> = reader
            .headers()
            .map_err(|source| PointsError::Row { row: 0, source })?
            .iter()
            .map(str::to_string)
            .collect();

        // Exports often leave the first column unnamed.
        if let Some(first) = columns.first_mut() {
            if first.is_empty() {
                *first = ID_COLUMN.to_string();
            }
        }

        let mut coord_indices = [0usize; 3];
        for (slot, name) in coord_indices.iter_mut().zip(COORDINATE_COLUMNS) {
            *slot = columns
                .iter()
                .position(|c| c == name)
                .ok_or(PointsError::MissingColumn(name))?;
        }

        let mut positions = Vec::new();
        let mut cells = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|source| PointsError::Row {
                row: index + 1,
                source,
            })?;
            let mut coords = [0.0f64; 3];
            for (axis, &column_index) in coord_indices.iter().enumerate() {
                let column = COORDINATE_COLUMNS[axis];
                let raw = record.get(column_index).unwrap_or("");
                let value: f64 =
                    raw.trim()
                        .parse()
                        .map_err(|_| PointsError::BadCoordinate {
                            row: index + 1,
                            column,
                            value: raw.to_string(),
                        })?;
                if !value.is_finite() {
                    return Err(PointsError::NonFinite {
                        row: index + 1,
                        column,
                    });
                }
                coords[axis] = value;
            }
            positions.push(Vector3::new(coords[0], coords[1], coords[2]));
            cells.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            columns,
            positions,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Point positions, in file order.
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Raw text of `column` for point `row`, if both exist.
    pub fn text(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.cells.get(row)?.get(index).map(String::as_str)
    }

    /// Per-axis arithmetic mean of the positions. Zero for an empty set so
    /// downstream emitters stay total.
    pub fn centroid(&self) -> Vector3<f64> {
        if self.positions.is_empty() {
            return Vector3::zeros();
        }
        let sum = self
            .positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p);
        sum / self.positions.len() as f64
    }

    /// Translate every point so the centroid lands at the origin, and
    /// return the centroid that was subtracted.
    pub fn recenter(&mut self) -> Vector3<f64> {
        let centroid = self.centroid();
        for position in &mut self.positions {
            *position -= centroid;
        }
        centroid
    }
}
