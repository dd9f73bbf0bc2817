//! Run orchestration: iterate dataset rows, dispatch to the emitters,
//! purge stale cache copies, and copy fresh outputs into the asset
//! directory.
//!
//! Rows are processed strictly in file order and independently of each
//! other; any load or write failure aborts the run. The cache purge is
//! the one best-effort step: OpenSpace may or may not hold a cached copy
//! of each output, so every removal failure is swallowed.

use crate::asset::anchor::write_anchor_asset;
use crate::asset::labels::{write_labels_asset, LabelParams};
use crate::asset::lua_name;
use crate::asset::stars::{write_stars_asset, StarsParams};
use crate::dataset::{self, DatasetError, DatasetRow, RowKind};
use crate::labels::{write_label_file, LabelError};
use crate::points::{PointSet, PointsError};
use crate::speck::{write_speck, SpeckParams};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything one run needs, in one place.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dataset CSV describing one output asset group per row.
    pub dataset: PathBuf,
    /// OpenSpace cache directory to purge stale copies from.
    pub cache_dir: PathBuf,
    /// Destination directory for the generated files.
    pub asset_dir: PathBuf,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error("row {row} ('{file}'): {source}")]
    Points {
        row: usize,
        file: String,
        #[source]
        source: PointsError,
    },
    #[error("row {row} is missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row}: {source}")]
    Label {
        row: usize,
        #[source]
        source: LabelError,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create asset directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run the whole pipeline. Returns the files that were emitted and copied
/// into the asset directory, in emission order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, PipelineError> {
    let rows = dataset::load_dataset(&config.dataset)?;
    let base_dir = config
        .dataset
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut outputs = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        process_row(index + 1, row, &base_dir, &mut outputs)?;
    }

    info!("cleaning cache directory {}", config.cache_dir.display());
    purge_cache(&config.cache_dir, &outputs);

    info!(
        "copying {} files to {}",
        outputs.len(),
        config.asset_dir.display()
    );
    copy_outputs(&config.asset_dir, &outputs)?;

    Ok(outputs)
}

fn process_row(
    row_no: usize,
    row: &DatasetRow,
    base_dir: &Path,
    outputs: &mut Vec<PathBuf>,
) -> Result<(), PipelineError> {
    if let RowKind::Unrecognized(other) = &row.kind {
        warn!("row {row_no}: unrecognized type '{other}', skipping");
        return Ok(());
    }
    if row.csv_file.is_empty() {
        return Err(PipelineError::MissingField {
            row: row_no,
            field: "csv_file",
        });
    }

    let source = base_dir.join(&row.csv_file);
    info!("reading {}", source.display());
    let mut points = PointSet::load(&source).map_err(|source_err| PipelineError::Points {
        row: row_no,
        file: row.csv_file.clone(),
        source: source_err,
    })?;

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = lua_name(&stem);

    match &row.kind {
        RowKind::Stars => {
            let centroid = points.recenter();
            debug!(
                "row {row_no}: {} points recentered around ({}, {}, {})",
                points.len(),
                centroid.x,
                centroid.y,
                centroid.z
            );

            let speck_params = SpeckParams {
                lum: require(row.lum, row_no, "lum")?,
                absmag: require(row.absmag, row_no, "absmag")?,
                colorb_v: require(row.colorb_v, row_no, "colorb_v")?,
            };
            let speck_path = source.with_extension("speck");
            let mut out = create_output(&speck_path)?;
            write_speck(&mut out, &points, &speck_params)
                .map_err(|e| write_error(&speck_path, e))?;
            finish(out, &speck_path)?;
            outputs.push(speck_path.clone());

            let stars_params = StarsParams {
                magnitude_exponent: require(row.magnitude_exponent, row_no, "MagnitudeExponent")?,
                core_multiplier: require(row.core_multiplier, row_no, "core_multiplier")?,
                core_gamma: require(row.core_gamma, row_no, "core_gamma")?,
                core_scale: require(row.core_scale, row_no, "core_scale")?,
                glare_multiplier: require(row.glare_multiplier, row_no, "glare_multiplier")?,
                glare_gamma: require(row.glare_gamma, row_no, "glare_gamma")?,
                glare_scale: require(row.glare_scale, row_no, "glare_scale")?,
            };
            let asset_path = source.with_extension("asset");
            let mut out = create_output(&asset_path)?;
            write_stars_asset(
                &mut out,
                &name,
                &file_name(&speck_path),
                &centroid,
                &stars_params,
                row.fade_target.as_deref(),
            )
            .map_err(|e| write_error(&asset_path, e))?;
            finish(out, &asset_path)?;
            outputs.push(asset_path);
        }

        RowKind::Labels => {
            let centroid = points.recenter();
            let column = row
                .label_column
                .as_deref()
                .filter(|c| !c.is_empty())
                .ok_or(PipelineError::MissingField {
                    row: row_no,
                    field: "label_column",
                })?;

            let label_path = source.with_file_name(format!("{stem}_{column}.label"));
            let mut out = create_output(&label_path)?;
            write_label_file(&mut out, &points, column).map_err(|source| {
                PipelineError::Label {
                    row: row_no,
                    source,
                }
            })?;
            finish(out, &label_path)?;
            outputs.push(label_path.clone());

            let label_params = LabelParams {
                size: require(row.label_size, row_no, "label_size")?,
                min_size: require(row.label_minsize, row_no, "label_minsize")?,
                max_size: require(row.label_maxsize, row_no, "label_maxsize")?,
                enabled: row.is_enabled(),
            };
            let asset_path = source.with_file_name(format!("{stem}_{column}.asset"));
            let mut out = create_output(&asset_path)?;
            write_labels_asset(
                &mut out,
                &lua_name(&format!("{stem}_{column}")),
                &file_name(&label_path),
                &centroid,
                &label_params,
            )
            .map_err(|e| write_error(&asset_path, e))?;
            finish(out, &asset_path)?;
            outputs.push(asset_path);
        }

        RowKind::Anchor => {
            // World-space centroid: the anchor marks where the points
            // actually are, so no recentering here.
            let centroid = points.centroid();
            let anchor_path = source.with_file_name(format!("{stem}_anchor.asset"));
            let mut out = create_output(&anchor_path)?;
            write_anchor_asset(&mut out, &name, &centroid, row.fade_target.as_deref())
                .map_err(|e| write_error(&anchor_path, e))?;
            finish(out, &anchor_path)?;
            outputs.push(anchor_path);
        }

        RowKind::Unrecognized(_) => unreachable!("handled above"),
    }

    Ok(())
}

fn require(value: Option<f64>, row: usize, field: &'static str) -> Result<f64, PipelineError> {
    value.ok_or(PipelineError::MissingField { row, field })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn create_output(path: &Path) -> Result<BufWriter<File>, PipelineError> {
    let file = File::create(path).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut out: BufWriter<File>, path: &Path) -> Result<(), PipelineError> {
    out.flush().map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_error(path: &Path, source: io::Error) -> PipelineError {
    PipelineError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// Remove stale copies of the outputs from the cache directory. Cached
/// copies are never required to exist, so every failure here is
/// non-fatal.
fn purge_cache(cache_dir: &Path, outputs: &[PathBuf]) {
    for path in outputs {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let cached = cache_dir.join(file_name);
        match fs::remove_file(&cached) {
            Ok(()) => debug!("removed stale cache copy {}", cached.display()),
            Err(err) => debug!("cache purge skipped {}: {err}", cached.display()),
        }
    }
}

/// Copy every output into the asset directory, creating it if absent and
/// overwriting files of the same name.
fn copy_outputs(asset_dir: &Path, outputs: &[PathBuf]) -> Result<(), PipelineError> {
    fs::create_dir_all(asset_dir).map_err(|source| PipelineError::CreateDir {
        path: asset_dir.to_path_buf(),
        source,
    })?;
    for path in outputs {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let dest = asset_dir.join(file_name);
        fs::copy(path, &dest).map_err(|source| PipelineError::Copy {
            from: path.clone(),
            to: dest.clone(),
            source,
        })?;
        debug!("copied {} -> {}", path.display(), dest.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purge_tolerates_missing_cache_entries() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![dir.path().join("never_written.speck")];
        // Nothing in the cache dir, and a second call with a cache path
        // that is not even a directory.
        purge_cache(dir.path(), &outputs);
        purge_cache(&dir.path().join("no_such_subdir"), &outputs);
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let err = require(None, 3, "lum").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingField { row: 3, field: "lum" }
        ));
    }
}
