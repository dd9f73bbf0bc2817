//! CSV point-cloud to OpenSpace asset conversion.
//!
//! Each points CSV named by the dataset file is turned into the files
//! OpenSpace needs to draw it: a speck file with the actual XYZ
//! coordinates (rendered with RenderableStars), label files with the
//! per-point display text, and Lua asset files that load them into the
//! scene graph. Points are recentered so their centroid sits at the local
//! origin, with the world-space offset carried by a static translation on
//! the emitted position node.
//!
//! The [`pipeline`] module ties it together: iterate dataset rows, emit
//! per-row outputs, purge stale cache copies, and copy everything into the
//! asset directory.

pub mod asset;
pub mod dataset;
pub mod format;
pub mod labels;
pub mod pipeline;
pub mod points;
pub mod speck;

pub use pipeline::{run, Config, PipelineError};
