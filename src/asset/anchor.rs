//! Anchor asset emission.
//!
//! An anchor is a standalone cartesian-axes node parked at the point
//! set's world-space centroid, kept as a camera target the user can aim
//! at. Predates the position-node arrangement the stars and label assets
//! use; retained for datasets that still request it.

use super::{
    fade_action_name, write_fade_action, write_gui, write_interaction_sphere, write_lifecycle,
    write_meters_constant, write_proximity_triggers, write_transform,
};
use nalgebra::Vector3;
use std::io::{self, Write};

/// Write the anchor asset. `centroid` is the untranslated world-space
/// mean of the points.
pub fn write_anchor_asset<W: Write>(
    out: &mut W,
    name: &str,
    centroid: &Vector3<f64>,
    fade_target: Option<&str>,
) -> io::Result<()> {
    write_meters_constant(out)?;

    let action = fade_target.map(|target| fade_action_name(name, target));
    if let (Some(action), Some(target)) = (&action, fade_target) {
        write_fade_action(out, action, target)?;
    }

    let anchor = format!("{name}_anchor");
    writeln!(out, "local {anchor} = {{")?;
    writeln!(out, "  Identifier = \"{anchor}\",")?;
    write_transform(out, centroid, true)?;
    writeln!(out, "  Renderable = {{")?;
    writeln!(out, "    Type = \"RenderableCartesianAxes\"")?;
    writeln!(out, "  }},")?;
    write_interaction_sphere(out)?;
    if let Some(action) = &action {
        write_proximity_triggers(out, action)?;
    }
    write_gui(out, &anchor, "/Anchors")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    write_lifecycle(out, &[anchor.as_str()], action.as_deref())
}
