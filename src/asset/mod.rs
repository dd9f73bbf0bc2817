//! Lua asset-file emission.
//!
//! Asset files are the scene-description side of the output: each one
//! declares a position node whose static translation carries the point
//! set's world-space centroid (in meters, converted from parsecs), the
//! renderable that draws the data, and the `asset.onInitialize` /
//! `asset.onDeinitialize` lifecycle hooks that add and remove the nodes in
//! mirror order. Node and variable names derive deterministically from the
//! source file stem, so re-running on unchanged input is byte-identical.

pub mod anchor;
pub mod labels;
pub mod stars;

use crate::format::fmt_float;
use nalgebra::Vector3;
use std::io::{self, Write};

/// Parsec-to-meter conversion, emitted verbatim. The engine positions
/// scene nodes in meters while the point data is in parsecs.
pub const METERS_PER_PARSEC: &str = "3.0856775814913673e+16";

/// Derive a Lua variable name from a file stem or column name.
///
/// Anything outside `[A-Za-z0-9_]` becomes `_`, and a leading digit gets
/// an extra `_` so the result stays a valid identifier.
///
/// ```
/// use speckgen::asset::lua_name;
///
/// assert_eq!(lua_name("open-clusters"), "open_clusters");
/// assert_eq!(lua_name("2mass"), "_2mass");
/// ```
pub fn lua_name(stem: &str) -> String {
    let mut name: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Variable name of the proximity action that fades `fade_target` in and
/// out as the camera approaches `name`.
pub(crate) fn fade_action_name(name: &str, fade_target: &str) -> String {
    format!("{name}_fade_{}", lua_name(fade_target))
}

pub(crate) fn write_meters_constant<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "local meters_to_pc = {METERS_PER_PARSEC}")?;
    writeln!(out)
}

pub(crate) fn write_http_resource<W: Write>(
    out: &mut W,
    var: &str,
    display_name: &str,
    identifier: &str,
    version: u32,
) -> io::Result<()> {
    writeln!(out, "local {var} = asset.resource({{")?;
    writeln!(out, "  Name = \"{display_name}\",")?;
    writeln!(out, "  Type = \"HttpSynchronization\",")?;
    writeln!(out, "  Identifier = \"{identifier}\",")?;
    writeln!(out, "  Version = {version}")?;
    writeln!(out, "}})")?;
    writeln!(out)
}

/// Action toggling `Scene.<fade_target>.Renderable.Fade` on camera
/// proximity transitions: 0.0 when approaching, back to 1.0 when exiting.
pub(crate) fn write_fade_action<W: Write>(
    out: &mut W,
    action: &str,
    fade_target: &str,
) -> io::Result<()> {
    writeln!(out, "local {action} = {{")?;
    writeln!(out, "  Identifier = \"{action}\",")?;
    writeln!(out, "  Name = \"{action}\",")?;
    writeln!(out, "  Command = [[")?;
    writeln!(out, "    openspace.printInfo(\"Node: \" .. args.Node)")?;
    writeln!(
        out,
        "    openspace.printInfo(\"Transition: \" .. args.Transition)"
    )?;
    writeln!(out)?;
    writeln!(out, "    if args.Transition == \"Approaching\" then")?;
    writeln!(
        out,
        "      openspace.setPropertyValueSingle(\"Scene.{fade_target}.Renderable.Fade\", 0.0, 1.0)"
    )?;
    writeln!(out, "    elseif args.Transition == \"Exiting\" then")?;
    writeln!(
        out,
        "      openspace.setPropertyValueSingle(\"Scene.{fade_target}.Renderable.Fade\", 1.0, 1.0)"
    )?;
    writeln!(out, "    end")?;
    writeln!(out, "  ]],")?;
    writeln!(out, "  IsLocal = true")?;
    writeln!(out, "}}")?;
    writeln!(out)
}

/// `Transform` block placing a node at the centroid, converted from
/// parsecs to the engine's base unit.
pub(crate) fn write_transform<W: Write>(
    out: &mut W,
    centroid: &Vector3<f64>,
    with_scale: bool,
) -> io::Result<()> {
    writeln!(out, "  Transform = {{")?;
    writeln!(out, "    Translation = {{")?;
    writeln!(out, "      Type = \"StaticTranslation\",")?;
    writeln!(out, "      Position = {{")?;
    writeln!(out, "        {} * meters_to_pc,", fmt_float(centroid.x))?;
    writeln!(out, "        {} * meters_to_pc,", fmt_float(centroid.y))?;
    writeln!(out, "        {} * meters_to_pc", fmt_float(centroid.z))?;
    writeln!(out, "      }}")?;
    if with_scale {
        writeln!(out, "    }},")?;
        writeln!(out, "    Scale = {{")?;
        writeln!(out, "      Type = \"StaticScale\",")?;
        writeln!(out, "      Scale = 1")?;
        writeln!(out, "    }}")?;
    } else {
        writeln!(out, "    }}")?;
    }
    writeln!(out, "  }},")
}

pub(crate) fn write_interaction_sphere<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  InteractionSphere = 1 * meters_to_pc,")?;
    writeln!(out, "  ApproachFactor = 1000.0,")?;
    writeln!(out, "  ReachFactor = 5.0,")
}

pub(crate) fn write_proximity_triggers<W: Write>(out: &mut W, action: &str) -> io::Result<()> {
    writeln!(out, "  OnApproach = {{ \"{action}\" }},")?;
    writeln!(out, "  OnReach = {{ \"{action}\" }},")?;
    writeln!(out, "  OnRecede = {{ \"{action}\" }},")?;
    writeln!(out, "  OnExit = {{ \"{action}\" }},")
}

pub(crate) fn write_gui<W: Write>(out: &mut W, name: &str, path: &str) -> io::Result<()> {
    writeln!(out, "  GUI = {{")?;
    writeln!(out, "    Name = \"{name}\",")?;
    writeln!(out, "    Path = \"{path}\"")?;
    writeln!(out, "  }}")
}

/// Position node: an otherwise empty scene-graph node that carries the
/// centroid translation. When a fade action is present the node also gets
/// the proximity sphere and trigger wiring.
pub(crate) fn write_position_node<W: Write>(
    out: &mut W,
    identifier: &str,
    centroid: &Vector3<f64>,
    gui_path: &str,
    fade_action: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "local {identifier} = {{")?;
    writeln!(out, "  Identifier = \"{identifier}\",")?;
    write_transform(out, centroid, false)?;
    if let Some(action) = fade_action {
        write_interaction_sphere(out)?;
        write_proximity_triggers(out, action)?;
    }
    write_gui(out, identifier, gui_path)?;
    writeln!(out, "}}")?;
    writeln!(out)
}

/// Lifecycle hooks and exports. Initialization registers the optional
/// action, then adds nodes in the given order; deinitialization removes
/// them in reverse and unregisters the action last. One export per
/// exported node/action.
pub(crate) fn write_lifecycle<W: Write>(
    out: &mut W,
    nodes: &[&str],
    action: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "asset.onInitialize(function()")?;
    if let Some(action) = action {
        writeln!(out, "  openspace.action.registerAction({action})")?;
    }
    for node in nodes {
        writeln!(out, "  openspace.addSceneGraphNode({node})")?;
    }
    writeln!(out, "end)")?;
    writeln!(out)?;
    writeln!(out, "asset.onDeinitialize(function()")?;
    for node in nodes.iter().rev() {
        writeln!(out, "  openspace.removeSceneGraphNode({node})")?;
    }
    if let Some(action) = action {
        writeln!(out, "  openspace.action.unregisterAction({action})")?;
    }
    writeln!(out, "end)")?;
    writeln!(out)?;
    for node in nodes {
        writeln!(out, "asset.export({node})")?;
    }
    if let Some(action) = action {
        writeln!(out, "asset.export({action})")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lua_names_are_sanitized() {
        assert_eq!(lua_name("stars"), "stars");
        assert_eq!(lua_name("open-clusters.v2"), "open_clusters_v2");
        assert_eq!(lua_name("2mass"), "_2mass");
        assert_eq!(lua_name(""), "_");
    }

    #[test]
    fn fade_action_names_combine_node_and_target() {
        assert_eq!(
            fade_action_name("local_group", "galaxy-grid"),
            "local_group_fade_galaxy_grid"
        );
    }

    #[test]
    fn lifecycle_order_mirrors() {
        let mut out = Vec::new();
        write_lifecycle(&mut out, &["a_position", "a"], Some("a_fade_b")).unwrap();
        let text = String::from_utf8(out).unwrap();

        let register = text.find("registerAction(a_fade_b)").unwrap();
        let add_position = text.find("addSceneGraphNode(a_position)").unwrap();
        let add_renderable = text.find("addSceneGraphNode(a)\n").unwrap();
        assert!(register < add_position && add_position < add_renderable);

        let remove_renderable = text.find("removeSceneGraphNode(a)\n").unwrap();
        let remove_position = text.find("removeSceneGraphNode(a_position)").unwrap();
        let unregister = text.find("unregisterAction(a_fade_b)").unwrap();
        assert!(remove_renderable < remove_position && remove_position < unregister);

        assert_eq!(text.matches("asset.export(").count(), 3);
    }
}
