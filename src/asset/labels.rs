//! Label asset emission.
//!
//! Labels are RenderablePointClouds with no points of their own, only the
//! label file with text positions. The asset mirrors the stars layout:
//! position node at the centroid, label renderable as its child.

use super::{write_gui, write_lifecycle, write_meters_constant, write_position_node};
use crate::format::fmt_float;
use nalgebra::Vector3;
use std::io::{self, Write};

/// Label display parameters from the dataset row.
#[derive(Debug, Clone, Copy)]
pub struct LabelParams {
    pub size: f64,
    pub min_size: f64,
    pub max_size: f64,
    /// Normalized from the dataset's integer flag; only 1 enables.
    pub enabled: bool,
}

/// Write the asset file that loads `label_file` as a label-only
/// renderable. `name` already includes the label column, so one point set
/// can carry several label files side by side.
pub fn write_labels_asset<W: Write>(
    out: &mut W,
    name: &str,
    label_file: &str,
    centroid: &Vector3<f64>,
    params: &LabelParams,
) -> io::Result<()> {
    write_meters_constant(out)?;

    let position = format!("{name}_position");
    let labels = format!("{name}_labels");
    write_position_node(out, &position, centroid, "/Labels", None)?;

    writeln!(out, "local {labels} = {{")?;
    writeln!(out, "  Identifier = \"{labels}\",")?;
    writeln!(out, "  Parent = \"{position}\",")?;
    writeln!(out, "  Renderable = {{")?;
    writeln!(out, "    Type = \"RenderablePointCloud\",")?;
    writeln!(out, "    Labels = {{")?;
    writeln!(out, "      File = asset.resource(\"{label_file}\"),")?;
    writeln!(
        out,
        "      Enabled = {},",
        if params.enabled { "true" } else { "false" }
    )?;
    writeln!(out, "      Unit = \"pc\",")?;
    writeln!(out, "      Size = {},", fmt_float(params.size))?;
    writeln!(
        out,
        "      MinMaxSize = {{ {},{} }}",
        fmt_float(params.min_size),
        fmt_float(params.max_size)
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "  }},")?;
    write_gui(out, &labels, "/Labels")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    write_lifecycle(out, &[position.as_str(), labels.as_str()], None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(enabled: bool) -> String {
        let mut out = Vec::new();
        let params = LabelParams {
            size: 7.5,
            min_size: 4.0,
            max_size: 15.0,
            enabled,
        };
        write_labels_asset(
            &mut out,
            "clusters_name",
            "clusters_name.label",
            &Vector3::new(1.0, 2.0, 3.0),
            &params,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn enabled_flag_becomes_lua_boolean() {
        assert!(render(true).contains("      Enabled = true,"));
        assert!(render(false).contains("      Enabled = false,"));
    }

    #[test]
    fn label_renderable_hangs_off_position_node() {
        let text = render(true);
        assert!(text.contains("local clusters_name_position = {"));
        assert!(text.contains("  Parent = \"clusters_name_position\","));
        assert!(text.contains("    Type = \"RenderablePointCloud\","));
        assert!(text.contains("      File = asset.resource(\"clusters_name.label\"),"));
        assert!(text.contains("      Size = 7.5,"));
        assert!(text.contains("      MinMaxSize = { 4.0,15.0 }"));
        assert!(text.contains("    Path = \"/Labels\""));
    }

    #[test]
    fn lifecycle_adds_position_before_labels_and_removes_in_reverse() {
        let text = render(true);
        let add_position = text.find("addSceneGraphNode(clusters_name_position)").unwrap();
        let add_labels = text.find("addSceneGraphNode(clusters_name_labels)").unwrap();
        let remove_labels = text.find("removeSceneGraphNode(clusters_name_labels)").unwrap();
        let remove_position = text
            .find("removeSceneGraphNode(clusters_name_position)")
            .unwrap();
        assert!(add_position < add_labels);
        assert!(remove_labels < remove_position);
        assert_eq!(text.matches("asset.export(").count(), 2);
    }
}
