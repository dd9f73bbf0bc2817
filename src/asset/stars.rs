//! RenderableStars asset emission.
//!
//! A stars asset pulls in the shared speck/colormap/texture sync bundles,
//! places a position node at the point set's world centroid, and hangs the
//! RenderableStars node off it so the renderable sees its (recentered)
//! points around the local origin. An optional fade action couples another
//! node's visibility to camera proximity around this one.

use super::{
    fade_action_name, write_fade_action, write_gui, write_http_resource, write_lifecycle,
    write_meters_constant, write_position_node,
};
use crate::format::fmt_float;
use nalgebra::Vector3;
use std::io::{self, Write};

/// RenderableStars appearance parameters, copied verbatim from the
/// dataset row.
#[derive(Debug, Clone, Copy)]
pub struct StarsParams {
    pub magnitude_exponent: f64,
    pub core_multiplier: f64,
    pub core_gamma: f64,
    pub core_scale: f64,
    pub glare_multiplier: f64,
    pub glare_gamma: f64,
    pub glare_scale: f64,
}

/// Write the asset file that loads `speck_file` into the scene graph.
///
/// `name` is the sanitized stem of the source CSV; `centroid` is the
/// world-space offset removed from the points during recentering.
pub fn write_stars_asset<W: Write>(
    out: &mut W,
    name: &str,
    speck_file: &str,
    centroid: &Vector3<f64>,
    params: &StarsParams,
    fade_target: Option<&str>,
) -> io::Result<()> {
    write_http_resource(
        out,
        "sunspeck",
        "Stars Speck Files",
        "digitaluniverse_sunstar_speck",
        1,
    )?;
    write_http_resource(out, "colormaps", "Stars Color Table", "stars_colormap", 3)?;
    write_http_resource(out, "textures", "Stars Textures", "stars_textures", 1)?;
    writeln!(out, "local {name}_speck = asset.resource(\"{speck_file}\")")?;
    writeln!(out)?;
    write_meters_constant(out)?;

    let action = fade_target.map(|target| fade_action_name(name, target));
    if let (Some(action), Some(target)) = (&action, fade_target) {
        write_fade_action(out, action, target)?;
    }

    let position = format!("{name}_position");
    write_position_node(out, &position, centroid, "/Stars", action.as_deref())?;

    writeln!(out, "local {name} = {{")?;
    writeln!(out, "  Identifier = \"{name}\",")?;
    writeln!(out, "  Parent = \"{position}\",")?;
    writeln!(out, "  Renderable = {{")?;
    writeln!(out, "    UseCaching = false,")?;
    writeln!(out, "    Type = \"RenderableStars\",")?;
    writeln!(out, "    File = {name}_speck,")?;
    writeln!(out, "    Core = {{")?;
    writeln!(out, "      Texture = textures .. \"glare.png\",")?;
    writeln!(out, "      Multiplier = {},", fmt_float(params.core_multiplier))?;
    writeln!(out, "      Gamma = {},", fmt_float(params.core_gamma))?;
    writeln!(out, "      Scale = {}", fmt_float(params.core_scale))?;
    writeln!(out, "    }},")?;
    writeln!(out, "    Glare = {{")?;
    writeln!(out, "      Texture = textures .. \"halo.png\",")?;
    writeln!(
        out,
        "      Multiplier = {},",
        fmt_float(params.glare_multiplier)
    )?;
    writeln!(out, "      Gamma = {},", fmt_float(params.glare_gamma))?;
    writeln!(out, "      Scale = {}", fmt_float(params.glare_scale))?;
    writeln!(out, "    }},")?;
    writeln!(
        out,
        "    MagnitudeExponent = {},",
        fmt_float(params.magnitude_exponent)
    )?;
    writeln!(out, "    ColorMap = colormaps .. \"colorbv.cmap\",")?;
    writeln!(out, "    OtherDataColorMap = colormaps .. \"viridis.cmap\",")?;
    writeln!(out, "    SizeComposition = \"Distance Modulus\",")?;
    writeln!(out, "    DataMapping = {{")?;
    writeln!(out, "      Bv = \"colorb_v\",")?;
    writeln!(out, "      Luminance = \"lum\",")?;
    writeln!(out, "      AbsoluteMagnitude = \"absmag\",")?;
    writeln!(out, "      ApparentMagnitude = \"appmag\",")?;
    writeln!(out, "      Vx = \"vx\",")?;
    writeln!(out, "      Vy = \"vy\",")?;
    writeln!(out, "      Vz = \"vz\",")?;
    writeln!(out, "      Speed = \"speed\"")?;
    writeln!(out, "    }},")?;
    writeln!(out, "    DimInAtmosphere = true")?;
    writeln!(out, "  }},")?;
    write_gui(out, name, "/Stars")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    write_lifecycle(out, &[position.as_str(), name], action.as_deref())
}
