//! Speck file emission.
//!
//! The speck format is the columnar star-data text consumed by
//! RenderableStars: a fixed header binding datavar names to column
//! indices, two texture directives, then one whitespace-delimited line per
//! point (`x y z` followed by the thirteen datavar columns in declared
//! order). The photometric columns are broadcast per dataset row rather
//! than read per point; the remaining columns are always zero.

use crate::format::fmt_float;
use crate::points::PointSet;
use std::io::{self, Write};

/// Per-dataset scalar overrides applied identically to every point.
#[derive(Debug, Clone, Copy)]
pub struct SpeckParams {
    pub lum: f64,
    pub absmag: f64,
    pub colorb_v: f64,
}

/// Fixed 15-line header: thirteen datavar bindings plus the texture
/// directives.
const HEADER: &str = "\
datavar 0 colorb_v
datavar 1 lum
datavar 2 absmag
datavar 3 appmag
datavar 4 texnum
datavar 5 distly
datavar 6 dcalc
datavar 7 plx
datavar 8 plxerr
datavar 9 vx
datavar 10 vy
datavar 11 vz
datavar 12 speed
texturevar 4
texture -M 1 halo.sgi
";

/// Columns 3..12 never vary: apparent magnitude, texture number, distance,
/// parallax, velocity and speed are emitted as constant zero, keeping the
/// integer/float spellings the consumer expects.
const CONSTANT_TAIL: &str = "0.0 0 0.0 0 0.0 0.0 0 0 0 0";

/// Write a speck file for a recentered point set.
///
/// Emits exactly `points.len()` data lines after the fixed header; an
/// empty set produces the header alone.
pub fn write_speck<W: Write>(
    out: &mut W,
    points: &PointSet,
    params: &SpeckParams,
) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;
    for position in points.positions() {
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            fmt_float(position.x),
            fmt_float(position.y),
            fmt_float(position.z),
            fmt_float(params.colorb_v),
            fmt_float(params.lum),
            fmt_float(params.absmag),
            CONSTANT_TAIL,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speck_for(points_csv: &str, params: SpeckParams) -> String {
        let points = PointSet::parse(points_csv.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_speck(&mut out, &points, &params).unwrap();
        String::from_utf8(out).unwrap()
    }

    const SUN_LIKE: SpeckParams = SpeckParams {
        lum: 1.0,
        absmag: 4.8,
        colorb_v: 0.65,
    };

    #[test]
    fn empty_set_emits_header_only() {
        let text = speck_for("x,y,z\n", SUN_LIKE);
        assert_eq!(text.lines().count(), 15);
        assert!(text.starts_with("datavar 0 colorb_v\n"));
        assert!(text.ends_with("texture -M 1 halo.sgi\n"));
    }

    #[test]
    fn one_line_per_point_after_header() {
        let text = speck_for("x,y,z\n1,2,3\n4,5,6\n7,8,9\n", SUN_LIKE);
        assert_eq!(text.lines().count(), 15 + 3);
    }

    #[test]
    fn data_line_layout() {
        let mut points = PointSet::parse("x,y,z\n10,0,0\n".as_bytes()).unwrap();
        points.recenter();
        let mut out = Vec::new();
        write_speck(&mut out, &points, &SUN_LIKE).unwrap();
        let text = String::from_utf8(out).unwrap();
        let data_line = text.lines().nth(15).unwrap();
        assert_eq!(data_line, "0.0 0.0 0.0 0.65 1.0 4.8 0.0 0 0.0 0 0.0 0.0 0 0 0 0");
    }
}
