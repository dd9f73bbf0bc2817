//! Label file emission.
//!
//! A label file carries one line per point: the recentered coordinates,
//! the literal `id` with the point's row-position identifier, and the
//! literal `text` with the raw display string from the dataset-selected
//! column:
//!
//! ```text
//! 13428000.0 26239000.0 45870000.0 id 0 text Point 0
//! ```

use crate::format::fmt_float;
use crate::points::PointSet;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("label column '{0}' not present in points file")]
    MissingColumn(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Write one label line per point, drawing display text from `column`.
pub fn write_label_file<W: Write>(
    out: &mut W,
    points: &PointSet,
    column: &str,
) -> Result<(), LabelError> {
    if !points.has_column(column) {
        return Err(LabelError::MissingColumn(column.to_string()));
    }
    for (index, position) in points.positions().iter().enumerate() {
        let text = points.text(index, column).unwrap_or_default();
        writeln!(
            out,
            "{} {} {} id {} text {}",
            fmt_float(position.x),
            fmt_float(position.y),
            fmt_float(position.z),
            index,
            text,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_point_with_raw_text() {
        let points = PointSet::parse(
            "x,y,z,name\n1.5,2.0,3.0,Proxima Centauri\n4.0,5.0,6.0,Barnard's Star\n".as_bytes(),
        )
        .unwrap();
        let mut out = Vec::new();
        write_label_file(&mut out, &points, "name").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1.5 2.0 3.0 id 0 text Proxima Centauri");
        assert_eq!(lines[1], "4.0 5.0 6.0 id 1 text Barnard's Star");
    }

    #[test]
    fn missing_column_is_an_error() {
        let points = PointSet::parse("x,y,z\n1,2,3\n".as_bytes()).unwrap();
        let err = write_label_file(&mut Vec::new(), &points, "name").unwrap_err();
        assert!(matches!(err, LabelError::MissingColumn(_)));
    }
}
