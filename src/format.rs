//! Number formatting for the emitted text formats.

/// Format a coordinate or parameter value for an output file.
///
/// Integral values keep a trailing `.0` (`10.0`, `0.0`) so the emitted
/// columns stay recognizable as floats to the consumer; everything else
/// uses the shortest round-trip representation.
///
/// ```
/// use speckgen::format::fmt_float;
///
/// assert_eq!(fmt_float(0.0), "0.0");
/// assert_eq!(fmt_float(10.0), "10.0");
/// assert_eq!(fmt_float(0.65), "0.65");
/// ```
pub fn fmt_float(value: f64) -> String {
    if value.is_finite() && value == value.trunc() {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
