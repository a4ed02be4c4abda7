//!
//! # Def Number & Point Formatting
//!
//! DEF real values are written the way C's `%.11g` writes them:
//! eleven significant digits, trailing zeros removed,
//! and scientific notation for very large or very small magnitudes.
//!

/// Significant digits of all real-valued output
const SIG_DIGITS: i32 = 11;

/// Format real value `v` with eleven significant digits, `%.11g`-style.
pub fn fmt_g(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0".into() } else { "0".into() };
    }
    // Round to the target precision first; the decimal exponent *after* rounding
    // decides between fixed and scientific forms.
    let sci = format!("{:.*e}", (SIG_DIGITS - 1) as usize, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= SIG_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (SIG_DIGITS - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, v)).to_string()
    }
}

/// Format real value `v` with six fixed decimals, `%f`-style.
pub fn fmt_f(v: f64) -> String {
    format!("{:.6}", v)
}

/// Remove trailing fractional zeros, and a then-trailing decimal point.
fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// # Point Cursor
///
/// Last point written within the innermost open drawing bracket.
/// Subsequent points replace each unchanged axis with `*`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointCursor {
    last: Option<(f64, f64)>,
}
impl PointCursor {
    /// Forget the last point, so that the next is written literally.
    pub fn reset(&mut self) {
        self.last = None;
    }
    /// Whether a point has been written since the last reset
    pub fn is_set(&self) -> bool {
        self.last.is_some()
    }
    /// Format point `(x, y)` as `( x y )`, relative to the last point, and record it.
    pub fn point(&mut self, x: f64, y: f64) -> String {
        let s = match self.last {
            None => format!("( {} {} )", fmt_g(x), fmt_g(y)),
            Some((lx, ly)) => match (x == lx, y == ly) {
                (true, true) => "( * * )".to_string(),
                (true, false) => format!("( * {} )", fmt_g(y)),
                (false, true) => format!("( {} * )", fmt_g(x)),
                (false, false) => format!("( {} {} )", fmt_g(x), fmt_g(y)),
            },
        };
        self.last = Some((x, y));
        s
    }
}

/// Format a point list the way polygon-style statements write them:
/// each point is followed by `suffix`, and every fifth point (after the first)
/// starts a continuation line, prefixed by `wrap`.
///
/// Points compress against one another via a fresh [PointCursor].
pub fn fmt_point_list(pts: &[(f64, f64)], first: &str, wrap: &str, suffix: &str) -> String {
    let mut cursor = PointCursor::default();
    let points = pts.iter().map(|(x, y)| cursor.point(*x, *y));
    wrap_points(points, first, wrap, suffix)
}

/// Format a point list with the same line breaks as [fmt_point_list],
/// but with every point written in full, without `*` compression.
/// Used by the integer-only `DIEAREA` and blockage polygons.
pub fn fmt_literal_point_list<P: std::fmt::Display>(
    pts: &[P],
    first: &str,
    wrap: &str,
    suffix: &str,
) -> String {
    wrap_points(pts.iter().map(|p| p.to_string()), first, wrap, suffix)
}

/// Join formatted `points`, five per line
fn wrap_points(
    points: impl Iterator<Item = String>,
    first: &str,
    wrap: &str,
    suffix: &str,
) -> String {
    let mut s = String::new();
    for (i, p) in points.enumerate() {
        if i == 0 {
            s.push_str(first);
        } else if i % 5 == 0 {
            s.push_str(wrap);
        }
        s.push_str(&p);
        s.push_str(suffix);
    }
    s
}
