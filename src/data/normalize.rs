use super::model::RawPosting;

/// Rating cells carrying this value are treated as missing.
pub const MISSING_RATING: &str = "missing";

// ---------------------------------------------------------------------------
// Derived numeric fields
// ---------------------------------------------------------------------------

/// Lower and upper bound of a `"<min>-<max>"` range. Each side is optional on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RangeBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Numeric fields computed from one raw row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Derived {
    pub experience: RangeBounds,
    pub salary: RangeBounds,
    pub rating: Option<f64>,
}

/// Pure transform of a raw row into its numeric fields.
pub fn normalize(raw: &RawPosting) -> Derived {
    Derived {
        experience: raw.experience.as_deref().map(parse_range).unwrap_or_default(),
        salary: raw.salary.as_deref().map(parse_range).unwrap_or_default(),
        rating: raw.rating.as_deref().and_then(parse_rating),
    }
}

/// Coerce a rating cell to a number. The `"missing"` sentinel, blanks and
/// anything unparseable become `None`.
pub fn parse_rating(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text == MISSING_RATING {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Range parser
// ---------------------------------------------------------------------------

/// Parse a range such as `"2-5"` or `"4.5-8 Lacs PA"`.
///
/// `min` is the number written immediately before the first `-` that has one,
/// `max` is the number written immediately after the first `-` that has one.
/// A number is a run of digits with at most one decimal point.
pub fn parse_range(text: &str) -> RangeBounds {
    let dashes = || text.match_indices('-').map(|(i, _)| i);
    RangeBounds {
        min: dashes().find_map(|i| number_before(text, i)),
        max: dashes().find_map(|i| number_after(text, i + 1)),
    }
}

fn digits_back(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }
    start
}

fn digits_forward(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// Number ending right before byte `end`: `digits`, `digits.digits` or `digits.`.
fn number_before(text: &str, end: usize) -> Option<f64> {
    let bytes = text.as_bytes();
    let frac_start = digits_back(bytes, end);
    if frac_start > 0 && bytes[frac_start - 1] == b'.' {
        let int_start = digits_back(bytes, frac_start - 1);
        if int_start < frac_start - 1 {
            return parse_number(&text[int_start..frac_start - 1], &text[frac_start..end]);
        }
    }
    if frac_start < end {
        return parse_number(&text[frac_start..end], "");
    }
    None
}

/// Number starting at byte `start`: at least one digit, then an optional fraction.
fn number_after(text: &str, start: usize) -> Option<f64> {
    let bytes = text.as_bytes();
    let int_end = digits_forward(bytes, start);
    if int_end == start {
        return None;
    }
    if int_end < bytes.len() && bytes[int_end] == b'.' {
        let frac_end = digits_forward(bytes, int_end + 1);
        return parse_number(&text[start..int_end], &text[int_end + 1..frac_end]);
    }
    parse_number(&text[start..int_end], "")
}

fn parse_number(int: &str, frac: &str) -> Option<f64> {
    if frac.is_empty() {
        int.parse().ok()
    } else {
        format!("{int}.{frac}").parse().ok()
    }
}
