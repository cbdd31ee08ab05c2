//! Group-by, explode and filter operations over postings.
//!
//! Every function takes rows by reference and returns freshly built output.
//! Where counts tie, rows keep the order in which their key was first seen.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use super::model::{NumericField, Posting, TextField};
use super::selection::Selection;

/// Postings asking for at most this many years are "fresher" jobs.
pub const FRESHER_MAX_EXPERIENCE: f64 = 1.0;

/// Location keywords marking remote work. `"wfo"` ("work from office") is a
/// known quirk of this list: it matches even though it reads as the opposite.
pub const REMOTE_KEYWORDS: [&str; 4] = ["Remote", "Work From Home", "WFH", "wfo"];

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountRow {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairCountRow {
    pub first: String,
    pub second: String,
    pub count: usize,
}

/// Per-group means, one entry per requested value field.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanRow {
    pub key: String,
    pub means: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Tally – insertion-ordered counter
// ---------------------------------------------------------------------------

/// Counts keys while remembering the order they first appeared in.
pub(crate) struct Tally<K> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Tally {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Entries by count descending; the sort is stable so ties keep first-seen order.
    pub(crate) fn into_sorted(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Split a comma-separated cell into trimmed, non-empty tokens (case preserved).
pub fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Split a multi-value cell into lowercased tokens. A missing cell yields nothing.
pub fn explode(cell: Option<&str>) -> impl Iterator<Item = String> + '_ {
    cell.into_iter()
        .flat_map(split_tokens)
        .map(str::to_lowercase)
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count rows per distinct value of `field`, most frequent first.
pub fn count_by<'a, I>(rows: I, field: TextField) -> Vec<CountRow>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut tally = Tally::new();
    for p in rows {
        if let Some(v) = field.value(p) {
            tally.add(v);
        }
    }
    tally
        .into_sorted()
        .into_iter()
        .map(|(value, count)| CountRow {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Explode a multi-value field into lowercased tokens and count each token.
pub fn count_by_exploded<'a, I>(rows: I, field: TextField) -> Vec<CountRow>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut tally = Tally::new();
    for p in rows {
        for token in explode(field.value(p)) {
            tally.add(token);
        }
    }
    tally
        .into_sorted()
        .into_iter()
        .map(|(value, count)| CountRow { value, count })
        .collect()
}

/// Count rows per `(first, second)` combination, ordered by `first` ascending
/// and then by count descending.
pub fn count_by_pair<'a, I>(rows: I, first: TextField, second: TextField) -> Vec<PairCountRow>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut tally = Tally::new();
    for p in rows {
        if let (Some(a), Some(b)) = (first.value(p), second.value(p)) {
            tally.add((a, b));
        }
    }
    let mut entries = tally.into_sorted();
    entries.sort_by(|((a, _), _), ((b, _), _)| a.cmp(b));
    entries
        .into_iter()
        .map(|((a, b), count)| PairCountRow {
            first: a.to_string(),
            second: b.to_string(),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Mean of each of `values` per distinct `key`. Missing numbers are left out
/// of the mean; a group with none at all gets `None`. When `decimals` is set
/// the means are rounded half-to-even. Sorted by the first value descending,
/// `None` last.
pub fn mean_by<'a, I>(
    rows: I,
    key: TextField,
    values: &[NumericField],
    decimals: Option<u32>,
) -> Vec<MeanRow>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<(f64, usize)>)> = Vec::new();

    for p in rows {
        let Some(k) = key.value(p) else {
            continue;
        };
        let slot = *slots.entry(k).or_insert_with(|| {
            groups.push((k, vec![(0.0, 0); values.len()]));
            groups.len() - 1
        });
        for (acc, field) in groups[slot].1.iter_mut().zip(values) {
            if let Some(v) = field.value(p) {
                acc.0 += v;
                acc.1 += 1;
            }
        }
    }

    let mut out: Vec<MeanRow> = groups
        .into_iter()
        .map(|(k, sums)| MeanRow {
            key: k.to_string(),
            means: sums
                .into_iter()
                .map(|(sum, n)| {
                    (n > 0).then(|| {
                        let mean = sum / n as f64;
                        decimals.map_or(mean, |d| round_half_even(mean, d))
                    })
                })
                .collect(),
        })
        .collect();

    out.sort_by(|a, b| {
        descending_nulls_last(
            a.means.first().copied().flatten(),
            b.means.first().copied().flatten(),
        )
    });
    out
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Round to `decimals` places, ties to even.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Rows whose `field` passes `selection`. `NoSelection` yields `None` so the
/// caller can skip rendering; an unknown value yields an empty list.
pub fn filter_by_selection<'a, I>(
    rows: I,
    field: TextField,
    selection: &Selection,
) -> Option<Vec<&'a Posting>>
where
    I: IntoIterator<Item = &'a Posting>,
{
    if *selection == Selection::NoSelection {
        return None;
    }
    Some(
        rows.into_iter()
            .filter(|p| field.value(p).is_some_and(|v| selection.admits(v)))
            .collect(),
    )
}

/// Same decoding as [`filter_by_selection`], applied to already aggregated rows.
pub fn select_rows<T, F>(rows: &[T], selection: &Selection, key: F) -> Option<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    if *selection == Selection::NoSelection {
        return None;
    }
    Some(
        rows.iter()
            .filter(|&r| selection.admits(key(r)))
            .cloned()
            .collect(),
    )
}

/// Rows where `field > lower_bound`. Missing values never pass.
pub fn filter_by_threshold<'a, I>(rows: I, field: NumericField, lower_bound: i64) -> Vec<&'a Posting>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let bound = lower_bound as f64;
    rows.into_iter()
        .filter(|p| field.value(p).is_some_and(|v| v > bound))
        .collect()
}

/// Rows asking for at most `max_experience` years. Missing values never pass.
pub fn filter_by_experience_band<'a, I>(rows: I, max_experience: f64) -> Vec<&'a Posting>
where
    I: IntoIterator<Item = &'a Posting>,
{
    rows.into_iter()
        .filter(|p| {
            NumericField::MinExperience
                .value(p)
                .is_some_and(|v| v <= max_experience)
        })
        .collect()
}

/// Complement of [`filter_by_experience_band`] over rows with a known minimum.
pub fn filter_above_experience<'a, I>(rows: I, max_experience: f64) -> Vec<&'a Posting>
where
    I: IntoIterator<Item = &'a Posting>,
{
    rows.into_iter()
        .filter(|p| {
            NumericField::MinExperience
                .value(p)
                .is_some_and(|v| v > max_experience)
        })
        .collect()
}

/// Rows whose `field` contains any of `patterns`. Missing fields never match.
pub fn filter_by_text_match<'a, I>(
    rows: I,
    field: TextField,
    patterns: &[&str],
    case_insensitive: bool,
) -> Vec<&'a Posting>
where
    I: IntoIterator<Item = &'a Posting>,
{
    let patterns: Vec<String> = patterns
        .iter()
        .map(|p| {
            if case_insensitive {
                p.to_lowercase()
            } else {
                p.to_string()
            }
        })
        .collect();

    rows.into_iter()
        .filter(|p| {
            let Some(text) = field.value(p) else {
                return false;
            };
            let text = if case_insensitive {
                text.to_lowercase()
            } else {
                text.to_string()
            };
            patterns.iter().any(|pat| text.contains(pat.as_str()))
        })
        .collect()
}

/// Postings whose location mentions remote work.
pub fn remote_postings<'a, I>(rows: I) -> Vec<&'a Posting>
where
    I: IntoIterator<Item = &'a Posting>,
{
    filter_by_text_match(rows, TextField::Location, &REMOTE_KEYWORDS, true)
}

/// Percentage of remote postings; `0.0` when there are no rows.
pub fn remote_share(rows: &[Posting]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    remote_postings(rows).len() as f64 * 100.0 / rows.len() as f64
}
