use super::aggregate::count_by;
use super::model::{JobDataset, NumericField, Posting, TextField, COLUMNS};

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
}

pub fn shape(dataset: &JobDataset) -> DatasetShape {
    DatasetShape {
        rows: dataset.len(),
        columns: COLUMNS.len(),
    }
}

// ---------------------------------------------------------------------------
// Column summaries
// ---------------------------------------------------------------------------

/// Summary of a text column: non-missing count, distinct values, and the most
/// frequent value with its frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSummary {
    pub column: &'static str,
    pub count: usize,
    pub unique: usize,
    pub top: Option<(String, usize)>,
}

/// Summary of a numeric column. Every statistic is `None` when the column has
/// no values; `std` also needs at least two.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub text: Vec<TextSummary>,
    pub numeric: Vec<NumericSummary>,
}

/// Summary statistics for every source column and every numeric field.
pub fn describe(dataset: &JobDataset) -> Description {
    let rows = dataset.postings();
    Description {
        text: TextField::ALL
            .iter()
            .map(|&field| describe_text(rows, field))
            .collect(),
        numeric: NumericField::ALL
            .iter()
            .map(|&field| {
                let values: Vec<f64> = rows.iter().filter_map(|p| field.value(p)).collect();
                describe_numeric(field.name(), &values)
            })
            .collect(),
    }
}

fn describe_text(rows: &[Posting], field: TextField) -> TextSummary {
    let counts = count_by(rows, field);
    TextSummary {
        column: field.name(),
        count: counts.iter().map(|c| c.count).sum(),
        unique: counts.len(),
        top: counts.first().map(|c| (c.value.clone(), c.count)),
    }
}

pub fn describe_numeric(column: &'static str, values: &[f64]) -> NumericSummary {
    if values.is_empty() {
        return NumericSummary {
            column,
            ..NumericSummary::default()
        };
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = (sorted.len() > 1).then(|| {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        var.sqrt()
    });

    NumericSummary {
        column,
        count: sorted.len(),
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        q25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.5)),
        q75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// Linear-interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width bins spanning the values; the last bin includes its right edge.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() < f64::EPSILON {
        return vec![Bin {
            start: min - 0.5,
            end: max + 0.5,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{posting, with};

    #[test]
    fn shape_counts_source_columns() {
        let ds = JobDataset::from_raw(vec![posting("1"), posting("2")]);
        assert_eq!(shape(&ds), DatasetShape { rows: 2, columns: 8 });
    }

    #[test]
    fn numeric_summary_matches_hand_computed_values() {
        let s = describe_numeric("x", &[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, Some(2.5));
        assert_eq!(s.min, Some(1.0));
        assert_eq!(s.q25, Some(1.75));
        assert_eq!(s.median, Some(2.5));
        assert_eq!(s.q75, Some(3.25));
        assert_eq!(s.max, Some(4.0));
        let std = s.std.unwrap_or_default();
        assert!((std - 1.290_994).abs() < 1e-5);
    }

    #[test]
    fn empty_numeric_column_has_no_statistics() {
        let s = describe_numeric("rating", &[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.max, None);
        let single = describe_numeric("rating", &[3.0]);
        assert_eq!(single.std, None);
        assert_eq!(single.median, Some(3.0));
    }

    #[test]
    fn describe_reports_top_text_value() {
        let ds = JobDataset::from_raw(vec![
            with(posting("1"), TextField::Company, "Acme"),
            with(posting("2"), TextField::Company, "Acme"),
            with(posting("3"), TextField::Company, "Globex"),
            with(posting("4"), TextField::Rating, "missing"),
        ]);
        let d = describe(&ds);
        let company = d.text.iter().find(|t| t.column == "company");
        assert_eq!(
            company,
            Some(&TextSummary {
                column: "company",
                count: 3,
                unique: 2,
                top: Some(("Acme".into(), 2)),
            })
        );
        let rating = d.numeric.iter().find(|n| n.column == "rating");
        assert_eq!(rating.map(|r| r.count), Some(0));
    }

    #[test]
    fn histogram_bins_cover_range() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[3].end, 4.0);
        assert_eq!(bins[1].center(), 1.5);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 10).is_empty());
        let single = histogram(&[5.0, 5.0], 10);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
        assert_eq!(single[0].width(), 1.0);
    }
}
