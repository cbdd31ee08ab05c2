use std::collections::BTreeSet;

use super::aggregate::explode;
use super::model::{JobDataset, TextField};

/// Selector entry meaning "nothing chosen yet".
pub const NO_SELECTION: &str = "";
/// Selector entry meaning "every category".
pub const ALL_SELECTION: &str = "Overall";

// ---------------------------------------------------------------------------
// Selection – decoded selector state
// ---------------------------------------------------------------------------

/// What the user picked in a category selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing chosen; dependent output is suppressed.
    #[default]
    NoSelection,
    /// Unfiltered aggregate.
    All,
    /// Restrict to one category value.
    Specific(String),
}

impl Selection {
    /// Decode a selector entry produced by [`category_options`].
    pub fn decode(entry: &str) -> Self {
        match entry {
            NO_SELECTION => Selection::NoSelection,
            ALL_SELECTION => Selection::All,
            value => Selection::Specific(value.to_string()),
        }
    }

    /// The selector entry this selection corresponds to.
    pub fn as_entry(&self) -> &str {
        match self {
            Selection::NoSelection => NO_SELECTION,
            Selection::All => ALL_SELECTION,
            Selection::Specific(value) => value,
        }
    }

    /// Whether a category value passes this selection.
    /// `NoSelection` admits nothing.
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selection::NoSelection => false,
            Selection::All => true,
            Selection::Specific(v) => v == value,
        }
    }
}

// ---------------------------------------------------------------------------
// Categorical enumerator
// ---------------------------------------------------------------------------

/// A column the user can drill down by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    JobRole,
    Company,
    Skill,
}

impl Category {
    pub fn field(&self) -> TextField {
        match self {
            Category::JobRole => TextField::JobRole,
            Category::Company => TextField::Company,
            Category::Skill => TextField::Skills,
        }
    }
}

/// Distinct values of a category, sorted ascending, preceded by the
/// [`NO_SELECTION`] and [`ALL_SELECTION`] entries in that order.
///
/// Skills are enumerated from the exploded, lowercased token set.
pub fn category_options(dataset: &JobDataset, category: Category) -> Vec<String> {
    let field = category.field();
    let values: BTreeSet<String> = match category {
        Category::Skill => dataset
            .postings()
            .iter()
            .flat_map(|p| explode(field.value(p)))
            .collect(),
        Category::JobRole | Category::Company => dataset
            .postings()
            .iter()
            .filter_map(|p| field.value(p))
            .map(str::to_string)
            .collect(),
    };

    let mut options = Vec::with_capacity(values.len() + 2);
    options.push(NO_SELECTION.to_string());
    options.push(ALL_SELECTION.to_string());
    for value in values {
        if value == NO_SELECTION || value == ALL_SELECTION {
            log::warn!(
                "{category:?} value {value:?} collides with a selector entry and cannot be chosen"
            );
            continue;
        }
        options.push(value);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{posting, with};

    fn dataset(rows: &[(&str, &str)]) -> JobDataset {
        JobDataset::from_raw(
            rows.iter()
                .enumerate()
                .map(|(i, (company, skills))| {
                    with(
                        with(posting(&i.to_string()), TextField::Company, company),
                        TextField::Skills,
                        skills,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn sentinels_lead_sorted_companies() {
        let ds = dataset(&[("Zeta", "a"), ("Alpha", "b"), ("Zeta", "c")]);
        assert_eq!(
            category_options(&ds, Category::Company),
            vec!["", "Overall", "Alpha", "Zeta"]
        );
    }

    #[test]
    fn skills_enumerate_exploded_tokens() {
        let ds = dataset(&[("A", "Python, SQL"), ("B", "sql,Rust ,")]);
        assert_eq!(
            category_options(&ds, Category::Skill),
            vec!["", "Overall", "python", "rust", "sql"]
        );
    }

    #[test]
    fn value_matching_a_sentinel_is_skipped() {
        let ds = dataset(&[("Overall", "a"), ("Beta", "b")]);
        assert_eq!(
            category_options(&ds, Category::Company),
            vec!["", "Overall", "Beta"]
        );
    }

    #[test]
    fn empty_dataset_still_has_sentinels() {
        let ds = JobDataset::default();
        assert_eq!(category_options(&ds, Category::JobRole), vec!["", "Overall"]);
    }

    #[test]
    fn decode_round_trips_entries() {
        assert_eq!(Selection::decode(""), Selection::NoSelection);
        assert_eq!(Selection::decode("Overall"), Selection::All);
        let s = Selection::decode("Data Analyst");
        assert_eq!(s, Selection::Specific("Data Analyst".into()));
        assert_eq!(s.as_entry(), "Data Analyst");
        assert!(s.admits("Data Analyst"));
        assert!(!s.admits("data analyst"));
        assert!(!Selection::NoSelection.admits("Data Analyst"));
    }
}
