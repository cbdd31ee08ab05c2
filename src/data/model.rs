
use serde::Deserialize;

use super::normalize::{self, Derived};

// ---------------------------------------------------------------------------
// RawPosting – one row exactly as read from the source file
// ---------------------------------------------------------------------------

/// A job posting as stored in the source table. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPosting {
    pub job_id: String,
    pub job_role: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub salary: Option<String>,
    pub rating: Option<String>,
}

/// Source column names, in file order.
pub const COLUMNS: [&str; 8] = [
    "job_id",
    "job_role",
    "company",
    "location",
    "skills",
    "experience",
    "salary",
    "rating",
];

// ---------------------------------------------------------------------------
// Posting – raw row plus normalized numeric fields
// ---------------------------------------------------------------------------

/// One row of the dataset together with its derived numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    pub raw: RawPosting,
    pub derived: Derived,
}

impl Posting {
    pub fn new(raw: RawPosting) -> Self {
        let derived = normalize::normalize(&raw);
        Posting { raw, derived }
    }
}

// ---------------------------------------------------------------------------
// Field accessors
// ---------------------------------------------------------------------------

/// A free-text column of the posting table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    JobId,
    JobRole,
    Company,
    Location,
    Skills,
    Experience,
    Salary,
    Rating,
}

impl TextField {
    pub const ALL: [TextField; 8] = [
        TextField::JobId,
        TextField::JobRole,
        TextField::Company,
        TextField::Location,
        TextField::Skills,
        TextField::Experience,
        TextField::Salary,
        TextField::Rating,
    ];

    /// The cell for this column, `None` when missing or blank.
    pub fn value<'a>(&self, posting: &'a Posting) -> Option<&'a str> {
        let raw = &posting.raw;
        let cell = match self {
            TextField::JobId => Some(raw.job_id.as_str()),
            TextField::JobRole => raw.job_role.as_deref(),
            TextField::Company => raw.company.as_deref(),
            TextField::Location => raw.location.as_deref(),
            TextField::Skills => raw.skills.as_deref(),
            TextField::Experience => raw.experience.as_deref(),
            TextField::Salary => raw.salary.as_deref(),
            TextField::Rating => raw.rating.as_deref(),
        };
        cell.filter(|s| !s.trim().is_empty())
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextField::JobId => "job_id",
            TextField::JobRole => "job_role",
            TextField::Company => "company",
            TextField::Location => "location",
            TextField::Skills => "skills",
            TextField::Experience => "experience",
            TextField::Salary => "salary",
            TextField::Rating => "rating",
        }
    }
}

/// A numeric column, either coerced (`rating`) or derived from a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Rating,
    MinExperience,
    MaxExperience,
    MinSalary,
    MaxSalary,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Rating,
        NumericField::MinExperience,
        NumericField::MaxExperience,
        NumericField::MinSalary,
        NumericField::MaxSalary,
    ];

    pub fn value(&self, posting: &Posting) -> Option<f64> {
        let d = &posting.derived;
        match self {
            NumericField::Rating => d.rating,
            NumericField::MinExperience => d.experience.min,
            NumericField::MaxExperience => d.experience.max,
            NumericField::MinSalary => d.salary.min,
            NumericField::MaxSalary => d.salary.max,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Rating => "rating",
            NumericField::MinExperience => "min_experience",
            NumericField::MaxExperience => "max_experience",
            NumericField::MinSalary => "min_salary",
            NumericField::MaxSalary => "max_salary",
        }
    }
}

// ---------------------------------------------------------------------------
// JobDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct JobDataset {
    postings: Vec<Posting>,
}

impl JobDataset {
    /// Normalize every raw row and build the dataset.
    pub fn from_raw(rows: Vec<RawPosting>) -> Self {
        JobDataset {
            postings: rows.into_iter().map(Posting::new).collect(),
        }
    }

    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builder used across the data-layer tests.
    pub(crate) fn posting(job_id: &str) -> RawPosting {
        RawPosting {
            job_id: job_id.to_string(),
            ..RawPosting::default()
        }
    }

    pub(crate) fn with(mut raw: RawPosting, field: TextField, value: &str) -> RawPosting {
        let v = Some(value.to_string());
        match field {
            TextField::JobId => raw.job_id = value.to_string(),
            TextField::JobRole => raw.job_role = v,
            TextField::Company => raw.company = v,
            TextField::Location => raw.location = v,
            TextField::Skills => raw.skills = v,
            TextField::Experience => raw.experience = v,
            TextField::Salary => raw.salary = v,
            TextField::Rating => raw.rating = v,
        }
        raw
    }

    #[test]
    fn blank_cells_read_as_missing() {
        let p = Posting::new(with(posting("1"), TextField::Company, "   "));
        assert_eq!(TextField::Company.value(&p), None);
        assert_eq!(TextField::JobRole.value(&p), None);
        assert_eq!(TextField::JobId.value(&p), Some("1"));
    }

    #[test]
    fn numeric_fields_come_from_derived_ranges() {
        let raw = with(
            with(with(posting("7"), TextField::Experience, "2-5"), TextField::Salary, "4.5-8"),
            TextField::Rating,
            "3.9",
        );
        let p = Posting::new(raw);
        assert_eq!(NumericField::MinExperience.value(&p), Some(2.0));
        assert_eq!(NumericField::MaxExperience.value(&p), Some(5.0));
        assert_eq!(NumericField::MinSalary.value(&p), Some(4.5));
        assert_eq!(NumericField::MaxSalary.value(&p), Some(8.0));
        assert_eq!(NumericField::Rating.value(&p), Some(3.9));
    }

    #[test]
    fn dataset_knows_when_it_is_empty() {
        assert!(JobDataset::default().is_empty());
        let ds = JobDataset::from_raw(vec![posting("1")]);
        assert!(!ds.is_empty());
        assert_eq!(ds.len(), 1);
    }
}
