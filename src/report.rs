use crate::data::aggregate::{
    count_by, count_by_exploded, count_by_pair, explode, filter_above_experience,
    filter_by_experience_band, filter_by_selection, filter_by_threshold, mean_by,
    remote_postings, remote_share, select_rows, CountRow, MeanRow, PairCountRow,
    FRESHER_MAX_EXPERIENCE,
};
use crate::data::miner::{top_skill_combinations, SkillCombination, TOP_COMBINATIONS};
use crate::data::model::{JobDataset, NumericField, Posting, TextField};
use crate::data::selection::Selection;
use crate::data::summary::{self, Bin, DatasetShape, Description};

pub const TOP_ROLES: usize = 50;
pub const ROLE_CHART_BARS: usize = 30;
pub const TOP_COMPANIES: usize = 50;
pub const COMPANY_CHART_BARS: usize = 30;
pub const TOP_LOCATIONS: usize = 20;
pub const SKILL_CHART_BARS: usize = 50;
pub const TOP_ROLE_SKILLS: usize = 30;
pub const TOP_FRESHER_SKILLS: usize = 100;
pub const TOP_FRESHER_ROLES: usize = 50;
pub const SALARY_BINS: usize = 20;
pub const EXPERIENCE_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Sections and user selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Overview,
    JobRoles,
    Companies,
    Locations,
    Skills,
    Salary,
    Experience,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Overview,
        Section::JobRoles,
        Section::Companies,
        Section::Locations,
        Section::Skills,
        Section::Salary,
        Section::Experience,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Overview => "Dataset Overview",
            Section::JobRoles => "Job Role Analysis",
            Section::Companies => "Company Analysis",
            Section::Locations => "Location Analysis",
            Section::Skills => "Skill Analysis",
            Section::Salary => "Salary Analysis",
            Section::Experience => "Experience Analysis",
        }
    }
}

/// Drill-down parameters chosen in the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selections {
    pub job_role: Selection,
    pub company: Selection,
    pub skill: Selection,
    /// Minimum salary lower bound, in lacs.
    pub salary_threshold: i64,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SectionReport {
    Overview(OverviewReport),
    JobRoles(JobRoleReport),
    Companies(CompanyReport),
    Locations(LocationReport),
    Skills(SkillReport),
    Salary(SalaryReport),
    Experience(ExperienceReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewReport {
    pub shape: DatasetShape,
    pub description: Description,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobRoleReport {
    pub top_roles: Vec<CountRow>,
    pub selected_roles: Option<Vec<CountRow>>,
    pub companies_by_role: Option<Vec<PairCountRow>>,
    pub locations_by_role: Option<Vec<PairCountRow>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyReport {
    pub top_companies: Vec<CountRow>,
    pub detail: Option<CompanyDetail>,
}

/// Company drill-down: every company, or a single one.
#[derive(Debug, Clone, PartialEq)]
pub enum CompanyDetail {
    Overall {
        ratings: Vec<MeanRow>,
        job_roles: Vec<PairCountRow>,
        locations: Vec<PairCountRow>,
    },
    Single {
        company: String,
        rating: Option<f64>,
        job_roles: Vec<PairCountRow>,
        locations: Vec<PairCountRow>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationReport {
    pub top_locations: Vec<CountRow>,
    pub remote_percentage: f64,
    pub remote_roles: Vec<CountRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillReport {
    pub skills: Vec<CountRow>,
    pub role_skills: Option<Vec<CountRow>>,
    pub fresher_skills: Vec<CountRow>,
    pub combinations: Vec<SkillCombination>,
    pub skill_roles: Option<Vec<CountRow>>,
}

/// A posting paying more than the salary threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRow {
    pub job_role: String,
    pub company: String,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryReport {
    pub min_salary_bins: Vec<Bin>,
    pub max_salary_bins: Vec<Bin>,
    pub by_role: Option<Vec<MeanRow>>,
    pub by_company: Vec<MeanRow>,
    pub threshold: i64,
    pub above_threshold: Vec<SalaryRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceReport {
    pub min_experience_bins: Vec<Bin>,
    pub by_role: Option<Vec<MeanRow>>,
    pub fresher_roles: Vec<CountRow>,
    pub fresher_count: usize,
    pub experienced_count: usize,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Compute the report for one section from scratch.
pub fn build_report(dataset: &JobDataset, section: Section, selections: &Selections) -> SectionReport {
    log::debug!("building {:?} report with {selections:?}", section);
    match section {
        Section::Overview => SectionReport::Overview(overview(dataset)),
        Section::JobRoles => SectionReport::JobRoles(job_roles(dataset, &selections.job_role)),
        Section::Companies => SectionReport::Companies(companies(dataset, &selections.company)),
        Section::Locations => SectionReport::Locations(locations(dataset)),
        Section::Skills => SectionReport::Skills(skills(dataset, selections)),
        Section::Salary => SectionReport::Salary(salary(dataset, selections)),
        Section::Experience => SectionReport::Experience(experience(dataset, &selections.job_role)),
    }
}

fn top<T>(mut rows: Vec<T>, n: usize) -> Vec<T> {
    rows.truncate(n);
    rows
}

fn numeric_values(rows: &[Posting], field: NumericField) -> Vec<f64> {
    rows.iter().filter_map(|p| field.value(p)).collect()
}

pub fn overview(dataset: &JobDataset) -> OverviewReport {
    OverviewReport {
        shape: summary::shape(dataset),
        description: summary::describe(dataset),
    }
}

pub fn job_roles(dataset: &JobDataset, role: &Selection) -> JobRoleReport {
    let rows = dataset.postings();
    let all_roles = count_by(rows, TextField::JobRole);
    let by_company = count_by_pair(rows, TextField::JobRole, TextField::Company);
    let by_location = count_by_pair(rows, TextField::JobRole, TextField::Location);

    JobRoleReport {
        selected_roles: select_rows(&all_roles, role, |r| r.value.as_str()),
        companies_by_role: select_rows(&by_company, role, |r| r.first.as_str()),
        locations_by_role: select_rows(&by_location, role, |r| r.first.as_str()),
        top_roles: top(all_roles, TOP_ROLES),
    }
}

pub fn companies(dataset: &JobDataset, company: &Selection) -> CompanyReport {
    let rows = dataset.postings();
    let top_companies = top(count_by(rows, TextField::Company), TOP_COMPANIES);

    let detail = match company {
        Selection::NoSelection => None,
        Selection::All => Some(CompanyDetail::Overall {
            ratings: mean_by(rows, TextField::Company, &[NumericField::Rating], None),
            job_roles: count_by_pair(rows, TextField::Company, TextField::JobRole),
            locations: count_by_pair(rows, TextField::Company, TextField::Location),
        }),
        Selection::Specific(name) => {
            let own: Vec<&Posting> =
                filter_by_selection(rows, TextField::Company, company).unwrap_or_default();
            let rating = mean_by(
                own.iter().copied(),
                TextField::Company,
                &[NumericField::Rating],
                None,
            )
            .first()
            .and_then(|r| r.means.first().copied().flatten());
            Some(CompanyDetail::Single {
                company: name.clone(),
                rating,
                job_roles: count_by_pair(own.iter().copied(), TextField::Company, TextField::JobRole),
                locations: count_by_pair(
                    own.iter().copied(),
                    TextField::Company,
                    TextField::Location,
                ),
            })
        }
    };

    CompanyReport {
        top_companies,
        detail,
    }
}

pub fn locations(dataset: &JobDataset) -> LocationReport {
    let rows = dataset.postings();
    let remote = remote_postings(rows);
    LocationReport {
        top_locations: top(count_by_exploded(rows, TextField::Location), TOP_LOCATIONS),
        remote_percentage: remote_share(rows),
        remote_roles: count_by(remote.iter().copied(), TextField::JobRole),
    }
}

pub fn skills(dataset: &JobDataset, selections: &Selections) -> SkillReport {
    let rows = dataset.postings();
    let freshers = filter_by_experience_band(rows, FRESHER_MAX_EXPERIENCE);

    let role_skills = filter_by_selection(rows, TextField::JobRole, &selections.job_role).map(
        |role_rows| {
            top(
                count_by_exploded(role_rows.iter().copied(), TextField::Skills),
                TOP_ROLE_SKILLS,
            )
        },
    );

    let skill_roles = (selections.skill != Selection::NoSelection).then(|| {
        count_by(
            rows.iter().filter(|p| {
                explode(TextField::Skills.value(p)).any(|token| selections.skill.admits(&token))
            }),
            TextField::JobRole,
        )
    });

    SkillReport {
        skills: count_by_exploded(rows, TextField::Skills),
        role_skills,
        fresher_skills: top(
            count_by_exploded(freshers.iter().copied(), TextField::Skills),
            TOP_FRESHER_SKILLS,
        ),
        combinations: top_skill_combinations(rows, TOP_COMBINATIONS),
        skill_roles,
    }
}

pub fn salary(dataset: &JobDataset, selections: &Selections) -> SalaryReport {
    let rows = dataset.postings();
    let salary_fields = [NumericField::MinSalary, NumericField::MaxSalary];
    let by_role = mean_by(rows, TextField::JobRole, &salary_fields, None);

    let mut above_threshold: Vec<SalaryRow> =
        filter_by_threshold(rows, NumericField::MinSalary, selections.salary_threshold)
            .into_iter()
            .map(|p| SalaryRow {
                job_role: TextField::JobRole.value(p).unwrap_or_default().to_string(),
                company: TextField::Company.value(p).unwrap_or_default().to_string(),
                min_salary: NumericField::MinSalary.value(p),
                max_salary: NumericField::MaxSalary.value(p),
            })
            .collect();
    above_threshold.sort_by(|a, b| {
        a.min_salary
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.min_salary.unwrap_or(f64::INFINITY))
    });

    SalaryReport {
        min_salary_bins: summary::histogram(&numeric_values(rows, NumericField::MinSalary), SALARY_BINS),
        max_salary_bins: summary::histogram(&numeric_values(rows, NumericField::MaxSalary), SALARY_BINS),
        by_role: select_rows(&by_role, &selections.job_role, |r| r.key.as_str()),
        by_company: mean_by(rows, TextField::Company, &salary_fields, None),
        threshold: selections.salary_threshold,
        above_threshold,
    }
}

pub fn experience(dataset: &JobDataset, role: &Selection) -> ExperienceReport {
    let rows = dataset.postings();
    let by_role = mean_by(
        rows,
        TextField::JobRole,
        &[NumericField::MinExperience, NumericField::MaxExperience],
        Some(0),
    );
    let freshers = filter_by_experience_band(rows, FRESHER_MAX_EXPERIENCE);
    let experienced = filter_above_experience(rows, FRESHER_MAX_EXPERIENCE);

    ExperienceReport {
        min_experience_bins: summary::histogram(
            &numeric_values(rows, NumericField::MinExperience),
            EXPERIENCE_BINS,
        ),
        by_role: select_rows(&by_role, role, |r| r.key.as_str()),
        fresher_roles: top(count_by(freshers.iter().copied(), TextField::JobRole), TOP_FRESHER_ROLES),
        fresher_count: freshers.len(),
        experienced_count: experienced.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawPosting;

    #[allow(clippy::too_many_arguments)]
    fn raw(
        id: &str,
        role: &str,
        company: &str,
        location: &str,
        skills: &str,
        exp: &str,
        salary: &str,
        rating: &str,
    ) -> RawPosting {
        let cell = |s: &str| (!s.is_empty()).then(|| s.to_string());
        RawPosting {
            job_id: id.to_string(),
            job_role: cell(role),
            company: cell(company),
            location: cell(location),
            skills: cell(skills),
            experience: cell(exp),
            salary: cell(salary),
            rating: cell(rating),
        }
    }

    fn dataset() -> JobDataset {
        JobDataset::from_raw(vec![
            raw("1", "Data Analyst", "Acme", "Pune, Remote", "SQL, Excel, Python", "0-1", "3-5", "4.0"),
            raw("2", "Data Analyst", "Globex", "Mumbai", "SQL, Excel, Python", "2-4", "6-9", "3.0"),
            raw("3", "Engineer", "Acme", "Bangalore", "Rust, Go", "3-6", "12-20", "missing"),
            raw("4", "Engineer", "Acme", "Work From Home", "Python", "1-2", "", "5.0"),
            raw("5", "Tester", "Initech", "Delhi", "", "", "11-14", ""),
        ])
    }

    fn specific(v: &str) -> Selection {
        Selection::Specific(v.to_string())
    }

    #[test]
    fn job_role_drill_down_respects_selection() {
        let ds = dataset();
        let none = job_roles(&ds, &Selection::NoSelection);
        assert_eq!(none.top_roles[0].value, "Data Analyst");
        assert!(none.selected_roles.is_none());
        assert!(none.companies_by_role.is_none());

        let one = job_roles(&ds, &specific("Engineer"));
        assert_eq!(one.selected_roles.map(|r| r.len()), Some(1));
        let companies = one.companies_by_role.unwrap_or_default();
        assert_eq!(companies.len(), 1);
        assert_eq!((companies[0].second.as_str(), companies[0].count), ("Acme", 2));

        let unknown = job_roles(&ds, &specific("Astronaut"));
        assert_eq!(unknown.locations_by_role, Some(Vec::new()));
    }

    #[test]
    fn single_company_has_rating_scalar() {
        let ds = dataset();
        let report = companies(&ds, &specific("Acme"));
        match report.detail {
            Some(CompanyDetail::Single { rating, job_roles, .. }) => {
                assert_eq!(rating, Some(4.5));
                assert_eq!(job_roles[0].second, "Engineer");
                assert_eq!(job_roles[0].count, 2);
            }
            other => panic!("unexpected detail {other:?}"),
        }
        assert!(companies(&ds, &Selection::NoSelection).detail.is_none());
        let overall = companies(&ds, &Selection::All);
        assert!(matches!(overall.detail, Some(CompanyDetail::Overall { .. })));
    }

    #[test]
    fn locations_count_remote_share() {
        let report = locations(&dataset());
        assert_eq!(report.remote_percentage, 40.0);
        let roles: Vec<(&str, usize)> = report
            .remote_roles
            .iter()
            .map(|r| (r.value.as_str(), r.count))
            .collect();
        assert_eq!(roles, vec![("Data Analyst", 1), ("Engineer", 1)]);
        assert_eq!(report.top_locations[0].value, "pune");
    }

    #[test]
    fn skills_report_mines_and_filters() {
        let ds = dataset();
        let selections = Selections {
            job_role: specific("Engineer"),
            skill: specific("python"),
            ..Selections::default()
        };
        let report = skills(&ds, &selections);
        assert_eq!(report.skills[0].value, "python");
        assert_eq!(report.skills[0].count, 3);
        assert_eq!(report.combinations[0].label(), "Excel, Python, SQL");
        assert_eq!(report.combinations[0].count, 2);

        let role_skills = report.role_skills.unwrap_or_default();
        assert_eq!(role_skills.len(), 3);

        let fresher: Vec<&str> = report.fresher_skills.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(fresher, vec!["python", "sql", "excel"]);

        let skill_roles = report.skill_roles.unwrap_or_default();
        assert_eq!(skill_roles[0].value, "Data Analyst");
        assert_eq!(skill_roles[0].count, 2);
    }

    #[test]
    fn salary_threshold_sorts_ascending() {
        let ds = dataset();
        let selections = Selections {
            job_role: Selection::All,
            salary_threshold: 5,
            ..Selections::default()
        };
        let report = salary(&ds, &selections);
        let mins: Vec<Option<f64>> = report.above_threshold.iter().map(|r| r.min_salary).collect();
        assert_eq!(mins, vec![Some(6.0), Some(11.0), Some(12.0)]);
        let by_role = report.by_role.unwrap_or_default();
        assert_eq!(by_role[0].key, "Engineer");
        assert_eq!(by_role[0].means, vec![Some(12.0), Some(20.0)]);
        assert_eq!(report.min_salary_bins.iter().map(|b| b.count).sum::<usize>(), 4);
    }

    #[test]
    fn experience_partitions_freshers() {
        let report = experience(&dataset(), &Selection::NoSelection);
        assert_eq!(report.fresher_count, 2);
        assert_eq!(report.experienced_count, 2);
        assert!(report.by_role.is_none());
        assert_eq!(report.fresher_roles.len(), 2);
    }

    #[test]
    fn empty_dataset_builds_every_section() {
        let ds = JobDataset::default();
        for section in Section::ALL {
            let _ = build_report(&ds, section, &Selections::default());
        }
        assert_eq!(locations(&ds).remote_percentage, 0.0);
    }
}
