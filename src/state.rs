use std::sync::Arc;

use crate::config::AppConfig;
use crate::data::model::JobDataset;
use crate::data::selection::{category_options, Category, Selection};
use crate::report::{build_report, Section, SectionReport, Selections};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared read-only with every report.
    pub dataset: Option<Arc<JobDataset>>,

    /// Section chosen in the side panel.
    pub section: Section,

    /// Current drill-down parameters.
    pub selections: Selections,

    /// Selector entries per category, sentinels first.
    pub role_options: Vec<String>,
    pub company_options: Vec<String>,
    pub skill_options: Vec<String>,

    /// Report for the current section and selections (cached).
    pub report: Option<SectionReport>,

    /// Upper end of the salary threshold slider.
    pub max_salary_threshold: i64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            dataset: None,
            section: Section::default(),
            selections: Selections::default(),
            role_options: Vec::new(),
            company_options: Vec::new(),
            skill_options: Vec::new(),
            report: None,
            max_salary_threshold: config.max_salary_threshold,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset selections and rebuild the report.
    pub fn set_dataset(&mut self, dataset: Arc<JobDataset>) {
        self.role_options = category_options(&dataset, Category::JobRole);
        self.company_options = category_options(&dataset, Category::Company);
        self.skill_options = category_options(&dataset, Category::Skill);
        self.selections = Selections::default();

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the cached report after the section or a selection changed.
    pub fn refresh(&mut self) {
        self.report = self
            .dataset
            .as_ref()
            .map(|ds| build_report(ds, self.section, &self.selections));
    }

    pub fn set_section(&mut self, section: Section) {
        if self.section != section {
            self.section = section;
            self.refresh();
        }
    }

    /// Apply a selector entry for one category.
    pub fn select(&mut self, category: Category, entry: &str) {
        let selection = Selection::decode(entry);
        if *self.selection(category) == selection {
            return;
        }
        match category {
            Category::JobRole => self.selections.job_role = selection,
            Category::Company => self.selections.company = selection,
            Category::Skill => self.selections.skill = selection,
        }
        self.refresh();
    }

    pub fn set_salary_threshold(&mut self, threshold: i64) {
        let threshold = threshold.clamp(0, self.max_salary_threshold);
        if self.selections.salary_threshold != threshold {
            self.selections.salary_threshold = threshold;
            self.refresh();
        }
    }

    pub fn selection(&self, category: Category) -> &Selection {
        match category {
            Category::JobRole => &self.selections.job_role,
            Category::Company => &self.selections.company,
            Category::Skill => &self.selections.skill,
        }
    }

    pub fn options(&self, category: Category) -> &[String] {
        match category {
            Category::JobRole => &self.role_options,
            Category::Company => &self.company_options,
            Category::Skill => &self.skill_options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawPosting;

    fn state_with(rows: Vec<RawPosting>) -> AppState {
        let config = AppConfig {
            data_path: "unused.csv".into(),
            max_salary_threshold: 90,
        };
        let mut state = AppState::new(&config);
        state.set_dataset(Arc::new(JobDataset::from_raw(rows)));
        state
    }

    fn posting(id: &str, role: &str) -> RawPosting {
        RawPosting {
            job_id: id.into(),
            job_role: Some(role.into()),
            salary: Some("12-15".into()),
            ..RawPosting::default()
        }
    }

    #[test]
    fn loading_builds_options_and_overview() {
        let state = state_with(vec![posting("1", "Tester"), posting("2", "Analyst")]);
        assert_eq!(state.options(Category::JobRole), ["", "Overall", "Analyst", "Tester"]);
        assert!(matches!(state.report, Some(SectionReport::Overview(_))));
    }

    #[test]
    fn selection_change_rebuilds_report() {
        let mut state = state_with(vec![posting("1", "Tester"), posting("2", "Analyst")]);
        state.set_section(Section::JobRoles);
        match &state.report {
            Some(SectionReport::JobRoles(r)) => assert!(r.selected_roles.is_none()),
            other => panic!("unexpected report {other:?}"),
        }
        state.select(Category::JobRole, "Tester");
        match &state.report {
            Some(SectionReport::JobRoles(r)) => {
                assert_eq!(r.selected_roles.as_ref().map(|v| v.len()), Some(1))
            }
            other => panic!("unexpected report {other:?}"),
        }
    }

    #[test]
    fn threshold_is_clamped_to_slider_range() {
        let mut state = state_with(vec![posting("1", "Tester")]);
        state.set_section(Section::Salary);
        state.set_salary_threshold(500);
        assert_eq!(state.selections.salary_threshold, 90);
        match &state.report {
            Some(SectionReport::Salary(r)) => assert!(r.above_threshold.is_empty()),
            other => panic!("unexpected report {other:?}"),
        }
        state.set_salary_threshold(10);
        match &state.report {
            Some(SectionReport::Salary(r)) => assert_eq!(r.above_threshold.len(), 1),
            other => panic!("unexpected report {other:?}"),
        }
    }
}
