use eframe::egui::{self, RichText, Ui};

use crate::color::Scheme;
use crate::data::model::{JobDataset, TextField};
use crate::data::selection::{Category, NO_SELECTION};
use crate::report::{
    CompanyDetail, CompanyReport, ExperienceReport, JobRoleReport, LocationReport, OverviewReport,
    SalaryReport, SectionReport, SkillReport, COMPANY_CHART_BARS, ROLE_CHART_BARS,
    SKILL_CHART_BARS, TOP_FRESHER_ROLES, TOP_LOCATIONS,
};
use crate::state::AppState;
use crate::ui::plot::{bar_chart, histogram};
use crate::ui::table::{count_table, fmt_opt, mean_table, pair_table, show_table};

// ---------------------------------------------------------------------------
// Central panel – the current section
// ---------------------------------------------------------------------------

/// Render the cached report for the current section.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore postings  (File → Open…)");
        });
        return;
    };
    // Taken out so selectors can borrow the state mutably while it renders.
    let Some(report) = state.report.take() else {
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &report {
            SectionReport::Overview(r) => overview(ui, &dataset, r),
            SectionReport::JobRoles(r) => job_roles(ui, state, r),
            SectionReport::Companies(r) => companies(ui, state, r),
            SectionReport::Locations(r) => locations(ui, r),
            SectionReport::Skills(r) => skills(ui, state, r),
            SectionReport::Salary(r) => salary(ui, state, r),
            SectionReport::Experience(r) => experience(ui, state, r),
        });

    // A selector change has already stored a fresh report.
    if state.report.is_none() {
        state.report = Some(report);
    }
}

/// Combo box over a category's options. Applies the choice to the state.
fn selector(ui: &mut Ui, state: &mut AppState, category: Category, label: &str) {
    let display = |entry: &str| {
        if entry == NO_SELECTION {
            "(choose)".to_string()
        } else {
            entry.to_string()
        }
    };
    let current = state.selection(category).as_entry().to_string();
    let mut chosen: Option<String> = None;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(label)
            .selected_text(display(&current))
            .height(400.0)
            .show_ui(ui, |ui: &mut Ui| {
                for entry in state.options(category) {
                    if ui.selectable_label(*entry == current, display(entry)).clicked() {
                        chosen = Some(entry.clone());
                    }
                }
            });
    });

    if let Some(entry) = chosen {
        state.select(category, &entry);
    }
}

fn space(ui: &mut Ui) {
    ui.add_space(12.0);
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, dataset: &JobDataset, report: &OverviewReport) {
    ui.heading("Dataset Overview");
    let postings = dataset.postings();
    show_table(
        ui,
        "postings",
        &TextField::ALL.map(|f| f.name()),
        postings.len(),
        |r, c| {
            TextField::ALL[c]
                .value(&postings[r])
                .unwrap_or_default()
                .to_string()
        },
    );

    space(ui);
    ui.label(format!(
        "Shape of the dataset: ({}, {})",
        report.shape.rows, report.shape.columns
    ));

    space(ui);
    ui.strong("Summary Statistics:");
    let text = &report.description.text;
    show_table(
        ui,
        "text_summary",
        &["column", "count", "unique", "top", "freq"],
        text.len(),
        |r, c| {
            let s = &text[r];
            match c {
                0 => s.column.to_string(),
                1 => s.count.to_string(),
                2 => s.unique.to_string(),
                3 => s.top.as_ref().map(|t| t.0.clone()).unwrap_or_default(),
                _ => s.top.as_ref().map(|t| t.1.to_string()).unwrap_or_default(),
            }
        },
    );
    let numeric = &report.description.numeric;
    show_table(
        ui,
        "numeric_summary",
        &["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"],
        numeric.len(),
        |r, c| {
            let s = &numeric[r];
            match c {
                0 => s.column.to_string(),
                1 => s.count.to_string(),
                2 => fmt_opt(s.mean, 3),
                3 => fmt_opt(s.std, 3),
                4 => fmt_opt(s.min, 2),
                5 => fmt_opt(s.q25, 2),
                6 => fmt_opt(s.median, 2),
                7 => fmt_opt(s.q75, 2),
                _ => fmt_opt(s.max, 2),
            }
        },
    );
}

fn job_roles(ui: &mut Ui, state: &mut AppState, report: &JobRoleReport) {
    ui.heading("Job Role Analysis");
    ui.strong(format!("Top {} Job Roles", report.top_roles.len()));
    count_table(ui, "top_roles", "job_role", &report.top_roles);

    space(ui);
    let chart_rows = &report.top_roles[..report.top_roles.len().min(ROLE_CHART_BARS)];
    bar_chart(
        ui,
        "roles_chart",
        &format!("Top {ROLE_CHART_BARS} Most Common Job Roles"),
        ("Job roles", "Number of Job Listings"),
        chart_rows,
        Scheme::Viridis,
    );

    space(ui);
    ui.heading("Search for a specific Job Role");
    selector(ui, state, Category::JobRole, "Select Job_Role");
    if let Some(rows) = &report.selected_roles {
        count_table(ui, "selected_roles", "job_role", rows);
    }

    if let Some(rows) = &report.companies_by_role {
        space(ui);
        ui.strong("Companies by Job Role");
        pair_table(ui, "companies_by_role", ["job_role", "company"], rows);
    }
    if let Some(rows) = &report.locations_by_role {
        space(ui);
        ui.strong("Location for Job Role");
        pair_table(ui, "locations_by_role", ["job_role", "location"], rows);
    }
}

fn companies(ui: &mut Ui, state: &mut AppState, report: &CompanyReport) {
    ui.heading("Company Analysis");
    selector(ui, state, Category::Company, "Select Company");

    space(ui);
    let chart_rows = &report.top_companies[..report.top_companies.len().min(COMPANY_CHART_BARS)];
    bar_chart(
        ui,
        "companies_chart",
        &format!("Top {COMPANY_CHART_BARS} Companies by Number of Job Listings"),
        ("Companies", "Number of Job Listings"),
        chart_rows,
        Scheme::CoolWarm,
    );

    space(ui);
    ui.strong(format!(
        "Top {} Companies with most job listings:",
        report.top_companies.len()
    ));
    count_table(ui, "top_companies", "company", &report.top_companies);

    match &report.detail {
        None => {}
        Some(CompanyDetail::Overall {
            ratings,
            job_roles,
            locations,
        }) => {
            space(ui);
            ui.strong("Rating of Companies:");
            mean_table(ui, "company_ratings", &["company", "rating"], ratings, 2);
            space(ui);
            ui.strong("Job_Roles offer by Companies:");
            pair_table(ui, "company_roles", ["company", "job_role"], job_roles);
            space(ui);
            ui.strong("Locations for Companies");
            pair_table(ui, "company_locations", ["company", "location"], locations);
        }
        Some(CompanyDetail::Single {
            company,
            rating,
            job_roles,
            locations,
        }) => {
            space(ui);
            ui.strong(format!("Rating of '{company}' is:"));
            ui.label(RichText::new(fmt_opt(*rating, 2)).strong().size(18.0));
            space(ui);
            ui.strong(format!("Job_Roles offer by '{company}':"));
            pair_table(ui, "company_roles", ["company", "job_role"], job_roles);
            space(ui);
            ui.strong(format!("Locations for '{company}':"));
            pair_table(ui, "company_locations", ["company", "location"], locations);
        }
    }
}

fn locations(ui: &mut Ui, report: &LocationReport) {
    ui.heading("Location Analysis");
    bar_chart(
        ui,
        "locations_chart",
        &format!("Top {TOP_LOCATIONS} Locations with Most Job Listings"),
        ("Location", "Number of Jobs"),
        &report.top_locations,
        Scheme::CoolWarm,
    );

    space(ui);
    ui.strong("Remote Work Opportunities");
    ui.label(
        RichText::new(format!(
            "Percentage of remote jobs: {:.2}%",
            report.remote_percentage
        ))
        .strong(),
    );
    count_table(ui, "remote_roles", "job_role", &report.remote_roles);
}

fn skills(ui: &mut Ui, state: &mut AppState, report: &SkillReport) {
    ui.heading("Skill Analysis");
    count_table(ui, "skills", "skills", &report.skills);

    space(ui);
    let chart_rows = &report.skills[..report.skills.len().min(SKILL_CHART_BARS)];
    bar_chart(
        ui,
        "skills_chart",
        &format!("Top {SKILL_CHART_BARS} skills"),
        ("Skills", "Frequency"),
        chart_rows,
        Scheme::Viridis,
    );

    space(ui);
    ui.strong("Skills by job Role");
    selector(ui, state, Category::JobRole, "Select Job_Role");
    if let Some(rows) = &report.role_skills {
        let role = state.selection(Category::JobRole).as_entry().to_string();
        ui.label(format!("Top Skills require for {role}:"));
        count_table(ui, "role_skills", "skills", rows);
    }

    space(ui);
    ui.strong("Top Skills for freshers");
    count_table(ui, "fresher_skills", "skills", &report.fresher_skills);

    space(ui);
    ui.strong("Top Skill Combinations");
    let combos = &report.combinations;
    show_table(
        ui,
        "skill_combinations",
        &["Skill Combination", "Frequency"],
        combos.len(),
        |r, c| match c {
            0 => combos[r].label(),
            _ => combos[r].count.to_string(),
        },
    );

    space(ui);
    ui.strong("Job Roles by Skill");
    selector(ui, state, Category::Skill, "Select Skill");
    if let Some(rows) = &report.skill_roles {
        count_table(ui, "skill_roles", "job_role", rows);
    }
}

fn salary(ui: &mut Ui, state: &mut AppState, report: &SalaryReport) {
    ui.heading("Salary Analysis");
    ui.strong("Distribution of Salary");
    histogram(
        ui,
        "min_salary_hist",
        "Distribution of Minimum Salary",
        ("Salary (in Lacs)", "Frequency"),
        &report.min_salary_bins,
        220,
    );
    histogram(
        ui,
        "max_salary_hist",
        "Distribution of Maximum Salary",
        ("Salary (in Lacs)", "Frequency"),
        &report.max_salary_bins,
        120,
    );

    space(ui);
    ui.strong("Average min and max salary for a job role");
    selector(ui, state, Category::JobRole, "Select Job_Role");
    if let Some(rows) = &report.by_role {
        mean_table(ui, "salary_by_role", &["job_role", "min_salary", "max_salary"], rows, 2);
    }

    space(ui);
    ui.strong("Salary offers by Companies");
    mean_table(
        ui,
        "salary_by_company",
        &["company", "min_salary", "max_salary"],
        &report.by_company,
        2,
    );

    space(ui);
    ui.strong("Jobs Offering a Salary Above a Threshold (in Lacs)");
    let mut threshold = state.selections.salary_threshold;
    if ui
        .add(egui::Slider::new(&mut threshold, 0..=state.max_salary_threshold).text("Select a Threshold"))
        .changed()
    {
        state.set_salary_threshold(threshold);
    }
    ui.label(format!("Jobs above {} Lac min salary", report.threshold));
    let rows = &report.above_threshold;
    show_table(
        ui,
        "above_threshold",
        &["job_role", "company", "min_salary", "max_salary"],
        rows.len(),
        |r, c| {
            let row = &rows[r];
            match c {
                0 => row.job_role.clone(),
                1 => row.company.clone(),
                2 => fmt_opt(row.min_salary, 2),
                _ => fmt_opt(row.max_salary, 2),
            }
        },
    );
}

fn experience(ui: &mut Ui, state: &mut AppState, report: &ExperienceReport) {
    ui.heading("Experience Analysis");
    ui.strong("Experience Requirements Distribution:");
    histogram(
        ui,
        "min_experience_hist",
        "Distribution of Minimum Experience Requirements",
        ("Years of Experience", "Frequency"),
        &report.min_experience_bins,
        220,
    );

    space(ui);
    ui.strong("Average Experience Requirement for Job Roles (in years)");
    selector(ui, state, Category::JobRole, "Select Job_Role");
    if let Some(rows) = &report.by_role {
        mean_table(
            ui,
            "experience_by_role",
            &["job_role", "min_experience", "max_experience"],
            rows,
            0,
        );
    }

    space(ui);
    ui.strong(format!(
        "Top {TOP_FRESHER_ROLES} Job roles for Fresher (0-1 Year of Experience)"
    ));
    count_table(ui, "fresher_roles", "job_role", &report.fresher_roles);

    space(ui);
    ui.strong("Freshers vs Experienced Job Opportunities");
    ui.label(RichText::new(format!("Jobs for Freshers: {}", report.fresher_count)).strong());
    ui.label(
        RichText::new(format!(
            "Jobs for Experienced Candidates: {}",
            report.experienced_count
        ))
        .strong(),
    );
}
