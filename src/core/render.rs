use crate::core::filter_panel::JobTypeOption;
use crate::domain::model::{Country, Job};
use crate::utils::error::Result;
use chrono::NaiveDate;
use std::fmt::Write;

// 卡片上的部門、地點、截止日期目前不是職缺欄位
pub const DEPARTMENT_PLACEHOLDER: &str = "Job.department";
pub const LOCATION_PLACEHOLDER: &str = "Job Location";

pub fn closing_label(today: NaiveDate) -> String {
    format!("Closing on {}", today.format("%a %b %d %Y"))
}

pub fn render_card(job: &Job, today: NaiveDate) -> String {
    format!(
        "{} at {}  [{}]\n  👥 {}   📍 {}   📅 {}",
        job.title,
        job.company.name,
        job.job_type.key(),
        DEPARTMENT_PLACEHOLDER,
        LOCATION_PLACEHOLDER,
        closing_label(today)
    )
}

pub fn render_job_list(jobs: &[Job], today: NaiveDate) -> String {
    if jobs.is_empty() {
        return "No jobs found.".to_string();
    }

    jobs.iter()
        .map(|job| render_card(job, today))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_filter_panel(options: &[JobTypeOption], countries: &[Country]) -> String {
    let mut out = String::from("Type\n");
    for option in options {
        let mark = if option.checked { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, option.label);
    }

    out.push_str("Countries\n");
    for country in countries {
        let _ = writeln!(out, "  - {}", country.name);
    }

    out
}

pub fn render_json(jobs: &[Job]) -> Result<String> {
    Ok(serde_json::to_string_pretty(jobs)?)
}
