use crate::domain::model::{Job, JobType};
use std::collections::BTreeSet;

/// Keeps the jobs whose type is selected, in their original order.
///
/// An empty selection means "no filter": every job is returned.
pub fn apply(jobs: &[Job], selected_types: &BTreeSet<JobType>) -> Vec<Job> {
    if selected_types.is_empty() {
        return jobs.to_vec();
    }

    jobs.iter()
        .filter(|job| selected_types.contains(&job.job_type))
        .cloned()
        .collect()
}
