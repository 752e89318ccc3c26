use crate::models::job::JobPosting;
use crate::models::preferences::PreferenceProfile;
use crate::ranking::scoring::matched_skills;

pub const FALLBACK_REASON: &str = "Strong match for your profile and experience";
const MAX_CLAUSES: usize = 2;

/// Builds the short justification shown next to a ranked job.
pub fn match_reason(job: &JobPosting, preferences: &PreferenceProfile) -> String {
    let mut clauses: Vec<String> = Vec::new();

    let matched = matched_skills(&job.description.to_lowercase(), preferences);
    if !matched.is_empty() {
        clauses.push(format!("uses {}", matched.join(", ")));
    }

    if preferences.wants_remote() && job.remote {
        clauses.push("offers remote work".to_string());
    }

    if preferences.has_culture_priority("work-life balance") {
        clauses.push("excellent work-life balance".to_string());
    }
    if preferences.has_culture_priority("growth") {
        clauses.push("strong growth opportunities".to_string());
    }

    if clauses.is_empty() {
        return FALLBACK_REASON.to_string();
    }

    clauses.truncate(MAX_CLAUSES);
    format!("You mentioned {} which this role offers", clauses.join(" and "))
}
