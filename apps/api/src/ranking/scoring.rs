//! Relevance scoring — additive bonuses over a flat base, clamped once at the end.
//!
//! All matching is case-insensitive substring matching on the raw text. There are no
//! penalties, so a score never drops below `BASE_SCORE`.

use crate::models::job::JobPosting;
use crate::models::preferences::PreferenceProfile;

pub const BASE_SCORE: u32 = 50;
pub const ROLE_BONUS: u32 = 15;
pub const SKILL_BONUS: u32 = 8;
pub const LOCATION_BONUS: u32 = 10;
pub const SALARY_BONUS: u32 = 5;
pub const MAX_SCORE: u32 = 100;

/// Scores a single posting against the profile. Result is always within 0..=100.
pub fn score_job(job: &JobPosting, preferences: &PreferenceProfile) -> u32 {
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();

    let mut score = BASE_SCORE;

    if let Some(role) = preferences.role() {
        if title.contains(&role.to_lowercase()) {
            score += ROLE_BONUS;
        }
    }

    // Unbounded per skill; only the final clamp limits it.
    score += SKILL_BONUS * matched_skills(&description, preferences).len() as u32;

    if let Some(location) = preferences.location() {
        if preferences.wants_remote() && job.remote {
            score += LOCATION_BONUS;
        } else if job.location.to_lowercase().contains(&location.to_lowercase()) {
            score += LOCATION_BONUS;
        }
    }

    let salary_floor = preferences.salary.as_ref().and_then(|s| s.min);
    if let (Some(floor), Some(offered)) = (salary_floor, &job.salary) {
        if offered.min >= floor {
            score += SALARY_BONUS;
        }
    }

    score.min(MAX_SCORE)
}

/// Distinct profile skills found in an already-lowercased description, in profile order.
pub fn matched_skills<'p>(description_lower: &str, preferences: &'p PreferenceProfile) -> Vec<&'p str> {
    preferences
        .distinct_skills()
        .into_iter()
        .filter(|skill| description_lower.contains(&skill.to_lowercase()))
        .collect()
}
