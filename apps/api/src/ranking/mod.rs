//! Job ranking — scores every posting against a preference profile and returns a
//! stable, descending top-K.
//!
//! Pure and synchronous: no I/O, no shared state, safe to call from any handler.

pub mod handlers;
pub mod match_reason;
pub mod scoring;

use thiserror::Error;

use crate::models::job::{JobPosting, ScoredJob};
use crate::models::preferences::PreferenceProfile;
use crate::ranking::match_reason::match_reason;
use crate::ranking::scoring::score_job;

#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    #[error("{0}")]
    InvalidArgument(String),
}

/// Ranks `jobs` by relevance to `preferences` and keeps the first `limit`.
///
/// Ties keep corpus order. An empty corpus is not an error.
pub fn rank(
    jobs: &[JobPosting],
    preferences: &PreferenceProfile,
    limit: usize,
) -> Result<Vec<ScoredJob>, RankError> {
    if limit < 1 {
        return Err(RankError::InvalidArgument(
            "limit must be at least 1".to_string(),
        ));
    }

    let mut scored: Vec<ScoredJob> = jobs
        .iter()
        .map(|job| ScoredJob {
            relevance_score: score_job(job, preferences),
            match_reason: match_reason(job, preferences),
            job: job.clone(),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored.truncate(limit);

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::job::SalaryRange;
    use crate::models::preferences::SalaryPreference;

    fn job(id: &str, title: &str, description: &str, remote: bool) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Auckland, NZ".to_string(),
            remote,
            salary: None,
            description: description.to_string(),
            apply_url: "#".to_string(),
            posted_date: Utc::now(),
            source: "test".to_string(),
        }
    }

    fn corpus() -> Vec<JobPosting> {
        vec![
            job("a", "Barista", "Coffee", false),
            job("b", "Rust Engineer", "Rust and Tokio", true),
            job("c", "Chef", "Kitchen", false),
            job("d", "Platform Engineer", "Kubernetes", false),
            job("e", "Cleaner", "Offices", false),
        ]
    }

    fn ids(ranked: &[ScoredJob]) -> Vec<&str> {
        ranked.iter().map(|s| s.job.id.as_str()).collect()
    }

    #[test]
    fn test_empty_profile_keeps_corpus_order_at_base() {
        let ranked = rank(&corpus(), &PreferenceProfile::default(), 10).unwrap();
        assert_eq!(ids(&ranked), vec!["a", "b", "c", "d", "e"]);
        assert!(ranked.iter().all(|s| s.relevance_score == 50));
        assert!(ranked
            .iter()
            .all(|s| s.match_reason == match_reason::FALLBACK_REASON));
    }

    #[test]
    fn test_sorted_descending_and_stable_on_ties() {
        let prefs = PreferenceProfile {
            role: Some("engineer".to_string()),
            skills: vec!["rust".to_string()],
            ..Default::default()
        };
        let ranked = rank(&corpus(), &prefs, 10).unwrap();
        // b: 50+15+8, d: 50+15, rest tie at 50 in corpus order
        assert_eq!(ids(&ranked), vec!["b", "d", "a", "c", "e"]);
        assert_eq!(ranked[0].relevance_score, 73);
        assert_eq!(ranked[1].relevance_score, 65);
    }

    #[test]
    fn test_limit_truncates() {
        let prefs = PreferenceProfile {
            role: Some("engineer".to_string()),
            ..Default::default()
        };
        let ranked = rank(&corpus(), &prefs, 3).unwrap();
        assert_eq!(ids(&ranked), vec!["b", "d", "a"]);
    }

    #[test]
    fn test_limit_larger_than_corpus_returns_all() {
        let ranked = rank(&corpus(), &PreferenceProfile::default(), 50).unwrap();
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_empty_corpus_is_ok() {
        let ranked = rank(&[], &PreferenceProfile::default(), 5).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = rank(&corpus(), &PreferenceProfile::default(), 0).unwrap_err();
        assert!(matches!(err, RankError::InvalidArgument(_)));
    }

    #[test]
    fn test_full_example_scores_eighty_eight() {
        let mut senior = job("x", "Senior Engineer", "Uses React and Go", true);
        senior.salary = Some(SalaryRange {
            min: 80_000,
            max: 120_000,
            currency: "USD".to_string(),
        });
        let prefs = PreferenceProfile {
            role: Some("engineer".to_string()),
            skills: vec!["react".to_string()],
            remote: Some(true),
            location: Some("Remote".to_string()),
            salary: Some(SalaryPreference {
                min: Some(70_000),
                ..Default::default()
            }),
            ..Default::default()
        };

        let ranked = rank(&[senior], &prefs, 1).unwrap();
        assert_eq!(ranked[0].relevance_score, 88);
        assert_eq!(
            ranked[0].match_reason,
            "You mentioned uses react and offers remote work which this role offers"
        );
    }

    #[test]
    fn test_scored_job_wire_format_is_flat_camel_case() {
        let ranked = rank(&corpus()[..1], &PreferenceProfile::default(), 1).unwrap();
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["relevanceScore"], 50);
        assert_eq!(value["applyUrl"], "#");
        assert!(value.get("matchReason").is_some());
        assert!(value.get("salary").is_none());
    }
}
