//! Job corpus — loads the static legacy posting export and normalizes it into `JobPosting`s.
//!
//! The export uses upper-case legacy field names and carries no location, remote or
//! salary columns, so location and remote are inferred from the description text.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::models::job::JobPosting;

const SOURCE_LABEL: &str = "NZ Jobs";
const PLACEHOLDER_APPLY_URL: &str = "#";
const DEFAULT_LOCATION: &str = "New Zealand";

/// City keyword → normalized location label, checked in order.
const CITY_LOCATIONS: &[(&str, &str)] = &[
    ("auckland", "Auckland, NZ"),
    ("wellington", "Wellington, NZ"),
    ("christchurch", "Christchurch, NZ"),
];

const REMOTE_MARKERS: &[&str] = &["remote", "work from home"];

/// One record of the raw export. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPosting {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(rename = "POSITION_TITLE", default)]
    pub position_title: Option<String>,
    #[serde(rename = "COMPANY_NAME", default)]
    pub company_name: Option<String>,
    #[serde(rename = "POSITION_FULL_DESCRIPTION", default)]
    pub full_description: Option<String>,
    #[serde(rename = "POSITION_SHORT_DESCRIPTION", default)]
    pub short_description: Option<String>,
}

/// Reads and normalizes the corpus file. Called once at startup.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<JobPosting>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job corpus at {}", path.display()))?;

    let records: Vec<RawPosting> = serde_json::from_str(&raw)
        .with_context(|| format!("Job corpus at {} is not a JSON array of postings", path.display()))?;

    let loaded_at = Utc::now();
    let jobs: Vec<JobPosting> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize(record, index, loaded_at))
        .collect();

    info!("Loaded {} job postings from {}", jobs.len(), path.display());
    Ok(jobs)
}

/// Maps one raw record onto the ranking model.
pub fn normalize(raw: RawPosting, index: usize, loaded_at: DateTime<Utc>) -> JobPosting {
    let full = raw.full_description.unwrap_or_default();
    let full_lower = full.to_lowercase();

    let location = CITY_LOCATIONS
        .iter()
        .find(|(city, _)| full_lower.contains(city))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_LOCATION)
        .to_string();

    let remote = REMOTE_MARKERS.iter().any(|m| full_lower.contains(m));

    let description = if full.is_empty() {
        raw.short_description.unwrap_or_default()
    } else {
        full
    };

    JobPosting {
        id: raw
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("job-{index}")),
        title: non_empty_or(raw.position_title, "No title"),
        company: non_empty_or(raw.company_name, "Unknown company"),
        location,
        remote,
        salary: None,
        description,
        apply_url: PLACEHOLDER_APPLY_URL.to_string(),
        posted_date: loaded_at,
        source: SOURCE_LABEL.to_string(),
    }
}

/// Legacy exports carry ids as either strings or integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn raw(full: Option<&str>, short: Option<&str>) -> RawPosting {
        RawPosting {
            id: Some("42".to_string()),
            position_title: Some("Backend Developer".to_string()),
            company_name: Some("Kiwi Labs".to_string()),
            full_description: full.map(str::to_string),
            short_description: short.map(str::to_string),
        }
    }

    #[test]
    fn test_location_inferred_from_first_matching_city() {
        let job = normalize(
            raw(Some("Offices in Wellington and Auckland"), None),
            0,
            Utc::now(),
        );
        // Auckland is checked before Wellington
        assert_eq!(job.location, "Auckland, NZ");
    }

    #[test]
    fn test_location_defaults_to_country() {
        let job = normalize(raw(Some("Based in Dunedin"), None), 0, Utc::now());
        assert_eq!(job.location, "New Zealand");
    }

    #[test]
    fn test_remote_inferred_from_markers() {
        let job = normalize(raw(Some("Fully REMOTE team"), None), 0, Utc::now());
        assert!(job.remote);
        let job = normalize(raw(Some("Option to work from home"), None), 0, Utc::now());
        assert!(job.remote);
        let job = normalize(raw(Some("Onsite in Christchurch"), None), 0, Utc::now());
        assert!(!job.remote);
    }

    #[test]
    fn test_short_description_fallback() {
        let job = normalize(raw(None, Some("Short blurb")), 0, Utc::now());
        assert_eq!(job.description, "Short blurb");
        assert_eq!(job.location, "New Zealand");
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let job = normalize(RawPosting::default(), 7, Utc::now());
        assert_eq!(job.id, "job-7");
        assert_eq!(job.title, "No title");
        assert_eq!(job.company, "Unknown company");
        assert_eq!(job.description, "");
        assert_eq!(job.apply_url, "#");
        assert_eq!(job.source, "NZ Jobs");
        assert!(job.salary.is_none());
    }

    #[tokio::test]
    async fn test_load_corpus_reads_legacy_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a1", "POSITION_TITLE": "Data Analyst", "COMPANY_NAME": "Fern",
                  "POSITION_FULL_DESCRIPTION": "SQL and Python, remote friendly"}},
                {{"POSITION_TITLE": "Chef"}},
                {{"id": 310, "POSITION_TITLE": "Barista"}}
            ]"#
        )
        .unwrap();

        let jobs = load_corpus(file.path()).await.unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].id, "a1");
        assert!(jobs[0].remote);
        assert_eq!(jobs[1].id, "job-1");
        assert_eq!(jobs[2].id, "310");
        assert_eq!(jobs[0].posted_date, jobs[1].posted_date);
    }

    #[tokio::test]
    async fn test_load_corpus_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        assert!(load_corpus(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_load_corpus_missing_file() {
        let err = load_corpus("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read job corpus"));
    }
}
