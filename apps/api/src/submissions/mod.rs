//! Candidate submissions — contact details left for follow-up, kept as JSON blobs.

pub mod handlers;
pub mod store;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key prefix every submission blob lives under.
pub const SUBMISSION_PREFIX: &str = "emmy-submissions/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Processed,
    Emailed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub email: String,
    pub linkedin_url: String,
    /// RFC 3339
    pub timestamp: String,
    pub status: SubmissionStatus,
}

impl Submission {
    pub fn new(email: String, linkedin_url: String, now: DateTime<Utc>) -> Self {
        Self {
            submission_id: new_submission_id(now),
            email,
            linkedin_url,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: SubmissionStatus::Pending,
        }
    }

    pub fn blob_key(&self) -> String {
        format!("{SUBMISSION_PREFIX}{}.json", self.submission_id)
    }
}

/// `emmy_<unix-millis>_<6 hex chars>`
fn new_submission_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("emmy_{}_{}", now.timestamp_millis(), &suffix[..6])
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_new_submission_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let submission = Submission::new(
            "kai@example.com".to_string(),
            "https://linkedin.com/in/kai".to_string(),
            now,
        );

        let parts: Vec<&str> = submission.submission_id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "emmy");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 6);
        assert_eq!(submission.timestamp, "2024-03-01T09:30:00.000Z");
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(
            submission.blob_key(),
            format!("emmy-submissions/{}.json", submission.submission_id)
        );
    }

    #[test]
    fn test_submission_wire_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let submission = Submission::new("a@b.co".to_string(), "li".to_string(), now);
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["linkedinUrl"], "li");
        assert_eq!(value["status"], "pending");
        assert!(value.get("submissionId").is_some());
    }
}
