//! Blob storage for submissions. S3 (or MinIO) in production, in-memory in tests.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;
use tracing::{info, warn};

use crate::submissions::{Submission, SUBMISSION_PREFIX};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("S3 request failed: {0}")]
    S3(String),

    #[error("Corrupt submission blob {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Writes the record and returns its location.
    async fn put(&self, submission: &Submission) -> Result<String, StoreError>;

    /// Every stored record, in key order.
    async fn list(&self) -> Result<Vec<Submission>, StoreError>;
}

pub struct S3SubmissionStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3SubmissionStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    async fn fetch(&self, key: &str) -> Result<Submission, StoreError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StoreError::S3(format!("get {key}: {e}")))?;

        let bytes = object
            .body
            .collect()
            .await
            .map_err(|e| StoreError::S3(format!("read {key}: {e}")))?
            .into_bytes();

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })
    }
}

#[async_trait]
impl SubmissionStore for S3SubmissionStore {
    async fn put(&self, submission: &Submission) -> Result<String, StoreError> {
        let key = submission.blob_key();
        let body = serde_json::to_vec_pretty(submission)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type("application/json")
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::S3(format!("put {key}: {e}")))?;

        let location = format!("s3://{}/{}", self.bucket, key);
        info!("Uploaded submission to {location}");
        Ok(location)
    }

    async fn list(&self) -> Result<Vec<Submission>, StoreError> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(SUBMISSION_PREFIX)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StoreError::S3(format!("list: {e}")))?;
            keys.extend(page.contents().iter().filter_map(|o| o.key().map(str::to_string)));
        }

        let mut submissions = Vec::with_capacity(keys.len());
        for key in keys.iter().filter(|k| k.ends_with(".json")) {
            match self.fetch(key).await {
                Ok(submission) => submissions.push(submission),
                // One bad blob should not hide the rest.
                Err(StoreError::Corrupt { key, source }) => {
                    warn!("Skipping corrupt submission blob {key}: {source}")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(submissions)
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    /// Keeps serialized records in a map keyed like the S3 layout.
    #[derive(Default)]
    pub struct MemoryStore {
        blobs: Mutex<BTreeMap<String, Vec<u8>>>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        pub fn len(&self) -> usize {
            self.blobs.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubmissionStore for MemoryStore {
        async fn put(&self, submission: &Submission) -> Result<String, StoreError> {
            if self.fail_writes {
                return Err(StoreError::S3("scripted write failure".to_string()));
            }
            let key = submission.blob_key();
            let body = serde_json::to_vec_pretty(submission)?;
            self.blobs.lock().unwrap().insert(key.clone(), body);
            Ok(format!("memory://{key}"))
        }

        async fn list(&self) -> Result<Vec<Submission>, StoreError> {
            self.blobs
                .lock()
                .unwrap()
                .iter()
                .map(|(key, body)| {
                    serde_json::from_slice(body).map_err(|source| StoreError::Corrupt {
                        key: key.clone(),
                        source,
                    })
                })
                .collect()
        }
    }
}
