use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::Submission;

#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: err.to_string(),
        }
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError {
            message: s.to_string(),
        }
    }
}

/// The persistence interface the submission handler writes through. A single
/// write operation; the store keeps at most one record per email, last write
/// wins.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn upsert(&self, submission: &Submission) -> Result<(), StoreError>;
}

/// Postgres-backed store. The target table is configured at startup and has
/// `email` as its primary key.
pub struct PgStore {
    pool: PgPool,
    table: String,
}

impl PgStore {
    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn upsert(&self, submission: &Submission) -> Result<(), StoreError> {
        // Table name is validated as an identifier at config load.
        let sql = format!(
            "INSERT INTO {} (email, name, message, submitted_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO UPDATE
             SET name = EXCLUDED.name,
                 message = EXCLUDED.message,
                 submitted_at = EXCLUDED.submitted_at",
            self.table
        );
        sqlx::query(&sql)
            .bind(&submission.email)
            .bind(&submission.name)
            .bind(&submission.message)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-process store over a mutexed map. Used by the integration tests (and
/// handy for local development without Postgres); records how many upsert
/// calls it received and can be switched into a failing mode.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Submission>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upsert calls received, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When set, every subsequent upsert fails.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, email: &str) -> Option<Submission> {
        self.records.lock().unwrap().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn upsert(&self, submission: &Submission) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::from("memory store switched to failing mode"));
        }
        self.records
            .lock()
            .unwrap()
            .insert(submission.email.clone(), submission.clone());
        Ok(())
    }
}
