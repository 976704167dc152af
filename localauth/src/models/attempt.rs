//! Attempt model - one authentication attempt.

use crate::models::Policy;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single authentication attempt. Created fresh per trigger, owned
/// exclusively by the flow for its lifetime, never reused.
#[derive(Debug, Clone)]
pub struct AuthAttempt {
    pub id: Uuid,
    pub policy: Policy,
    pub started_utc: DateTime<Utc>,
}

impl AuthAttempt {
    pub fn new(policy: Policy) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy,
            started_utc: Utc::now(),
        }
    }

    /// Milliseconds elapsed since the attempt started.
    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_utc).num_milliseconds()
    }
}
