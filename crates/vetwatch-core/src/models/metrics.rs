//! Metrics-service result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Adherence and engagement statistics for one episode over the
/// metrics service's trailing window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdherenceActivity {
    /// Percentage of prescribed doses administered on schedule
    pub adherence_rate: u8,
    /// Timestamp of the most recent caregiver log entry
    pub last_activity: Option<DateTime<Utc>>,
    /// Whether the caregiver is actively logging against the plan
    pub is_active: bool,
}
