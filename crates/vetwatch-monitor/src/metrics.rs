//! Metrics collaborator.

use async_trait::async_trait;
use thiserror::Error;

use vetwatch_core::models::AdherenceActivity;

/// Metrics lookup errors. All variants are recovered locally by the
/// aggregation step via the fallback summary.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("lookup timed out")]
    Timeout,
}

/// Adherence/symptom statistics service, keyed by episode and clinic.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    /// Adherence rate and caregiver engagement for an episode, over the
    /// service's trailing window.
    async fn adherence_and_activity(
        &self,
        episode_id: &str,
        clinic_id: &str,
    ) -> Result<AdherenceActivity, MetricsError>;

    /// Count of caregiver-logged symptom flags for an episode.
    async fn symptom_flag_count(
        &self,
        episode_id: &str,
        clinic_id: &str,
    ) -> Result<u32, MetricsError>;
}
