//! Episode query collaborator.

use async_trait::async_trait;
use thiserror::Error;

use vetwatch_core::models::TreatmentEpisode;

/// Episode source errors.
///
/// Unlike metrics failures, a list failure is not recovered here: the
/// presentation layer owns displaying it.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),

    #[error("clinic not found: {0}")]
    ClinicNotFound(String),
}

/// Document-query service returning a clinic's discharge records.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    /// List up to `limit` episodes for a clinic, newest first.
    ///
    /// The result may be shorter than `limit`; no has-more signal is
    /// surfaced at this layer.
    async fn list_episodes(
        &self,
        clinic_id: &str,
        limit: usize,
    ) -> Result<Vec<TreatmentEpisode>, SourceError>;
}
