//! Latest-wins live aggregation.
//!
//! The upstream collaborator delivers a full episode snapshot on every
//! change. Each snapshot claims a generation in arrival order; when its
//! aggregation resolves, the board is published only if no newer snapshot
//! has been claimed in the meantime. In-flight metrics lookups for a
//! superseded snapshot are allowed to finish and their output is
//! discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tracing::debug;

use vetwatch_core::models::{PatientSummary, TreatmentEpisode};

use crate::aggregate::aggregate_snapshot;
use crate::metrics::MetricsProvider;
use crate::source::{EpisodeSource, SourceError};

/// Reactive aggregator publishing the current triage board.
pub struct LiveAggregator<M> {
    metrics: Arc<M>,
    /// Highest claimed generation; claims happen in snapshot arrival order.
    generation: AtomicU64,
    /// Highest published generation. The lock spans the staleness check
    /// and the publish so an overtaking run cannot slip between them.
    published: Mutex<u64>,
    board: watch::Sender<Vec<PatientSummary>>,
}

impl<M> LiveAggregator<M>
where
    M: MetricsProvider,
{
    /// Create an aggregator over a metrics provider. The board starts empty.
    pub fn new(metrics: Arc<M>) -> Self {
        let (board, _) = watch::channel(Vec::new());
        Self {
            metrics,
            generation: AtomicU64::new(0),
            published: Mutex::new(0),
            board,
        }
    }

    /// Subscribe to board updates. The receiver holds the latest
    /// published board at all times.
    pub fn subscribe(&self) -> watch::Receiver<Vec<PatientSummary>> {
        self.board.subscribe()
    }

    /// Aggregate one snapshot and publish the result unless a newer
    /// snapshot was claimed while this one was in flight.
    ///
    /// Returns `true` if the result was published, `false` if it was
    /// discarded as stale.
    pub async fn apply_snapshot(&self, episodes: Vec<TreatmentEpisode>) -> bool {
        let generation = self.claim_generation();
        self.aggregate_and_publish(generation, episodes).await
    }

    /// Fetch a clinic's episodes and apply them as a snapshot.
    ///
    /// A list-fetch failure propagates; the caller (presentation layer)
    /// owns displaying it.
    pub async fn refresh<S>(
        &self,
        source: &S,
        clinic_id: &str,
        limit: usize,
    ) -> Result<bool, SourceError>
    where
        S: EpisodeSource + ?Sized,
    {
        let episodes = source.list_episodes(clinic_id, limit).await?;
        Ok(self.apply_snapshot(episodes).await)
    }

    /// Reserve the next generation. Snapshot ordering is decided here,
    /// so the claim must happen when the snapshot arrives, never inside
    /// a spawned task that may start out of order.
    fn claim_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run the pipeline for an already-claimed generation.
    async fn aggregate_and_publish(
        &self,
        generation: u64,
        episodes: Vec<TreatmentEpisode>,
    ) -> bool {
        let summaries = aggregate_snapshot(episodes, self.metrics.as_ref()).await;
        self.publish_if_current(generation, summaries)
    }

    /// Publish a finished board unless it has been overtaken.
    ///
    /// Holding the lock across the check and the `send_replace` keeps a
    /// run that passed the check from being preempted by a newer run's
    /// publish. The published counter is monotonic: a generation never
    /// publishes twice and never publishes over a newer one.
    fn publish_if_current(&self, generation: u64, summaries: Vec<PatientSummary>) -> bool {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.generation.load(Ordering::SeqCst) != generation || *published >= generation {
            debug!(generation, "discarding stale aggregation result");
            return false;
        }

        *published = generation;
        self.board.send_replace(summaries);
        true
    }
}

impl<M> LiveAggregator<M>
where
    M: MetricsProvider + 'static,
{
    /// Drive the aggregator from a stream of full snapshots.
    ///
    /// Generations are claimed here, in arrival order; each snapshot is
    /// then aggregated on its own task so that a slow run can be
    /// overtaken, and the publish check makes the newest snapshot win
    /// even when the tasks start or finish out of order. Returns when
    /// the sender side closes.
    pub async fn run(self: Arc<Self>, mut snapshots: mpsc::Receiver<Vec<TreatmentEpisode>>) {
        while let Some(episodes) = snapshots.recv().await {
            let generation = self.claim_generation();
            let aggregator = Arc::clone(&self);
            tokio::spawn(async move {
                aggregator.aggregate_and_publish(generation, episodes).await;
            });
        }
    }
}
