//! VetWatch Monitor
//!
//! Reactive adherence monitoring on top of [`vetwatch_core`]: collaborator
//! traits for the episode and metrics services, parallel metrics fan-out
//! with fallback-on-failure, and a latest-wins live aggregator for the
//! snapshot subscription model.
//!
//! # Modules
//!
//! - [`source`]: Episode-query collaborator trait
//! - [`metrics`]: Adherence/symptom metrics collaborator trait
//! - [`aggregate`]: Snapshot aggregation pipeline
//! - [`live`]: Latest-wins reactive wrapper

pub mod aggregate;
pub mod live;
pub mod metrics;
pub mod source;

// Re-export commonly used types
pub use aggregate::{aggregate_snapshot, summarize_group, METRICS_TIMEOUT};
pub use live::LiveAggregator;
pub use metrics::{MetricsError, MetricsProvider};
pub use source::{EpisodeSource, SourceError};
