//! VetWatch Core Library
//!
//! Patient risk aggregation for multi-tenant veterinary discharge
//! monitoring.
//!
//! # Architecture
//!
//! ```text
//! Episode snapshot (per clinic)
//!         │
//!         ▼
//! group_by_patient ──► PatientGroup per distinct patient key
//!         │
//!         ▼
//! metrics lookups (vetwatch-monitor, parallel, fallback on failure)
//!         │
//!         ▼
//! classify_alert_level ──► PatientSummary
//!         │
//!         ▼
//! rank_and_sort ──► triage board (high → none, active first, recent first)
//! ```
//!
//! # Core Principle
//!
//! **One metrics failure never blocks the board.** A failed lookup degrades
//! that patient's summary to a quiet fallback; every other row still renders.
//!
//! # Modules
//!
//! - [`models`]: Domain types (TreatmentEpisode, PatientSummary, AlertLevel)
//! - [`triage`]: Grouping, alert classification, and board ranking
//! - [`export`]: Board export for the dashboard (JSON/CSV)

pub mod export;
pub mod models;
pub mod triage;

// Re-export commonly used types
pub use export::TriageBoardExport;
pub use models::{
    AdherenceActivity, AlertLevel, MedicationEntry, PatientSnapshot, PatientSummary,
    TreatmentEpisode,
};
pub use triage::{classify_alert_level, group_by_patient, rank_and_sort, PatientGroup};
