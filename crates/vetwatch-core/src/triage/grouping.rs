//! Episode grouping by derived patient key.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::TreatmentEpisode;

/// All episodes for one patient, with the latest episode tracked.
///
/// Invariants: the latest index always points into `episodes`, and the
/// episode there carries the maximum `created_at` in the group. On exact
/// timestamp ties the first-encountered episode stays latest, which keeps
/// repeated aggregation runs reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientGroup {
    patient_id: String,
    episodes: Vec<TreatmentEpisode>,
    latest_idx: usize,
}

impl PatientGroup {
    fn new(patient_id: String, first: TreatmentEpisode) -> Self {
        Self {
            patient_id,
            episodes: vec![first],
            latest_idx: 0,
        }
    }

    /// Add an episode, updating the latest on strict `created_at` increase.
    fn push(&mut self, episode: TreatmentEpisode) {
        if episode.created_at > self.latest().created_at {
            self.latest_idx = self.episodes.len();
        }
        self.episodes.push(episode);
    }

    /// Derived patient key shared by every episode in the group.
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// The episode with the maximum `created_at`.
    pub fn latest(&self) -> &TreatmentEpisode {
        &self.episodes[self.latest_idx]
    }

    /// All episodes in the group, in encounter order.
    pub fn episodes(&self) -> &[TreatmentEpisode] {
        &self.episodes
    }

    /// Number of episodes in the group.
    pub fn total_episodes(&self) -> usize {
        self.episodes.len()
    }

    /// Earliest `created_at` across the group.
    pub fn first_seen_at(&self) -> DateTime<Utc> {
        self.episodes
            .iter()
            .map(|e| e.created_at)
            .min()
            .unwrap_or_else(|| self.latest().created_at)
    }

    /// Medication entries summed across all episodes.
    ///
    /// Cumulative on purpose: the board shows total treatment burden,
    /// distinct from the metrics service's "active medications" which is
    /// scoped to the latest episode.
    pub fn medication_count(&self) -> usize {
        self.episodes.iter().map(|e| e.medications.len()).sum()
    }
}

/// Partition episodes into one group per distinct patient key.
///
/// Input order is irrelevant to which groups form; group discovery order
/// follows first encounter, and the final board order is imposed later by
/// ranking. Empty input yields empty output.
pub fn group_by_patient(episodes: Vec<TreatmentEpisode>) -> Vec<PatientGroup> {
    let mut groups: Vec<PatientGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for episode in episodes {
        let key = episode.patient_key();
        if key.is_empty() {
            debug!(episode_id = %episode.id, "episode has no patient identity");
        }
        match index.get(&key) {
            Some(&i) => groups[i].push(episode),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(PatientGroup::new(key, episode));
            }
        }
    }

    groups
}
