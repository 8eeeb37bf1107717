//! Snapshot aggregation: groups, metrics fan-out, ranked board.

use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use vetwatch_core::models::{PatientSummary, TreatmentEpisode};
use vetwatch_core::triage::{classify_alert_level, group_by_patient, rank_and_sort, PatientGroup};
use vetwatch_core::AlertLevel;

use crate::metrics::{MetricsError, MetricsProvider};

/// Bound on each metrics lookup. A timeout is the same failure class as
/// any backend error and yields the fallback summary.
pub const METRICS_TIMEOUT: Duration = Duration::from_secs(5);

/// Compute one patient's summary, consulting the metrics service for the
/// group's latest episode.
///
/// Infallible by contract: if either lookup fails or times out, the
/// summary degrades to the quiet fallback (zero adherence, zero flags,
/// inactive, no alert) so one bad lookup never blocks the board. The
/// episode-derived fields are populated either way.
pub async fn summarize_group<M>(group: &PatientGroup, metrics: &M) -> PatientSummary
where
    M: MetricsProvider + ?Sized,
{
    let latest = group.latest();

    let (adherence, flags) = tokio::join!(
        timeout(
            METRICS_TIMEOUT,
            metrics.adherence_and_activity(&latest.id, &latest.clinic_id),
        ),
        timeout(
            METRICS_TIMEOUT,
            metrics.symptom_flag_count(&latest.id, &latest.clinic_id),
        ),
    );

    let adherence = adherence.map_err(|_| MetricsError::Timeout).and_then(|r| r);
    let flags = flags.map_err(|_| MetricsError::Timeout).and_then(|r| r);

    let mut summary = fallback_summary(group);
    match (adherence, flags) {
        (Ok(activity), Ok(flag_count)) => {
            let rate = activity.adherence_rate.min(100);
            summary.adherence_rate = rate;
            summary.symptom_flag_count = flag_count;
            summary.is_active = activity.is_active;
            summary.last_activity = activity.last_activity;
            summary.alert_level = classify_alert_level(rate, flag_count);
        }
        (adherence, flags) => {
            let error = adherence.err().or_else(|| flags.err());
            warn!(
                episode_id = %latest.id,
                patient_id = %group.patient_id(),
                error = %error.map(|e| e.to_string()).unwrap_or_default(),
                "metrics lookup failed, using fallback summary"
            );
        }
    }

    summary
}

/// Summary with only episode-derived fields; the metric fields stay quiet.
///
/// Note the alert level is `None`, not `classify_alert_level(0, 0)`: a
/// patient whose metrics are unavailable must not surface as high risk.
fn fallback_summary(group: &PatientGroup) -> PatientSummary {
    let latest = group.latest();
    PatientSummary {
        discharge_id: latest.id.clone(),
        patient_id: group.patient_id().to_string(),
        pet_name: latest.patient.name.clone(),
        pet_species: latest.patient.species.clone(),
        pet_weight_kg: latest.patient.weight_kg,
        first_seen_at: group.first_seen_at(),
        last_seen_at: latest.created_at,
        last_activity: None,
        medication_count: group.medication_count(),
        adherence_rate: 0,
        symptom_flag_count: 0,
        is_active: false,
        alert_level: AlertLevel::None,
        total_episodes: group.total_episodes(),
    }
}

/// Run the full pipeline on one episode snapshot.
///
/// Groups the episodes, fans out one summary computation per group in
/// parallel, waits for all of them to settle, and returns the ranked
/// board. Partial results are never returned.
pub async fn aggregate_snapshot<M>(
    episodes: Vec<TreatmentEpisode>,
    metrics: &M,
) -> Vec<PatientSummary>
where
    M: MetricsProvider + ?Sized,
{
    let groups = group_by_patient(episodes);
    debug!(groups = groups.len(), "aggregating episode snapshot");

    let summaries = join_all(groups.iter().map(|g| summarize_group(g, metrics))).await;
    rank_and_sort(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use vetwatch_core::models::{AdherenceActivity, MedicationEntry, PatientSnapshot};

    struct FixedMetrics {
        adherence_rate: u8,
        flags: u32,
        fail: bool,
    }

    #[async_trait]
    impl MetricsProvider for FixedMetrics {
        async fn adherence_and_activity(
            &self,
            _episode_id: &str,
            _clinic_id: &str,
        ) -> Result<AdherenceActivity, MetricsError> {
            if self.fail {
                return Err(MetricsError::Backend("boom".into()));
            }
            Ok(AdherenceActivity {
                adherence_rate: self.adherence_rate,
                last_activity: None,
                is_active: true,
            })
        }

        async fn symptom_flag_count(
            &self,
            _episode_id: &str,
            _clinic_id: &str,
        ) -> Result<u32, MetricsError> {
            if self.fail {
                return Err(MetricsError::Backend("boom".into()));
            }
            Ok(self.flags)
        }
    }

    fn make_group(med_counts: &[usize]) -> PatientGroup {
        let episodes: Vec<TreatmentEpisode> = med_counts
            .iter()
            .enumerate()
            .map(|(i, &meds)| {
                let mut episode = TreatmentEpisode::new(
                    "clinic-1".into(),
                    PatientSnapshot::new("Fido".into(), "canine".into()),
                );
                episode.created_at = Utc.with_ymd_and_hms(2026, 3, 1, i as u32, 0, 0).unwrap();
                episode.medications = (0..meds)
                    .map(|j| MedicationEntry::new(format!("med-{j}")))
                    .collect();
                episode
            })
            .collect();
        group_by_patient(episodes).remove(0)
    }

    #[tokio::test]
    async fn test_summary_from_metrics() {
        let group = make_group(&[2, 1]);
        let metrics = FixedMetrics {
            adherence_rate: 60,
            flags: 0,
            fail: false,
        };

        let summary = summarize_group(&group, &metrics).await;
        assert_eq!(summary.adherence_rate, 60);
        assert_eq!(summary.alert_level, AlertLevel::Medium);
        assert!(summary.is_active);
        assert_eq!(summary.medication_count, 3);
        assert_eq!(summary.total_episodes, 2);
        assert_eq!(summary.discharge_id, group.latest().id);
    }

    #[tokio::test]
    async fn test_adherence_clamped_to_100() {
        let group = make_group(&[1]);
        let metrics = FixedMetrics {
            adherence_rate: 250,
            flags: 0,
            fail: false,
        };

        let summary = summarize_group(&group, &metrics).await;
        assert_eq!(summary.adherence_rate, 100);
        assert_eq!(summary.alert_level, AlertLevel::None);
    }

    #[tokio::test]
    async fn test_fallback_on_metrics_failure() {
        let group = make_group(&[2, 1]);
        let metrics = FixedMetrics {
            adherence_rate: 0,
            flags: 0,
            fail: true,
        };

        let summary = summarize_group(&group, &metrics).await;
        assert_eq!(summary.adherence_rate, 0);
        assert_eq!(summary.symptom_flag_count, 0);
        assert!(!summary.is_active);
        assert_eq!(summary.alert_level, AlertLevel::None);
        // Episode-derived fields still populated
        assert_eq!(summary.medication_count, 3);
        assert_eq!(summary.total_episodes, 2);
        assert_eq!(summary.pet_name, "Fido");
    }
}
