//! Derived patient summaries for the triage board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tier used to prioritize clinical follow-up.
///
/// Variant order defines severity: `None < Low < Medium < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    None,
    Low,
    Medium,
    High,
}

impl AlertLevel {
    /// Short label for display and CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::None => "none",
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
        }
    }
}

/// Per-patient aggregation output, rebuilt on every snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    /// Id of the latest episode; the board's navigation key
    pub discharge_id: String,
    /// Derived patient key (explicit id or name-species slug)
    pub patient_id: String,
    /// Patient name
    pub pet_name: String,
    /// Species
    pub pet_species: String,
    /// Weight in kg, if recorded on the latest episode
    pub pet_weight_kg: Option<f64>,
    /// Earliest episode timestamp in the group
    pub first_seen_at: DateTime<Utc>,
    /// Latest episode timestamp in the group
    pub last_seen_at: DateTime<Utc>,
    /// Last caregiver activity reported by the metrics service
    pub last_activity: Option<DateTime<Utc>>,
    /// Medication entries summed across all episodes, not just the latest
    pub medication_count: usize,
    /// Adherence percentage, always within 0..=100
    pub adherence_rate: u8,
    /// Clinically notable symptom events logged by the caregiver
    pub symptom_flag_count: u32,
    /// Whether the caregiver is currently engaged with the plan
    pub is_active: bool,
    /// Derived risk tier
    pub alert_level: AlertLevel,
    /// Number of episodes in the group
    pub total_episodes: usize,
}

impl PatientSummary {
    /// Most recent signal for this patient: the later of caregiver
    /// activity and the latest episode timestamp.
    pub fn recency(&self) -> DateTime<Utc> {
        match self.last_activity {
            Some(activity) => activity.max(self.last_seen_at),
            None => self.last_seen_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_alert_level_severity_order() {
        assert!(AlertLevel::High > AlertLevel::Medium);
        assert!(AlertLevel::Medium > AlertLevel::Low);
        assert!(AlertLevel::Low > AlertLevel::None);
    }

    #[test]
    fn test_alert_level_serde_lowercase() {
        let json = serde_json::to_string(&AlertLevel::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let level: AlertLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, AlertLevel::High);
    }

    #[test]
    fn test_recency_prefers_later_signal() {
        let seen = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let activity = Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap();

        let mut summary = PatientSummary {
            discharge_id: "d1".into(),
            patient_id: "fido-canine".into(),
            pet_name: "Fido".into(),
            pet_species: "canine".into(),
            pet_weight_kg: None,
            first_seen_at: seen,
            last_seen_at: seen,
            last_activity: Some(activity),
            medication_count: 0,
            adherence_rate: 100,
            symptom_flag_count: 0,
            is_active: true,
            alert_level: AlertLevel::None,
            total_episodes: 1,
        };
        assert_eq!(summary.recency(), activity);

        // Stale activity loses to the episode timestamp
        summary.last_activity = Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(summary.recency(), seen);

        summary.last_activity = None;
        assert_eq!(summary.recency(), seen);
    }
}
