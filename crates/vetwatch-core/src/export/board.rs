//! Triage board export for the clinic dashboard.

use serde::{Deserialize, Serialize};

use crate::models::{AlertLevel, PatientSummary};

/// Exported triage board for one clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageBoardExport {
    /// Export metadata
    pub metadata: BoardMetadata,
    /// One row per patient, in board order
    pub rows: Vec<BoardRow>,
}

/// Board export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMetadata {
    /// Owning clinic id
    pub clinic_id: String,
    /// Export timestamp
    pub exported_at: String,
    /// Total patients on the board
    pub total_patients: usize,
    /// Count of high alerts
    pub high_alerts: usize,
    /// Count of medium alerts
    pub medium_alerts: usize,
    /// Count of low alerts
    pub low_alerts: usize,
}

/// One patient row on the exported board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRow {
    /// Latest discharge id (navigation key)
    pub discharge_id: String,
    /// Derived patient key
    pub patient_id: String,
    /// Patient name
    pub pet_name: String,
    /// Species
    pub pet_species: String,
    /// Risk tier
    pub alert_level: AlertLevel,
    /// Adherence percentage
    pub adherence_rate: u8,
    /// Symptom flags over the trailing window
    pub symptom_flag_count: u32,
    /// Caregiver currently engaged
    pub is_active: bool,
    /// Cumulative medication entries
    pub medication_count: usize,
    /// Episodes in the group
    pub total_episodes: usize,
    /// Latest episode timestamp, RFC 3339
    pub last_seen_at: String,
}

impl TriageBoardExport {
    /// Build an export from a ranked summary list.
    pub fn from_summaries(clinic_id: &str, summaries: &[PatientSummary]) -> Self {
        let rows: Vec<BoardRow> = summaries
            .iter()
            .map(|s| BoardRow {
                discharge_id: s.discharge_id.clone(),
                patient_id: s.patient_id.clone(),
                pet_name: s.pet_name.clone(),
                pet_species: s.pet_species.clone(),
                alert_level: s.alert_level,
                adherence_rate: s.adherence_rate,
                symptom_flag_count: s.symptom_flag_count,
                is_active: s.is_active,
                medication_count: s.medication_count,
                total_episodes: s.total_episodes,
                last_seen_at: s.last_seen_at.to_rfc3339(),
            })
            .collect();

        let count_level = |level: AlertLevel| {
            summaries.iter().filter(|s| s.alert_level == level).count()
        };

        Self {
            metadata: BoardMetadata {
                clinic_id: clinic_id.to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
                total_patients: summaries.len(),
                high_alerts: count_level(AlertLevel::High),
                medium_alerts: count_level(AlertLevel::Medium),
                low_alerts: count_level(AlertLevel::Low),
            },
            rows,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str(
            "discharge_id,patient_id,pet_name,pet_species,alert_level,adherence_rate,symptom_flags,is_active,medication_count,total_episodes,last_seen_at\n",
        );

        // Lines
        for row in &self.rows {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{}\n",
                escape_csv(&row.discharge_id),
                escape_csv(&row.patient_id),
                escape_csv(&row.pet_name),
                escape_csv(&row.pet_species),
                row.alert_level.label(),
                row.adherence_rate,
                row.symptom_flag_count,
                row.is_active,
                row.medication_count,
                row.total_episodes,
                escape_csv(&row.last_seen_at),
            ));
        }

        csv
    }
}

/// Quote a CSV field if it contains a comma, quote, or newline.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
