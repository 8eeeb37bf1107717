//! Treatment episode (discharge) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient data embedded in an episode at discharge time.
///
/// Most legacy records carry no stable patient id, only a name/species
/// snapshot. `patient_id` is preferred as the grouping key whenever present;
/// the name-species slug exists for migrating those legacy records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSnapshot {
    /// Stable patient id, if the record has one
    pub patient_id: Option<String>,
    /// Patient name
    pub name: String,
    /// Species (e.g., "canine", "feline", "equine")
    pub species: String,
    /// Weight in kg
    pub weight_kg: Option<f64>,
}

impl PatientSnapshot {
    /// Create a snapshot from required fields.
    pub fn new(name: String, species: String) -> Self {
        Self {
            patient_id: None,
            name,
            species,
            weight_kg: None,
        }
    }

    /// Derive the grouping key for this patient.
    ///
    /// Explicit `patient_id` wins; otherwise a normalized `name-species`
    /// slug. Records missing both name and species degrade to an empty
    /// key, which downstream treats as a data-quality signal rather than
    /// an error.
    pub fn group_key(&self) -> String {
        if let Some(id) = &self.patient_id {
            if !id.is_empty() {
                return id.clone();
            }
        }
        slugify(&format!("{} {}", self.name, self.species))
    }
}

/// A prescribed medication entry on a discharge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationEntry {
    /// Medication name
    pub name: String,
    /// Dosage as written (e.g., "100mg")
    pub dosage: Option<String>,
    /// Administration frequency (e.g., "BID")
    pub frequency: Option<String>,
}

impl MedicationEntry {
    /// Create an entry with just a name.
    pub fn new(name: String) -> Self {
        Self {
            name,
            dosage: None,
            frequency: None,
        }
    }
}

/// A single recorded visit outcome, including prescribed medications.
///
/// Episodes are created once by clinic staff and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentEpisode {
    /// Unique episode id
    pub id: String,
    /// Owning clinic (tenant) id
    pub clinic_id: String,
    /// Patient snapshot at discharge time
    pub patient: PatientSnapshot,
    /// Prescribed medications, in prescription order
    pub medications: Vec<MedicationEntry>,
    /// Episode creation timestamp
    pub created_at: DateTime<Utc>,
}

impl TreatmentEpisode {
    /// Create a new episode for a clinic and patient.
    pub fn new(clinic_id: String, patient: PatientSnapshot) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            clinic_id,
            patient,
            medications: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Grouping key derived from the embedded patient snapshot.
    pub fn patient_key(&self) -> String {
        self.patient.group_key()
    }
}

/// Lowercase a string and collapse whitespace runs into single hyphens.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Fido Canine"), "fido-canine");
        assert_eq!(slugify("  Mr   Whiskers\tFeline "), "mr-whiskers-feline");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_group_key_prefers_explicit_id() {
        let mut snapshot = PatientSnapshot::new("Fido".into(), "Canine".into());
        assert_eq!(snapshot.group_key(), "fido-canine");

        snapshot.patient_id = Some("pat-42".into());
        assert_eq!(snapshot.group_key(), "pat-42");

        // Empty ids fall back to the slug
        snapshot.patient_id = Some(String::new());
        assert_eq!(snapshot.group_key(), "fido-canine");
    }

    #[test]
    fn test_group_key_missing_identity() {
        let snapshot = PatientSnapshot::new(String::new(), String::new());
        assert_eq!(snapshot.group_key(), "");
    }

    #[test]
    fn test_new_episode() {
        let episode = TreatmentEpisode::new(
            "clinic-1".into(),
            PatientSnapshot::new("Max".into(), "canine".into()),
        );
        assert_eq!(episode.clinic_id, "clinic-1");
        assert_eq!(episode.id.len(), 36); // UUID format
        assert!(episode.medications.is_empty());
        assert_eq!(episode.patient_key(), "max-canine");
    }
}
