//! Alert level classification.
//!
//! Threshold table, evaluated top-down, first match wins:
//! - flags >= 3 or adherence < 50% → high
//! - flags >= 2 or adherence < 70% → medium
//! - flags >= 1 or adherence < 85% → low
//! - otherwise → none

use crate::models::AlertLevel;

/// Adherence below this is a high alert.
pub const HIGH_ADHERENCE_FLOOR: u8 = 50;

/// Adherence below this is at least a medium alert.
pub const MEDIUM_ADHERENCE_FLOOR: u8 = 70;

/// Adherence below this is at least a low alert.
pub const LOW_ADHERENCE_FLOOR: u8 = 85;

/// Symptom flags at or above this are a high alert.
pub const HIGH_FLAG_COUNT: u32 = 3;

/// Symptom flags at or above this are at least a medium alert.
pub const MEDIUM_FLAG_COUNT: u32 = 2;

/// Any symptom flag is at least a low alert.
pub const LOW_FLAG_COUNT: u32 = 1;

/// Classify a patient's risk tier from adherence and symptom counts.
///
/// The adherence floors are exclusive lower bounds: a rate of exactly 50
/// does not fire the high clause, it falls through to the medium check.
pub fn classify_alert_level(adherence_rate: u8, symptom_flag_count: u32) -> AlertLevel {
    if symptom_flag_count >= HIGH_FLAG_COUNT || adherence_rate < HIGH_ADHERENCE_FLOOR {
        AlertLevel::High
    } else if symptom_flag_count >= MEDIUM_FLAG_COUNT || adherence_rate < MEDIUM_ADHERENCE_FLOOR {
        AlertLevel::Medium
    } else if symptom_flag_count >= LOW_FLAG_COUNT || adherence_rate < LOW_ADHERENCE_FLOOR {
        AlertLevel::Low
    } else {
        AlertLevel::None
    }
}
