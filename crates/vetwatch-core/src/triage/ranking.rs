//! Triage board ordering.

use std::cmp::Ordering;

use crate::models::PatientSummary;

/// Sort summaries into board order.
///
/// Three keys, in strict precedence:
/// 1. alert level, most severe first
/// 2. actively-engaged caregivers before inactive ones
/// 3. most recent signal first (caregiver activity or latest episode)
///
/// The sort is stable, so summaries equal on all three keys keep their
/// incoming order.
pub fn rank_and_sort(mut summaries: Vec<PatientSummary>) -> Vec<PatientSummary> {
    summaries.sort_by(compare);
    summaries
}

fn compare(a: &PatientSummary, b: &PatientSummary) -> Ordering {
    b.alert_level
        .cmp(&a.alert_level)
        .then_with(|| b.is_active.cmp(&a.is_active))
        .then_with(|| b.recency().cmp(&a.recency()))
}
