//! Derived intake progress.

use serde::{Deserialize, Serialize};

use super::intake::{IntakeField, IntakeRecord};

/// Number of facts a full assessment needs.
pub const TOTAL_REQUIRED: usize = 6;

/// Progress computed fresh from an intake record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSnapshot {
    /// Number of required facts present
    pub completed_count: usize,
    /// Always `TOTAL_REQUIRED`
    pub total_required: usize,
    /// First missing fact in completion order
    pub next_required_field: Option<IntakeField>,
    /// Missing facts in guidance priority order
    pub missing: Vec<IntakeField>,
}

impl ProgressSnapshot {
    /// Check if every required fact is present.
    pub fn is_complete(&self) -> bool {
        self.completed_count == self.total_required
    }

    /// Completion as a fraction (0.0 - 1.0).
    pub fn fraction(&self) -> f64 {
        self.completed_count as f64 / self.total_required as f64
    }
}

/// Compute completion count, next required field, and missing list.
pub fn compute_progress(record: &IntakeRecord) -> ProgressSnapshot {
    let completed_count = IntakeField::ORDERED
        .iter()
        .filter(|field| record.has(**field))
        .count();

    let next_required_field = IntakeField::ORDERED
        .iter()
        .copied()
        .find(|field| !record.has(*field));

    let missing = IntakeField::PRIORITY
        .iter()
        .copied()
        .filter(|field| !record.has(*field))
        .collect();

    ProgressSnapshot {
        completed_count,
        total_required: TOTAL_REQUIRED,
        next_required_field,
        missing,
    }
}

/// Relaxed completeness: amount, provider, and service date are all known.
pub fn is_basic_intake_complete(record: &IntakeRecord) -> bool {
    record.amount.is_some() && record.provider.is_some() && record.service_date.is_some()
}
