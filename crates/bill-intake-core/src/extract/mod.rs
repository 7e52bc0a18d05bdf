//! Field extraction from free-form chat text.
//!
//! Pipeline: bound input → per-field rule cascades (skipped for known fields)
//! → code collection → `IntakeUpdate` → fill-once merge.
//!
//! Every extractor is a pure function over `&str`. Each field owns an ordered
//! rule table; the first rule family that yields an acceptable value wins.
//! Finding nothing is `Extraction::NoMatch`, never an error.

mod amount;
mod codes;
mod insurance;
mod itemized;
mod provider;
mod service_date;

pub use amount::*;
pub use codes::*;
pub use insurance::*;
pub use itemized::*;
pub use provider::*;
pub use service_date::*;

use regex::Regex;

use crate::config::ExtractorConfig;
use crate::models::{compute_progress, IntakeField, IntakeRecord, IntakeUpdate, ProgressSnapshot};

/// Outcome of one field extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    /// Nothing acceptable in the text
    NoMatch,
    /// Accepted value from the named rule family
    Candidate {
        value: T,
        /// Fixed per rule family (0.0 - 1.0), lower further down the cascade
        confidence: f64,
        rule: &'static str,
    },
}

impl<T> Extraction<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, Extraction::Candidate { .. })
    }

    /// Drop confidence and rule, keeping the value.
    pub fn into_value(self) -> Option<T> {
        match self {
            Extraction::Candidate { value, .. } => Some(value),
            Extraction::NoMatch => None,
        }
    }

    pub fn confidence(&self) -> Option<f64> {
        match self {
            Extraction::Candidate { confidence, .. } => Some(*confidence),
            Extraction::NoMatch => None,
        }
    }
}

/// A named, compiled pattern in a field's rule cascade.
pub(crate) struct Rule {
    pub name: &'static str,
    pub regex: Regex,
    pub confidence: f64,
}

pub(crate) fn rule(name: &'static str, pattern: &str, confidence: f64) -> Rule {
    Rule {
        name,
        regex: Regex::new(pattern).expect("Invalid extraction regex pattern"),
        confidence,
    }
}

/// Where a piece of text came from. All sources are scanned identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Typed by the user
    UserMessage,
    /// Generated by the assistant (may restate facts)
    AssistantResponse,
    /// Returned by the bill upload analysis service
    BillAnalysis,
}

/// Result of ingesting one text into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Fields that changed in this pass
    pub changed: Vec<IntakeField>,
    /// Progress after the merge
    pub progress: ProgressSnapshot,
}

/// Cut text to at most `max_bytes`, backing off to a UTF-8 boundary.
pub fn bound_input(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    tracing::warn!(
        original_bytes = text.len(),
        scanned_bytes = end,
        "input exceeds extraction bound, scanning prefix only"
    );
    &text[..end]
}

/// Configurable orchestrator over the field extractors.
#[derive(Debug, Clone, Default)]
pub struct IntakeExtractor {
    config: ExtractorConfig,
}

impl IntakeExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom settings.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Discover facts in `text` that `record` does not hold yet.
    ///
    /// Pure: the record is only read. Extractors for fields already set are
    /// skipped entirely.
    pub fn extract(&self, text: &str, record: &IntakeRecord) -> IntakeUpdate {
        let text = bound_input(text, self.config.max_input_bytes);
        let mut update = IntakeUpdate::default();

        if record.amount.is_none() {
            update.amount = accept(IntakeField::Amount, extract_amount(text, self.config.min_bill_amount));
        } else {
            tracing::trace!(field = "amount", "already known, skipping");
        }

        if record.provider.is_none() {
            update.provider = accept(IntakeField::Provider, extract_provider(text));
        } else {
            tracing::trace!(field = "provider", "already known, skipping");
        }

        if record.service_date.is_none() {
            update.service_date = accept(IntakeField::ServiceDate, extract_service_date(text));
        } else {
            tracing::trace!(field = "serviceDate", "already known, skipping");
        }

        if record.insurance.is_none() {
            update.insurance = accept(IntakeField::Insurance, extract_insurance(text));
        } else {
            tracing::trace!(field = "insurance", "already known, skipping");
        }

        if !record.itemized_bill {
            if accept(IntakeField::ItemizedBill, detect_itemized_bill(text)).is_some() {
                update.itemized_bill = Some(true);
            }
        } else {
            tracing::trace!(field = "itemized", "already known, skipping");
        }

        let codes = collect_codes(text, record, &self.config);
        update.new_cpt_codes = codes.new_cpt;
        update.new_hcpcs_codes = codes.new_hcpcs;
        update.new_icd_codes = codes.new_icd;

        update
    }

    /// Extract from `text` and merge the result into `record`.
    pub fn ingest(&self, record: &mut IntakeRecord, text: &str, source: TextSource) -> IngestOutcome {
        let was_complete = compute_progress(record).is_complete();

        let update = self.extract(text, record);
        let changed = record.apply(update);
        let progress = compute_progress(record);

        tracing::debug!(
            ?source,
            changed = ?changed,
            completed = progress.completed_count,
            "ingested text"
        );
        if progress.is_complete() && !was_complete {
            tracing::info!(session_id = %record.session_id, "bill intake complete");
        }

        IngestOutcome { changed, progress }
    }
}

fn accept<T: std::fmt::Debug>(field: IntakeField, extraction: Extraction<T>) -> Option<T> {
    if let Extraction::Candidate { value, confidence, rule } = extraction {
        tracing::debug!(field = field.key(), rule, confidence, value = ?value, "field extracted");
        Some(value)
    } else {
        None
    }
}
