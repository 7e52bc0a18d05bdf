//! Bill Intake Core Library
//!
//! Incremental extraction of medical-bill facts from free-form chat text.
//!
//! # Architecture
//!
//! ```text
//! User message ─┐
//! AI response ──┼─→ bound input → Field Extractors ─┐
//! Bill analysis ┘                  Code Collector ───┴─→ IntakeUpdate
//!                                                             │
//!                                                  fill-once merge
//!                                                             │
//!                                                      IntakeRecord
//!                                                             │
//!                                  ┌──────────────────────────┼──────────────┐
//!                                  ▼                          ▼              ▼
//!                          ProgressSnapshot            Status summary   Next steps
//!                          (progress card)             (AI context)     (appended to reply)
//! ```
//!
//! # Core Principle
//!
//! **Fill-once.** A fact, once extracted, is authoritative; later text never
//! overwrites it. Code lists only grow and the itemized flag only turns on.
//!
//! # Modules
//!
//! - [`models`]: IntakeRecord, IntakeUpdate, ProgressSnapshot
//! - [`extract`]: per-field rule cascades, code collector, orchestrator
//! - [`guidance`]: status summary and next-step text
//! - [`config`]: extractor tunables

pub mod config;
pub mod extract;
pub mod guidance;
pub mod models;

// Re-export commonly used types
pub use config::{ConfigError, ExtractorConfig};
pub use extract::{Extraction, IngestOutcome, IntakeExtractor, TextSource};
pub use guidance::{render_missing_guidance, render_next_step_guidance, render_status_summary};
pub use models::{
    apply_extraction, compute_progress, is_basic_intake_complete, IntakeField, IntakeRecord,
    IntakeUpdate, ProgressSnapshot,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Session error: {0}")]
    SessionError(String),
}

impl From<ConfigError> for IntakeError {
    fn from(e: ConfigError) -> Self {
        IntakeError::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for IntakeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        IntakeError::SessionError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Start a new intake session with default settings.
#[uniffi::export]
pub fn new_intake_session() -> Arc<IntakeSession> {
    Arc::new(IntakeSession::new(IntakeExtractor::new()))
}

/// Start a new intake session with a JSON extractor configuration.
#[uniffi::export]
pub fn new_intake_session_with_config(config_json: String) -> Result<Arc<IntakeSession>, IntakeError> {
    let config = ExtractorConfig::from_json(&config_json)?;
    Ok(Arc::new(IntakeSession::new(IntakeExtractor::with_config(config))))
}

// =========================================================================
// Main API Object
// =========================================================================

/// One chat session's intake state, safe to share with the host UI.
#[derive(uniffi::Object)]
pub struct IntakeSession {
    record: Mutex<IntakeRecord>,
    extractor: IntakeExtractor,
}

impl IntakeSession {
    fn new(extractor: IntakeExtractor) -> Self {
        Self {
            record: Mutex::new(IntakeRecord::new()),
            extractor,
        }
    }

    fn ingest(&self, text: &str, source: TextSource) -> Result<FfiProgress, IntakeError> {
        let mut record = self.record.lock()?;
        let outcome = self.extractor.ingest(&mut record, text, source);
        Ok(outcome.progress.into())
    }
}

#[uniffi::export]
impl IntakeSession {
    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Scan a message typed by the user.
    pub fn ingest_user_message(&self, text: String) -> Result<FfiProgress, IntakeError> {
        self.ingest(&text, TextSource::UserMessage)
    }

    /// Scan an assistant response for restated facts.
    pub fn ingest_assistant_response(&self, text: String) -> Result<FfiProgress, IntakeError> {
        self.ingest(&text, TextSource::AssistantResponse)
    }

    /// Scan the analysis text returned after a bill upload.
    pub fn ingest_bill_analysis(&self, text: String) -> Result<FfiProgress, IntakeError> {
        self.ingest(&text, TextSource::BillAnalysis)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current progress.
    pub fn progress(&self) -> Result<FfiProgress, IntakeError> {
        let record = self.record.lock()?;
        Ok(compute_progress(&record).into())
    }

    /// Current intake record.
    pub fn record(&self) -> Result<FfiIntakeRecord, IntakeError> {
        let record = self.record.lock()?;
        Ok(record.clone().into())
    }

    /// Current intake record as JSON.
    pub fn record_json(&self) -> Result<String, IntakeError> {
        let record = self.record.lock()?;
        Ok(serde_json::to_string(&*record)?)
    }

    /// Whether amount, provider, and service date are known.
    pub fn is_basic_intake_complete(&self) -> Result<bool, IntakeError> {
        let record = self.record.lock()?;
        Ok(is_basic_intake_complete(&record))
    }

    // =========================================================================
    // Guidance
    // =========================================================================

    /// Progress block for the UI and the AI context.
    pub fn status_summary(&self) -> Result<String, IntakeError> {
        let record = self.record.lock()?;
        Ok(render_status_summary(&record))
    }

    /// Instructions for the highest-priority missing facts.
    pub fn missing_guidance(&self) -> Result<String, IntakeError> {
        let record = self.record.lock()?;
        Ok(render_missing_guidance(&record))
    }

    /// Assistant response with the next-steps block appended.
    pub fn next_step_guidance(&self, response: String) -> Result<String, IntakeError> {
        let record = self.record.lock()?;
        Ok(render_next_step_guidance(&response, &record))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe progress snapshot. Fields are UI keys ("amount", "serviceDate", ...).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProgress {
    pub completed_count: u32,
    pub total_required: u32,
    pub next_required_field: Option<String>,
    pub missing: Vec<String>,
    pub is_complete: bool,
}

impl From<ProgressSnapshot> for FfiProgress {
    fn from(progress: ProgressSnapshot) -> Self {
        Self {
            completed_count: progress.completed_count as u32,
            total_required: progress.total_required as u32,
            next_required_field: progress.next_required_field.map(|f| f.key().to_string()),
            missing: progress.missing.iter().map(|f| f.key().to_string()).collect(),
            is_complete: progress.is_complete(),
        }
    }
}

/// FFI-safe intake record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIntakeRecord {
    pub session_id: String,
    pub amount: Option<String>,
    pub provider: Option<String>,
    pub service_date: Option<String>,
    pub insurance: Option<String>,
    pub codes_summary: Option<String>,
    pub cpt_codes: Vec<String>,
    pub hcpcs_codes: Vec<String>,
    pub icd_codes: Vec<String>,
    pub itemized_bill: bool,
    pub last_updated: Option<String>,
}

impl From<IntakeRecord> for FfiIntakeRecord {
    fn from(record: IntakeRecord) -> Self {
        Self {
            session_id: record.session_id,
            amount: record.amount,
            provider: record.provider,
            service_date: record.service_date,
            insurance: record.insurance,
            codes_summary: record.codes_summary,
            cpt_codes: record.cpt_codes,
            hcpcs_codes: record.hcpcs_codes,
            icd_codes: record.icd_codes,
            itemized_bill: record.itemized_bill,
            last_updated: record.last_updated,
        }
    }
}
