//! Intake record built incrementally from chat text.

use serde::{Deserialize, Serialize};

/// A required intake fact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IntakeField {
    Amount,
    Provider,
    ServiceDate,
    Insurance,
    Codes,
    ItemizedBill,
}

impl IntakeField {
    /// Completion order used for progress scoring.
    pub const ORDERED: [IntakeField; 6] = [
        IntakeField::Amount,
        IntakeField::Provider,
        IntakeField::ServiceDate,
        IntakeField::Insurance,
        IntakeField::Codes,
        IntakeField::ItemizedBill,
    ];

    /// Priority order used when asking the user for missing facts.
    pub const PRIORITY: [IntakeField; 6] = [
        IntakeField::Amount,
        IntakeField::Provider,
        IntakeField::ServiceDate,
        IntakeField::Codes,
        IntakeField::Insurance,
        IntakeField::ItemizedBill,
    ];

    /// Key used by the chat UI (quick replies, progress card).
    pub fn key(&self) -> &'static str {
        match self {
            IntakeField::Amount => "amount",
            IntakeField::Provider => "provider",
            IntakeField::ServiceDate => "serviceDate",
            IntakeField::Insurance => "insurance",
            IntakeField::Codes => "codes",
            IntakeField::ItemizedBill => "itemized",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IntakeField::Amount => "Bill Amount",
            IntakeField::Provider => "Provider",
            IntakeField::ServiceDate => "Service Date",
            IntakeField::Insurance => "Insurance",
            IntakeField::Codes => "Medical Codes",
            IntakeField::ItemizedBill => "Itemized Bill",
        }
    }

    /// Canned instruction telling the user where to find this fact.
    pub fn instruction(&self) -> &'static str {
        match self {
            IntakeField::Amount => "Look for the total amount due at the bottom of your bill",
            IntakeField::Provider => {
                "Check the top of your bill for the hospital, clinic, or provider name"
            }
            IntakeField::ServiceDate => {
                "Find the date you received care, usually labeled \"date of service\""
            }
            IntakeField::Codes => {
                "Look for 5-digit CPT codes or HCPCS codes (a letter followed by 4 digits) next to each charge"
            }
            IntakeField::Insurance => {
                "Tell me your insurance carrier and whether the provider was in-network"
            }
            IntakeField::ItemizedBill => {
                "Ask the billing office for an itemized bill that lists every charge line by line"
            }
        }
    }
}

/// Structured bill facts for one chat session.
///
/// Scalar fields are fill-once: the first successful extraction wins and later
/// passes never overwrite it. Code lists only grow and `itemized_bill` only
/// flips to `true`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeRecord {
    /// Session UUID
    pub session_id: String,
    /// Total amount due, formatted as "$1,234.5"
    pub amount: Option<String>,
    /// Provider or facility name
    pub provider: Option<String>,
    /// Date of service, verbatim as written
    pub service_date: Option<String>,
    /// Carrier, plan, or network-status snippet
    pub insurance: Option<String>,
    /// "<N> medical codes identified"
    pub codes_summary: Option<String>,
    /// CPT-like codes in discovery order
    pub cpt_codes: Vec<String>,
    /// HCPCS-like codes in discovery order
    pub hcpcs_codes: Vec<String>,
    /// ICD-10-like codes in discovery order
    pub icd_codes: Vec<String>,
    /// Whether the user appears to have an itemized bill
    pub itemized_bill: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Timestamp of the last merge that changed something
    pub last_updated: Option<String>,
}

impl Default for IntakeRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeRecord {
    /// Create an empty record for a new chat session.
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            amount: None,
            provider: None,
            service_date: None,
            insurance: None,
            codes_summary: None,
            cpt_codes: Vec::new(),
            hcpcs_codes: Vec::new(),
            icd_codes: Vec::new(),
            itemized_bill: false,
            created_at: chrono::Utc::now().to_rfc3339(),
            last_updated: None,
        }
    }

    /// Whether a field currently holds a value.
    pub fn has(&self, field: IntakeField) -> bool {
        match field {
            IntakeField::Amount => self.amount.is_some(),
            IntakeField::Provider => self.provider.is_some(),
            IntakeField::ServiceDate => self.service_date.is_some(),
            IntakeField::Insurance => self.insurance.is_some(),
            IntakeField::Codes => self.codes_summary.is_some(),
            IntakeField::ItemizedBill => self.itemized_bill,
        }
    }

    /// Total number of codes across all three lists.
    pub fn total_codes(&self) -> usize {
        self.cpt_codes.len() + self.hcpcs_codes.len() + self.icd_codes.len()
    }

    /// Merge an update with fill-once semantics.
    ///
    /// Returns the fields that changed. `last_updated` is touched only when
    /// something changed.
    pub fn apply(&mut self, update: IntakeUpdate) -> Vec<IntakeField> {
        let mut changed = Vec::new();

        if fill_once(&mut self.amount, update.amount) {
            changed.push(IntakeField::Amount);
        }
        if fill_once(&mut self.provider, update.provider) {
            changed.push(IntakeField::Provider);
        }
        if fill_once(&mut self.service_date, update.service_date) {
            changed.push(IntakeField::ServiceDate);
        }
        if fill_once(&mut self.insurance, update.insurance) {
            changed.push(IntakeField::Insurance);
        }

        let added = append_distinct(&mut self.cpt_codes, update.new_cpt_codes)
            + append_distinct(&mut self.hcpcs_codes, update.new_hcpcs_codes)
            + append_distinct(&mut self.icd_codes, update.new_icd_codes);
        if added > 0 {
            self.codes_summary = Some(format!("{} medical codes identified", self.total_codes()));
            changed.push(IntakeField::Codes);
        }

        if update.itemized_bill == Some(true) && !self.itemized_bill {
            self.itemized_bill = true;
            changed.push(IntakeField::ItemizedBill);
        }

        if !changed.is_empty() {
            self.touch();
        }
        changed
    }

    /// Touch the last_updated timestamp.
    pub fn touch(&mut self) {
        self.last_updated = Some(chrono::Utc::now().to_rfc3339());
    }
}

/// Merge an update into a record, returning the updated record.
pub fn apply_extraction(mut record: IntakeRecord, update: IntakeUpdate) -> IntakeRecord {
    record.apply(update);
    record
}

fn fill_once(slot: &mut Option<String>, value: Option<String>) -> bool {
    match (slot.as_ref(), value) {
        (None, Some(v)) => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

fn append_distinct(list: &mut Vec<String>, codes: Vec<String>) -> usize {
    let mut added = 0;
    for code in codes {
        if !list.contains(&code) {
            list.push(code);
            added += 1;
        }
    }
    added
}

/// Newly discovered facts from one extraction pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntakeUpdate {
    pub amount: Option<String>,
    pub provider: Option<String>,
    pub service_date: Option<String>,
    pub insurance: Option<String>,
    pub new_cpt_codes: Vec<String>,
    pub new_hcpcs_codes: Vec<String>,
    pub new_icd_codes: Vec<String>,
    /// Only ever `Some(true)`; a pass cannot un-flag an itemized bill.
    pub itemized_bill: Option<bool>,
}

impl IntakeUpdate {
    /// Check if the pass found nothing.
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.provider.is_none()
            && self.service_date.is_none()
            && self.insurance.is_none()
            && self.new_cpt_codes.is_empty()
            && self.new_hcpcs_codes.is_empty()
            && self.new_icd_codes.is_empty()
            && self.itemized_bill.is_none()
    }
}
