//! CPT / HCPCS / ICD-10 code collection.
//!
//! Codes are matched by shape only. Any 5-digit token is a CPT candidate, so
//! zip codes and bare amounts can slip in; the per-call cap bounds that.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ExtractorConfig;
use crate::models::IntakeRecord;

static CPT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{5}(?:-[A-Z0-9]{2})?\b").expect("Invalid CPT regex")
});

static HCPCS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-V]\d{4}\b").expect("Invalid HCPCS regex"));

static ICD10_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]\d{2}(?:\.[A-Z0-9]{1,4})?\b").expect("Invalid ICD-10 regex")
});

/// Codes found in one call that the record does not hold yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedCodes {
    pub new_cpt: Vec<String>,
    pub new_hcpcs: Vec<String>,
    pub new_icd: Vec<String>,
}

impl CollectedCodes {
    pub fn total(&self) -> usize {
        self.new_cpt.len() + self.new_hcpcs.len() + self.new_icd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Scan for codes, dedupe against the record's history, and cap each list.
pub fn collect_codes(text: &str, record: &IntakeRecord, config: &ExtractorConfig) -> CollectedCodes {
    CollectedCodes {
        new_cpt: collect_new(&CPT_PATTERN, text, &record.cpt_codes, config.max_new_cpt_codes),
        new_hcpcs: collect_new(&HCPCS_PATTERN, text, &record.hcpcs_codes, config.max_new_hcpcs_codes),
        new_icd: collect_new(&ICD10_PATTERN, text, &record.icd_codes, config.max_new_icd_codes),
    }
}

fn collect_new(pattern: &Regex, text: &str, existing: &[String], cap: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for m in pattern.find_iter(text) {
        if found.len() >= cap {
            tracing::debug!(cap, "code cap reached for this pass");
            break;
        }
        let code = m.as_str();
        if existing.iter().any(|c| c == code) || found.iter().any(|c| c == code) {
            continue;
        }
        found.push(code.to_string());
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str, record: &IntakeRecord) -> CollectedCodes {
        collect_codes(text, record, &ExtractorConfig::default())
    }

    #[test]
    fn test_mixed_codes() {
        let codes = collect("CPT 99213, 99214 and HCPCS J1100", &IntakeRecord::new());
        assert_eq!(codes.new_cpt, vec!["99213", "99214"]);
        assert_eq!(codes.new_hcpcs, vec!["J1100"]);
        assert!(codes.new_icd.is_empty());
        assert_eq!(codes.total(), 3);
    }

    #[test]
    fn test_cpt_modifier() {
        let codes = collect("Billed 99214-25 and 20610-RT", &IntakeRecord::new());
        assert_eq!(codes.new_cpt, vec!["99214-25", "20610-RT"]);
    }

    #[test]
    fn test_icd_codes() {
        let codes = collect("Diagnosis E11.9, I10 and M54.5", &IntakeRecord::new());
        assert_eq!(codes.new_icd, vec!["E11.9", "I10", "M54.5"]);
        assert!(codes.new_hcpcs.is_empty());
    }

    #[test]
    fn test_dedupes_within_call() {
        let codes = collect("99213 99213 99213", &IntakeRecord::new());
        assert_eq!(codes.new_cpt, vec!["99213"]);
    }

    #[test]
    fn test_dedupes_against_history() {
        let mut record = IntakeRecord::new();
        record.cpt_codes = vec!["99213".into()];

        let codes = collect("99213 and 99285", &record);
        assert_eq!(codes.new_cpt, vec!["99285"]);
    }

    #[test]
    fn test_cpt_cap() {
        let text: Vec<String> = (0..30).map(|i| format!("{}", 10000 + i)).collect();
        let codes = collect(&text.join(" "), &IntakeRecord::new());
        assert_eq!(codes.new_cpt.len(), 20);
        assert_eq!(codes.new_cpt[0], "10000");
    }

    #[test]
    fn test_hcpcs_cap() {
        let text: Vec<String> = (0..15).map(|i| format!("J{:04}", 1000 + i)).collect();
        let codes = collect(&text.join(", "), &IntakeRecord::new());
        assert_eq!(codes.new_hcpcs.len(), 10);
    }

    #[test]
    fn test_icd_cap() {
        let text: Vec<String> = (0..30).map(|i| format!("M{:02}.{}", 10 + i, i % 10)).collect();
        let codes = collect(&text.join(", "), &IntakeRecord::new());
        assert_eq!(codes.new_icd.len(), 15);
        assert_eq!(codes.new_icd[0], "M10.0");
        assert_eq!(codes.new_icd[14], "M24.4");
    }

    #[test]
    fn test_zip_code_counts_as_cpt() {
        // Shape-only matching: a zip code is indistinguishable from a CPT code
        let codes = collect("Springfield, IL 62704", &IntakeRecord::new());
        assert_eq!(codes.new_cpt, vec!["62704"]);
    }

    #[test]
    fn test_hcpcs_out_of_range_letter() {
        let codes = collect("W1234 Z9999", &IntakeRecord::new());
        assert!(codes.new_hcpcs.is_empty());
    }

    #[test]
    fn test_no_codes() {
        assert!(collect("", &IntakeRecord::new()).is_empty());
        assert!(collect("$3,450.00 on 03/14/2024", &IntakeRecord::new()).is_empty());
    }
}
