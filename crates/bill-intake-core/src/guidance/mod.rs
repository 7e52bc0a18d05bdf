//! Human-readable status and guidance text for the chat UI.

mod next_steps;

pub use next_steps::*;

use crate::models::{compute_progress, IntakeField, IntakeRecord};

/// Maximum bullets in missing-field guidance.
pub const MAX_GUIDANCE_ITEMS: usize = 3;

/// Render the progress block: fraction, provided fields, missing fields.
pub fn render_status_summary(record: &IntakeRecord) -> String {
    let progress = compute_progress(record);

    let provided: Vec<&str> = IntakeField::ORDERED
        .iter()
        .filter(|field| record.has(**field))
        .map(|field| field.label())
        .collect();
    let missing: Vec<&str> = progress.missing.iter().map(|field| field.label()).collect();

    let provided = if provided.is_empty() {
        "None yet".to_string()
    } else {
        provided.join(", ")
    };
    let missing = if missing.is_empty() {
        "Assessment complete!".to_string()
    } else {
        missing.join(", ")
    };

    format!(
        "**Bill Assessment Progress: {}/{}**\nProvided: {}\nMissing: {}",
        progress.completed_count, progress.total_required, provided, missing
    )
}

/// Render instructions for the highest-priority missing fields.
pub fn render_missing_guidance(record: &IntakeRecord) -> String {
    let progress = compute_progress(record);

    if progress.missing.is_empty() {
        return "You've provided everything needed. Your bill is ready for analysis.".to_string();
    }

    progress
        .missing
        .iter()
        .take(MAX_GUIDANCE_ITEMS)
        .map(|field| format_bullet(*field))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn format_bullet(field: IntakeField) -> String {
    format!("• **{}**: {}", field.label(), field.instruction())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_empty_record() {
        let summary = render_status_summary(&IntakeRecord::new());
        assert_eq!(
            summary,
            "**Bill Assessment Progress: 0/6**\nProvided: None yet\nMissing: Bill Amount, Provider, Service Date, Medical Codes, Insurance, Itemized Bill"
        );
    }

    #[test]
    fn test_summary_partial_record() {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());
        record.insurance = Some("Aetna PPO".into());

        let summary = render_status_summary(&record);
        assert!(summary.contains("2/6"));
        assert!(summary.contains("Provided: Bill Amount, Insurance"));
        assert!(summary.contains("Missing: Provider, Service Date, Medical Codes, Itemized Bill"));
    }

    #[test]
    fn test_summary_complete_record() {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());
        record.provider = Some("Mercy Hospital".into());
        record.service_date = Some("01/02/2024".into());
        record.insurance = Some("Aetna PPO".into());
        record.codes_summary = Some("1 medical codes identified".into());
        record.itemized_bill = true;

        let summary = render_status_summary(&record);
        assert!(summary.contains("6/6"));
        assert!(summary.contains("Missing: Assessment complete!"));
    }

    #[test]
    fn test_missing_guidance_top_three() {
        let guidance = render_missing_guidance(&IntakeRecord::new());
        let lines: Vec<&str> = guidance.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Look for the total amount due at the bottom of your bill"));
        assert!(lines[1].contains("**Provider**"));
        assert!(lines[2].contains("**Service Date**"));
    }

    #[test]
    fn test_missing_guidance_priority_skips_known() {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());
        record.provider = Some("Mercy Hospital".into());

        let guidance = render_missing_guidance(&record);
        let lines: Vec<&str> = guidance.lines().collect();
        assert!(lines[0].contains("**Service Date**"));
        assert!(lines[1].contains("**Medical Codes**"));
        assert!(lines[2].contains("**Insurance**"));
    }

    #[test]
    fn test_missing_guidance_when_complete() {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());
        record.provider = Some("Mercy Hospital".into());
        record.service_date = Some("01/02/2024".into());
        record.insurance = Some("Aetna PPO".into());
        record.codes_summary = Some("1 medical codes identified".into());
        record.itemized_bill = true;

        assert!(render_missing_guidance(&record).contains("ready for analysis"));
    }
}
