//! "Next steps" block appended to assistant responses.

use crate::models::{compute_progress, IntakeRecord};

use super::format_bullet;

/// Literal substring that identifies the assistant's opening greeting.
pub const GREETING_MARKER: &str = "I'm here to help you understand and dispute your medical bill";

/// Heading of the block shown once every fact is collected.
pub const ANALYSIS_READY_MARKER: &str = "Ready for analysis";

/// Secondary gaps listed after the primary one.
const MAX_SECONDARY_GAPS: usize = 2;

/// Append contextual next steps to an assistant response.
///
/// The greeting is returned untouched. A complete intake gets the
/// analysis-ready block; otherwise the highest-priority gap is called out,
/// followed by up to two secondary gaps.
pub fn render_next_step_guidance(response: &str, record: &IntakeRecord) -> String {
    if response.contains(GREETING_MARKER) {
        return response.to_string();
    }

    let progress = compute_progress(record);
    let mut out = String::from(response.trim_end());
    out.push_str("\n\n---\n\n");

    if progress.is_complete() {
        out.push_str(&format!("**✅ {}**\n", ANALYSIS_READY_MARKER));
        out.push_str(
            "You've shared all six facts we need. I can now review your bill for \
             overcharges, duplicate line items, and coding errors. Say \"analyze my bill\" \
             to start.",
        );
        return out;
    }

    let Some((primary, secondary)) = progress.missing.split_first() else {
        return out;
    };

    out.push_str(&format!(
        "**Next steps ({}/{} complete):** To continue your assessment, I still need:\n",
        progress.completed_count, progress.total_required
    ));
    out.push_str(&format_bullet(*primary));

    let secondary: Vec<String> = secondary
        .iter()
        .take(MAX_SECONDARY_GAPS)
        .map(|field| format_bullet(*field))
        .collect();
    if !secondary.is_empty() {
        out.push_str("\n\nAlso helpful:\n");
        out.push_str(&secondary.join("\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> IntakeRecord {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());
        record.provider = Some("Mercy Hospital".into());
        record.service_date = Some("01/02/2024".into());
        record.insurance = Some("Aetna PPO".into());
        record.codes_summary = Some("1 medical codes identified".into());
        record.itemized_bill = true;
        record
    }

    #[test]
    fn test_greeting_untouched() {
        let greeting = format!("Hi! {}. What does your bill say?", GREETING_MARKER);
        assert_eq!(render_next_step_guidance(&greeting, &IntakeRecord::new()), greeting);
    }

    #[test]
    fn test_complete_branch() {
        let text = render_next_step_guidance("Thanks for the details.", &complete_record());
        assert!(text.starts_with("Thanks for the details."));
        assert!(text.contains(ANALYSIS_READY_MARKER));
        assert!(!text.to_lowercase().contains("still need"));
    }

    #[test]
    fn test_incomplete_branch_lists_primary_and_two_secondary() {
        let text = render_next_step_guidance("Got it.", &IntakeRecord::new());
        assert!(text.contains("I still need:"));
        assert!(text.contains("0/6"));
        assert!(text.contains("**Bill Amount**"));
        assert!(text.contains("**Provider**"));
        assert!(text.contains("**Service Date**"));
        assert!(!text.contains("**Medical Codes**"));
        assert!(!text.contains(ANALYSIS_READY_MARKER));
    }

    #[test]
    fn test_single_gap_has_no_secondary_section() {
        let mut record = complete_record();
        record.itemized_bill = false;

        let text = render_next_step_guidance("Got it.", &record);
        assert!(text.contains("**Itemized Bill**"));
        assert!(!text.contains("Also helpful"));
    }
}
