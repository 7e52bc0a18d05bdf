//! Prompts for the medical bill dispute assistant.

use bill_intake_core::guidance::GREETING_MARKER;
use bill_intake_core::{render_missing_guidance, render_status_summary, IntakeField, IntakeRecord};

/// System prompt for the bill assistant.
pub const SYSTEM_PROMPT: &str = r#"You are a patient advocate that helps people understand and dispute medical bills.

Before analyzing a bill, collect these facts from the user:
- amount: The total amount due
- provider: The hospital, clinic, or provider that sent the bill
- service_date: The date care was received
- insurance: The insurance carrier, plan, and whether the provider was in-network
- codes: CPT, HCPCS, or ICD-10 codes listed on the bill
- itemized: Whether the user has an itemized bill listing each charge

Ask for at most one or two missing facts per reply. When you learn a fact, restate it
plainly (for example "Amount due: $1,250.00") so it can be recorded.

Never give legal advice. Suggest contacting the provider's billing office or the
insurer when a dispute requires it."#;

/// Opening message of every conversation.
pub fn initial_greeting() -> String {
    format!(
        "Hello! {}. To get started, tell me the total amount due and who sent the bill, \
         or upload a photo of it.",
        GREETING_MARKER
    )
}

/// Build the per-turn prompt, carrying the current intake state as context.
pub fn make_context_prompt(user_message: &str, record: &IntakeRecord) -> String {
    format!(
        r#"Current bill intake status:
{}

Still worth asking about:
{}

User message:
"{}"

Reply to the user. If any facts are still missing, ask for the first one listed above."#,
        render_status_summary(record),
        render_missing_guidance(record),
        user_message
    )
}

/// Quick-reply button labels for the next missing fact.
pub fn quick_reply_labels(next: Option<IntakeField>) -> Vec<&'static str> {
    match next {
        Some(IntakeField::Amount) => vec!["I'll type the total", "Upload my bill", "I don't know the amount"],
        Some(IntakeField::Provider) => vec!["It's a hospital", "It's a doctor's office", "It's a lab"],
        Some(IntakeField::ServiceDate) => vec!["I'll enter the date", "It was a hospital stay", "I'm not sure"],
        Some(IntakeField::Insurance) => vec!["I have insurance", "I'm uninsured", "Medicare / Medicaid"],
        Some(IntakeField::Codes) => vec!["I see CPT codes", "No codes on my bill", "Where do I find codes?"],
        Some(IntakeField::ItemizedBill) => {
            vec!["I have an itemized bill", "How do I request one?", "Continue without it"]
        }
        None => vec!["Analyze my bill", "Start a dispute letter"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bill_intake_core::{compute_progress, render_next_step_guidance};

    #[test]
    fn test_greeting_skips_next_steps() {
        let greeting = initial_greeting();
        assert!(greeting.contains(GREETING_MARKER));
        assert_eq!(render_next_step_guidance(&greeting, &IntakeRecord::new()), greeting);
    }

    #[test]
    fn test_context_prompt_carries_status() {
        let mut record = IntakeRecord::new();
        record.amount = Some("$980".into());

        let prompt = make_context_prompt("It was from Mercy Hospital", &record);
        assert!(prompt.contains("Bill Assessment Progress: 1/6"));
        assert!(prompt.contains("**Provider**"));
        assert!(prompt.contains("\"It was from Mercy Hospital\""));
    }

    #[test]
    fn test_quick_replies_follow_next_field() {
        let record = IntakeRecord::new();
        let next = compute_progress(&record).next_required_field;
        assert_eq!(quick_reply_labels(next)[1], "Upload my bill");
        assert_eq!(quick_reply_labels(None)[0], "Analyze my bill");
    }
}
