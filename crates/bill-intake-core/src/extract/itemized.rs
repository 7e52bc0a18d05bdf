//! Itemized-bill detection.

use std::sync::LazyLock;

use super::{rule, Extraction, Rule};

/// Phrases suggesting the user is looking at an itemized bill.
const ITEMIZED_INDICATORS: &[&str] = &[
    "itemized",
    "detailed charges",
    "line by line",
    "breakdown",
    "charge description",
    "service description",
    "cpt code",
    "procedure code",
    "revenue code",
    "charge master",
];

/// Indicator phrases needed when no structured line is present.
const MIN_INDICATOR_SCORE: usize = 2;

/// Signals that the text itself contains bill line items.
static STRUCTURED_SIGNALS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // "1  99213  Office visit, established  $150.00"
        rule(
            "line_item_row",
            r"(?m)^[ \t]*\d+[ \t]+[A-Za-z0-9]{3,10}[ \t]+\S.*?\$?[\d,]*\d\.\d{2}[ \t\r]*$",
            0.95,
        ),
        rule("code_system_literal", r"CPT|HCPCS", 0.9),
        rule("line_ends_in_amount", r"(?m)\$[ \t]?[\d,]*\d\.\d{2}[ \t\r]*$", 0.8),
    ]
});

/// Count indicator phrases present in the text (case-insensitive).
pub fn itemized_score(text: &str) -> usize {
    let lower = text.to_lowercase();
    ITEMIZED_INDICATORS
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count()
}

/// Detect whether the text describes or contains an itemized bill.
pub fn detect_itemized_bill(text: &str) -> Extraction<bool> {
    for signal in STRUCTURED_SIGNALS.iter() {
        if signal.regex.is_match(text) {
            return Extraction::Candidate {
                value: true,
                confidence: signal.confidence,
                rule: signal.name,
            };
        }
    }

    let score = itemized_score(text);
    if score >= MIN_INDICATOR_SCORE {
        return Extraction::Candidate {
            value: true,
            confidence: (0.5 + 0.1 * score as f64).min(0.9),
            rule: "indicator_phrases",
        };
    }

    Extraction::NoMatch
}
