//! Insurance carrier / plan / network-status extraction.

use std::sync::LazyLock;

use super::{rule, Extraction, Rule};

/// Snippets must be longer than this to count.
const MIN_SNIPPET_LEN: usize = 5;

static INSURANCE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            "named_carrier",
            r"(?i)\b(?:blue\s+cross(?:\s+blue\s+shield)?|bcbs|aetna|cigna|anthem|united\s*healthcare|united|kaiser(?:\s+permanente)?|medicare|medicaid|tricare|humana)\b[^\n]{0,50}",
            0.9,
        ),
        rule(
            "labeled_field",
            r"(?i)\b(?:primary\s+insurance|secondary\s+insurance|insurance\s+carrier|carrier|plan\s+name|member\s+id|policy\s+(?:id|number|no\.?|#)|group\s+(?:id|number|no\.?|#))\s*[:#]?[ \t]*[^\n]{2,60}",
            0.8,
        ),
        rule(
            "payment_reference",
            r"(?i)\b(?:insurance\s+(?:payment|paid|adjustment)|eob|explanation\s+of\s+benefits|copay(?:ment)?|deductible|coinsurance)\b[^\n]{0,40}",
            0.6,
        ),
        rule(
            "network_status",
            r"(?i)\b(?:in[\s\-]network|out[\s\-]of[\s\-]network|non[\s\-]participating|participating)\b[^\n]{0,30}",
            0.5,
        ),
    ]
});

/// Extract an insurance snippet: first family producing a long-enough match.
pub fn extract_insurance(text: &str) -> Extraction<String> {
    for rule in INSURANCE_RULES.iter() {
        for m in rule.regex.find_iter(text) {
            let snippet = m
                .as_str()
                .trim()
                .trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':'));

            if snippet.chars().count() > MIN_SNIPPET_LEN {
                return Extraction::Candidate {
                    value: snippet.to_string(),
                    confidence: rule.confidence,
                    rule: rule.name,
                };
            }
        }
    }

    Extraction::NoMatch
}
