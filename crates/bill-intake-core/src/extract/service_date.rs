//! Date-of-service extraction. Dates are stored exactly as written.

use std::sync::LazyLock;

use regex::Regex;

use super::{rule, Extraction, Rule};

const NUMERIC_DATE: &str = r"\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}";

static SERVICE_DATE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            "labeled_service_date",
            &format!(
                r"(?i)\b(?:date\s+of\s+service|service\s+date|treatment\s+date|visit\s+date|procedure\s+date|admission\s+date|dos)\s*:?\s*({})",
                NUMERIC_DATE
            ),
            0.9,
        ),
        rule(
            "from_to",
            &format!(
                r"(?i)\b(?:from|on)\s+({})\s*(?:to|through|thru|-)\s*",
                NUMERIC_DATE
            ),
            0.8,
        ),
        rule(
            "date_range",
            &format!(
                r"(?i)\b({})\s*(?:-|–|to|through|thru)\s*{}\b",
                NUMERIC_DATE, NUMERIC_DATE
            ),
            0.75,
        ),
        rule("standalone_numeric", &format!(r"\b({})\b", NUMERIC_DATE), 0.6),
        rule(
            "month_name",
            r"(?i)\b((?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4})\b",
            0.5,
        ),
    ]
});

/// Labels that mark a standalone date as a document date, not a service date.
static DOCUMENT_DATE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:bill|billing|statement|invoice)\s+date\s*:?\s*$")
        .expect("Invalid document date regex")
});

/// Extract the service date: first rule family with an acceptable match.
pub fn extract_service_date(text: &str) -> Extraction<String> {
    for rule in SERVICE_DATE_RULES.iter() {
        for caps in rule.regex.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };

            if rule.name == "standalone_numeric" && follows_document_label(text, m.start()) {
                continue;
            }

            return Extraction::Candidate {
                value: m.as_str().to_string(),
                confidence: rule.confidence,
                rule: rule.name,
            };
        }
    }

    Extraction::NoMatch
}

fn follows_document_label(text: &str, start: usize) -> bool {
    let mut from = start.saturating_sub(32);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    DOCUMENT_DATE_LABEL.is_match(&text[from..start])
}
