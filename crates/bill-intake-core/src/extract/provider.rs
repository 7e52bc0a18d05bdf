//! Provider / facility name extraction.

use std::sync::LazyLock;

use super::{rule, Extraction, Rule};

/// Terms that mark a candidate as bill boilerplate rather than a name.
const BOILERPLATE_TERMS: &[&str] = &[
    "date", "time", "total", "amount", "charge", "service", "phone", "address", "bill",
];

/// Sentence-opening words that the capitalized-run rules pick up ahead of a
/// name ("Yesterday Mercy Hospital sent...").
const LEADING_FILLER: &[&str] = &[
    "yesterday", "today", "tonight", "recently", "last", "then", "also", "and", "but", "so",
    "called", "visited", "saw", "went", "got", "paid", "contacted", "phoned", "emailed",
    "received", "from", "at", "to", "my", "our", "their", "we", "they", "i", "when", "after",
    "before", "since", "this", "that", "finally", "just", "hi", "hello", "hey", "ok", "okay",
];

const MIN_NAME_LEN: usize = 8;
const MAX_NAME_LEN: usize = 80;
const MIN_LINE_LEN: usize = 10;
const MAX_LINE_LEN: usize = 50;

/// Rule families in order. The standalone-line family is additionally
/// length-filtered before validation.
static PROVIDER_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            "institution_keyword",
            r"\b([A-Z][A-Za-z'&.\-]*(?:[ \t]+[A-Z][A-Za-z'&.\-]*)*[ \t]+(?:Hospital|Medical Center|Medical Group|Health System|Healthcare|Health|Clinic|Surgery Center|Surgical Center|Urgent Care|Imaging|Laboratory|Labs|Physicians|Associates))\b",
            0.85,
        ),
        rule(
            "labeled_provider",
            r"(?i)(?:bill\s+from\s*:?|provider\s*:|facility\s*:|hospital\s*:)[ \t]*([^\n,;]+)",
            0.8,
        ),
        rule(
            "corporate_medical",
            r"\b((?:[A-Z][A-Za-z&'\-]*[ \t]+){0,4}(?:Medical|Health|Care|Clinical|Surgical|Radiology|Anesthesia|Physicians?|Pediatrics|Orthopedics?|Cardiology|Emergency)(?:[ \t]+[A-Z][A-Za-z&'\-]*){0,3},?[ \t]+(?:LLC|Inc|PC|PA|PLLC|LLP|Corp)\b\.?)",
            0.7,
        ),
        rule(
            "standalone_line",
            r"(?m)^[ \t]*([A-Z][A-Za-z&'.\-]*(?:[ \t]+(?:[A-Z][A-Za-z&'.\-]*|of|and|the|for|&))+)[ \t]*$",
            0.4,
        ),
    ]
});

/// Extract the provider name: first validated match in family order.
pub fn extract_provider(text: &str) -> Extraction<String> {
    for rule in PROVIDER_RULES.iter() {
        for caps in rule.regex.captures_iter(text) {
            let Some(m) = caps.get(1) else { continue };
            let candidate = strip_leading_filler(trim_name(m.as_str()));

            if rule.name == "standalone_line" {
                let len = candidate.chars().count();
                if !(MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) {
                    continue;
                }
            }

            if is_valid_provider(candidate) {
                return Extraction::Candidate {
                    value: candidate.to_string(),
                    confidence: rule.confidence,
                    rule: rule.name,
                };
            }
        }
    }

    Extraction::NoMatch
}

fn trim_name(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';' | '-' | '"' | '\''))
}

/// Drop filler words from the front, keeping at least two words.
fn strip_leading_filler(name: &str) -> &str {
    let mut rest = name;
    while let Some((first, tail)) = rest.split_once(char::is_whitespace) {
        let tail = tail.trim_start();
        if !tail.contains(char::is_whitespace) {
            break;
        }
        if !LEADING_FILLER.contains(&first.to_lowercase().as_str()) {
            break;
        }
        rest = tail;
    }
    rest
}

/// Structural check on a provider candidate.
pub fn is_valid_provider(candidate: &str) -> bool {
    let len = candidate.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return false;
    }
    if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    if !candidate.chars().any(|c| c.is_alphabetic()) {
        return false;
    }

    let lower = candidate.to_lowercase();
    !BOILERPLATE_TERMS.iter().any(|term| lower.contains(term))
}
