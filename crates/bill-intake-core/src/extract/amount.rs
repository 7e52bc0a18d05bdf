//! Bill total extraction.
//!
//! Rule families, tried in order:
//! 1. bill-total vocabulary followed by a dollar figure
//! 2. a dollar figure followed by total/due/balance/owed/charged
//! 3. any dollar figure
//!
//! Within a family every figure is collected, values at or below the copay
//! floor are dropped, and the largest remaining value wins.

use std::sync::LazyLock;

use super::{rule, Extraction, Rule};

const DOLLAR_FIGURE: &str = r"\$\s*([\d,]+(?:\.\d{1,2})?)";

static AMOUNT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            "labeled_total",
            &format!(
                r"(?i)(?:total\s+amount\s+due|patient\s+balance|amount\s+due|grand\s+total|total\s+charges|balance\s+due)\s*:?\s*{}",
                DOLLAR_FIGURE
            ),
            0.9,
        ),
        rule(
            "figure_then_total",
            &format!(r"(?i){}\s*(?:total|due|balance|owed|charged)", DOLLAR_FIGURE),
            0.75,
        ),
        rule("any_figure", DOLLAR_FIGURE, 0.5),
    ]
});

/// Extract the bill total as a formatted currency string.
pub fn extract_amount(text: &str, min_amount: f64) -> Extraction<String> {
    if !text.contains('$') {
        return Extraction::NoMatch;
    }

    for rule in AMOUNT_RULES.iter() {
        let best = rule
            .regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| parse_amount(m.as_str()).map(|value| (value, m.as_str())))
            .filter(|(value, _)| *value > min_amount)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some((_, raw)) = best {
            return Extraction::Candidate {
                value: format_currency(raw),
                confidence: rule.confidence,
                rule: rule.name,
            };
        }
    }

    Extraction::NoMatch
}

/// Parse "1,234.56" into 1234.56.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a matched figure as "$" + thousands-grouped value, dropping
/// trailing zero cents.
///
/// Works on the matched digits so arbitrarily large figures keep every digit.
/// "3,450.00" → "$3,450", "1234.5" → "$1,234.5", "99.99" → "$99.99"
pub fn format_currency(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));

    let whole = whole.trim_start_matches('0');
    let digits: Vec<char> = if whole.is_empty() { vec!['0'] } else { whole.chars().collect() };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let mut cents = frac.chars().take(2);
    match (cents.next().unwrap_or('0'), cents.next().unwrap_or('0')) {
        ('0', '0') => format!("${}", grouped),
        (tens, '0') => format!("${}.{}", grouped, tens),
        (tens, ones) => format!("${}.{}{}", grouped, tens, ones),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(text: &str) -> Option<String> {
        extract_amount(text, 50.0).into_value()
    }

    #[test]
    fn test_labeled_total() {
        let result = extract_amount("Total Amount Due: $3,450.00", 50.0);
        assert!(matches!(
            result,
            Extraction::Candidate { rule: "labeled_total", .. }
        ));
        assert_eq!(result.into_value(), Some("$3,450".to_string()));
    }

    #[test]
    fn test_labeled_total_beats_larger_unlabeled() {
        let text = "Charges before insurance $12,000.00. Patient balance: $1,850.25";
        assert_eq!(amount(text), Some("$1,850.25".into()));
    }

    #[test]
    fn test_figure_then_total() {
        assert_eq!(amount("You have $640.00 due by March"), Some("$640".into()));
        assert_eq!(amount("They said $2,100 owed after insurance"), Some("$2,100".into()));
    }

    #[test]
    fn test_max_of_unlabeled_figures() {
        assert_eq!(amount("I paid $45, then $1,200, and later $75"), Some("$1,200".into()));
    }

    #[test]
    fn test_copay_noise_discarded() {
        assert_eq!(amount("My copay was $25"), None);
        assert_eq!(amount("Exactly $50 at the desk"), None);
        assert_eq!(amount("Amount due: $20.00 copay, total charges $980.00"), Some("$980".into()));
    }

    #[test]
    fn test_requires_dollar_sign() {
        assert_eq!(amount("Total amount due 3450.00"), None);
        assert_eq!(amount("12345 67890"), None);
    }

    #[test]
    fn test_malformed_figures() {
        assert_eq!(amount("$"), None);
        assert_eq!(amount("$,,,"), None);
        assert_eq!(amount("$$$$$$$$$$$$"), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency("3,450.00"), "$3,450");
        assert_eq!(format_currency("1234.5"), "$1,234.5");
        assert_eq!(format_currency("1,234.50"), "$1,234.5");
        assert_eq!(format_currency("99.99"), "$99.99");
        assert_eq!(format_currency("1000000"), "$1,000,000");
        assert_eq!(format_currency("51.05"), "$51.05");
        assert_eq!(format_currency("0"), "$0");
        assert_eq!(format_currency("0,075.00"), "$75");
    }

    #[test]
    fn test_huge_figure_keeps_every_digit() {
        assert_eq!(
            amount("Total amount due: $99,999,999,999,999,999,999.00"),
            Some("$99,999,999,999,999,999,999".into())
        );
        assert_eq!(
            amount("Balance due: $184467440737095516150.25"),
            Some("$184,467,440,737,095,516,150.25".into())
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,200"), Some(1200.0));
        assert_eq!(parse_amount("3,450.00"), Some(3450.0));
        assert_eq!(parse_amount(","), None);
    }
}
