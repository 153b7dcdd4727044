//! Input normalization for supplier registration

use crate::models::PaymentTerm;

/// Trim, drop blanks and deduplicate a category list.
///
/// Deduplication is by exact string equality after trimming, so "A" and
/// "a" stay distinct. First occurrence wins and order is preserved.
pub fn normalize_categories<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in raw {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if out.iter().any(|seen| seen == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// Derive payment terms from a comma-separated template string.
///
/// Each segment becomes one term: the description is the trimmed segment
/// text and the value is the first run of digits in it, or 0 when the
/// segment has none ("COD"). Blank templates yield None.
pub fn parse_payment_terms_template(template: &str) -> Option<Vec<PaymentTerm>> {
    let terms: Vec<PaymentTerm> = template
        .split(',')
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(|seg| PaymentTerm {
            description: seg.to_string(),
            value: first_digit_run(seg),
        })
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

fn first_digit_run(segment: &str) -> i64 {
    let digits: String = segment
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
