// src/extractor/contact_extractor.rs
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Substrings that mark an email as auto-generated or placeholder rather
/// than a reachable business contact. Checked against the lowercased match.
pub const EMAIL_BLOCKLIST: [&str; 11] = [
    "noreply",
    "no-reply",
    "donotreply",
    "info@example",
    "test@",
    "admin@example",
    "webmaster@",
    "postmaster@",
    "abuse@",
    "privacy@example",
    "support@example",
];

/// Regional phone patterns, tried in order. The validator anchors these same
/// patterns at the start of a value, so the list is shared.
pub const PHONE_PATTERNS: [&str; 7] = [
    r"\+1[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
    r"\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
    r"[0-9]{3}-[0-9]{3}-[0-9]{4}",
    r"[0-9]{3}\.[0-9]{3}\.[0-9]{4}",
    r"\([0-9]{3}\)\s[0-9]{3}-[0-9]{4}",
    r"[0-9]{10}",
    r"\+[0-9]{1,3}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}",
];

/// Drop everything except digits and a leading-or-embedded '+'.
pub fn strip_to_digits(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

fn digit_count(phone: &str) -> usize {
    phone.chars().filter(|c| c.is_ascii_digit()).count()
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regexes: Vec<Regex>,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            email_regex: Regex::new(r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}\b")
                .unwrap(),
            phone_regexes: PHONE_PATTERNS
                .iter()
                .map(|p| Regex::new(p).unwrap())
                .collect(),
        }
    }

    /// Pull email addresses out of free text. Duplicates within the same
    /// blob collapse; results keep first-occurrence order so "best email"
    /// selection downstream is deterministic.
    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut emails = Vec::new();

        for m in self.email_regex.find_iter(text) {
            let email = m.as_str().to_string();
            let email_lower = email.to_lowercase();

            if EMAIL_BLOCKLIST.iter().any(|skip| email_lower.contains(skip)) {
                continue;
            }

            if seen.insert(email.clone()) {
                emails.push(email);
            }
        }

        debug!("Extracted {} emails", emails.len());
        emails
    }

    /// Pull phone numbers out of free text. Every pattern runs over the full
    /// text; matches shorter than 10 digits after stripping are discarded as
    /// false positives (partial numbers, zip+4 codes). The original matched
    /// substring is returned, so two formattings of the same number are kept
    /// as distinct entries.
    pub fn extract_phones(&self, text: &str) -> Vec<String> {
        let mut raw_matches = Vec::new();
        for regex in &self.phone_regexes {
            for m in regex.find_iter(text) {
                raw_matches.push(m.as_str().to_string());
            }
        }

        let mut seen = HashSet::new();
        let mut phones = Vec::new();
        for candidate in raw_matches {
            if digit_count(&strip_to_digits(&candidate)) < 10 {
                continue;
            }
            let phone = candidate.trim().to_string();
            if seen.insert(phone.clone()) {
                phones.push(phone);
            }
        }

        debug!("Extracted {} phone numbers", phones.len());
        phones
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_business_email() {
        let ex = ContactExtractor::new();
        let emails = ex.extract_emails("Reach us at sales@acmebearings.com for quotes");
        assert_eq!(emails, vec!["sales@acmebearings.com"]);
    }

    #[test]
    fn blocklisted_addresses_never_survive() {
        let ex = ContactExtractor::new();
        let text = "noreply@foo.com NoReply@bar.org test@real.com webmaster@site.net \
                    sales@acme.com abuse@host.io";
        let emails = ex.extract_emails(text);
        assert_eq!(emails, vec!["sales@acme.com"]);
    }

    #[test]
    fn duplicate_emails_collapse_in_first_match_order() {
        let ex = ContactExtractor::new();
        let text = "b@x.com a@x.com b@x.com";
        assert_eq!(ex.extract_emails(text), vec!["b@x.com", "a@x.com"]);
    }

    #[test]
    fn empty_input_yields_empty_sets() {
        let ex = ContactExtractor::new();
        assert!(ex.extract_emails("").is_empty());
        assert!(ex.extract_phones("").is_empty());
    }

    #[test]
    fn every_returned_phone_has_at_least_ten_digits() {
        let ex = ContactExtractor::new();
        let text = "call 555-123-4567 or (212) 555-0147, zip 12345-6789 is not a phone: 123-4567";
        let phones = ex.extract_phones(text);
        assert!(!phones.is_empty());
        for phone in &phones {
            let digits = strip_to_digits(phone)
                .chars()
                .filter(|c| c.is_ascii_digit())
                .count();
            assert!(digits >= 10, "{} has fewer than 10 digits", phone);
        }
        assert!(!phones.iter().any(|p| p == "123-4567"));
    }

    #[test]
    fn phone_variants_with_same_digits_stay_distinct() {
        // Flagged behavior: dedup is on the raw substring, not the digits.
        let ex = ContactExtractor::new();
        let phones = ex.extract_phones("555-123-4567 and 555.123.4567");
        assert_eq!(phones.len(), 2);
    }

    #[test]
    fn international_numbers_match() {
        let ex = ContactExtractor::new();
        let phones = ex.extract_phones("office: +44 2079 460 958");
        assert!(phones.iter().any(|p| p.starts_with("+44")));
    }
}
