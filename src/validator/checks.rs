// src/validator/checks.rs
use std::time::Duration;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::types::{CheckResult, PhoneCheck, WebsiteCheck};
use crate::extractor::{strip_to_digits, PHONE_PATTERNS};

/// Throwaway mailbox providers; an address on one of these is not a
/// reachable business contact.
pub const DISPOSABLE_DOMAINS: [&str; 12] = [
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
    "temp-mail.org",
    "getairmail.com",
    "yopmail.com",
    "maildrop.cc",
    "sharklasers.com",
    "grr.la",
    "guerrillamailblock.com",
];

/// Placeholder local parts that mark fabricated addresses.
pub const FAKE_PATTERNS: [&str; 5] = ["test@", "example@", "dummy@", "fake@", "sample@"];

/// Well-known mailbox providers; recognized during the offline domain check
/// and rewarded by the validation rubric.
pub const BUSINESS_DOMAINS: [&str; 8] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "protonmail.com",
    "zoho.com",
];

pub struct DataValidator {
    email_regex: Regex,
    anchored_phone_regexes: Vec<Regex>,
    client: reqwest::Client,
}

impl DataValidator {
    pub fn new(domain_check_timeout: Duration) -> Self {
        Self {
            email_regex: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap(),
            // Same pattern list the extractor scans with, anchored to the
            // start of the value since here we judge a whole field.
            anchored_phone_regexes: PHONE_PATTERNS
                .iter()
                .map(|p| Regex::new(&format!("^(?:{})", p)).unwrap())
                .collect(),
            client: reqwest::Client::builder()
                .timeout(domain_check_timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Syntax-level email verdict: format, disposable domains, placeholder
    /// local parts. Domain plausibility is a separate step.
    pub fn validate_email_syntax(&self, email: &str) -> CheckResult {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return CheckResult::fail("Empty email");
        }

        if !self.email_regex.is_match(&email) {
            return CheckResult::fail("Invalid format");
        }

        let domain = email.split('@').nth(1).unwrap_or("");
        if DISPOSABLE_DOMAINS.contains(&domain) {
            return CheckResult::fail("Disposable email");
        }

        if FAKE_PATTERNS.iter().any(|p| email.contains(p)) {
            return CheckResult::fail("Fake email pattern");
        }

        CheckResult::ok("Valid syntax")
    }

    /// Offline domain plausibility: structural checks plus recognition of
    /// well-known providers.
    pub fn simple_domain_check(&self, email: &str) -> CheckResult {
        let domain = email.trim().to_lowercase();
        let domain = match domain.split('@').nth(1) {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => return CheckResult::fail("No domain"),
        };

        if !domain.contains('.') {
            return CheckResult::fail("Invalid domain format");
        }

        let tld = domain.rsplit('.').next().unwrap_or("");
        if tld.len() < 2 || tld.len() > 6 {
            return CheckResult::fail("Invalid TLD");
        }

        if BUSINESS_DOMAINS.contains(&domain.as_str()) {
            return CheckResult::ok("Recognized business domain");
        }

        CheckResult::ok("Basic domain check passed")
    }

    /// Network domain check: HEAD against http then https, degrading to the
    /// syntactic TLD heuristic when both attempts fail. Never errors.
    pub async fn check_email_domain(&self, email: &str) -> CheckResult {
        let domain = match email.trim().split('@').nth(1) {
            Some(d) if !d.is_empty() => d.to_lowercase(),
            _ => return CheckResult::fail("No domain"),
        };

        if self
            .client
            .head(format!("http://{}", domain))
            .send()
            .await
            .is_ok()
        {
            return CheckResult::ok("Domain accessible");
        }

        if self
            .client
            .head(format!("https://{}", domain))
            .send()
            .await
            .is_ok()
        {
            return CheckResult::ok("Domain accessible (HTTPS)");
        }

        debug!("Domain {} unreachable, falling back to syntax check", domain);
        let tld = domain.rsplit('.').next().unwrap_or("");
        if domain.contains('.') && (2..=6).contains(&tld.len()) {
            return CheckResult::ok("Basic domain check passed");
        }

        CheckResult::fail("Domain not accessible")
    }

    /// Phone verdict: the extractor's pattern list anchored at the start,
    /// with a raw digit-count fallback for unusual formattings.
    pub fn validate_phone(&self, phone: &str) -> PhoneCheck {
        let phone = phone.trim();
        if phone.is_empty() {
            return PhoneCheck {
                valid: false,
                cleaned: String::new(),
                reason: "Empty phone".to_string(),
            };
        }

        if self
            .anchored_phone_regexes
            .iter()
            .any(|r| r.is_match(phone))
        {
            return PhoneCheck {
                valid: true,
                cleaned: strip_to_digits(phone),
                reason: "Valid format".to_string(),
            };
        }

        let digits_only: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits_only.len() >= 10 {
            return PhoneCheck {
                valid: true,
                cleaned: digits_only,
                reason: "Minimum digits met".to_string(),
            };
        }

        PhoneCheck {
            valid: false,
            cleaned: String::new(),
            reason: "Invalid format".to_string(),
        }
    }

    /// Website verdict: default the scheme to https, then require the
    /// result to parse with a host.
    pub fn validate_website(&self, url: &str) -> WebsiteCheck {
        let url = url.trim();
        if url.is_empty() {
            return WebsiteCheck {
                valid: false,
                cleaned: String::new(),
                reason: "Empty URL".to_string(),
            };
        }

        let cleaned = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        };

        match Url::parse(&cleaned) {
            Ok(parsed) if parsed.host_str().map_or(false, |h| !h.is_empty()) => WebsiteCheck {
                valid: true,
                cleaned,
                reason: "Valid URL structure".to_string(),
            },
            _ => WebsiteCheck {
                valid: false,
                cleaned: String::new(),
                reason: "Invalid URL format".to_string(),
            },
        }
    }
}

/// Trim, collapse whitespace, normalize a trailing legal-entity suffix,
/// then title-case the whole string.
pub fn clean_company_name(name: &str) -> String {
    let mut name = name.trim().split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return name;
    }

    const SUFFIXES: [(&str, &str); 6] = [
        (" inc.", " Inc."),
        (" llc.", " LLC."),
        (" corp.", " Corp."),
        (" ltd.", " Ltd."),
        (" co.", " Co."),
        (" company", " Company"),
    ];

    for (old, new) in SUFFIXES {
        if name.len() >= old.len() && name.is_char_boundary(name.len() - old.len()) {
            let (head, tail) = name.split_at(name.len() - old.len());
            if tail.eq_ignore_ascii_case(old) {
                name = format!("{}{}", head, new);
                break;
            }
        }
    }

    title_case(&name)
}

/// The first letter of every alphabetic run is uppercased, the rest
/// lowered.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> DataValidator {
        DataValidator::new(Duration::from_secs(5))
    }

    #[test]
    fn disposable_domain_is_rejected_with_reason() {
        let check = validator().validate_email_syntax("john@10minutemail.com");
        assert!(!check.valid);
        assert_eq!(check.reason, "Disposable email");
    }

    #[test]
    fn placeholder_local_parts_are_rejected() {
        let v = validator();
        for email in [
            "test@acme.com",
            "dummy@acme.com",
            "fake@acme.com",
            "sample@acme.com",
        ] {
            let check = v.validate_email_syntax(email);
            assert!(!check.valid, "{} should be rejected", email);
            assert_eq!(check.reason, "Fake email pattern");
        }
    }

    #[test]
    fn malformed_and_empty_emails_fail_cleanly() {
        let v = validator();
        assert_eq!(v.validate_email_syntax("").reason, "Empty email");
        assert_eq!(
            v.validate_email_syntax("not-an-email").reason,
            "Invalid format"
        );
        assert!(v.validate_email_syntax("sales@acme.com").valid);
    }

    #[test]
    fn simple_domain_check_recognizes_providers() {
        let v = validator();
        assert_eq!(
            v.simple_domain_check("someone@gmail.com").reason,
            "Recognized business domain"
        );
        assert_eq!(
            v.simple_domain_check("sales@acme.com").reason,
            "Basic domain check passed"
        );
        assert!(!v.simple_domain_check("sales@acme.x").valid);
        assert!(!v.simple_domain_check("sales@nodomain").valid);
    }

    #[test]
    fn phone_format_match_strips_to_digits() {
        let check = validator().validate_phone("(212) 555-0147");
        assert!(check.valid);
        assert_eq!(check.cleaned, "2125550147");
        assert_eq!(check.reason, "Valid format");
    }

    #[test]
    fn phone_fallback_accepts_ten_digits_anywhere() {
        let check = validator().validate_phone("Tel: 212-555-0147");
        assert!(check.valid);
        assert_eq!(check.reason, "Minimum digits met");
        assert_eq!(check.cleaned, "2125550147");
    }

    #[test]
    fn short_phones_are_rejected() {
        let check = validator().validate_phone("555-0147");
        assert!(!check.valid);
        assert_eq!(check.reason, "Invalid format");
    }

    #[test]
    fn schemeless_website_gets_https_prepended() {
        let check = validator().validate_website("example.com");
        assert!(check.valid);
        assert_eq!(check.cleaned, "https://example.com");
        assert_eq!(check.reason, "Valid URL structure");
    }

    #[test]
    fn existing_scheme_is_preserved() {
        let check = validator().validate_website("http://example.com/contact");
        assert!(check.valid);
        assert_eq!(check.cleaned, "http://example.com/contact");
    }

    #[test]
    fn garbage_website_is_invalid() {
        assert!(!validator().validate_website("http://").valid);
        assert_eq!(validator().validate_website("").reason, "Empty URL");
    }

    #[test]
    fn company_names_are_cleaned_and_title_cased() {
        assert_eq!(clean_company_name("acme inc."), "Acme Inc.");
        assert_eq!(clean_company_name("  global   steel corp. "), "Global Steel Corp.");
        assert_eq!(
            clean_company_name("midwest packaging company"),
            "Midwest Packaging Company"
        );
        assert_eq!(clean_company_name("PLAIN NAME"), "Plain Name");
    }

    #[test]
    fn suffix_normalization_only_applies_at_the_end() {
        assert_eq!(clean_company_name("inc. spelled out"), "Inc. Spelled Out");
    }
}
