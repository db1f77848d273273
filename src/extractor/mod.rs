pub mod contact_extractor;

pub use contact_extractor::{strip_to_digits, ContactExtractor, EMAIL_BLOCKLIST, PHONE_PATTERNS};
