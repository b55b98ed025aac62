//! Syntactic input checks, run before any network call.

use crate::error::LookupError;
use crate::kind::LookupKind;
use regex::Regex;
use std::sync::LazyLock;

/// Shape check and messages for one lookup kind.
#[derive(Debug)]
pub struct ValidationRule {
    pub kind: LookupKind,
    /// Anchored pattern the normalized input must match. `None` accepts any non-empty input.
    pub pattern: Option<Regex>,
    /// Message for an empty input.
    pub required_message: &'static str,
    /// Message for an input that fails `pattern`.
    pub invalid_message: &'static str,
    /// A single leading occurrence is removed before checking.
    pub strip_prefix: Option<char>,
    /// ASCII-uppercase the input before checking.
    pub uppercase: bool,
}

impl ValidationRule {
    fn new(kind: LookupKind) -> Self {
        let (pattern, required_message, invalid_message) = match kind {
            LookupKind::PhoneBasic => (
                Some(r"^[0-9]{10}$"),
                "Phone number is required",
                "Please enter a valid 10-digit phone number.",
            ),
            LookupKind::PhoneTruecaller => (
                Some(r"^\+?[0-9]{10,15}$"),
                "Phone number is required",
                "Invalid phone number format.",
            ),
            LookupKind::BankBin => (
                Some(r"^[0-9]{6,8}$"),
                "BIN is required",
                "Please enter a valid 6 to 8-digit BIN.",
            ),
            LookupKind::BankIfsc => (
                Some(r"^[A-Z]{4}0[A-Z0-9]{6}$"),
                "IFSC code is required",
                "Invalid IFSC code format.",
            ),
            LookupKind::InstagramProfile | LookupKind::InstagramPosts => (
                None,
                "Please enter an Instagram username.",
                "Please enter an Instagram username.",
            ),
            LookupKind::NationalIdFamily => (
                Some(r"^[0-9]{12}$"),
                "Aadhaar number is required",
                "Please enter a valid 12-digit Aadhaar number.",
            ),
        };

        Self {
            kind,
            // Patterns are literals above.
            pattern: pattern.map(|p| Regex::new(p).expect("static validation pattern")),
            required_message,
            invalid_message,
            strip_prefix: matches!(
                kind,
                LookupKind::InstagramProfile | LookupKind::InstagramPosts
            )
            .then_some('@'),
            uppercase: kind == LookupKind::BankIfsc,
        }
    }

    /// Check `raw` and return the normalized input to send upstream.
    pub fn check(&self, raw: &str) -> Result<String, LookupError> {
        if raw.is_empty() {
            return Err(LookupError::invalid_input(self.required_message));
        }

        let stripped = match self.strip_prefix {
            Some(prefix) => raw.strip_prefix(prefix).unwrap_or(raw),
            None => raw,
        };

        if stripped.is_empty() {
            return Err(LookupError::invalid_input(self.required_message));
        }

        let normalized = if self.uppercase {
            stripped.to_ascii_uppercase()
        } else {
            stripped.to_string()
        };

        match &self.pattern {
            Some(pattern) if !pattern.is_match(&normalized) => {
                Err(LookupError::invalid_input(self.invalid_message))
            }
            _ => Ok(normalized),
        }
    }
}

static RULES: LazyLock<Vec<ValidationRule>> =
    LazyLock::new(|| LookupKind::ALL.into_iter().map(ValidationRule::new).collect());

/// The rule for `kind`.
pub fn rule_for(kind: LookupKind) -> &'static ValidationRule {
    &RULES[kind.index()]
}

/// Validate `raw` for `kind`, returning the normalized input.
pub fn validate(kind: LookupKind, raw: &str) -> Result<String, LookupError> {
    rule_for(kind).check(raw)
}
