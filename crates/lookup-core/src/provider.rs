//! Per-kind provider configuration.
//!
//! Each lookup kind is one row of this table: where to fetch, how the provider
//! signals errors, what a complete answer looks like, and which fields to strip
//! or inline. Error field lists are provider-specific and kept as observed.

use crate::error::ConfigError;
use crate::kind::LookupKind;
use crate::path::FieldPath;
use serde_json::Value;

/// Substitution slot in URL templates.
pub const INPUT_SLOT: &str = "{input}";

const FAILURE_MESSAGE: &str = "The external service failed to process the request.";
const INVALID_RESPONSE_MESSAGE: &str = "The external service returned an invalid response.";

/// How a non-2xx response body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBody {
    /// Body is not consulted; the generic failure message is used.
    Ignored,
    /// Body is parsed as JSON and `error_fields` are walked.
    Json,
    /// Trimmed body text is used as the message when non-empty.
    Text,
}

/// What a successful body must contain to count as a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Field is present and truthy.
    Present,
    /// Field is a JSON object.
    Object,
    /// Field is a non-empty array.
    NonEmptyList,
}

/// Completeness check on a parsed 2xx body.
#[derive(Debug, Clone)]
pub struct SuccessCheck {
    pub field: FieldPath,
    pub requirement: Requirement,
    pub message: &'static str,
}

impl SuccessCheck {
    fn new(field: &str, requirement: Requirement, message: &'static str) -> Self {
        Self {
            field: field.into(),
            requirement,
            message,
        }
    }

    pub fn passes(&self, body: &Value) -> bool {
        match (self.field.get(body), &self.requirement) {
            (Some(value), Requirement::Present) => is_truthy(value),
            (Some(Value::Object(_)), Requirement::Object) => true,
            (Some(Value::Array(items)), Requirement::NonEmptyList) => !items.is_empty(),
            _ => false,
        }
    }
}

/// Provider binding for one lookup kind.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: LookupKind,
    /// Outbound GET target with one [`INPUT_SLOT`].
    pub url_template: String,
    /// Fields holding a provider error message, checked in order.
    pub error_fields: Vec<FieldPath>,
    pub error_body: ErrorBody,
    /// Message for an upstream 404, when the provider's convention is known.
    pub not_found_message: Option<&'static str>,
    pub failure_message: &'static str,
    pub invalid_response_message: &'static str,
    pub success_check: Option<SuccessCheck>,
    /// Non-domain fields removed from successful payloads.
    pub strip_fields: Vec<FieldPath>,
    /// Remote image URLs replaced by data URIs.
    pub image_fields: Vec<FieldPath>,
}

impl ProviderConfig {
    /// The observed provider binding for `kind`.
    pub fn for_kind(kind: LookupKind) -> Self {
        let base = Self {
            kind,
            url_template: default_template(kind).to_string(),
            error_fields: Vec::new(),
            error_body: ErrorBody::Json,
            not_found_message: None,
            failure_message: FAILURE_MESSAGE,
            invalid_response_message: INVALID_RESPONSE_MESSAGE,
            success_check: None,
            strip_fields: Vec::new(),
            image_fields: Vec::new(),
        };

        match kind {
            LookupKind::PhoneBasic => Self {
                error_body: ErrorBody::Ignored,
                strip_fields: paths(&["credit", "developer"]),
                ..base
            },
            LookupKind::PhoneTruecaller => Self {
                error_fields: paths(&["message"]),
                success_check: Some(SuccessCheck::new(
                    "data",
                    Requirement::Object,
                    "No data found for this number in Truecaller.",
                )),
                image_fields: paths(&["data.image"]),
                ..base
            },
            LookupKind::BankBin => Self {
                error_fields: paths(&["message"]),
                success_check: Some(SuccessCheck::new(
                    "Scheme",
                    Requirement::Present,
                    "No data found for this BIN.",
                )),
                ..base
            },
            LookupKind::BankIfsc => Self {
                error_body: ErrorBody::Text,
                not_found_message: Some("No data found for this IFSC code."),
                ..base
            },
            LookupKind::InstagramProfile => Self {
                error_fields: paths(&["error", "message"]),
                image_fields: paths(&["profile_pic"]),
                ..base
            },
            // image_url stays a remote link; full-size images are too large to inline.
            LookupKind::InstagramPosts => Self {
                error_fields: paths(&["message", "error"]),
                failure_message: "The external posts service failed.",
                invalid_response_message: "The external posts service returned an invalid response.",
                image_fields: paths(&["posts[].thumbnail_url"]),
                ..base
            },
            LookupKind::NationalIdFamily => Self {
                error_fields: paths(&["message"]),
                success_check: Some(SuccessCheck::new(
                    "memberDetailsList",
                    Requirement::NonEmptyList,
                    "No family details found for this Aadhaar number.",
                )),
                ..base
            },
        }
    }

    /// Replace the URL template. The template must contain [`INPUT_SLOT`].
    pub fn with_template(mut self, template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(INPUT_SLOT) {
            return Err(ConfigError::MissingSlot {
                kind: self.kind,
                template,
            });
        }
        self.url_template = template;
        Ok(self)
    }

    /// Outbound URL for a validated input.
    pub fn url_for(&self, input: &str) -> String {
        self.url_template
            .replace(INPUT_SLOT, &urlencoding::encode(input))
    }

    /// First non-empty error field of `body`, as text.
    pub fn reported_error(&self, body: &Value) -> Option<String> {
        self.error_fields
            .iter()
            .filter_map(|field| field.get(body))
            .find_map(error_text)
    }
}

/// Provider bindings for every lookup kind.
#[derive(Debug, Clone)]
pub struct ProviderTable {
    configs: Vec<ProviderConfig>,
}

impl ProviderTable {
    pub fn new() -> Self {
        Self {
            configs: LookupKind::ALL
                .into_iter()
                .map(ProviderConfig::for_kind)
                .collect(),
        }
    }

    pub fn get(&self, kind: LookupKind) -> &ProviderConfig {
        &self.configs[kind.index()]
    }

    /// Override one kind's URL template.
    pub fn with_template(
        mut self,
        kind: LookupKind,
        template: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = self.configs[kind.index()].clone().with_template(template)?;
        self.configs[kind.index()] = config;
        Ok(self)
    }
}

impl Default for ProviderTable {
    fn default() -> Self {
        Self::new()
    }
}

fn default_template(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::PhoneBasic => "https://innocent-lost.vercel.app/api/nex?number={input}",
        LookupKind::PhoneTruecaller => "https://truecaller-api.onrender.com/search?phone={input}",
        LookupKind::BankBin => "https://data.handyapi.com/bin/{input}",
        LookupKind::BankIfsc => "https://ifsc.razorpay.com/{input}",
        LookupKind::InstagramProfile => {
            "https://anmolinstainfo.worldgreeker.workers.dev/user?username={input}"
        }
        LookupKind::InstagramPosts => {
            "https://anmolinstainfo.worldgreeker.workers.dev/posts?username={input}"
        }
        LookupKind::NationalIdFamily => {
            "https://addartofamily.vercel.app/fetch?aadhaar={input}&key=fxt"
        }
    }
}

fn paths(fields: &[&str]) -> Vec<FieldPath> {
    fields.iter().map(|f| FieldPath::parse(f)).collect()
}

/// Falsy values (null, false, 0, "") carry no message.
fn error_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
