//! Maps provider responses onto the canonical result.

use crate::client::TransportResponse;
use crate::error::{LookupError, TransportError};
use crate::provider::{ErrorBody, ProviderConfig};
use crate::CanonicalResult;
use serde_json::Value;
use tracing::{error, warn};

/// Status reported for errors a provider signals inside a 2xx body.
const BODY_ERROR_STATUS: u16 = 404;

/// Normalize one provider response.
///
/// Error fields in the body win over the HTTP status: several providers answer
/// 200 with an error message, others pair error bodies with odd statuses.
pub fn normalize(
    provider: &ProviderConfig,
    transport: Result<TransportResponse, TransportError>,
) -> CanonicalResult {
    let response = match transport {
        Ok(response) => response,
        Err(e) => {
            error!(kind = %provider.kind, category = ?e.kind(), error = %e, "Provider call failed");
            return Err(LookupError::Internal);
        }
    };

    if !response.is_success() {
        let err = upstream_failure(provider, &response);
        warn!(kind = %provider.kind, status = response.status, error = %err, "Provider returned an error status");
        return Err(err);
    }

    let mut body: Value = serde_json::from_slice(&response.body).map_err(|e| {
        warn!(kind = %provider.kind, error = %e, "Provider returned an unparseable body");
        LookupError::UpstreamInvalid {
            status: None,
            message: provider.invalid_response_message.to_string(),
        }
    })?;

    if let Some(message) = provider.reported_error(&body) {
        warn!(kind = %provider.kind, message = %message, "Provider reported an error in the body");
        return Err(LookupError::reported(BODY_ERROR_STATUS, message));
    }

    if let Some(check) = &provider.success_check {
        if !check.passes(&body) {
            return Err(LookupError::reported(BODY_ERROR_STATUS, check.message));
        }
    }

    for field in &provider.strip_fields {
        field.remove(&mut body);
    }

    Ok(body)
}

fn upstream_failure(provider: &ProviderConfig, response: &TransportResponse) -> LookupError {
    let status = response.status;

    if provider.error_body == ErrorBody::Json {
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(body) => {
                if let Some(message) = provider.reported_error(&body) {
                    return LookupError::reported(status, message);
                }
            }
            Err(_) => {
                return LookupError::UpstreamInvalid {
                    status: Some(status),
                    message: provider.invalid_response_message.to_string(),
                };
            }
        }
    }

    if status == 404 {
        if let Some(message) = provider.not_found_message {
            return LookupError::reported(status, message);
        }
    }

    if provider.error_body == ErrorBody::Text {
        let text = response.text();
        let text = text.trim();
        if !text.is_empty() {
            return LookupError::reported(status, text);
        }
    }

    LookupError::reported(status, provider.failure_message)
}
