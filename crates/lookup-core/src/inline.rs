//! Replaces remote image URLs in payloads with `data:` URIs.

use crate::client::Transport;
use crate::path::FieldPath;
use base64::{engine::general_purpose::STANDARD, Engine};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Inlines declared image fields. A failed image fetch leaves that field as-is.
#[derive(Clone)]
pub struct MediaInliner {
    transport: Arc<dyn Transport>,
}

impl MediaInliner {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Inline every non-empty string slot reached by `fields`.
    ///
    /// Fetches for one field run concurrently and are joined before returning.
    /// Only the listed fields are touched.
    pub async fn inline_images(&self, fields: &[FieldPath], mut payload: Value) -> Value {
        for field in fields {
            self.inline_field(field, &mut payload).await;
        }
        payload
    }

    async fn inline_field(&self, field: &FieldPath, payload: &mut Value) {
        let mut slots = field.slots_mut(payload);
        if slots.is_empty() {
            return;
        }

        let urls: Vec<Option<String>> = slots
            .iter()
            .map(|slot| slot.as_str().filter(|s| !s.is_empty()).map(str::to_owned))
            .collect();

        let fetches = urls.iter().map(|url| async move {
            match url {
                Some(url) => self.to_data_uri(url).await,
                None => None,
            }
        });
        let inlined = join_all(fetches).await;

        let mut replaced = 0;
        for (slot, data_uri) in slots.iter_mut().zip(inlined) {
            if let Some(data_uri) = data_uri {
                **slot = Value::String(data_uri);
                replaced += 1;
            }
        }
        debug!(field = %field, slots = urls.len(), replaced, "Inlined images");
    }

    /// Fetch `url` and encode it as a `data:` URI. `None` on any failure.
    pub async fn to_data_uri(&self, url: &str) -> Option<String> {
        let response = match self.transport.get(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch image");
                return None;
            }
        };

        if !response.is_success() {
            warn!(url = %url, status = response.status, "Failed to fetch image");
            return None;
        }

        let content_type = detect_content_type(response.content_type.as_deref(), &response.body);
        Some(format!(
            "data:{};base64,{}",
            content_type,
            STANDARD.encode(&response.body)
        ))
    }
}

/// The header's media type, else a sniffed image type, else octet-stream.
pub fn detect_content_type(header: Option<&str>, body: &[u8]) -> String {
    if let Some(mime) = header
        .and_then(|h| h.split(';').next())
        .map(str::trim)
        .filter(|m| !m.is_empty())
    {
        return mime.to_ascii_lowercase();
    }

    image::guess_format(body)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_CONTENT_TYPE.to_string())
}
