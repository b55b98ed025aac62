//! The single entry point: validate, fetch, normalize, inline.

use crate::client::{Transport, UpstreamClient};
use crate::inline::MediaInliner;
use crate::kind::LookupKind;
use crate::normalize::normalize;
use crate::provider::ProviderTable;
use crate::validate::validate;
use crate::{CanonicalResult, LookupRequest};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Runs lookups against the configured providers.
///
/// Holds no per-request state; one instance serves all calls.
#[derive(Clone)]
pub struct Dispatcher {
    providers: Arc<ProviderTable>,
    upstream: UpstreamClient,
    inliner: MediaInliner,
}

impl Dispatcher {
    pub fn new(providers: ProviderTable, transport: Arc<dyn Transport>) -> Self {
        Self {
            providers: Arc::new(providers),
            upstream: UpstreamClient::new(transport.clone()),
            inliner: MediaInliner::new(transport),
        }
    }

    /// Look up `raw_input` as `kind`. Stops at the first failing stage.
    #[instrument(skip(self, raw_input), fields(kind = %kind))]
    pub async fn handle(&self, kind: LookupKind, raw_input: &str) -> CanonicalResult {
        let input = validate(kind, raw_input)?;

        let provider = self.providers.get(kind);
        let response = self.upstream.fetch(provider, &input).await;
        let payload = normalize(provider, response)?;

        let payload = if provider.image_fields.is_empty() {
            payload
        } else {
            debug!("Inlining images");
            self.inliner
                .inline_images(&provider.image_fields, payload)
                .await
        };

        info!("Lookup succeeded");
        Ok(payload)
    }

    pub async fn handle_request(&self, request: &LookupRequest) -> CanonicalResult {
        self.handle(request.kind, &request.raw_input).await
    }
}
