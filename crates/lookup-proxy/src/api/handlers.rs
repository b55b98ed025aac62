//! HTTP request handlers.

use super::types::{
    AadhaarQuery, BinQuery, HealthResponse, IfscQuery, LookupQuery, NumberQuery, UsernameQuery,
};
use super::AppState;
use crate::error::ProxyError;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use lookup_core::LookupKind;
use serde_json::Value;

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        kinds: LookupKind::ALL.iter().map(|k| k.as_str()).collect(),
    })
}

/// Run one lookup. A missing parameter is validated as an empty input.
async fn lookup(
    state: &AppState,
    kind: LookupKind,
    input: Option<String>,
) -> Result<Json<Value>, ProxyError> {
    let input = input.unwrap_or_default();
    let payload = state.dispatcher.handle(kind, &input).await?;
    Ok(Json(payload))
}

/// Basic phone number lookup.
pub async fn phone_lookup(
    State(state): State<AppState>,
    Query(query): Query<NumberQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::PhoneBasic, query.number).await
}

/// Truecaller lookup, with the caller's picture inlined.
pub async fn truecaller_lookup(
    State(state): State<AppState>,
    Query(query): Query<NumberQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::PhoneTruecaller, query.number).await
}

/// Card BIN lookup.
pub async fn bin_lookup(
    State(state): State<AppState>,
    Query(query): Query<BinQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::BankBin, query.bin).await
}

/// Bank branch lookup by IFSC code.
pub async fn ifsc_lookup(
    State(state): State<AppState>,
    Query(query): Query<IfscQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::BankIfsc, query.ifsc).await
}

pub async fn instagram_profile_lookup(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::InstagramProfile, query.username).await
}

pub async fn instagram_posts_lookup(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::InstagramPosts, query.username).await
}

/// Family details by Aadhaar number.
pub async fn aadhaar_lookup(
    State(state): State<AppState>,
    Query(query): Query<AadhaarQuery>,
) -> Result<Json<Value>, ProxyError> {
    lookup(&state, LookupKind::NationalIdFamily, query.aadhaar).await
}

/// Lookup by kind slug, e.g. `/api/lookup/bank-bin?q=457173`.
pub async fn lookup_by_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Value>, ProxyError> {
    let kind: LookupKind = kind.parse()?;
    lookup(&state, kind, query.q).await
}
