//! API request and response types.

use serde::{Deserialize, Serialize};

/// `?number=` query.
#[derive(Debug, Deserialize)]
pub struct NumberQuery {
    pub number: Option<String>,
}

/// `?bin=` query.
#[derive(Debug, Deserialize)]
pub struct BinQuery {
    pub bin: Option<String>,
}

/// `?ifsc=` query.
#[derive(Debug, Deserialize)]
pub struct IfscQuery {
    pub ifsc: Option<String>,
}

/// `?username=` query.
#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// `?aadhaar=` query.
#[derive(Debug, Deserialize)]
pub struct AadhaarQuery {
    pub aadhaar: Option<String>,
}

/// `?q=` query for the generic lookup route.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub q: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub kinds: Vec<&'static str>,
}
