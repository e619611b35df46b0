//! JSON payloads for the API routes.

use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{IndicatorKey, CATALOG};

pub fn health_payload() -> Value {
    json!({
        "status": "ok",
        "service": "genderscope",
        "version": env!("CARGO_PKG_VERSION")
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorListItem {
    pub key: IndicatorKey,
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

pub fn indicators_payload() -> Value {
    let list: Vec<IndicatorListItem> = IndicatorKey::ALL
        .iter()
        .zip(CATALOG.iter())
        .map(|(key, definition)| IndicatorListItem {
            key: *key,
            code: definition.code,
            label: definition.label,
            color: definition.color,
        })
        .collect();
    json!({ "indicators": list })
}

pub fn error_payload(message: &str) -> Value {
    json!({
        "status": "error",
        "message": message,
    })
}
