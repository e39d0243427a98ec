//! `_bulk` request encoding and response checking.

use serde::Serialize;
use serde_json::{json, Value};

use super::ClientError;
use crate::models::Document;

/// Bulk action for every document in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Insert or overwrite.
    Index,
    /// Insert only; an existing id is a per-document failure.
    Create,
}

impl WriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub indexed: usize,
}

/// One action line plus one source line per document, newline-terminated.
pub fn encode<D: Document>(
    index: &str,
    docs: &[D],
    mode: WriteMode,
) -> Result<String, ClientError> {
    let mut out = String::new();
    for doc in docs {
        let mut meta = json!({ "_index": index });
        if let Some(id) = doc.doc_id() {
            meta["_id"] = Value::String(id);
        }
        let action = json!({ mode.as_str(): meta });
        out.push_str(&serde_json::to_string(&action)?);
        out.push('\n');
        out.push_str(&serde_json::to_string(doc)?);
        out.push('\n');
    }
    Ok(out)
}

/// Inspect a `_bulk` response body.
///
/// Any item error fails the whole call; the error carries the total failure
/// count and at most `error_limit` formatted reasons.
pub fn check_response(
    body: &Value,
    sent: usize,
    error_limit: usize,
) -> Result<BulkSummary, ClientError> {
    if !body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(BulkSummary { indexed: sent });
    }

    let failures: Vec<String> = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item_failure).collect())
        .unwrap_or_default();

    // "errors": true with no readable item errors still fails
    let total = failures.len().max(1);
    let shown = if failures.is_empty() {
        vec!["bulk response reported errors without item details".to_string()]
    } else {
        failures.into_iter().take(error_limit).collect()
    };
    Err(ClientError::BulkFailures { total, shown })
}

/// `"<type>: <reason>"` for an item whose action result carries an error.
fn item_failure(item: &Value) -> Option<String> {
    let result = item.as_object()?.values().next()?;
    let error = result.get("error")?;
    let kind = error.get("type").and_then(Value::as_str).unwrap_or("error");
    let reason = error
        .get("reason")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    Some(format!("{kind}: {reason}"))
}
