//! Response body decoding.
//!
//! Three shapes turn up in practice:
//!
//! - the backend proxy envelope `{ "message": [ ... ] }`
//! - a bare JSON array of records (log dumps)
//! - an Elasticsearch search response, records under `hits.hits[]._source`

use burrow_core::{FetchError, RawLogRecord};
use serde_json::Value;

/// Decode the proxy envelope. Anything else is a [`FetchError::Decode`].
pub fn decode_envelope(body: &[u8]) -> Result<Vec<RawLogRecord>, FetchError> {
    let value = parse(body)?;
    envelope_records(&value).ok_or_else(|| {
        FetchError::Decode("expected an object with a \"message\" array".to_string())
    })
}

/// Decode an Elasticsearch `_search` response.
pub fn decode_search_hits(body: &[u8]) -> Result<Vec<RawLogRecord>, FetchError> {
    let value = parse(body)?;
    hit_records(&value)
        .ok_or_else(|| FetchError::Decode("expected a search response with hits.hits".to_string()))
}

/// Accept any of the three shapes.
pub fn decode_any(body: &[u8]) -> Result<Vec<RawLogRecord>, FetchError> {
    let value = parse(body)?;
    if let Some(items) = value.as_array() {
        return Ok(items.iter().map(RawLogRecord::from_value).collect());
    }
    envelope_records(&value)
        .or_else(|| hit_records(&value))
        .ok_or_else(|| {
            FetchError::Decode(
                "expected a record array, a {\"message\": [...]} envelope or a search response"
                    .to_string(),
            )
        })
}

fn parse(body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))
}

fn envelope_records(value: &Value) -> Option<Vec<RawLogRecord>> {
    let items = value.get("message")?.as_array()?;
    Some(items.iter().map(RawLogRecord::from_value).collect())
}

fn hit_records(value: &Value) -> Option<Vec<RawLogRecord>> {
    let hits = value.get("hits")?.get("hits")?.as_array()?;
    Some(
        hits.iter()
            .filter_map(|hit| hit.get("_source"))
            .map(RawLogRecord::from_value)
            .collect(),
    )
}
