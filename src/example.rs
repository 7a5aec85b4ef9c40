mod reader;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ExampleError;
use crate::http::{Headers, RawResponse};
pub use reader::*;

/// Schema type given to every example header. Captures carry no type information,
/// so headers are always documented as plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    #[default]
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Header {
    pub name: String,
    /// Always empty.
    pub description: String,
    #[serde(rename = "type")]
    pub typ: ScalarType,
}

impl Header {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            typ: ScalarType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A parsed capture with its body decoded as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleResponse {
    pub status: u16,
    pub headers: Headers,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl ExampleResponse {
    /// Body bytes that are not UTF-8 are logged and dropped; the rest of the
    /// response is kept.
    pub fn from_raw(raw: RawResponse) -> Self {
        let body = decode_body(raw.body).unwrap_or_else(|e| {
            warn!(status = raw.status, err = ?e, "Failed to read response body");
            None
        });
        Self {
            status: raw.status,
            content_type: raw.headers.first("Content-Type").map(String::from),
            headers: raw.headers,
            body,
        }
    }
}

fn decode_body(body: Option<Vec<u8>>) -> Result<Option<String>, ExampleError> {
    let Some(bytes) = body else {
        return Ok(None);
    };
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(e) => Err(e.utf8_error().into()),
    }
}

/// Everything the captures say about one status code of one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedResponse {
    pub status_code: String,
    pub headers: Vec<Header>,
    pub examples: Vec<Example>,
}

impl From<&ExampleResponse> for MergedResponse {
    fn from(response: &ExampleResponse) -> Self {
        Self {
            status_code: response.status.to_string(),
            headers: response.headers.names().map(Header::string).collect(),
            examples: vec![Example {
                media_type: response.content_type.clone(),
                value: response.body.clone(),
            }],
        }
    }
}

impl MergedResponse {
    /// Fold a later capture with the same status code into this one.
    ///
    /// The later capture's examples replace the current ones; code and headers stay.
    pub fn merge(&mut self, later: MergedResponse) {
        debug_assert_eq!(self.status_code, later.status_code);
        self.examples = later.examples;
    }
}

/// Group by status code in first-seen order, folding duplicates with [`MergedResponse::merge`].
pub fn merge_by_status<I>(responses: I) -> Vec<MergedResponse>
where
    I: IntoIterator<Item = MergedResponse>,
{
    let mut by_status: IndexMap<String, MergedResponse> = IndexMap::new();
    for response in responses {
        match by_status.entry(response.status_code.clone()) {
            Entry::Occupied(mut e) => e.get_mut().merge(response),
            Entry::Vacant(e) => {
                e.insert(response);
            }
        }
    }
    by_status.into_values().collect()
}
