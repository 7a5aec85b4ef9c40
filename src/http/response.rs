use crate::http::Headers;

/// A captured response with its body fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Headers,
    /// `None` for statuses that never carry a body (1xx, 204, 304).
    pub body: Option<Vec<u8>>,
}

impl RawResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.first("Content-Type")
    }
}
