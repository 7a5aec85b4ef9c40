use std::io;
use std::str::Utf8Error;

/// Failure to parse a captured HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty input, expected a status line")]
    Empty,
    #[error("invalid status line: {0:?}")]
    InvalidStatusLine(String),
    #[error("invalid header line: {0:?}")]
    InvalidHeader(String),
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    #[error("invalid chunk size line: {0:?}")]
    InvalidChunk(String),
    #[error("body truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("unexpected end of input inside chunked body")]
    UnexpectedEnd,
}

/// Failure to enumerate resources for a pattern.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid resource pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to scan {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Everything that can go wrong while reading examples for one operation.
/// None of these escape `ExampleReader::read`; they are logged and recovered from.
#[derive(Debug, thiserror::Error)]
pub enum ExampleError {
    #[error("failed to enumerate examples for operation {operation}")]
    Enumeration {
        operation: String,
        #[source]
        source: ResolveError,
    },
    #[error("failed to read example {resource}")]
    Read {
        resource: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse example {resource}")]
    Parse {
        resource: String,
        #[source]
        source: ParseError,
    },
    #[error("response body is not valid UTF-8")]
    BodyDecode(#[from] Utf8Error),
}
