//! Attach captured example HTTP responses to OpenAPI operations.
//!
//! Documentation tests record each response they see as a raw HTTP file under
//! `<operation>*/http-response.springfox`. [`ExampleReader`] finds those files
//! for an operation, parses them and folds them into one [`MergedResponse`] per
//! status code; [`openapi`] turns those into response objects on an OpenAPI document.

pub mod error;
pub mod example;
pub mod http;
pub mod openapi;
pub mod resource;

pub use example::{Example, ExampleReader, Header, MergedResponse, ReaderConfig, ScalarType};
pub use resource::{EmbeddedResolver, FileSystemResolver};
