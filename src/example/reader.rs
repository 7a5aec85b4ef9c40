use std::io::Read;

use tracing::{debug, info_span, warn};

use crate::error::ExampleError;
use crate::example::{merge_by_status, ExampleResponse, MergedResponse};
use crate::http::parse_response;
use crate::resource::{Resource, ResourceResolver};

/// Where captured responses live relative to a resource root:
/// `<operation>*/<file_name>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub file_name: String,
    pub extension: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            file_name: "http-response".to_string(),
            extension: "springfox".to_string(),
        }
    }
}

impl ReaderConfig {
    pub fn pattern(&self, operation: &str) -> String {
        format!("{}*/{}.{}", operation, self.file_name, self.extension)
    }
}

/// Collects the captured example responses of an operation.
#[derive(Debug, Clone)]
pub struct ExampleReader<R> {
    resolver: R,
    config: ReaderConfig,
}

impl<R: ResourceResolver> ExampleReader<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, ReaderConfig::default())
    }

    pub fn with_config(resolver: R, config: ReaderConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// One merged response per status code found in the captures for `operation`.
    ///
    /// Never fails. Captures that cannot be read or parsed are logged and skipped,
    /// and if the resources cannot be enumerated at all the result is empty.
    pub fn read(&self, operation: &str) -> Vec<MergedResponse> {
        match self.try_read(operation) {
            Ok(responses) => responses,
            Err(e) => {
                warn!(operation, err = ?e, "Failed to read example responses");
                Vec::new()
            }
        }
    }

    fn try_read(&self, operation: &str) -> Result<Vec<MergedResponse>, ExampleError> {
        let pattern = self.config.pattern(operation);
        let resources = self
            .resolver
            .resolve(&pattern)
            .map_err(|source| ExampleError::Enumeration {
                operation: operation.to_string(),
                source,
            })?;
        debug!(operation, pattern = %pattern, n = resources.len(), "Found example resources");

        let responses = resources.iter().filter_map(|resource| match load(resource) {
            Ok(response) => Some(MergedResponse::from(&response)),
            Err(e) => {
                warn!(resource = %resource.filename(), err = ?e, "Failed to read example, skipping");
                None
            }
        });
        Ok(merge_by_status(responses))
    }
}

fn load<R: Resource>(resource: &R) -> Result<ExampleResponse, ExampleError> {
    let name = resource.filename();
    let _span = info_span!("example", resource = %name).entered();
    let read_err = |source| ExampleError::Read {
        resource: name.clone(),
        source,
    };
    // The reader is dropped at the end of this block, before parsing, whether or not reading succeeded.
    let bytes = {
        let mut reader = resource.open().map_err(read_err)?;
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(read_err)?;
        bytes
    };
    let raw = parse_response(&bytes).map_err(|source| ExampleError::Parse {
        resource: name.clone(),
        source,
    })?;
    Ok(ExampleResponse::from_raw(raw))
}
