use std::borrow::Cow;
use std::io;

use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::resource::{PathPattern, Resource, ResourceResolver};

/// Resources held in memory, e.g. captures pulled in with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResolver {
    entries: IndexMap<String, Cow<'static, [u8]>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedResource {
    path: String,
    bytes: Cow<'static, [u8]>,
}

impl Resource for EmbeddedResource {
    type Reader = io::Cursor<Cow<'static, [u8]>>;

    fn filename(&self) -> String {
        self.path.clone()
    }

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(io::Cursor::new(self.bytes.clone()))
    }
}

impl EmbeddedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) {
        self.entries.insert(path.into(), bytes.into());
    }

    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ResourceResolver for EmbeddedResolver {
    type Resource = EmbeddedResource;

    /// Matches in insertion order.
    fn resolve(&self, pattern: &str) -> Result<Vec<EmbeddedResource>, ResolveError> {
        let pattern = PathPattern::new(pattern)?;
        Ok(self
            .entries
            .iter()
            .filter(|(path, _)| pattern.matches(path.trim_start_matches('/')))
            .map(|(path, bytes)| EmbeddedResource {
                path: path.clone(),
                bytes: bytes.clone(),
            })
            .collect())
    }
}
