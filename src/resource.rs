mod embedded;
mod fs;
mod pattern;

use std::io;
use std::io::Read;

use crate::error::ResolveError;
pub use embedded::*;
pub use fs::*;
pub use pattern::*;

/// Something readable that a resolver found, e.g. a file on disk.
pub trait Resource {
    type Reader: Read;

    /// Name used when reporting problems with this resource.
    fn filename(&self) -> String;

    fn open(&self) -> io::Result<Self::Reader>;
}

/// Finds resources whose path matches an Ant-style glob (see [`PathPattern`]).
pub trait ResourceResolver {
    type Resource: Resource;

    fn resolve(&self, pattern: &str) -> Result<Vec<Self::Resource>, ResolveError>;
}
