use std::fs;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::debug;

use crate::error::ResolveError;
use crate::resource::{PathPattern, Resource, ResourceResolver};

/// Resolves patterns against one or more directory trees.
///
/// Every root is searched, in order, and all matches are returned, so a root list
/// behaves like a search path where nothing shadows anything else.
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    roots: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
    type Reader = File;

    fn filename(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }
}

impl FileSystemResolver {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .join("/"),
    )
}

fn walk(
    root: &Path,
    dir: &Path,
    pattern: &PathPattern,
    depth: usize,
    out: &mut Vec<PathBuf>,
) -> Result<(), ResolveError> {
    let io_err = |source: io::Error| ResolveError::Io {
        path: dir.display().to_string(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        // symlinked directories are not followed
        if entry.file_type().map_err(io_err)?.is_dir() {
            if pattern.max_depth().map_or(true, |max| depth < max) {
                walk(root, &path, pattern, depth + 1, out)?;
            }
        } else if relative_path(root, &path).is_some_and(|rel| pattern.matches(&rel)) {
            out.push(path);
        }
    }
    Ok(())
}

impl ResourceResolver for FileSystemResolver {
    type Resource = FileResource;

    fn resolve(&self, pattern: &str) -> Result<Vec<FileResource>, ResolveError> {
        let pattern = PathPattern::new(pattern)?;
        let mut found = Vec::new();
        for root in &self.roots {
            if !root.exists() {
                debug!(root = %root.display(), "Skipping missing resource root");
                continue;
            }
            let mut matched = Vec::new();
            walk(root, root, &pattern, 1, &mut matched)?;
            matched.sort();
            debug!(root = %root.display(), pattern = pattern.as_str(), n = matched.len(), "Resolved resources");
            found.extend(matched.into_iter().map(|path| FileResource { path }));
        }
        Ok(found)
    }
}
