mod apply;
mod examples;

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::Args;
use restdocs2oa::{ExampleReader, FileSystemResolver, ReaderConfig};

pub use apply::*;
pub use examples::*;

/// Search path used when no `--root` is given, in the platform's `PATH` format.
pub const ROOTS_ENV: &str = "RESTDOCS2OA_ROOTS";

#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Directory searched for captured responses. Repeat to search several.
    /// Defaults to RESTDOCS2OA_ROOTS, then to the current directory.
    #[arg(short = 'r', long = "root")]
    pub roots: Vec<PathBuf>,

    /// File name of a capture, without extension
    #[arg(long, default_value = "http-response")]
    pub file_name: String,

    #[arg(long, default_value = "springfox")]
    pub extension: String,
}

/// Explicit roots are taken as given; only the environment value is split.
fn search_roots(explicit: &[PathBuf], from_env: Option<OsString>) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    let roots = from_env
        .map(|paths| env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect::<Vec<_>>())
        .unwrap_or_default();
    if roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        roots
    }
}

impl ResourceArgs {
    pub fn reader(&self) -> ExampleReader<FileSystemResolver> {
        let config = ReaderConfig {
            file_name: self.file_name.clone(),
            extension: self.extension.clone(),
        };
        let roots = search_roots(&self.roots, env::var_os(ROOTS_ENV));
        ExampleReader::with_config(FileSystemResolver::new(roots), config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_explicit_roots_are_not_split() {
        let roots = vec![PathBuf::from("snippets:v2"), PathBuf::from("other")];
        assert_eq!(search_roots(&roots, Some(OsString::from("ignored"))), roots);
    }

    #[test]
    fn test_env_roots_are_split() {
        let joined = env::join_paths(["a/snippets", "b/snippets"]).unwrap();
        assert_eq!(
            search_roots(&[], Some(joined)),
            vec![PathBuf::from("a/snippets"), PathBuf::from("b/snippets")]
        );
    }

    #[test]
    fn test_defaults_to_current_directory() {
        assert_eq!(search_roots(&[], None), vec![PathBuf::from(".")]);
        assert_eq!(search_roots(&[], Some(OsString::new())), vec![PathBuf::from(".")]);
    }
}
