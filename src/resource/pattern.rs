use regex::Regex;

use crate::error::ResolveError;

/// Ant-style path glob.
///
/// `*` matches within one path segment, `?` matches a single non-separator
/// character and `**` spans any number of segments. Everything else is literal.
/// Paths are matched with `/` separators and without a leading slash.
#[derive(Debug, Clone)]
pub struct PathPattern {
    glob: String,
    regex: Regex,
    max_depth: Option<usize>,
}

impl PathPattern {
    pub fn new(glob: &str) -> Result<Self, ResolveError> {
        let glob = glob.trim_start_matches('/');
        let mut re = String::from("^");
        let mut chars = glob.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' if chars.peek() == Some(&'*') => {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        re.push_str("(?:[^/]*/)*");
                    } else {
                        re.push_str(".*");
                    }
                }
                '*' => re.push_str("[^/]*"),
                '?' => re.push_str("[^/]"),
                c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        re.push('$');
        let regex = Regex::new(&re).map_err(|source| ResolveError::Pattern {
            pattern: glob.to_string(),
            source,
        })?;
        let max_depth = (!glob.contains("**")).then(|| glob.split('/').count());
        Ok(Self {
            glob: glob.to_string(),
            regex,
            max_depth,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Number of path segments a match can have, or `None` when `**` makes it unbounded.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_star_stays_within_segment() -> Result<()> {
        let p = PathPattern::new("getUser*/http-response.springfox")?;
        assert!(p.matches("getUser/http-response.springfox"));
        assert!(p.matches("getUser-not-found/http-response.springfox"));
        assert!(!p.matches("getUser/nested/http-response.springfox"));
        assert!(!p.matches("getUsers/http-response.adoc"));
        assert!(!p.matches("listUsers/http-response.springfox"));
        assert_eq!(p.max_depth(), Some(2));
        Ok(())
    }

    #[test]
    fn test_literal_characters_are_escaped() -> Result<()> {
        let p = PathPattern::new("a.b+c/file.txt")?;
        assert!(p.matches("a.b+c/file.txt"));
        assert!(!p.matches("aXb+c/file.txt"));
        Ok(())
    }

    #[test]
    fn test_double_star_spans_directories() -> Result<()> {
        let p = PathPattern::new("/**/http-response.springfox")?;
        assert_eq!(p.as_str(), "**/http-response.springfox");
        assert!(p.matches("http-response.springfox"));
        assert!(p.matches("a/b/c/http-response.springfox"));
        assert_eq!(p.max_depth(), None);

        let q = PathPattern::new("snippets/?/x")?;
        assert!(q.matches("snippets/1/x"));
        assert!(!q.matches("snippets/12/x"));
        Ok(())
    }
}
