use itertools::Itertools;

pub type Header = (String, String);

/// Header block of a parsed response.
///
/// Keeps every line in the order it was captured. Lookups ignore ASCII case and
/// a name may carry several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<Header>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// All values for `name`, in capture order.
    pub fn get<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The returned value borrows from the headers only, not from `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first(name).is_some()
    }

    /// Distinct header names, spelled as they first appeared.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(|(n, _)| n.as_str())
            .unique_by(|n| n.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Headers {
        [
            ("Content-Type", "application/json"),
            ("Set-Cookie", "a=1"),
            ("set-cookie", "b=2"),
            ("X-Request-Id", "abc"),
        ]
        .into_iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_lookup_ignores_case() {
        let h = headers();
        assert_eq!(h.first("content-type"), Some("application/json"));
        assert_eq!(h.get("SET-COOKIE").collect::<Vec<_>>(), vec!["a=1", "b=2"]);
        assert!(h.contains("x-request-id"));
        assert!(!h.contains("Location"));
    }

    #[test]
    fn test_names_are_distinct_in_first_seen_order() {
        let h = headers();
        assert_eq!(
            h.names().collect::<Vec<_>>(),
            vec!["Content-Type", "Set-Cookie", "X-Request-Id"]
        );
        assert_eq!(h.len(), 4);
    }

    #[test]
    fn test_first_value_outlives_lookup_name() {
        let h = headers();
        let value = {
            let name = String::from("x-request-id");
            h.first(&name)
        };
        assert_eq!(value, Some("abc"));
        assert_eq!(Headers::new().first("x-request-id"), None);
    }
}
