mod operation;
mod response;

use openapiv3 as oa;

pub use operation::*;
pub use response::*;

/// Content key used for an example whose capture had no `Content-Type`.
pub const ANY_MEDIA_TYPE: &str = "*/*";

/// `"200"` -> `StatusCode::Code(200)`. Anything that is not a three digit code is rejected.
pub fn status_code(code: &str) -> Option<oa::StatusCode> {
    if code.len() != 3 {
        return None;
    }
    code.parse::<u16>().ok().map(oa::StatusCode::Code)
}

/// `application/json`, `application/problem+json; charset=utf-8`, ...
pub fn is_json(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        assert_eq!(status_code("200"), Some(oa::StatusCode::Code(200)));
        assert_eq!(status_code("2000"), None);
        assert_eq!(status_code("abc"), None);
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("Application/JSON; charset=UTF-8"));
        assert!(is_json("application/hal+json"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/jsonp"));
    }
}
