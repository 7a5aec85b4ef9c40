mod headers;
mod response;

use std::str;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
pub use headers::*;
pub use response::*;

static STATUS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^HTTP/\d\.\d ([0-9]{3})(?: (.*))?$").unwrap());

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Next line without its terminator. Accepts both `\r\n` and a bare `\n`.
    fn read_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }
        let line = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => {
                self.pos += i + 1;
                &rest[..i]
            }
            None => {
                self.pos = self.buf.len();
                rest
            }
        };
        Some(trim_cr(line))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let rest = self.remaining();
        if rest.len() < n {
            return Err(ParseError::Truncated {
                expected: n,
                found: rest.len(),
            });
        }
        self.pos += n;
        Ok(&rest[..n])
    }
}

fn trim_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}

fn lossy(line: &[u8]) -> String {
    String::from_utf8_lossy(line).into_owned()
}

fn parse_status_line(line: &[u8]) -> Result<(u16, String), ParseError> {
    let invalid = || ParseError::InvalidStatusLine(lossy(line));
    let text = str::from_utf8(line).map_err(|_| invalid())?;
    let caps = STATUS_LINE.captures(text).ok_or_else(invalid)?;
    let status = caps[1].parse::<u16>().map_err(|_| invalid())?;
    let reason = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
    Ok((status, reason.to_string()))
}

fn parse_header_line(line: &[u8]) -> Result<Header, ParseError> {
    let invalid = || ParseError::InvalidHeader(lossy(line));
    let text = str::from_utf8(line).map_err(|_| invalid())?;
    let (name, value) = text.split_once(':').ok_or_else(invalid)?;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn has_body(status: u16) -> bool {
    !(100..200).contains(&status) && status != 204 && status != 304
}

fn is_chunked(headers: &Headers) -> bool {
    headers
        .get("Transfer-Encoding")
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .last()
        .is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"))
}

fn read_chunked(cursor: &mut Cursor) -> Result<Vec<u8>, ParseError> {
    let mut body = Vec::new();
    loop {
        let line = cursor.read_line().ok_or(ParseError::UnexpectedEnd)?;
        let text = str::from_utf8(line).map_err(|_| ParseError::InvalidChunk(lossy(line)))?;
        let size = text.split_once(';').map_or(text, |(size, _)| size).trim();
        let size = usize::from_str_radix(size, 16)
            .map_err(|_| ParseError::InvalidChunk(text.to_string()))?;
        if size == 0 {
            // trailers are dropped
            while let Some(trailer) = cursor.read_line() {
                if trailer.is_empty() {
                    break;
                }
            }
            return Ok(body);
        }
        body.extend_from_slice(cursor.take(size)?);
        match cursor.read_line() {
            Some(end) if end.is_empty() => {}
            Some(end) => return Err(ParseError::InvalidChunk(lossy(end))),
            None => return Err(ParseError::UnexpectedEnd),
        }
    }
}

fn read_body(cursor: &mut Cursor, headers: &Headers) -> Result<Vec<u8>, ParseError> {
    if is_chunked(headers) {
        return read_chunked(cursor);
    }
    if let Some(length) = headers.first("Content-Length") {
        let n = length
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidContentLength(length.to_string()))?;
        return Ok(cursor.take(n)?.to_vec());
    }
    // No framing: the body runs to the end of the capture.
    Ok(cursor.remaining().to_vec())
}

/// Parse a captured HTTP/1.x response: status line, headers, blank line, body.
///
/// The input is the complete capture; the returned body is an owned copy, so the
/// source can be released as soon as this returns.
pub fn parse_response(input: &[u8]) -> Result<RawResponse, ParseError> {
    let mut cursor = Cursor::new(input);
    let status_line = loop {
        match cursor.read_line() {
            None => return Err(ParseError::Empty),
            Some(line) if line.is_empty() => continue,
            Some(line) => break line,
        }
    };
    let (status, reason) = parse_status_line(status_line)?;

    let mut headers = Headers::new();
    while let Some(line) = cursor.read_line() {
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(line)?;
        headers.push(name, value);
    }

    let body = if has_body(status) {
        Some(read_body(&mut cursor, &headers)?)
    } else {
        None
    };
    Ok(RawResponse {
        status,
        reason,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_parse_json_response() -> Result<()> {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\n\r\n{\"ok\":true}";
        let res = parse_response(raw)?;
        assert_eq!(res.status, 200);
        assert_eq!(res.reason, "OK");
        assert_eq!(res.content_type(), Some("application/json"));
        assert_eq!(res.body.as_deref(), Some(&b"{\"ok\":true}"[..]));
        Ok(())
    }

    #[test]
    fn test_parse_bare_newlines_and_leading_blank_lines() -> Result<()> {
        let raw = b"\n\nHTTP/1.1 404 Not Found\nX-Trace: 1\n\nmissing";
        let res = parse_response(raw)?;
        assert_eq!(res.status, 404);
        assert_eq!(res.reason, "Not Found");
        assert_eq!(res.headers.first("x-trace"), Some("1"));
        assert_eq!(res.body.as_deref(), Some(&b"missing"[..]));
        Ok(())
    }

    #[test]
    fn test_content_length_limits_body() -> Result<()> {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabcdef";
        let res = parse_response(raw)?;
        assert_eq!(res.body.as_deref(), Some(&b"abc"[..]));
        Ok(())
    }

    #[test]
    fn test_truncated_body_is_an_error() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 30\r\n\r\nshort";
        assert!(matches!(
            parse_response(raw),
            Err(ParseError::Truncated {
                expected: 30,
                found: 5
            })
        ));
    }

    #[test]
    fn test_bad_content_length() {
        let raw = b"HTTP/1.1 200 OK\r\nContent-Length: lots\r\n\r\nbody";
        assert!(matches!(
            parse_response(raw),
            Err(ParseError::InvalidContentLength(_))
        ));
    }

    #[test]
    fn test_chunked_body() -> Result<()> {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n6;ext=1\r\n world\r\n0\r\nX-Trailer: t\r\n\r\n";
        let res = parse_response(raw)?;
        assert_eq!(res.body.as_deref(), Some(&b"hello world"[..]));
        Ok(())
    }

    #[test]
    fn test_chunked_body_with_bad_size() {
        let raw = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\nzz\r\nhello\r\n0\r\n\r\n";
        assert!(matches!(parse_response(raw), Err(ParseError::InvalidChunk(_))));
    }

    #[test]
    fn test_no_content_has_no_body() -> Result<()> {
        let raw = b"HTTP/1.1 204 No Content\r\nX-Id: 7\r\n\r\n";
        let res = parse_response(raw)?;
        assert_eq!(res.status, 204);
        assert_eq!(res.body, None);
        Ok(())
    }

    #[test]
    fn test_empty_body_is_present() -> Result<()> {
        let res = parse_response(b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n")?;
        assert_eq!(res.body, Some(Vec::new()));
        let res = parse_response(b"HTTP/1.1 200 OK")?;
        assert_eq!(res.reason, "OK");
        assert_eq!(res.body, Some(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(parse_response(b""), Err(ParseError::Empty)));
        assert!(matches!(
            parse_response(b"{\"not\": \"http\"}"),
            Err(ParseError::InvalidStatusLine(_))
        ));
        assert!(matches!(
            parse_response(b"HTTP/1.1 2000 OK\r\n\r\n"),
            Err(ParseError::InvalidStatusLine(_))
        ));
        assert!(matches!(
            parse_response(b"HTTP/1.1 200 OK\r\nno colon here\r\n\r\n"),
            Err(ParseError::InvalidHeader(_))
        ));
        assert!(matches!(
            parse_response(b"HTTP/1.1 200 OK\r\nX-A: 1\r\n  folded\r\n\r\n"),
            Err(ParseError::InvalidHeader(_))
        ));
    }
}
