//! URL normalisation for Jira hosts.
//!
//! Hosts come from config files and environment variables, where users tend
//! to omit the scheme or mistype it.

use anyhow::Result;
use url::{Position, Url};

/// Render a URL without the lone trailing slash `Url` adds to an empty path.
fn render(url: &Url) -> String {
  let mut rendered = url[..Position::BeforePath].to_string();

  if url.path() != "/" {
    rendered.push_str(url.path());
  }
  if let Some(query) = url.query() {
    rendered.push('?');
    rendered.push_str(query);
  }
  if let Some(fragment) = url.fragment() {
    rendered.push('#');
    rendered.push_str(fragment);
  }

  rendered
}

/// Remainder of `input` after a malformed `http:` / `https:` prefix such as
/// `http:/host`, if it has one.
fn malformed_scheme_remainder(input: &str) -> Option<&str> {
  let (scheme, rest) = input.split_once(':')?;
  let known = ["http", "https"].iter().any(|known| scheme.eq_ignore_ascii_case(known));

  if known && !rest.starts_with("//") {
    Some(rest.trim_start_matches('/'))
  } else {
    None
  }
}

fn parse_as_https(host: &str) -> Result<Url> {
  Url::parse(&format!("https://{host}"))
    .map_err(|err| anyhow::anyhow!("Failed to parse Jira host '{host}': {err}. Ensure it has a valid scheme."))
}

/// Ensure a host has a scheme, assuming `https://` when it is missing.
///
/// Malformed schemes like `http:/example.com` are repaired to `https://`.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  if let Some(remainder) = malformed_scheme_remainder(trimmed) {
    return parse_as_https(remainder).map(|url| render(&url));
  }

  let url = match Url::parse(trimmed) {
    // `localhost:8080` parses with scheme "localhost" and no host
    Ok(url) if url.host().is_some() => url,
    _ => parse_as_https(trimmed)?,
  };

  Ok(render(&url))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_url_scheme_keeps_scheme() {
    assert_eq!(ensure_url_scheme("https://company.atlassian.net").unwrap(), "https://company.atlassian.net");
    assert_eq!(ensure_url_scheme("http://jira.example.com").unwrap(), "http://jira.example.com");
    assert_eq!(ensure_url_scheme("http://localhost:8080").unwrap(), "http://localhost:8080");
  }

  #[test]
  fn test_ensure_url_scheme_adds_https() {
    let cases = [
      ("company.atlassian.net", "https://company.atlassian.net"),
      ("localhost", "https://localhost"),
      ("localhost:8080", "https://localhost:8080"),
      ("192.168.1.100:8080", "https://192.168.1.100:8080"),
      ("example.com/jira", "https://example.com/jira"),
      ("  padded.example.com  ", "https://padded.example.com"),
    ];

    for (input, expected) in cases {
      assert_eq!(ensure_url_scheme(input).unwrap(), expected, "{input}");
    }
  }

  #[test]
  fn test_ensure_url_scheme_lowercases_scheme() {
    assert_eq!(ensure_url_scheme("HTTPS://example.com").unwrap(), "https://example.com");
  }

  #[test]
  fn test_ensure_url_scheme_repairs_partial_scheme() {
    assert_eq!(ensure_url_scheme("http:/example.com").unwrap(), "https://example.com");
    assert_eq!(ensure_url_scheme("https:example.com").unwrap(), "https://example.com");
  }

  #[test]
  fn test_ensure_url_scheme_rejects_empty() {
    for input in ["", "   "] {
      let err = ensure_url_scheme(input).unwrap_err();
      assert!(err.to_string().contains("Host cannot be empty"));
    }
  }

  #[test]
  fn test_ensure_url_scheme_rejects_garbage() {
    assert!(ensure_url_scheme("exa mple.com").is_err());
  }
}
