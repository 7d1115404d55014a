use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors that can occur during endpoint validation.
#[derive(Error, Debug)]
pub enum EndpointError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The host is an unspecified address such as `0.0.0.0`.
    #[error("Unspecified address not allowed: {0}")]
    UnspecifiedAddress(String),
}

/// Validates the post collection endpoint.
///
/// Local and private addresses are allowed, since pointing the board at a
/// development server is a normal use. Rejected:
/// - Non-HTTP(S) schemes (e.g., `file://`, `ftp://`)
/// - URLs without a host
/// - Unspecified addresses (`0.0.0.0`, `::`)
///
/// # Examples
///
/// ```
/// use postboard::util::validate_endpoint;
///
/// let url = validate_endpoint("https://jsonplaceholder.typicode.com/posts").unwrap();
/// assert_eq!(url.host_str(), Some("jsonplaceholder.typicode.com"));
///
/// assert!(validate_endpoint("http://localhost:3000/posts").is_ok());
/// assert!(validate_endpoint("file:///etc/passwd").is_err());
/// ```
pub fn validate_endpoint(url_str: &str) -> Result<Url, EndpointError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(EndpointError::UnsupportedScheme(scheme.to_owned())),
    }

    let host = url.host_str().ok_or(EndpointError::MissingHost)?;

    // Strip brackets from IPv6 addresses for parsing
    let host_for_parse = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
        if ip.is_unspecified() {
            return Err(EndpointError::UnspecifiedAddress(ip.to_string()));
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_endpoints() {
        assert!(validate_endpoint("https://jsonplaceholder.typicode.com/posts").is_ok());
        assert!(validate_endpoint("http://127.0.0.1:8080/posts").is_ok());
        assert!(validate_endpoint("http://[::1]:8080/posts").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(matches!(
            validate_endpoint("file:///etc/passwd"),
            Err(EndpointError::UnsupportedScheme(_))
        ));
        assert!(validate_endpoint("ftp://example.com/posts").is_err());
    }

    #[test]
    fn test_unparseable() {
        assert!(matches!(
            validate_endpoint("not a url"),
            Err(EndpointError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unspecified_address_rejected() {
        assert!(matches!(
            validate_endpoint("http://0.0.0.0/posts"),
            Err(EndpointError::UnspecifiedAddress(_))
        ));
        assert!(validate_endpoint("http://[::]/posts").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert!(validate_endpoint("  https://example.com/posts \n").is_ok());
    }
}
