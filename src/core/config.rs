//! Scan configuration and pre-flight validation.

use crate::cli::args::Cli;
use crate::http::request::HttpMethod;
use thiserror::Error;
use url::Url;

/// Configuration errors. All of these are raised before any network
/// activity and terminate the run with no partial result.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("URL must start with http:// or https://")]
    MissingScheme,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL must contain a valid host")]
    MissingHost,

    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("invalid header format, expected \"Name: Value\": {0}")]
    MalformedHeader(String),
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub url: String,
    pub method: HttpMethod,
    pub output: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
    pub format: String,
    pub timeout_secs: u64,
}

impl ScanConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        validate_url(&cli.url)?;
        let method = cli.method.parse::<HttpMethod>()?;
        let headers = parse_headers(&cli.headers)?;

        Ok(Self {
            url: cli.url,
            method,
            output: cli.output,
            body: cli.data,
            headers,
            format: cli.format,
            timeout_secs: cli.timeout,
        })
    }
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::EmptyUrl);
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::MissingScheme);
    }

    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::MissingHost);
    }

    Ok(())
}

fn parse_headers(raw: &[String]) -> Result<Vec<(String, String)>, ConfigError> {
    let mut headers = Vec::with_capacity(raw.len());
    for line in raw {
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ConfigError::MalformedHeader(line.clone()))?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_url() {
        assert!(matches!(validate_url(""), Err(ConfigError::EmptyUrl)));
    }

    #[test]
    fn test_rejects_bad_scheme() {
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(ConfigError::MissingScheme)
        ));
    }

    #[test]
    fn test_rejects_missing_host() {
        assert!(validate_url("http://").is_err());
    }

    #[test]
    fn test_accepts_plain_http_url() {
        assert!(validate_url("http://example.com/page?id=1").is_ok());
    }

    #[test]
    fn test_header_parsing() {
        let parsed = parse_headers(&["X-Api-Key: secret".to_string()]).unwrap();
        assert_eq!(parsed, vec![("X-Api-Key".to_string(), "secret".to_string())]);

        assert!(matches!(
            parse_headers(&["not-a-header".to_string()]),
            Err(ConfigError::MalformedHeader(_))
        ));
    }
}
