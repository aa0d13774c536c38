//! Request-target model: the endpoint under test and the request variants
//! built from it.

use crate::http::request::{HttpMethod, RequestSpec};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamLocation {
    Query,
    Body,
}

/// One parameter parsed from the query string or the request body.
/// Immutable once parsed; identity is the index in the target's parameter
/// list, since duplicate names are legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub location: ParamLocation,
}

/// The endpoint under test. Built once, immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    base_url: String,
    method: HttpMethod,
    parameters: Vec<Parameter>,
    raw_body: Option<String>,
    headers: Vec<(String, String)>,
}

impl Target {
    /// Parse a URL (and, for POST, a form body) into a target. Query
    /// parameters come first, body parameters after, both in encounter
    /// order, with percent-decoded values.
    pub fn from_url(
        url: &str,
        method: HttpMethod,
        body: Option<&str>,
        headers: &[(String, String)],
    ) -> Self {
        let mut parameters = Vec::new();

        let (base_url, query) = match url.split_once('?') {
            Some((base, query)) => (base.to_string(), Some(query)),
            None => (url.to_string(), None),
        };

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            for pair in query.split('&') {
                parameters.push(parse_pair(pair, ParamLocation::Query));
            }
        }

        if method == HttpMethod::Post {
            if let Some(body) = body.filter(|b| !b.is_empty()) {
                for pair in body.split('&') {
                    parameters.push(parse_pair(pair, ParamLocation::Body));
                }
            }
        }

        Self {
            base_url,
            method,
            parameters,
            raw_body: body.map(str::to_string),
            headers: headers.to_vec(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The unmodified baseline request: every parameter re-encoded as-is.
    pub fn to_request_spec(&self) -> RequestSpec {
        let mut spec = RequestSpec::new(self.method, self.build_url(None, ""));
        spec.headers = self.headers.clone();

        if self.method == HttpMethod::Post {
            spec.raw_body = self.raw_body.clone();
        }

        spec
    }

    /// A request with the parameter at `index` replaced by `injected_value`.
    /// For GET only the query string is rewritten; for POST the URL stays
    /// untouched and only the body is rebuilt. Every other parameter
    /// round-trips through percent-encoding unchanged.
    pub fn to_injected_request(&self, index: usize, injected_value: &str) -> RequestSpec {
        let mut spec = match self.method {
            HttpMethod::Get => {
                RequestSpec::new(self.method, self.build_url(Some(index), injected_value))
            }
            HttpMethod::Post => {
                let mut spec = RequestSpec::new(self.method, self.base_url.clone());
                spec.raw_body = self
                    .raw_body
                    .as_ref()
                    .map(|_| self.build_post_body(index, injected_value));
                spec
            }
        };

        spec.headers = self.headers.clone();
        spec
    }

    fn build_url(&self, injected: Option<usize>, injected_value: &str) -> String {
        if self.parameters.is_empty() {
            // No parameters to rewrite: degrade to the base URL, with the
            // payload as a bare query suffix when one was requested.
            return match injected {
                Some(_) => format!("{}?{}", self.base_url, injected_value),
                None => self.base_url.clone(),
            };
        }

        let mut url = String::from(&self.base_url);
        url.push('?');

        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                url.push('&');
            }
            let value = match injected {
                Some(target) if target == i => injected_value,
                _ => &param.value,
            };
            url.push_str(&urlencoding::encode(&param.name));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    fn build_post_body(&self, index: usize, injected_value: &str) -> String {
        let mut body = String::new();

        for (i, param) in self.parameters.iter().enumerate() {
            if param.location != ParamLocation::Body {
                continue;
            }
            if !body.is_empty() {
                body.push('&');
            }
            let value = if i == index {
                injected_value
            } else {
                &param.value
            };
            body.push_str(&urlencoding::encode(&param.name));
            body.push('=');
            body.push_str(&urlencoding::encode(value));
        }

        body
    }
}

fn parse_pair(pair: &str, location: ParamLocation) -> Parameter {
    let (name, value) = match pair.split_once('=') {
        Some((name, value)) => (name, value),
        None => (pair, ""),
    };

    Parameter {
        name: decode(name),
        value: decode(value),
        location,
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameters_in_declaration_order() {
        let target = Target::from_url(
            "http://example.com/page?a=1&b=2",
            HttpMethod::Get,
            None,
            &[],
        );

        let params = target.parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[0].value, "1");
        assert_eq!(params[0].location, ParamLocation::Query);
        assert_eq!(params[1].name, "b");
        assert_eq!(params[1].value, "2");
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let target = Target::from_url(
            "http://example.com/search?q=a%27b%20c",
            HttpMethod::Get,
            None,
            &[],
        );
        assert_eq!(target.parameters()[0].value, "a'b c");
    }

    #[test]
    fn test_post_body_parameters_follow_query_parameters() {
        let target = Target::from_url(
            "http://example.com/login?next=home",
            HttpMethod::Post,
            Some("user=admin&pass=x"),
            &[],
        );

        let params = target.parameters();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].location, ParamLocation::Query);
        assert_eq!(params[1].name, "user");
        assert_eq!(params[1].location, ParamLocation::Body);
        assert_eq!(params[2].name, "pass");
    }

    #[test]
    fn test_injection_leaves_other_parameters_untouched() {
        let target = Target::from_url(
            "http://example.com/page?a=1&b=2",
            HttpMethod::Get,
            None,
            &[],
        );

        let spec = target.to_injected_request(0, "X");
        assert_eq!(spec.url, "http://example.com/page?a=X&b=2");
    }

    #[test]
    fn test_injection_targets_by_index_not_name() {
        let target = Target::from_url(
            "http://example.com/page?id=1&id=2",
            HttpMethod::Get,
            None,
            &[],
        );

        let spec = target.to_injected_request(1, "X");
        assert_eq!(spec.url, "http://example.com/page?id=1&id=X");
    }

    #[test]
    fn test_post_injection_keeps_url_and_other_body_params() {
        let target = Target::from_url(
            "http://example.com/login",
            HttpMethod::Post,
            Some("user=admin&pass=x"),
            &[],
        );

        let spec = target.to_injected_request(0, "admin'--");
        assert_eq!(spec.url, "http://example.com/login");
        assert_eq!(spec.raw_body.as_deref(), Some("user=admin%27--&pass=x"));
    }

    #[test]
    fn test_baseline_carries_headers_and_raw_body() {
        let headers = vec![("X-Token".to_string(), "t".to_string())];
        let target = Target::from_url(
            "http://example.com/login",
            HttpMethod::Post,
            Some("user=admin"),
            &headers,
        );

        let spec = target.to_request_spec();
        assert_eq!(spec.headers, headers);
        assert_eq!(spec.raw_body.as_deref(), Some("user=admin"));
    }

    #[test]
    fn test_zero_parameters_degrades_to_query_suffix() {
        let target = Target::from_url("http://example.com/page", HttpMethod::Get, None, &[]);
        assert_eq!(target.to_request_spec().url, "http://example.com/page");

        let spec = target.to_injected_request(0, "' OR 1=1-- ");
        assert_eq!(spec.url, "http://example.com/page?' OR 1=1-- ");
    }
}
