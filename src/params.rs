//! Typed run parameters supplied on the command line
//!
//! `--apiendpoints`, `--apikeys` and `--basicauth` arrive as JSON strings.
//! They are parsed into these records at the boundary, so nothing downstream
//! ever handles free-form JSON for them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::{Error, JsonFailure, Result};
use crate::json;

/// Option name used in reports for `--apiendpoints`
pub const API_ENDPOINTS: &str = "apiendpoints";
/// Option name used in reports for `--apikeys`
pub const API_KEYS: &str = "apikeys";
/// Option name used in reports for `--basicauth`
pub const BASIC_AUTH: &str = "basicauth";

/// HTTP methods an OAS 3.0 path item can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown HTTP method '{s}'"))
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One endpoint selected for a run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub http_method: HttpMethod,
    pub path: String,
}

impl ApiEndpoint {
    pub fn new(http_method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method,
            path: path.into(),
        }
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.http_method, self.path)
    }
}

/// A named API key sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub name: String,
    pub value: String,
}

/// HTTP basic authentication credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn shape_error(field: &'static str, msg: String) -> Error {
    Error::malformed_json(field, JsonFailure::Shape(msg))
}

/// Parse the `--apiendpoints` value.
pub fn parse_api_endpoints(text: &str) -> Result<Vec<ApiEndpoint>> {
    let endpoints: Vec<ApiEndpoint> = json::parse(API_ENDPOINTS, text)?;
    if let Some(bad) = endpoints.iter().find(|e| !e.path.starts_with('/')) {
        return Err(shape_error(
            API_ENDPOINTS,
            format!("path '{}' must start with '/'", bad.path),
        ));
    }
    Ok(endpoints)
}

/// Parse the `--apikeys` value.
pub fn parse_api_keys(text: &str) -> Result<Vec<ApiKey>> {
    let keys: Vec<ApiKey> = json::parse(API_KEYS, text)?;
    if keys.iter().any(|k| k.name.trim().is_empty()) {
        return Err(shape_error(API_KEYS, "api key name must not be empty".into()));
    }
    Ok(keys)
}

/// Parse the `--basicauth` value.
pub fn parse_basic_auth(text: &str) -> Result<BasicAuth> {
    let auth: BasicAuth = json::parse(BASIC_AUTH, text)?;
    if auth.username.trim().is_empty() {
        return Err(shape_error(BASIC_AUTH, "username must not be empty".into()));
    }
    Ok(auth)
}

/// Whether `secs` can be used as a request timeout.
pub fn is_valid_timeout(secs: f64) -> bool {
    secs.is_finite() && secs >= 0.0
}

/// The longest leading slice of `text` that reads as a number, so `"5s"`
/// gives 5.
fn leading_number(text: &str) -> Option<f64> {
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
}

/// Parse the `--timeout` value in seconds.
///
/// Reads a leading number and ignores any unit or text after it. Anything
/// without a finite, non-negative leading number means "no override"; that
/// case is logged rather than treated as an error.
pub fn parse_timeout(text: Option<&str>) -> Option<f64> {
    let text = text?;
    match leading_number(text.trim()) {
        Some(secs) if is_valid_timeout(secs) => Some(secs),
        _ => {
            tracing::warn!(timeout = text, "ignoring timeout that is not a number of seconds");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_endpoint() {
        let endpoints = parse_api_endpoints(r#"[{"httpMethod":"GET","path":"/ok"}]"#).unwrap();
        assert_eq!(endpoints, vec![ApiEndpoint::new(HttpMethod::Get, "/ok")]);
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let endpoints = parse_api_endpoints(r#"[{"httpMethod":"post","path":"/pets"}]"#).unwrap();
        assert_eq!(endpoints[0].http_method, HttpMethod::Post);
        assert_eq!(
            serde_json::to_string(&endpoints[0]).unwrap(),
            r#"{"httpMethod":"POST","path":"/pets"}"#
        );
    }

    #[test]
    fn test_unknown_method_is_shape_error() {
        let err = parse_api_endpoints(r#"[{"httpMethod":"FETCH","path":"/x"}]"#).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedJson {
                field: API_ENDPOINTS,
                kind: JsonFailure::Shape(_)
            }
        ));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let err = parse_api_endpoints(r#"[{"httpMethod":"GET","path":"ok"}]"#).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn test_invalid_api_keys_name_field() {
        let err = parse_api_keys("{not valid json").unwrap_err();
        assert!(err.to_string().contains("apikeys"));
    }

    #[test]
    fn test_api_keys_keep_order() {
        let keys = parse_api_keys(r#"[{"name":"a","value":"1"},{"name":"b","value":"2"}]"#).unwrap();
        let names: Vec<_> = keys.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_basic_auth_requires_username() {
        assert!(parse_basic_auth(r#"{"username":"","password":"p"}"#).is_err());
        let auth = parse_basic_auth(r#"{"username":"u"}"#).unwrap();
        assert_eq!(auth.password, "");
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout(Some("2.5")), Some(2.5));
        assert_eq!(parse_timeout(Some("soon")), None);
        assert_eq!(parse_timeout(Some("-1")), None);
        assert_eq!(parse_timeout(Some("NaN")), None);
        assert_eq!(parse_timeout(None), None);
    }

    #[test]
    fn test_timeout_reads_leading_number() {
        assert_eq!(parse_timeout(Some("5s")), Some(5.0));
        assert_eq!(parse_timeout(Some(" 1.5 seconds")), Some(1.5));
        assert_eq!(parse_timeout(Some("2e1x")), Some(20.0));
        assert_eq!(parse_timeout(Some("s5")), None);
    }
}
