//! Saved run configurations
//!
//! A [`Configuration`] is a snapshot of the parameters a `validate` run was
//! given. It is written and read as a whole JSON file; there is no partial
//! update and no locking, so the last writer to a path wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};
use crate::json;
use crate::params::{self, ApiEndpoint, ApiKey, BasicAuth};
use crate::source;

/// A snapshot of resolved run parameters.
///
/// Immutable once built: to change a stored configuration, build a new one
/// and save it over the old file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    test_suite_path: PathBuf,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_endpoints: Option<Vec<ApiEndpoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_keys: Option<Vec<ApiKey>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    basic_auth: Option<BasicAuth>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "usable_timeout"
    )]
    timeout: Option<f64>,
}

/// Stored timeouts that cannot be used are read as "no override".
fn usable_timeout<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let timeout = Option::<f64>::deserialize(deserializer)?;
    Ok(timeout.filter(|&secs| {
        let usable = params::is_valid_timeout(secs);
        if !usable {
            tracing::warn!(
                timeout = secs,
                "ignoring stored timeout that is not a number of seconds"
            );
        }
        usable
    }))
}

impl Configuration {
    /// Build a configuration stamped with the current time.
    ///
    /// Values are stored as given; they were validated when parsed.
    pub fn build(
        test_suite_path: impl Into<PathBuf>,
        base_url: Option<String>,
        api_endpoints: Option<Vec<ApiEndpoint>>,
        api_keys: Option<Vec<ApiKey>>,
        basic_auth: Option<BasicAuth>,
        timeout: Option<f64>,
    ) -> Self {
        Self {
            test_suite_path: test_suite_path.into(),
            base_url,
            created_at: Utc::now(),
            api_endpoints,
            api_keys,
            basic_auth,
            timeout: timeout.filter(|t| t.is_finite()),
        }
    }

    pub fn test_suite_path(&self) -> &Path {
        &self.test_suite_path
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn api_endpoints(&self) -> Option<&[ApiEndpoint]> {
        self.api_endpoints.as_deref()
    }

    pub fn api_keys(&self) -> Option<&[ApiKey]> {
        self.api_keys.as_deref()
    }

    pub fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    pub fn timeout(&self) -> Option<f64> {
        self.timeout
    }
}

/// Load a configuration previously written by [`save`].
///
/// Any problem (missing file, bad JSON, wrong fields) comes back as
/// [`Error::ConfigReadFailed`], which callers treat as "nothing stored".
pub async fn load(path: &Path) -> Result<Configuration> {
    let read_failed = |error: String| Error::ConfigReadFailed {
        path: path.display().to_string(),
        error,
    };

    let content = source::read(path, "Config").await.map_err(|e| read_failed(e.to_string()))?;
    json::parse("config", &content).map_err(|e| read_failed(e.to_string()))
}

/// Write `config` to `path`, replacing whatever was there.
pub async fn save(config: &Configuration, path: &Path) -> Result<()> {
    let write_failed = |error: String| Error::ConfigWriteFailed {
        path: path.display().to_string(),
        error,
    };

    let content = json::serialize(config).map_err(|e| write_failed(e.to_string()))?;
    tokio::fs::write(path, content)
        .await
        .map_err(|e| write_failed(e.to_string()))?;

    tracing::debug!(path = %path.display(), "config file updated/created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HttpMethod;
    use tempfile::tempdir;

    fn sample() -> Configuration {
        Configuration::build(
            "suite.json",
            Some("http://localhost:8080".into()),
            Some(vec![ApiEndpoint::new(HttpMethod::Get, "/ok")]),
            Some(vec![ApiKey {
                name: "X-Api-Key".into(),
                value: "secret".into(),
            }]),
            Some(BasicAuth {
                username: "user".into(),
                password: "pass".into(),
            }),
            Some(3.0),
        )
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = sample();

        save(&config, &path).await.unwrap();
        let loaded = load(&path).await.unwrap();

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_round_trip_with_absent_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Configuration::build("suite.json", None, None, None, None, None);

        save(&config, &path).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("baseURL"));
        assert!(!raw.contains("timeout"));

        assert_eq!(load(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn test_save_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = sample();

        save(&config, &path).await.unwrap();
        let first: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        save(&config, &path).await.unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        for key in [
            "testSuitePath",
            "baseURL",
            "createdAt",
            "apiEndpoints",
            "apiKeys",
            "basicAuth",
            "timeout",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let created = value["createdAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(created).is_ok());
    }

    #[tokio::test]
    async fn test_full_precision_timeout_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config =
            Configuration::build("s.json", None, None, None, None, Some(39.430133835633676));

        save(&config, &path).await.unwrap();
        let loaded = load(&path).await.unwrap();

        assert_eq!(loaded.timeout(), Some(39.430133835633676));
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_negative_stored_timeout_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"testSuitePath":"s.json","createdAt":"2024-01-01T00:00:00Z","timeout":-5}"#,
        )
        .unwrap();

        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded.timeout(), None);
        assert_eq!(loaded.test_suite_path(), Path::new("s.json"));
    }

    #[test]
    fn test_non_finite_timeout_is_dropped() {
        let config = Configuration::build("s.json", None, None, None, None, Some(f64::NAN));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_created_at_is_stamped_now() {
        let before = Utc::now();
        let config = sample();
        assert!(config.created_at() >= before);
        assert!(config.created_at() <= Utc::now());
    }

    #[tokio::test]
    async fn test_load_invalid_json_is_read_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{oops").unwrap();

        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, Error::ConfigReadFailed { .. }));
        assert!(!err.is_terminal());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_failure() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("none.json")).await.unwrap_err();
        assert!(matches!(err, Error::ConfigReadFailed { .. }));
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails_softly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/config.json");

        let err = save(&sample(), &path).await.unwrap_err();
        assert!(matches!(err, Error::ConfigWriteFailed { .. }));
        assert!(!err.is_terminal());
    }
}
