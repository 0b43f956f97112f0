//! OpenAPI 3.0 document parsing

use async_trait::async_trait;
use serde_json::Value;

use super::{ContractParser, OasDocument};
use crate::common::{Error, Result};

/// Accepts OAS 3.x documents written as JSON or YAML.
///
/// Only the top-level structure is checked: an `openapi` 3.x version, an
/// `info.title` and a `paths` object.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenApiParser;

impl OpenApiParser {
    fn decode(source: &str) -> Result<Value> {
        match serde_json::from_str::<Value>(source) {
            Ok(value) => Ok(value),
            Err(json_err) => serde_yaml::from_str::<Value>(source).map_err(|yaml_err| {
                Error::ContractInvalid(format!(
                    "neither JSON ({json_err}) nor YAML ({yaml_err})"
                ))
            }),
        }
    }

    fn check(raw: Value) -> Result<OasDocument> {
        let version = raw
            .get("openapi")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ContractInvalid("missing 'openapi' version field".into()))?
            .to_string();
        if !version.starts_with("3.") {
            return Err(Error::ContractInvalid(format!(
                "unsupported OpenAPI version '{version}', expected 3.x"
            )));
        }

        let title = raw
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ContractInvalid("missing 'info.title'".into()))?
            .to_string();

        if !raw.get("paths").is_some_and(Value::is_object) {
            return Err(Error::ContractInvalid("missing 'paths' object".into()));
        }

        Ok(OasDocument {
            title,
            version,
            raw,
        })
    }
}

#[async_trait]
impl ContractParser for OpenApiParser {
    async fn parse(&self, source: &str) -> Result<OasDocument> {
        let doc = Self::check(Self::decode(source)?)?;
        tracing::debug!(title = %doc.title, version = %doc.version, "parsed OAS document");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE_YAML: &str = "\
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get:
      responses:
        '200':
          description: ok
";

    #[tokio::test]
    async fn test_parse_yaml_document() {
        let doc = OpenApiParser.parse(PETSTORE_YAML).await.unwrap();
        assert_eq!(doc.title, "Petstore");
        assert_eq!(doc.version, "3.0.3");
    }

    #[tokio::test]
    async fn test_parse_json_document() {
        let doc = OpenApiParser
            .parse(r#"{"openapi":"3.0.0","info":{"title":"T","version":"1"},"paths":{}}"#)
            .await
            .unwrap();
        assert_eq!(doc.title, "T");
    }

    #[tokio::test]
    async fn test_swagger_two_is_rejected() {
        let err = OpenApiParser
            .parse(r#"{"swagger":"2.0","info":{"title":"T"},"paths":{}}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ContractInvalid(_)));
    }

    #[tokio::test]
    async fn test_missing_paths_is_rejected() {
        let err = OpenApiParser
            .parse(r#"{"openapi":"3.1.0","info":{"title":"T"}}"#)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("paths"));
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let err = OpenApiParser.parse("{: [").await.unwrap_err();
        assert!(matches!(err, Error::ContractInvalid(_)));
    }
}
