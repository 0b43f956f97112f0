//! Test suite generation from an OAS document
//!
//! Produces one test case per operation. Parameter values come from the
//! contract's `example`/`default` entries; the overrides document is merged
//! over each generated case last, so it can replace any field.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::{
    CaseParameters, OasDocument, Overrides, SuiteDocument, SuiteGenerator, TestCase, TestSuite,
    OVERRIDES,
};
use crate::common::{Error, JsonFailure, Result};
use crate::json;
use crate::params::HttpMethod;

#[derive(Debug, Default, Clone, Copy)]
pub struct OverrideGenerator;

impl OverrideGenerator {
    fn cases(doc: &OasDocument, overrides: &Overrides) -> Result<Vec<TestCase>> {
        let mut cases = Vec::new();
        let Some(paths) = doc.raw.get("paths").and_then(Value::as_object) else {
            return Ok(cases);
        };

        for (path, item) in paths {
            let shared = item.get("parameters");
            for method in HttpMethod::ALL {
                let key = method.as_str().to_ascii_lowercase();
                let Some(operation) = item.get(&key) else {
                    continue;
                };

                let generated = TestCase {
                    http_method: method,
                    path: path.clone(),
                    parameters: collect_parameters(shared, operation.get("parameters")),
                    request_body: request_body_example(operation),
                    expected_status: expected_status(operation),
                };

                cases.push(match overrides.for_operation(path, method) {
                    Some(patch) => apply_override(generated, patch)?,
                    None => generated,
                });
            }
        }

        Ok(cases)
    }
}

#[async_trait]
impl SuiteGenerator for OverrideGenerator {
    fn build(&self, doc: &OasDocument, overrides: &Overrides) -> Result<TestSuite> {
        let suite = SuiteDocument {
            title: doc.title.clone(),
            version: doc.version.clone(),
            base_url: doc
                .raw
                .pointer("/servers/0/url")
                .and_then(Value::as_str)
                .map(str::to_string),
            test_cases: Self::cases(doc, overrides)?,
        };
        tracing::debug!(cases = suite.test_cases.len(), "built test suite");
        Ok(TestSuite::new(serde_json::to_value(suite)?))
    }

    async fn write(&self, suite: &TestSuite, path: &Path) -> Result<()> {
        let content = json::serialize_pretty(suite.as_value())?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// Operation-level parameters replace path-level ones with the same name and location.
fn collect_parameters(shared: Option<&Value>, own: Option<&Value>) -> CaseParameters {
    let mut params = CaseParameters::default();
    let all = [shared, own]
        .into_iter()
        .flatten()
        .filter_map(Value::as_array)
        .flatten();

    for param in all {
        let (Some(name), Some(location)) = (
            param.get("name").and_then(Value::as_str),
            param.get("in").and_then(Value::as_str),
        ) else {
            continue;
        };
        let Some(value) = example_value(param) else {
            continue;
        };
        let target = match location {
            "path" => &mut params.path,
            "query" => &mut params.query,
            "header" => &mut params.header,
            _ => continue,
        };
        target.insert(name.to_string(), value);
    }

    params
}

fn example_value(node: &Value) -> Option<Value> {
    node.get("example")
        .or_else(|| node.pointer("/schema/example"))
        .or_else(|| node.pointer("/schema/default"))
        .cloned()
}

fn request_body_example(operation: &Value) -> Option<Value> {
    let media = operation.pointer("/requestBody/content/application~1json")?;
    example_value(media)
}

/// The first 2xx response code declared, or 200.
fn expected_status(operation: &Value) -> u16 {
    operation
        .get("responses")
        .and_then(Value::as_object)
        .and_then(|responses| {
            responses
                .keys()
                .filter_map(|code| code.parse::<u16>().ok())
                .find(|code| (200..300).contains(code))
        })
        .unwrap_or(200)
}

fn apply_override(case: TestCase, patch: &Value) -> Result<TestCase> {
    let mut merged = serde_json::to_value(&case)?;
    deep_merge(&mut merged, patch);
    serde_json::from_value(merged).map_err(|e| {
        Error::malformed_json(
            OVERRIDES,
            JsonFailure::Shape(format!("{} {}: {e}", case.http_method, case.path)),
        )
    })
}

fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                deep_merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn petstore() -> OasDocument {
        OasDocument {
            title: "Petstore".into(),
            version: "3.0.0".into(),
            raw: json!({
                "openapi": "3.0.0",
                "info": {"title": "Petstore", "version": "1"},
                "servers": [{"url": "http://localhost:8080/v1"}],
                "paths": {
                    "/pets/{id}": {
                        "parameters": [
                            {"name": "id", "in": "path", "schema": {"type": "integer", "example": 7}}
                        ],
                        "get": {
                            "parameters": [
                                {"name": "fields", "in": "query", "example": "name"}
                            ],
                            "responses": {"default": {}, "200": {}}
                        },
                        "delete": {"responses": {"204": {}}}
                    },
                    "/pets": {
                        "post": {
                            "requestBody": {"content": {"application/json": {"example": {"name": "rex"}}}},
                            "responses": {"201": {}}
                        }
                    }
                }
            }),
        }
    }

    fn build(overrides: &Overrides) -> SuiteDocument {
        OverrideGenerator
            .build(&petstore(), overrides)
            .unwrap()
            .document()
            .unwrap()
    }

    #[test]
    fn test_one_case_per_operation() {
        let doc = build(&Overrides::default());
        assert_eq!(doc.test_cases.len(), 3);
        assert_eq!(doc.base_url.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_parameters_and_status_from_contract() {
        let doc = build(&Overrides::default());
        let get = doc
            .test_cases
            .iter()
            .find(|c| c.http_method == HttpMethod::Get)
            .unwrap();
        assert_eq!(get.parameters.path["id"], json!(7));
        assert_eq!(get.parameters.query["fields"], json!("name"));
        assert_eq!(get.expected_status, 200);

        let post = doc
            .test_cases
            .iter()
            .find(|c| c.http_method == HttpMethod::Post)
            .unwrap();
        assert_eq!(post.request_body, Some(json!({"name": "rex"})));
        assert_eq!(post.expected_status, 201);
    }

    #[test]
    fn test_overrides_replace_generated_values() {
        let overrides = Overrides::from_json(
            r#"{"/pets/{id}": {"get": {"expectedStatus": 404, "parameters": {"path": {"id": 999}}}}}"#,
        )
        .unwrap();
        let doc = build(&overrides);
        let get = doc
            .test_cases
            .iter()
            .find(|c| c.http_method == HttpMethod::Get)
            .unwrap();
        assert_eq!(get.expected_status, 404);
        assert_eq!(get.parameters.path["id"], json!(999));
        assert_eq!(get.parameters.query["fields"], json!("name"));
    }

    #[test]
    fn test_bad_override_shape_is_reported() {
        let overrides =
            Overrides::from_json(r#"{"/pets": {"post": {"expectedStatus": "created"}}}"#).unwrap();
        let err = OverrideGenerator.build(&petstore(), &overrides).unwrap_err();
        assert!(err.to_string().contains("overrides"));
    }

    #[tokio::test]
    async fn test_write_produces_readable_suite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.json");
        let suite = OverrideGenerator
            .build(&petstore(), &Overrides::default())
            .unwrap();

        OverrideGenerator.write(&suite, &path).await.unwrap();

        let reread = TestSuite::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread, suite);
    }
}
