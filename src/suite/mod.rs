//! Test suites and the OAS contract they are generated from
//!
//! The resolver treats a [`TestSuite`] as an opaque document: it only cares
//! that one was loaded or generated. Parsing contracts and generating suites
//! sit behind the [`ContractParser`] and [`SuiteGenerator`] traits so the
//! resolver can run against any implementation.

mod bridge;
mod contract;
mod generator;

pub use bridge::{TestSuiteBridge, OAS_LABEL};
pub use contract::OpenApiParser;
pub use generator::OverrideGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::common::{Error, JsonFailure, Result};
use crate::json;
use crate::params::HttpMethod;

/// Option name used in reports for the test suite document
pub const TEST_SUITE: &str = "testsuite";
/// Option name used in reports for the overrides document
pub const OVERRIDES: &str = "overrides";

/// A validated OpenAPI 3.0 document
#[derive(Debug, Clone, PartialEq)]
pub struct OasDocument {
    /// `info.title`
    pub title: String,
    /// The `openapi` version string
    pub version: String,
    /// The full parsed document
    pub raw: Value,
}

/// A test suite, loaded from disk or generated from a contract
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuite(Value);

impl TestSuite {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a test suite file's content.
    pub fn from_json(text: &str) -> Result<Self> {
        json::parse_value(TEST_SUITE, text).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Interpret the suite in the layout [`OverrideGenerator`] writes.
    pub fn document(&self) -> Result<SuiteDocument> {
        serde_json::from_value(self.0.clone())
            .map_err(|e| Error::malformed_json(TEST_SUITE, JsonFailure::Shape(e.to_string())))
    }
}

/// User customisations applied on top of generated test cases.
///
/// Keyed by path, then lower-case method:
/// `{ "/pets/{id}": { "get": { "expectedStatus": 404 } } }`
#[derive(Debug, Clone, PartialEq)]
pub struct Overrides(Value);

impl Default for Overrides {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl Overrides {
    /// Parse an overrides file's content. The top level must be an object.
    pub fn from_json(text: &str) -> Result<Self> {
        let value = json::parse_value(OVERRIDES, text)?;
        if !value.is_object() {
            return Err(Error::malformed_json(
                OVERRIDES,
                JsonFailure::Shape("expected a JSON object".into()),
            ));
        }
        Ok(Self(value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_object().map_or(true, |m| m.is_empty())
    }

    /// The override block for one operation, if any.
    pub fn for_operation(&self, path: &str, method: HttpMethod) -> Option<&Value> {
        let item = self.0.get(path)?;
        item.get(method.as_str().to_ascii_lowercase())
            .or_else(|| item.get(method.as_str()))
    }
}

/// The on-disk layout of a generated test suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// One request to issue and the status it must come back with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub http_method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub parameters: CaseParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

fn default_expected_status() -> u16 {
    200
}

/// Example parameter values, grouped by where they go in the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseParameters {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, Value>,
}

/// Parses OAS source text into a validated document
#[async_trait]
pub trait ContractParser: Send + Sync {
    /// Fails with [`Error::ContractInvalid`] when the text is not a usable
    /// OpenAPI 3.0 document.
    async fn parse(&self, source: &str) -> Result<OasDocument>;
}

/// Builds test suites from a contract and writes them out
#[async_trait]
pub trait SuiteGenerator: Send + Sync {
    /// Build a suite in memory; nothing is written.
    fn build(&self, doc: &OasDocument, overrides: &Overrides) -> Result<TestSuite>;

    /// Persist a suite to `path`.
    async fn write(&self, suite: &TestSuite, path: &Path) -> Result<()>;
}
