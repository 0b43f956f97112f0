//! Building a test plan from resolved parameters
//!
//! When a stored configuration was uploaded alongside inline flags, each
//! field is taken from the inline value if one was given and from the
//! stored configuration otherwise. The base URL finally falls back to the
//! one recorded in the suite.

use async_trait::async_trait;
use std::time::Duration;

use super::{ParameterLoader, TestPlan};
use crate::common::{Error, Result};
use crate::resolver::ResolvedParameters;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlanLoader;

#[async_trait]
impl ParameterLoader for PlanLoader {
    async fn load(&self, params: ResolvedParameters) -> Result<TestPlan> {
        let doc = params
            .test_suite
            .document()
            .map_err(|e| Error::ParameterLoadFailed(e.to_string()))?;
        let stored = params.config.as_ref();

        let base_url = params
            .base_url
            .or_else(|| stored.and_then(|c| c.base_url().map(str::to_string)))
            .or(doc.base_url)
            .ok_or_else(|| {
                Error::ParameterLoadFailed(
                    "no base URL given and the test suite does not define one".into(),
                )
            })?;

        let selection = params
            .api_endpoints
            .or_else(|| stored.and_then(|c| c.api_endpoints().map(<[_]>::to_vec)));

        let cases = match selection {
            None => doc.test_cases,
            Some(endpoints) => {
                let mut picked = Vec::with_capacity(endpoints.len());
                for endpoint in &endpoints {
                    let matching: Vec<_> = doc
                        .test_cases
                        .iter()
                        .filter(|c| c.http_method == endpoint.http_method && c.path == endpoint.path)
                        .cloned()
                        .collect();
                    if matching.is_empty() {
                        return Err(Error::ParameterLoadFailed(format!(
                            "endpoint {endpoint} is not in the test suite"
                        )));
                    }
                    picked.extend(matching);
                }
                picked
            }
        };

        if cases.is_empty() {
            return Err(Error::ParameterLoadFailed("no test cases to run".into()));
        }

        let api_keys = params
            .api_keys
            .or_else(|| stored.and_then(|c| c.api_keys().map(<[_]>::to_vec)))
            .unwrap_or_default();
        let basic_auth = params
            .basic_auth
            .or_else(|| stored.and_then(|c| c.basic_auth().cloned()));
        let timeout = params
            .timeout
            .or_else(|| stored.and_then(|c| c.timeout()))
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|e| {
                    Error::ParameterLoadFailed(format!("timeout of {secs} seconds: {e}"))
                })
            })
            .transpose()?;

        tracing::debug!(base_url = %base_url, cases = cases.len(), "test parameters loaded");

        Ok(TestPlan {
            base_url,
            cases,
            api_keys,
            basic_auth,
            timeout,
        })
    }
}
