//! Loading resolved parameters into a plan and running it
//!
//! The resolver hands its output to a [`ParameterLoader`], which turns it
//! into a [`TestPlan`]; a [`SuiteRunner`] then executes the plan.

mod http;
mod plan;

pub use http::HttpRunner;
pub use plan::PlanLoader;

use async_trait::async_trait;
use std::time::Duration;

use crate::common::{Result, Verbosity};
use crate::params::{ApiEndpoint, ApiKey, BasicAuth};
use crate::resolver::ResolvedParameters;
use crate::suite::TestCase;

/// Everything a runner needs to issue requests
#[derive(Debug, Clone, PartialEq)]
pub struct TestPlan {
    pub base_url: String,
    pub cases: Vec<TestCase>,
    pub api_keys: Vec<ApiKey>,
    pub basic_auth: Option<BasicAuth>,
    pub timeout: Option<Duration>,
}

/// Per-run settings for the runner
#[derive(Debug, Clone, Copy, Default)]
pub struct RunContext {
    pub verbosity: Verbosity,
}

/// Outcome of a single test case
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub endpoint: ApiEndpoint,
    pub expected_status: u16,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.status == Some(self.expected_status)
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<CaseResult>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Turns resolved parameters into an executable plan.
///
/// Rejecting the parameters ends the run before anything is sent.
#[async_trait]
pub trait ParameterLoader: Send + Sync {
    async fn load(&self, params: ResolvedParameters) -> Result<TestPlan>;
}

/// Executes a plan and reports what passed
#[async_trait]
pub trait SuiteRunner: Send + Sync {
    async fn run(&self, plan: TestPlan, ctx: &RunContext) -> Result<RunReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HttpMethod;

    fn result(status: Option<u16>, error: Option<&str>) -> CaseResult {
        CaseResult {
            endpoint: ApiEndpoint::new(HttpMethod::Get, "/ok"),
            expected_status: 200,
            status,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = RunReport {
            results: vec![
                result(Some(200), None),
                result(Some(500), None),
                result(None, Some("connection refused")),
            ],
        };
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.all_passed());
    }
}
