//! Runner that issues the planned requests over HTTP

use async_trait::async_trait;
use colored::Colorize;
use reqwest::{Client, Method};
use serde_json::Value;

use super::{CaseResult, RunContext, RunReport, SuiteRunner, TestPlan};
use crate::common::Result;
use crate::params::{ApiEndpoint, HttpMethod};
use crate::suite::TestCase;

#[derive(Debug, Default, Clone)]
pub struct HttpRunner {
    client: Client,
}

impl HttpRunner {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run_case(&self, plan: &TestPlan, case: &TestCase) -> CaseResult {
        let endpoint = ApiEndpoint::new(case.http_method, case.path.clone());
        let mut result = CaseResult {
            endpoint,
            expected_status: case.expected_status,
            status: None,
            error: None,
        };

        let url = match request_url(&plan.base_url, case) {
            Ok(url) => url,
            Err(missing) => {
                result.error = Some(format!("no value for path parameter '{missing}'"));
                return result;
            }
        };

        let mut request = self
            .client
            .request(method(case.http_method), url)
            .query(&pairs(&case.parameters.query));

        for (name, value) in &case.parameters.header {
            request = request.header(name.as_str(), scalar(value));
        }
        for key in &plan.api_keys {
            request = request.header(key.name.as_str(), key.value.as_str());
        }
        if let Some(auth) = &plan.basic_auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }
        if let Some(body) = &case.request_body {
            request = request.json(body);
        }
        if let Some(timeout) = plan.timeout {
            request = request.timeout(timeout);
        }

        match request.send().await {
            Ok(response) => result.status = Some(response.status().as_u16()),
            Err(e) => result.error = Some(e.to_string()),
        }
        result
    }
}

#[async_trait]
impl SuiteRunner for HttpRunner {
    async fn run(&self, plan: TestPlan, ctx: &RunContext) -> Result<RunReport> {
        println!(
            "\n{} {}",
            "Validating against:".blue().bold(),
            plan.base_url.white().bold()
        );

        let mut report = RunReport::default();
        for case in &plan.cases {
            let result = self.run_case(&plan, case).await;
            print_result(&result, ctx);
            report.results.push(result);
        }

        let summary = format!("{} passed, {} failed", report.passed(), report.failed());
        if report.all_passed() {
            println!("\n{}", summary.green().bold());
        } else {
            println!("\n{}", summary.red().bold());
        }
        Ok(report)
    }
}

fn print_result(result: &CaseResult, ctx: &RunContext) {
    let label = result.endpoint.to_string();
    if result.passed() {
        println!("  {} {}", "✓".green(), label);
        return;
    }

    println!("  {} {}", "✗".red(), label.red());
    if let Some(error) = &result.error {
        println!("      {}", error.dimmed());
    } else if let Some(status) = result.status {
        println!(
            "      expected status {}, got {}",
            result.expected_status,
            status.to_string().yellow()
        );
    }
    if ctx.verbosity.is_verbose() {
        tracing::debug!(?result, "case failed");
    }
}

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Options => Method::OPTIONS,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Trace => Method::TRACE,
    }
}

/// Join `base_url` and the case path, filling `{name}` segments.
///
/// Returns the name of the first path parameter with no value.
fn request_url(base_url: &str, case: &TestCase) -> std::result::Result<String, String> {
    let mut path = String::with_capacity(case.path.len());
    let mut rest = case.path.as_str();

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + close];
        let value = case
            .parameters
            .path
            .get(name)
            .ok_or_else(|| name.to_string())?;
        path.push_str(&rest[..open]);
        path.push_str(&scalar(value));
        rest = &rest[open + close + 1..];
    }
    path.push_str(rest);

    Ok(format!("{}{}", base_url.trim_end_matches('/'), path))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pairs(params: &std::collections::BTreeMap<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(name, value)| (name.clone(), scalar(value)))
        .collect()
}
