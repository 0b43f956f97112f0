//! Resolution of `validate` inputs into one parameter set
//!
//! A run goes through these steps in order and never goes back:
//!
//! 1. load the test suite (required)
//! 2. load the overrides (optional, empty when absent)
//! 3. regenerate the suite from the OAS document, if one is given
//! 4. parse the endpoint, API key and basic auth options, each on its own
//! 5. save a configuration snapshot, if asked
//! 6. load a stored configuration, if asked
//! 7. hand everything to the parameter loader, then the runner
//!
//! Any failure in steps 1-4 or 7 ends the run right there. Failures in 5 and
//! 6 are logged and the run carries on without them.
//!
//! The inline values from steps 1-4 are always what the loader receives. A
//! configuration loaded in step 6 travels next to them, untouched; deciding
//! between the two is the loader's job.

use std::path::{Path, PathBuf};

use crate::common::{supplied, Error, Result, Verbosity};
use crate::params::{self, ApiEndpoint, ApiKey, BasicAuth};
use crate::runner::{
    HttpRunner, ParameterLoader, PlanLoader, RunContext, RunReport, SuiteRunner,
};
use crate::source;
use crate::store::{self, Configuration};
use crate::suite::{
    ContractParser, OpenApiParser, OverrideGenerator, Overrides, SuiteGenerator, TestSuite,
    TestSuiteBridge,
};

/// Label used when reporting problems with the test suite file
pub const TEST_SUITE_LABEL: &str = "Testsuite";
/// Label used when reporting problems with the overrides file
pub const OVERRIDES_LABEL: &str = "Overrides";

/// Raw `validate` inputs, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub test_suite_path: Option<PathBuf>,
    pub overrides_path: Option<PathBuf>,
    pub oas_path: Option<PathBuf>,
    /// JSON array of `{httpMethod, path}`
    pub api_endpoints: Option<String>,
    /// JSON array of `{name, value}`
    pub api_keys: Option<String>,
    /// JSON object `{username, password}`
    pub basic_auth: Option<String>,
    pub base_url: Option<String>,
    /// Seconds, as text
    pub timeout: Option<String>,
    pub save_config_to: Option<PathBuf>,
    pub upload_config_from: Option<PathBuf>,
    pub verbosity: Verbosity,
}

/// The parameter set handed to the [`ParameterLoader`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParameters {
    pub test_suite: TestSuite,
    pub base_url: Option<String>,
    pub api_endpoints: Option<Vec<ApiEndpoint>>,
    pub api_keys: Option<Vec<ApiKey>>,
    pub basic_auth: Option<BasicAuth>,
    pub timeout: Option<f64>,
    /// Stored configuration loaded with `--uploadconfigfrom`
    pub config: Option<Configuration>,
}

/// The implementations a run delegates to
pub struct Collaborators {
    pub parser: Box<dyn ContractParser>,
    pub generator: Box<dyn SuiteGenerator>,
    pub loader: Box<dyn ParameterLoader>,
    pub runner: Box<dyn SuiteRunner>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            parser: Box::new(OpenApiParser),
            generator: Box::new(OverrideGenerator),
            loader: Box::new(PlanLoader),
            runner: Box::new(HttpRunner::new()),
        }
    }
}

/// Blank paths count as not given, like blank option strings.
pub fn supplied_path(value: &Option<PathBuf>) -> Option<&Path> {
    value.as_deref().filter(|p| !p.as_os_str().is_empty())
}

pub struct Resolver<'a> {
    collaborators: &'a Collaborators,
}

impl<'a> Resolver<'a> {
    pub fn new(collaborators: &'a Collaborators) -> Self {
        Self { collaborators }
    }

    fn bridge(&self) -> TestSuiteBridge<'_> {
        TestSuiteBridge::new(
            self.collaborators.parser.as_ref(),
            self.collaborators.generator.as_ref(),
        )
    }

    /// Steps 1-6: assemble the parameter set without running anything.
    pub async fn resolve(&self, opts: &ValidateOptions) -> Result<ResolvedParameters> {
        let test_suite_path =
            supplied_path(&opts.test_suite_path).ok_or(Error::InputMissing(TEST_SUITE_LABEL))?;
        let mut test_suite =
            TestSuite::from_json(&source::read(test_suite_path, TEST_SUITE_LABEL).await?)?;

        let overrides = load_overrides(supplied_path(&opts.overrides_path)).await?;

        if let Some(oas_path) = supplied_path(&opts.oas_path) {
            test_suite = self.bridge().regenerate(oas_path, &overrides).await?;
            tracing::debug!("Testsuite created successfully");
        }

        let api_endpoints = supplied(&opts.api_endpoints)
            .map(params::parse_api_endpoints)
            .transpose()?;
        let api_keys = supplied(&opts.api_keys)
            .map(params::parse_api_keys)
            .transpose()?;
        let basic_auth = supplied(&opts.basic_auth)
            .map(params::parse_basic_auth)
            .transpose()?;
        let base_url = supplied(&opts.base_url).map(str::to_string);
        let timeout = params::parse_timeout(supplied(&opts.timeout));

        if let Some(path) = supplied_path(&opts.save_config_to) {
            let snapshot = Configuration::build(
                test_suite_path,
                base_url.clone(),
                api_endpoints.clone(),
                api_keys.clone(),
                basic_auth.clone(),
                timeout,
            );
            if let Err(e) = store::save(&snapshot, path).await {
                tracing::error!("{e}");
            }
        }

        let config = match supplied_path(&opts.upload_config_from) {
            Some(path) => match store::load(path).await {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::error!("{e}");
                    None
                }
            },
            None => None,
        };

        Ok(ResolvedParameters {
            test_suite,
            base_url,
            api_endpoints,
            api_keys,
            basic_auth,
            timeout,
            config,
        })
    }

    /// The whole `validate` run: resolve, load parameters, then run.
    pub async fn validate(&self, opts: &ValidateOptions) -> Result<RunReport> {
        let params = self.resolve(opts).await?;

        let plan = self
            .collaborators
            .loader
            .load(params)
            .await
            .map_err(|e| match e {
                Error::ParameterLoadFailed(_) => e,
                other => Error::ParameterLoadFailed(other.to_string()),
            })?;

        let ctx = RunContext {
            verbosity: opts.verbosity,
        };
        self.collaborators.runner.run(plan, &ctx).await
    }
}

/// Read the overrides document, or return empty overrides when no path is given.
pub async fn load_overrides(path: Option<&Path>) -> Result<Overrides> {
    match path {
        Some(path) => Overrides::from_json(&source::read(path, OVERRIDES_LABEL).await?),
        None => Ok(Overrides::default()),
    }
}
