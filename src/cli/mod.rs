//! CLI command handling
//!
//! Fills in missing inputs (settings defaults, then prompts) and hands the
//! command to the suite bridge or the resolver.

mod prompt;

use colored::Colorize;
use std::path::PathBuf;

use crate::commands::Commands;
use crate::common::settings::Settings;
use crate::common::{Error, Result};
use crate::resolver::{load_overrides, supplied_path, Collaborators, Resolver, ValidateOptions};
use crate::suite::{TestSuiteBridge, OAS_LABEL};

use prompt::Prompter;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, settings: &Settings) -> Result<()> {
    let verbosity = command.verbosity();
    let prompter = Prompter::new(settings.prompts.enabled);
    let collaborators = Collaborators::default();

    match command {
        Commands::Generate {
            oas_path,
            test_suite_path,
            overrides_path,
            ..
        } => {
            let oas_path = match supplied_path(&oas_path) {
                Some(path) => path.to_path_buf(),
                None => prompter.path(OAS_LABEL).await?,
            };

            let bridge = TestSuiteBridge::new(
                collaborators.parser.as_ref(),
                collaborators.generator.as_ref(),
            );
            let doc = bridge.contract(&oas_path).await?;
            tracing::debug!(title = %doc.title, version = %doc.version, "contract loaded");

            let test_suite_path = match supplied_path(&test_suite_path) {
                Some(path) => path.to_path_buf(),
                None => prompter.path("TestSuite").await?,
            };

            let overrides_path = overrides_path.or_else(|| settings.defaults.overrides_path.clone());
            let overrides = load_overrides(supplied_path(&overrides_path)).await?;

            bridge
                .generate_file(&doc, &overrides, &test_suite_path)
                .await?;
            println!(
                "{} {}",
                "Test suite written to".green(),
                test_suite_path.display()
            );
            Ok(())
        }

        Commands::Validate {
            test_suite_path,
            overrides_path,
            oas_path,
            api_endpoints,
            api_keys,
            basic_auth,
            base_url,
            timeout,
            save_config_to,
            upload_config_from,
            ..
        } => {
            let test_suite_path: PathBuf = match supplied_path(&test_suite_path) {
                Some(path) => path.to_path_buf(),
                None => prompter.path("Testsuite").await?,
            };

            let opts = ValidateOptions {
                test_suite_path: Some(test_suite_path),
                overrides_path: overrides_path
                    .or_else(|| settings.defaults.overrides_path.clone()),
                oas_path,
                api_endpoints,
                api_keys,
                basic_auth,
                base_url,
                timeout: timeout
                    .or_else(|| settings.defaults.timeout_secs.map(|t| t.to_string())),
                save_config_to,
                upload_config_from,
                verbosity,
            };

            let report = Resolver::new(&collaborators).validate(&opts).await?;
            if report.all_passed() {
                Ok(())
            } else {
                Err(Error::TestsFailed {
                    passed: report.passed(),
                    failed: report.failed(),
                })
            }
        }
    }
}
