//! CLI command definitions
//!
//! Defines the clap commands for the endpoint validator CLI.

use clap::Subcommand;
use std::path::PathBuf;

use crate::common::Verbosity;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a test suite file from an OAS 3.0 document
    Generate {
        /// Path to the OAS 3.0 document (JSON or YAML)
        #[arg(long = "oaspath", short = 'o')]
        oas_path: Option<PathBuf>,

        /// Where to write the generated test suite
        #[arg(long = "testsuitepath", short = 't')]
        test_suite_path: Option<PathBuf>,

        /// Overrides applied to the generated test cases
        #[arg(long = "overridespath")]
        overrides_path: Option<PathBuf>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// Validate API endpoints against a test suite
    Validate {
        /// Path to the test suite file
        #[arg(long = "testsuitepath", short = 't')]
        test_suite_path: Option<PathBuf>,

        /// Overrides applied when regenerating the suite from --oaspath
        #[arg(long = "overridespath")]
        overrides_path: Option<PathBuf>,

        /// Regenerate the test suite from this OAS 3.0 document before running
        #[arg(long = "oaspath", short = 'o')]
        oas_path: Option<PathBuf>,

        /// Endpoints to test, e.g. '[{"httpMethod":"GET","path":"/pets"}]'
        #[arg(long = "apiendpoints")]
        api_endpoints: Option<String>,

        /// API keys sent as headers, e.g. '[{"name":"X-Api-Key","value":"..."}]'
        #[arg(long = "apikeys")]
        api_keys: Option<String>,

        /// Basic auth credentials, e.g. '{"username":"u","password":"p"}'
        #[arg(long = "basicauth")]
        basic_auth: Option<String>,

        /// Base URL of the API under test
        #[arg(long = "baseurl")]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<String>,

        /// Save the parameters of this run to a config file
        #[arg(long = "saveconfigto")]
        save_config_to: Option<PathBuf>,

        /// Pass a previously saved config file to the run
        #[arg(long = "uploadconfigfrom")]
        upload_config_from: Option<PathBuf>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> Verbosity {
        match self {
            Commands::Generate { verbose, .. } | Commands::Validate { verbose, .. } => {
                Verbosity::from_flag(*verbose)
            }
        }
    }
}
