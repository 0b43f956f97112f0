//! Regenerating a test suite from an OAS document
//!
//! Used both by `validate --oaspath`, where the suite is rebuilt in memory
//! and never written, and by `generate`, which writes it out.

use std::path::Path;

use super::{ContractParser, OasDocument, Overrides, SuiteGenerator, TestSuite};
use crate::common::Result;
use crate::source;

/// Label used when reporting problems with the contract file
pub const OAS_LABEL: &str = "OAS 3.0 Document";

pub struct TestSuiteBridge<'a> {
    parser: &'a dyn ContractParser,
    generator: &'a dyn SuiteGenerator,
}

impl<'a> TestSuiteBridge<'a> {
    pub fn new(parser: &'a dyn ContractParser, generator: &'a dyn SuiteGenerator) -> Self {
        Self { parser, generator }
    }

    /// Read and parse the contract at `oas_path`.
    pub async fn contract(&self, oas_path: &Path) -> Result<OasDocument> {
        let text = source::read(oas_path, OAS_LABEL).await?;
        self.parser.parse(&text).await
    }

    /// Build a fresh suite from the contract at `oas_path`, in memory only.
    pub async fn regenerate(&self, oas_path: &Path, overrides: &Overrides) -> Result<TestSuite> {
        let doc = self.contract(oas_path).await?;
        let suite = self.generator.build(&doc, overrides)?;
        tracing::debug!(title = %doc.title, "test suite regenerated from contract");
        Ok(suite)
    }

    /// Build a suite from `doc` and write it to `suite_path`.
    pub async fn generate_file(
        &self,
        doc: &OasDocument,
        overrides: &Overrides,
        suite_path: &Path,
    ) -> Result<TestSuite> {
        let suite = self.generator.build(doc, overrides)?;
        self.generator.write(&suite, suite_path).await?;
        tracing::info!(path = %suite_path.display(), "test suite written");
        Ok(suite)
    }
}
