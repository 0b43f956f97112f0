//! Reading input documents from disk
//!
//! Every document the validator consumes (test suite, overrides, OAS
//! contract, stored configuration) goes through [`read`], so missing and
//! empty files are reported the same way everywhere.

use std::path::Path;

use crate::common::{Error, Result};

/// Read the document at `path`.
///
/// `label` only feeds the error message. A missing or unreadable file gives
/// [`Error::FileUnreadable`]; a zero-length one gives [`Error::FileEmpty`].
/// Reads are local, so nothing is retried.
pub async fn read(path: &Path, label: &str) -> Result<String> {
    let shown = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::file_unreadable(label, &shown, e))?;

    if content.is_empty() {
        return Err(Error::file_empty(label, &shown));
    }

    tracing::debug!(label, path = %shown, bytes = content.len(), "read input");
    Ok(content)
}
