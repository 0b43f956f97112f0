//! Asking the operator for missing paths

use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::common::{Error, Result};

pub struct Prompter {
    enabled: bool,
}

impl Prompter {
    /// Prompts only happen when enabled in settings and stdin is a terminal.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: enabled && std::io::stdin().is_terminal(),
        }
    }

    /// Ask for the path labelled `label` on stdin.
    pub async fn path(&self, label: &'static str) -> Result<PathBuf> {
        let mut stdin = BufReader::new(tokio::io::stdin());
        self.path_from(label, &mut stdin).await
    }

    async fn path_from<R>(&self, label: &'static str, reader: &mut R) -> Result<PathBuf>
    where
        R: AsyncBufRead + Unpin,
    {
        if !self.enabled {
            return Err(Error::InputMissing(label));
        }

        print!("{} ", format!("{label} Path:").cyan().bold());
        std::io::stdout()
            .flush()
            .map_err(|e| Error::Prompt(e.to_string()))?;

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .await
            .map_err(|e| Error::Prompt(e.to_string()))?;

        match line.trim() {
            "" => Err(Error::InputMissing(label)),
            answer => Ok(PathBuf::from(answer)),
        }
    }
}
