//! Secret file access and masking.
//!
//! The secret is a single pre-provisioned value read from a file on every
//! request. Its absence is the normal state in development and is reported as
//! `SecretValue::Absent`, not as an error. Any other read failure is returned
//! as `SecretError` so callers can tell a misconfigured deployment apart from
//! an unconfigured one.
//!
//! The raw value never leaves this module except through [`SecretValue::preview`],
//! which exposes at most a fixed number of leading characters.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{PREVIEW_NOT_SET, PREVIEW_TRUNCATION_MARKER};

/// Outcome of reading the secret file.
#[derive(Clone, PartialEq, Eq)]
pub enum SecretValue {
    Present(String),
    Absent,
}

impl SecretValue {
    pub fn is_present(&self) -> bool {
        matches!(self, SecretValue::Present(_))
    }

    /// Masked preview safe for display.
    ///
    /// Shows the first `visible_chars` characters followed by `...`. Secrets
    /// shorter than that are shown whole, still followed by `...`.
    /// Characters are counted as Unicode scalar values, so multi-byte secrets
    /// are never split mid-character.
    pub fn preview(&self, visible_chars: usize) -> String {
        match self {
            SecretValue::Absent => PREVIEW_NOT_SET.to_string(),
            SecretValue::Present(value) => {
                let mut preview: String = value.chars().take(visible_chars).collect();
                preview.push_str(PREVIEW_TRUNCATION_MARKER);
                preview
            }
        }
    }
}

// Never print the value, not even at trace level.
impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Present(_) => f.write_str("Present(<redacted>)"),
            SecretValue::Absent => f.write_str("Absent"),
        }
    }
}

/// The secret file exists but could not be read.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("Failed to read secret file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the secret from a fixed path. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SecretReader {
    path: PathBuf,
}

impl SecretReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the secret, trimming surrounding whitespace.
    ///
    /// Returns `Ok(Absent)` when the file does not exist. Permission errors,
    /// non-UTF-8 contents and other I/O faults are returned as `SecretError`.
    pub async fn read(&self) -> Result<SecretValue, SecretError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(SecretValue::Present(contents.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(SecretValue::Absent),
            Err(source) => Err(SecretError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
