//! Manifest loading.
//!
//! The manifest is the JSON array of command records produced by the
//! command-description generator. It is read in full before anything is
//! built from it.

use std::io::{BufReader, Read};
use std::path::Path;

use command_api_core::CommandSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Complete list of raw command records, in generator order.
///
/// # Examples
///
/// ```
/// use command_api_docgen::manifest::Manifest;
///
/// let manifest = Manifest::from_json_str(
///     r#"[{"sig": ["mon", "stat"], "desc": "summarize monitor status"}]"#,
/// ).unwrap();
/// assert_eq!(manifest.len(), 1);
///
/// assert!(Manifest::from_json_str(r#"[{"sig": ["mon", "stat"]}]"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Raw command records.
    pub commands: Vec<CommandSpec>,
}

impl Manifest {
    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](crate::DocgenError::JsonError) when the text is
    /// not a well-formed manifest.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(raw)?;
        debug!(commands = manifest.len(), bytes = raw.len(), "Parsed manifest");
        Ok(manifest)
    }

    /// Parses a manifest from a reader, e.g. standard input.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](crate::DocgenError::JsonError) when the input is
    /// not a well-formed manifest.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let manifest: Self = serde_json::from_reader(BufReader::new(reader))?;
        debug!(commands = manifest.len(), "Parsed manifest");
        Ok(manifest)
    }

    /// Loads a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DocgenError::IoError) if the file cannot
    /// be opened, or [`JsonError`](crate::DocgenError::JsonError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading manifest");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Returns the number of command records.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when the manifest holds no records.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for Manifest {
    type Item = CommandSpec;
    type IntoIter = std::vec::IntoIter<CommandSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
