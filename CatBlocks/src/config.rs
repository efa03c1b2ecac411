//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Converter settings loaded from TOML
//!
//! ```toml
//! share = true
//! indent = 4
//! min_language_version = 0.994
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::converter::{ConversionOptions, SUPPORTED_LANGUAGE_VERSION};
use crate::error::{Error, Result};

/// Settings file contents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatblocksConfig {
    /// Emit the full `<xml>` envelope.
    pub share: bool,
    /// Spaces per nesting level in the output.
    pub indent: usize,
    /// Oldest language version converted without a warning.
    pub min_language_version: f64,
}

impl Default for CatblocksConfig {
    fn default() -> Self {
        CatblocksConfig {
            share: false,
            indent: 2,
            min_language_version: SUPPORTED_LANGUAGE_VERSION,
        }
    }
}

impl CatblocksConfig {
    /// Load settings from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML or has unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// The settings as conversion options.
    #[must_use]
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            share: self.share,
            indent: self.indent,
            min_language_version: self.min_language_version,
        }
    }
}
