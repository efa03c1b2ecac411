//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Error and warning types for `CatBlocks`

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The error type for `CatBlocks` operations.
///
/// Only conditions that make the whole conversion meaningless end up here.
/// Anything that merely degrades the output is a [`Warning`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Parsing Errors ====================
    /// The input is not well-formed XML.
    #[error("malformed XML: {message}")]
    MalformedXml {
        /// Description of what is malformed.
        message: String,
    },

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// The program has neither a `scenes` element nor top-level `scene` elements.
    #[error("program has no readable scene list")]
    MissingSceneList,

    // ==================== Fetch Errors ====================
    /// Retrieving a program by URI failed.
    #[error("failed to fetch {uri}: {message}")]
    Fetch {
        /// The URI that could not be retrieved.
        uri: String,
        /// The underlying failure.
        message: String,
    },

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("invalid config {path}: {message}")]
    Config {
        /// Path of the offending file (empty for in-memory sources).
        path: PathBuf,
        /// The TOML parser message.
        message: String,
    },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedXml {
            message: err.to_string(),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::MalformedXml {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for `CatBlocks` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A non-fatal problem noticed while converting a program.
///
/// The conversion still produces output; the affected node or field is left
/// out of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// The declared language version is missing or older than supported.
    UnsupportedVersion {
        /// Text of the version tag, if there was one.
        found: Option<String>,
        /// The minimum version the converter was configured with.
        minimum: f64,
    },
    /// A `reference` path did not lead to a node.
    UnresolvedReference {
        /// The reference expression as written in the document.
        path: String,
    },
    /// An object was dropped from its scene.
    SkippedObject {
        /// Name of the scene the object belonged to.
        scene: String,
        /// 1-based position of the object inside the scene's object list.
        position: usize,
    },
    /// A `look` or `sound` field pointed at an asset without a name.
    MissingAssetName {
        /// The field that was left unset.
        field: String,
    },
    /// Bricks nested below the depth limit were dropped.
    BrickNestingTooDeep {
        /// Name of the brick whose nested bricks were dropped.
        brick: String,
        /// The nesting limit.
        limit: usize,
    },
    /// A formula with too many nodes was left out.
    FormulaTooLarge {
        /// The formula's category, which stays unset.
        category: String,
        /// The node limit.
        limit: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnsupportedVersion { found: Some(found), minimum } => write!(
                f,
                "unsupported language version {found} (minimum {minimum}), some issues could occur"
            ),
            Warning::UnsupportedVersion { found: None, .. } => {
                write!(f, "no language version declared, some issues could occur")
            }
            Warning::UnresolvedReference { path } => write!(f, "unresolved reference: {path}"),
            Warning::SkippedObject { scene, position } => {
                write!(f, "skipped object #{position} in scene '{scene}'")
            }
            Warning::MissingAssetName { field } => write!(f, "{field} reference has no name"),
            Warning::BrickNestingTooDeep { brick, limit } => {
                write!(f, "bricks nested in {brick} exceed depth {limit} and were dropped")
            }
            Warning::FormulaTooLarge { category, limit } => {
                write!(f, "formula {category} has more than {limit} nodes and was dropped")
            }
        }
    }
}
