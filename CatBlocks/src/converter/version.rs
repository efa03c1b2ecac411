//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Language version gate

use crate::formats::xml::{Document, find_descendant, text_content};

/// Oldest `catrobatLanguageVersion` the converter is known to handle.
pub const SUPPORTED_LANGUAGE_VERSION: f64 = 0.994;

/// Tag holding the declared language version.
pub const VERSION_TAG: &str = "catrobatLanguageVersion";

/// Outcome of checking a document's declared language version.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionStatus {
    /// Declared and at least the minimum.
    Supported(String),
    /// Declared but older than the minimum.
    Outdated(String),
    /// Declared but not a number.
    Unreadable(String),
    /// No version tag in the document.
    Missing,
}

impl VersionStatus {
    /// Whether output can be trusted.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, VersionStatus::Supported(_))
    }

    /// The declared version text, if any.
    #[must_use]
    pub fn declared(&self) -> Option<&str> {
        match self {
            VersionStatus::Supported(v) | VersionStatus::Outdated(v) | VersionStatus::Unreadable(v) => {
                Some(v.as_str())
            }
            VersionStatus::Missing => None,
        }
    }
}

/// Text of the first version tag, trimmed.
#[must_use]
pub fn declared_version(doc: &Document<'_>) -> Option<String> {
    find_descendant(doc.root(), VERSION_TAG).map(|tag| text_content(tag).trim().to_string())
}

/// Compares the declared version against `minimum`.
#[must_use]
pub fn check_language_version(doc: &Document<'_>, minimum: f64) -> VersionStatus {
    let Some(declared) = declared_version(doc) else {
        return VersionStatus::Missing;
    };
    match declared.parse::<f64>() {
        Ok(version) if version >= minimum => VersionStatus::Supported(declared),
        Ok(_) => VersionStatus::Outdated(declared),
        Err(_) => VersionStatus::Unreadable(declared),
    }
}
