//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Catrobat program to block-editor conversion
//!
//! The pipeline for one program:
//! - parse the text into a [`Document`] (or take an existing one)
//! - check the declared language version ([`version`])
//! - walk scenes, objects, scripts and bricks into a [`Project`] ([`ProjectBuilder`])
//! - serialize the project as block-editor XML
//!
//! Every call builds its own output; nothing is shared between conversions.

mod fields;
pub mod variable_path;
pub mod version;
mod walker;

#[cfg(feature = "fetch")]
pub mod fetch;

use std::fs;
use std::path::Path;

use crate::error::{Result, Warning};
use crate::formats::catblocks::{WriteOptions, serialize_catblocks};
use crate::formats::xml::{Document, parse_xml_document};
use crate::project::Project;

pub use fields::{Branch, DEFAULT_FIELD_VALUE, DROPDOWN_FIELD, FieldKind, FieldOwner};
pub use version::{SUPPORTED_LANGUAGE_VERSION, VersionStatus, check_language_version};
pub use walker::ProjectBuilder;

#[cfg(feature = "fetch")]
pub use fetch::{fetch_text, parse_file};

/// Settings for one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionOptions {
    /// Emit the full `<xml>` envelope with scene and object wrappers.
    pub share: bool,
    /// Spaces per nesting level in the output; `0` for a single line.
    pub indent: usize,
    /// Declared versions below this produce [`Warning::UnsupportedVersion`].
    pub min_language_version: f64,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            share: false,
            indent: 2,
            min_language_version: SUPPORTED_LANGUAGE_VERSION,
        }
    }
}

impl ConversionOptions {
    /// Options for sharing a whole program (full envelope).
    #[must_use]
    pub fn share() -> Self {
        ConversionOptions {
            share: true,
            ..Self::default()
        }
    }

    /// The serializer's share of these options.
    #[must_use]
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            share: self.share,
            indent: self.indent,
        }
    }
}

/// Input to [`parse_xml`]: raw text or a document that is already parsed.
#[derive(Debug, Clone, Copy)]
pub enum DocumentSource<'a> {
    /// Program XML as text.
    Text(&'a str),
    /// A document built earlier, for example by [`parse_xml_document`].
    Document(&'a Document<'a>),
}

impl<'a> From<&'a str> for DocumentSource<'a> {
    fn from(text: &'a str) -> Self {
        DocumentSource::Text(text)
    }
}

impl<'a> From<&'a String> for DocumentSource<'a> {
    fn from(text: &'a String) -> Self {
        DocumentSource::Text(text.as_str())
    }
}

impl<'a> From<&'a Document<'a>> for DocumentSource<'a> {
    fn from(doc: &'a Document<'a>) -> Self {
        DocumentSource::Document(doc)
    }
}

/// Result of converting one program.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The intermediate model the output was written from.
    pub project: Project,
    /// Block-editor XML.
    pub xml: String,
    /// Non-fatal problems, in the order they were noticed.
    pub warnings: Vec<Warning>,
}

impl Conversion {
    /// `false` if the version gate raised a warning.
    #[must_use]
    pub fn is_supported_version(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::UnsupportedVersion { .. }))
    }

    /// Parses the generated XML back into a document.
    ///
    /// # Errors
    /// Returns an error if the generated XML cannot be parsed.
    pub fn to_document(&self) -> Result<Document<'_>> {
        parse_xml_document(&self.xml)
    }
}

/// Convert a Catrobat program to block-editor XML
///
/// # Errors
/// Returns an error if the text is not well-formed XML or the program has no
/// scene list. An outdated or missing language version is only a warning.
pub fn parse_xml<'a>(source: impl Into<DocumentSource<'a>>, options: &ConversionOptions) -> Result<Conversion> {
    match source.into() {
        DocumentSource::Text(text) => {
            let doc = parse_xml_document(text)?;
            parse_document(&doc, options)
        }
        DocumentSource::Document(doc) => parse_document(doc, options),
    }
}

/// Convert an already-parsed program
///
/// # Errors
/// Returns an error if the program has no scene list.
pub fn parse_document(doc: &Document<'_>, options: &ConversionOptions) -> Result<Conversion> {
    let mut builder = ProjectBuilder::new(doc);

    let status = check_language_version(doc, options.min_language_version);
    if !status.is_supported() {
        builder.warn(Warning::UnsupportedVersion {
            found: status.declared().map(str::to_string),
            minimum: options.min_language_version,
        });
    }

    let project = builder.build()?;
    let xml = serialize_catblocks(&project, &options.write_options())?;
    Ok(Conversion {
        project,
        xml,
        warnings: builder.into_warnings(),
    })
}

/// Like [`parse_xml`], but logs a failure and returns `None` instead.
#[must_use]
pub fn try_parse_xml<'a>(source: impl Into<DocumentSource<'a>>, options: &ConversionOptions) -> Option<Conversion> {
    match parse_xml(source, options) {
        Ok(conversion) => Some(conversion),
        Err(err) => {
            tracing::error!("Conversion failed: {}", err);
            None
        }
    }
}

/// Convert a program file on disk
///
/// # Errors
/// Returns an error if reading, conversion or writing fails.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
    options: &ConversionOptions,
) -> Result<Conversion> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    tracing::info!("Converting {:?} -> {:?}", source, dest);

    let text = fs::read_to_string(source)?;
    let conversion = parse_xml(text.as_str(), options)?;
    fs::write(dest, &conversion.xml)?;

    tracing::info!(
        "Wrote {} scenes with {} warnings",
        conversion.project.scenes.len(),
        conversion.warnings.len()
    );
    Ok(conversion)
}
