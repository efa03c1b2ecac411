//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT

use roxmltree::{Document, ParsingOptions};

use crate::error::Result;

/// Parse an XML string into a document tree
///
/// Whitespace text and comments are preserved as child nodes and a DOCTYPE
/// is accepted. The tree borrows from `content`.
///
/// # Errors
/// Returns [`crate::Error::MalformedXml`] if the text is not well-formed or
/// has more than one top-level element.
pub fn parse_xml_document(content: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(content, options)?)
}
