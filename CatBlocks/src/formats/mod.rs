//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! File format handlers
//!
//! - [`xml`]: `roxmltree` helpers for the trees both dialects are read into
//! - [`catblocks`]: the block-editor dialect written as output

pub mod catblocks;
pub mod xml;

// Re-export main document types
pub use catblocks::{WriteOptions, parse_catblocks, serialize_catblocks, write_catblocks};
pub use xml::{Document, Node, parse_xml_document};
