//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Block-editor XML dialect
//!
//! Elements: `<xml>`, `<scene type>`, `<object type [look]>`,
//! `<script type>`, `<block type id x y>`, `<field name>`, `<next>` and
//! `<statement name="SUBSTACK"|"SUBSTACK2">`.

mod reader;
mod writer;

pub use reader::{parse_catblocks, read_catblocks};
pub use writer::{SUBSTACK, SUBSTACK2, WriteOptions, XML_NAMESPACE, serialize_catblocks, write_catblocks};
