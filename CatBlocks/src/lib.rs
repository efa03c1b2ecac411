//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! # catblocks
//!
//! Converts Catrobat (Pocket Code) programs into the XML dialect of the
//! block editor that renders them.
//!
//! ## Quick Start
//!
//! ```
//! use catblocks::converter::{ConversionOptions, parse_xml};
//!
//! let program = r#"<program>
//!   <header><catrobatLanguageVersion>0.994</catrobatLanguageVersion></header>
//!   <scenes><scene><name>Main</name><objectList>
//!     <object name="Cat"><scriptList>
//!       <script type="StartScript"><brickList><brick type="HideBrick"/></brickList></script>
//!     </scriptList></object>
//!   </objectList></scene></scenes>
//! </program>"#;
//!
//! let conversion = parse_xml(program, &ConversionOptions::share())?;
//! assert!(conversion.is_supported_version());
//! assert!(conversion.xml.contains(r#"<block type="HideBrick" id="" x="" y="">"#));
//! # Ok::<(), catblocks::Error>(())
//! ```
//!
//! ### Fetching Programs
//!
//! ```no_run
//! # async fn run() {
//! use catblocks::converter::{ConversionOptions, parse_file};
//!
//! // `None` when the program cannot be retrieved or converted
//! if let Some(conversion) = parse_file("https://example.org/code.xml", &ConversionOptions::default()).await {
//!     println!("{}", conversion.xml);
//! }
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `catblocks` command-line binary
//! - `fetch` - Enables retrieving programs by URI

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod project;

// Re-exports for convenience
pub use error::{Error, Result, Warning};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::CatblocksConfig;
    pub use crate::error::{Error, Result, Warning};
    pub use crate::formats::catblocks::{WriteOptions, parse_catblocks, serialize_catblocks};
    pub use crate::formats::xml::{Document, parse_xml_document};
    pub use crate::project::{Brick, Formula, Project, Scene, SceneObject, Script};

    pub use crate::converter::{
        Conversion, ConversionOptions, DocumentSource, ProjectBuilder,
        convert_file, parse_document, parse_xml, try_parse_xml,
    };
    #[cfg(feature = "fetch")]
    pub use crate::converter::parse_file;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
