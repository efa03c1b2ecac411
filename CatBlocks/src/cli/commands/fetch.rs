//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! CLI interface for fetching and converting a program by URI
use std::fs;
use std::path::Path;

use crate::converter::{ConversionOptions, parse_file};

pub fn execute(uri: &str, destination: Option<&Path>, options: &ConversionOptions) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let Some(conversion) = runtime.block_on(parse_file(uri, options)) else {
        anyhow::bail!("No result for {uri}");
    };

    match destination {
        Some(path) => {
            fs::write(path, &conversion.xml)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", conversion.xml),
    }

    Ok(())
}
