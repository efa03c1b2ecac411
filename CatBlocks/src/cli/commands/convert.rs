//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! CLI interface for program conversion
use std::path::Path;

use crate::converter::{ConversionOptions, convert_file};

pub fn execute(source: &Path, destination: &Path, options: &ConversionOptions) -> anyhow::Result<()> {
    println!("Converting {} to {}", source.display(), destination.display());

    let conversion = convert_file(source, destination, options)?;

    let stats = conversion.project.stats();
    println!(
        "Converted {} scenes, {} objects, {} scripts, {} bricks",
        stats.scenes, stats.objects, stats.totals.scripts, stats.totals.bricks
    );
    if !conversion.warnings.is_empty() {
        println!("{} warnings:", conversion.warnings.len());
        for warning in &conversion.warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
