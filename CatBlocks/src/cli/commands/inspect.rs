//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! CLI interface for inspecting the parsed program
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::converter::{ConversionOptions, parse_xml};
use crate::error::Warning;
use crate::project::{Project, ProjectStats};

#[derive(Serialize)]
struct Report<'a> {
    project: &'a Project,
    stats: ProjectStats,
    warnings: &'a [Warning],
}

pub fn execute(source: &Path, options: &ConversionOptions) -> anyhow::Result<()> {
    let text = fs::read_to_string(source)?;
    let conversion = parse_xml(text.as_str(), options)?;

    let report = Report {
        project: &conversion.project,
        stats: conversion.project.stats(),
        warnings: &conversion.warnings,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
