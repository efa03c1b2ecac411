//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT

use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::CatblocksConfig;
use crate::converter::ConversionOptions;

pub mod convert;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Catrobat program to block-editor XML
    Convert {
        /// Source program XML
        #[arg(short, long)]
        source: PathBuf,

        /// Destination file
        #[arg(short, long)]
        destination: PathBuf,

        /// Write the full envelope with scene and object wrappers
        #[arg(long)]
        share: bool,

        /// Settings file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the parsed program and its statistics as JSON
    Inspect {
        /// Source program XML
        #[arg(short, long)]
        source: PathBuf,

        /// Settings file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Fetch a program by URI and convert it
    #[cfg(feature = "fetch")]
    Fetch {
        /// URL or path of the program
        #[arg(short, long)]
        uri: String,

        /// Destination file (stdout if omitted)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Settings file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the selected command.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
                share,
                config,
            } => {
                let mut options = load_options(config.as_deref())?;
                options.share |= *share;
                convert::execute(source, destination, &options)
            }
            Commands::Inspect { source, config } => {
                inspect::execute(source, &load_options(config.as_deref())?)
            }
            #[cfg(feature = "fetch")]
            Commands::Fetch {
                uri,
                destination,
                config,
            } => fetch::execute(uri, destination.as_deref(), &load_options(config.as_deref())?),
        }
    }
}

fn load_options(config: Option<&Path>) -> anyhow::Result<ConversionOptions> {
    match config {
        Some(path) => Ok(CatblocksConfig::load(path)?.conversion_options()),
        None => Ok(ConversionOptions::default()),
    }
}
