//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT

fn main() -> anyhow::Result<()> {
    catblocks::cli::run_cli()
}
