//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! In-memory program model
//!
//! The walker fills these types from a Catrobat document, the serializer
//! reads them back out. Each conversion builds its own [`Project`].

pub mod formula;
mod stats;
mod types;

pub use formula::{Formula, MAX_FORMULA_NODES, NOT_SET};
pub use stats::{ObjectStats, ProjectStats};
pub use types::{Brick, EMPTY_BLOCK_NAME, FieldMap, MAX_BRICK_DEPTH, File, Project, Scene, SceneObject, Script, escape_name};
