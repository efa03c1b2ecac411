//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Intermediate program model shared by the walker and the serializer

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to value, in first-discovery order.
///
/// Re-inserting an existing key updates the value but keeps its position.
pub type FieldMap = IndexMap<String, String>;

/// Name given to bricks whose type cannot be determined.
pub const EMPTY_BLOCK_NAME: &str = "emptyBlockName";

/// Deepest brick nesting kept; bricks below it are dropped.
pub const MAX_BRICK_DEPTH: usize = 128;

/// A parsed Catrobat program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Declared `catrobatLanguageVersion`, verbatim.
    pub version: Option<String>,
    /// Scenes in document order.
    pub scenes: Vec<Scene>,
}

/// One stage of a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name with `&` removed.
    pub name: String,
    /// Objects in document order.
    pub objects: Vec<SceneObject>,
}

/// A sprite with its assets and scripts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name with `&` removed.
    pub name: String,
    /// Look (costume) files.
    pub looks: Vec<File>,
    /// Sound files.
    pub sounds: Vec<File>,
    /// Event scripts.
    pub scripts: Vec<Script>,
}

/// A media asset referenced by an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Display name.
    pub name: Option<String>,
    /// File name inside the program archive.
    pub file_name: Option<String>,
}

/// An event handler and the bricks it runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script type, e.g. `StartScript`.
    pub name: String,
    /// Top-level bricks in execution order.
    pub bricks: Vec<Brick>,
    /// Field values shown on the hat block.
    pub fields: FieldMap,
}

/// One statement, possibly holding nested statement lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Brick type with any trailing qualifier stripped.
    pub name: String,
    /// Field values.
    pub fields: FieldMap,
    /// Loop body or if-branch.
    pub body: Vec<Brick>,
    /// Else-branch.
    pub else_body: Vec<Brick>,
}

impl Project {
    /// Iterates over every object of every scene.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.scenes.iter().flat_map(|scene| scene.objects.iter())
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Scene {
            name: name.into(),
            objects: Vec::new(),
        }
    }
}

impl SceneObject {
    /// Creates an object without assets or scripts.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        SceneObject {
            name: name.into(),
            ..SceneObject::default()
        }
    }

    /// File name of the first look, used as the object's thumbnail.
    #[must_use]
    pub fn preview_look(&self) -> Option<&str> {
        self.looks.first().and_then(|look| look.file_name.as_deref())
    }
}

impl File {
    /// Creates a file entry.
    #[must_use]
    pub fn new(name: Option<String>, file_name: Option<String>) -> Self {
        File { name, file_name }
    }
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Script {
            name: name.into(),
            ..Script::default()
        }
    }
}

impl Brick {
    /// Creates a brick with no fields and no nested bricks.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Brick {
            name: name.into(),
            ..Brick::default()
        }
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Derives the effective brick name from a raw `type` attribute.
    ///
    /// The name is the first run of ASCII letters, so `IfLogicBeginBrick_legacy`
    /// becomes `IfLogicBeginBrick`. A missing attribute or one without any
    /// letters yields [`EMPTY_BLOCK_NAME`].
    #[must_use]
    pub fn effective_name(raw_type: Option<&str>) -> String {
        let Some(raw) = raw_type else {
            return EMPTY_BLOCK_NAME.to_string();
        };
        let letters: String = raw
            .chars()
            .skip_while(|c| !c.is_ascii_alphabetic())
            .take_while(char::is_ascii_alphabetic)
            .collect();
        if letters.is_empty() {
            EMPTY_BLOCK_NAME.to_string()
        } else {
            letters
        }
    }
}

/// Removes characters that are not allowed in emitted names.
#[must_use]
pub fn escape_name(name: &str) -> String {
    name.replace('&', "")
}
