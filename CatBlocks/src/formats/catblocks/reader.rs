//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Structural reading of block-editor XML back into a [`Project`]
//!
//! Accepts both the enveloped (`<xml><scene><object>…`) and the fragment
//! (bare `<script>` elements) forms. Fragments are collected into one
//! unnamed scene holding one unnamed object. Attributes the editor fills in
//! (`id`, `x`, `y`) are ignored, as is the object thumbnail's look name.

use roxmltree::{Document, Node};

use crate::error::Result;
use crate::formats::xml::{children_named, first_child_named, is_element_named, parse_xml_document, text_content};
use crate::project::{Brick, FieldMap, File, MAX_BRICK_DEPTH, Project, Scene, SceneObject, Script};

use super::writer::{SUBSTACK, SUBSTACK2};

/// Element the input is wrapped in, so that fragments with several
/// top-level `<script>` elements parse as one document.
const FRAGMENT_ROOT: &str = "catblocks";

/// Parse block-editor XML into a project
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_catblocks(content: &str) -> Result<Project> {
    let wrapped = wrap_fragment(content);
    let doc = parse_xml_document(&wrapped)?;
    Ok(read_catblocks(&doc))
}

fn wrap_fragment(content: &str) -> String {
    let body = content.trim_start();
    let body = match body.strip_prefix("<?xml") {
        Some(rest) => rest.find("?>").map_or(body, |end| &rest[end + 2..]),
        None => body,
    };
    format!("<{FRAGMENT_ROOT}>{body}</{FRAGMENT_ROOT}>")
}

/// Read a project from an already-parsed block-editor document.
///
/// The scenes or scripts are looked for below an `<xml>` element directly
/// under the root, else directly under the root element.
#[must_use]
pub fn read_catblocks(doc: &Document<'_>) -> Project {
    let root = doc.root_element();
    let top = if is_element_named(root, "xml") {
        root
    } else {
        first_child_named(root, "xml").unwrap_or(root)
    };

    let mut project = Project::default();
    for scene in children_named(top, "scene") {
        let mut current = Scene::new(scene.attribute("type").unwrap_or_default());
        current.objects = children_named(scene, "object").map(read_object).collect();
        project.scenes.push(current);
    }

    let loose_scripts: Vec<Script> = children_named(top, "script").map(read_script).collect();
    if !loose_scripts.is_empty() {
        let object = SceneObject {
            scripts: loose_scripts,
            ..SceneObject::default()
        };
        project.scenes.push(Scene {
            objects: vec![object],
            ..Scene::default()
        });
    }

    project
}

fn read_object(node: Node<'_, '_>) -> SceneObject {
    let mut object = SceneObject::new(node.attribute("type").unwrap_or_default());
    if let Some(look) = node.attribute("look") {
        object.looks.push(File::new(None, Some(look.to_string())));
    }
    object.scripts = children_named(node, "script").map(read_script).collect();
    object
}

fn read_script(node: Node<'_, '_>) -> Script {
    let mut script = Script::new(node.attribute("type").unwrap_or_default());
    if let Some(hat) = first_child_named(node, "block") {
        read_fields(hat, &mut script.fields);
        script.bricks = read_chain(next_block(hat), 1);
    }
    script
}

fn next_block<'a, 'input>(block: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    first_child_named(block, "next").and_then(|next| first_child_named(next, "block"))
}

fn read_chain(first: Option<Node<'_, '_>>, depth: usize) -> Vec<Brick> {
    let mut bricks = Vec::new();
    let mut current = first;
    while let Some(block) = current {
        let mut brick = Brick::new(block.attribute("type").unwrap_or_default());
        read_fields(block, &mut brick.fields);
        for statement in children_named(block, "statement") {
            if depth >= MAX_BRICK_DEPTH {
                tracing::warn!("Dropping statements of {} nested deeper than {}", brick.name, MAX_BRICK_DEPTH);
                break;
            }
            let first = first_child_named(statement, "block");
            match statement.attribute("name") {
                Some(SUBSTACK) => brick.body = read_chain(first, depth + 1),
                Some(SUBSTACK2) => brick.else_body = read_chain(first, depth + 1),
                _ => {}
            }
        }
        bricks.push(brick);
        current = next_block(block);
    }
    bricks
}

fn read_fields(block: Node<'_, '_>, fields: &mut FieldMap) {
    for field in children_named(block, "field") {
        if let Some(name) = field.attribute("name") {
            fields.insert(name.to_string(), text_content(field));
        }
    }
}
