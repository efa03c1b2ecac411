//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Classification of script and brick children into fields and branches

use roxmltree::Node;

use super::variable_path::{VariablePath, current_variable_name};
use super::walker::ProjectBuilder;
use crate::error::Warning;
use crate::formats::xml::{child_elements, element_name, leading_text};
use crate::project::{Brick, FieldMap, Formula, MAX_BRICK_DEPTH, MAX_FORMULA_NODES, Script};

/// Field key shared by all dropdown-like values.
pub const DROPDOWN_FIELD: &str = "DROPDOWN";

/// Stored when a text field has no text.
pub const DEFAULT_FIELD_VALUE: &str = "---";

/// Alternative tags for "the dropdown value"; a brick carries at most one.
const DROPDOWN_TAGS: [&str; 5] = [
    "broadcastMessage",
    "spriteToBounceOffName",
    "receivedMessage",
    "sceneToStart",
    "sceneForTransition",
];

/// Text fields stored under their own tag name.
const TEXT_FIELD_TAGS: [&str; 5] = [
    "spinnerSelection",
    "selection",
    "type",
    "alignmentSelection",
    "spinnerSelectionID",
];

/// How a child of a script or brick is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text stored under [`DROPDOWN_FIELD`].
    Dropdown,
    /// Text stored under the given key.
    Text(&'static str),
    /// `formulaMap` / `formulaList`: one reduced formula per `category`.
    Formulas,
    /// `ifBranchBricks` / `loopBricks`: nested bricks for the body.
    Body,
    /// `elseBranchBricks`: nested bricks for the else branch.
    ElseBody,
    /// Referenced sound, stored by name under `sound`.
    Sound,
    /// Referenced look, stored by name under `look`.
    Look,
    /// Variable name, stored under [`DROPDOWN_FIELD`].
    UserVariable,
}

impl FieldKind {
    /// Classifies a child by tag name; `None` for children that are ignored.
    #[must_use]
    pub fn classify(tag: &str) -> Option<Self> {
        if DROPDOWN_TAGS.iter().any(|&t| t == tag) {
            return Some(FieldKind::Dropdown);
        }
        if let Some(&key) = TEXT_FIELD_TAGS.iter().find(|&&key| key == tag) {
            return Some(FieldKind::Text(key));
        }
        match tag {
            "formulaMap" | "formulaList" => Some(FieldKind::Formulas),
            "ifBranchBricks" | "loopBricks" => Some(FieldKind::Body),
            "elseBranchBricks" => Some(FieldKind::ElseBody),
            "sound" => Some(FieldKind::Sound),
            "look" => Some(FieldKind::Look),
            "userVariable" => Some(FieldKind::UserVariable),
            _ => None,
        }
    }
}

/// Which nested brick list a container feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Loop body or if-branch.
    Body,
    /// Else-branch.
    Else,
}

/// Something that collects fields while its children are classified.
pub trait FieldOwner {
    /// Script or brick name, for diagnostics.
    fn name(&self) -> &str;

    /// The owner's field map.
    fn fields_mut(&mut self) -> &mut FieldMap;

    /// The nested brick list for `branch`, if the owner has one.
    fn branch_mut(&mut self, _branch: Branch) -> Option<&mut Vec<Brick>> {
        None
    }
}

impl FieldOwner for Script {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }
}

impl FieldOwner for Brick {
    fn name(&self) -> &str {
        &self.name
    }

    fn fields_mut(&mut self) -> &mut FieldMap {
        &mut self.fields
    }

    fn branch_mut(&mut self, branch: Branch) -> Option<&mut Vec<Brick>> {
        Some(match branch {
            Branch::Body => &mut self.body,
            Branch::Else => &mut self.else_body,
        })
    }
}

/// Text of the first child node, or [`DEFAULT_FIELD_VALUE`] if there is no
/// child or it is not text.
fn text_or_default(node: Node<'_, '_>) -> String {
    leading_text(node).unwrap_or(DEFAULT_FIELD_VALUE).to_string()
}

impl<'a, 'input> ProjectBuilder<'a, 'input> {
    /// Records `child` into `owner` according to its [`FieldKind`].
    pub(super) fn check_usage<O: FieldOwner>(&mut self, child: Node<'a, 'input>, owner: &mut O) {
        let Some(kind) = element_name(child).and_then(FieldKind::classify) else {
            return;
        };

        match kind {
            FieldKind::Dropdown => {
                owner
                    .fields_mut()
                    .insert(DROPDOWN_FIELD.to_string(), text_or_default(child));
            }
            FieldKind::Text(key) => {
                owner
                    .fields_mut()
                    .insert(key.to_string(), text_or_default(child));
            }
            FieldKind::Formulas => {
                for formula in child_elements(child) {
                    let Some(category) = formula.attribute("category") else {
                        tracing::debug!("Skipping formula without category");
                        continue;
                    };
                    match Formula::from_element(formula) {
                        Some(tree) => {
                            owner.fields_mut().insert(category.to_string(), tree.reduce());
                        }
                        None => self.warn(Warning::FormulaTooLarge {
                            category: category.to_string(),
                            limit: MAX_FORMULA_NODES,
                        }),
                    }
                }
            }
            FieldKind::Body | FieldKind::ElseBody => {
                let branch = if kind == FieldKind::Body { Branch::Body } else { Branch::Else };
                let nested: Vec<Node<'a, 'input>> = child_elements(child).collect();
                if nested.is_empty() {
                    return;
                }
                if self.depth >= MAX_BRICK_DEPTH {
                    self.warn(Warning::BrickNestingTooDeep {
                        brick: owner.name().to_string(),
                        limit: MAX_BRICK_DEPTH,
                    });
                    return;
                }
                let bricks: Vec<Brick> = nested.into_iter().map(|brick| self.parse_brick(brick)).collect();
                match owner.branch_mut(branch) {
                    Some(list) => list.extend(bricks),
                    None => tracing::debug!("Ignoring {:?} bricks on an owner without branches", branch),
                }
            }
            FieldKind::Sound | FieldKind::Look => {
                let key = if kind == FieldKind::Sound { "sound" } else { "look" };
                let Some(asset) = self.flat_reference(child) else {
                    return;
                };
                match asset.attribute("name") {
                    Some(name) => {
                        owner.fields_mut().insert(key.to_string(), name.to_string());
                    }
                    None => self.warn(Warning::MissingAssetName { field: key.to_string() }),
                }
            }
            FieldKind::UserVariable => {
                if child.has_children() {
                    if let Some(name) = current_variable_name(child) {
                        owner.fields_mut().insert(DROPDOWN_FIELD.to_string(), name);
                    }
                } else if let Some(reference) = child.attribute("reference") {
                    match VariablePath::parse(reference).resolve(child) {
                        Some(name) => {
                            owner.fields_mut().insert(DROPDOWN_FIELD.to_string(), name);
                        }
                        None => self.warn(Warning::UnresolvedReference {
                            path: reference.to_string(),
                        }),
                    }
                }
            }
        }
    }
}
