//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Resolution of `userVariable` reference paths
//!
//! Variable references use a narrower grammar than the object and asset
//! references handled by [`crate::formats::xml::xpath`]:
//!
//! ```text
//! path   := step*
//! step   := "../"
//!         | "userVariable" ...                  (terminal)
//!         | "ifBranchBricks/brick" index? "/"?
//!         | "elseBranchBricks/brick" index? "/"?
//!         | "brickList/brick" index? "/"?
//!         | "script" index? "/"?
//! index  := "[" digits "]"                      (1-based, default 1)
//! ```
//!
//! Indexed steps pick a node from the raw child-node list of the container,
//! where every element is preceded by a whitespace text node, so element `n`
//! sits at slot `n * 2 - 1`.

use roxmltree::Node;

use crate::formats::xml::{children_named, first_child_named, text_content};

const PARENT: &str = "../";
const USER_VARIABLE: &str = "userVariable";
const IF_BRANCH_BRICK: &str = "ifBranchBricks/brick";
const ELSE_BRANCH_BRICK: &str = "elseBranchBricks/brick";
const BRICK_LIST_BRICK: &str = "brickList/brick";
const SCRIPT: &str = "script";

/// Child-node slots taken by one element (itself plus the text before it).
const SLOTS_PER_ELEMENT: usize = 2;

/// Container element an indexed brick step descends through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickContainer {
    /// `ifBranchBricks`
    IfBranch,
    /// `elseBranchBricks`
    ElseBranch,
    /// `brickList`
    BrickList,
}

impl BrickContainer {
    /// Tag name of the container element.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            BrickContainer::IfBranch => "ifBranchBricks",
            BrickContainer::ElseBranch => "elseBranchBricks",
            BrickContainer::BrickList => "brickList",
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            BrickContainer::IfBranch => IF_BRANCH_BRICK,
            BrickContainer::ElseBranch => ELSE_BRANCH_BRICK,
            BrickContainer::BrickList => BRICK_LIST_BRICK,
        }
    }
}

/// One token of a variable reference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Move to the parent element.
    Parent,
    /// Read the variable name from a `userVariable` child; ends the path.
    UserVariable,
    /// Descend into `container`, then to its `position`-th brick.
    Brick {
        /// Which container element to enter.
        container: BrickContainer,
        /// 1-based brick position.
        position: usize,
    },
    /// Jump to the `position`-th script of the current script list.
    Script {
        /// 1-based script position.
        position: usize,
    },
    /// Anything else; resolution stops without a result.
    Unknown(String),
}

/// A tokenized variable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePath {
    steps: Vec<PathStep>,
}

/// Slot in a raw child-node list holding the `position`-th element.
///
/// `None` for position 0 and for positions whose slot does not fit in a
/// `usize`.
#[must_use]
pub fn sibling_slot(position: usize) -> Option<usize> {
    position.checked_mul(SLOTS_PER_ELEMENT)?.checked_sub(1)
}

/// Splits an optional `[n]` index and the following `/` off `rest`.
///
/// Returns `None` when what follows the keyword is neither an index, a
/// separator nor the end of the path.
fn take_index(rest: &str) -> Option<(usize, &str)> {
    let (position, rest) = match rest.strip_prefix('[') {
        Some(inner) => {
            let close = inner.find(']')?;
            let position: usize = inner[..close].parse().ok()?;
            (position, &inner[close + 1..])
        }
        None => (1, rest),
    };
    if position == 0 {
        return None;
    }
    match rest.strip_prefix('/') {
        Some(after) => Some((position, after)),
        None if rest.is_empty() => Some((position, rest)),
        None => None,
    }
}

impl VariablePath {
    /// Tokenizes a reference. Tokenizing stops after a terminal or
    /// unrecognized step.
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let mut steps = Vec::new();
        let mut rest = reference.trim();

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix(PARENT) {
                steps.push(PathStep::Parent);
                rest = after;
                continue;
            }
            if rest.starts_with(USER_VARIABLE) {
                steps.push(PathStep::UserVariable);
                break;
            }

            let container = [
                BrickContainer::IfBranch,
                BrickContainer::ElseBranch,
                BrickContainer::BrickList,
            ]
            .into_iter()
            .find(|c| rest.starts_with(c.keyword()));

            let parsed = if let Some(container) = container {
                take_index(&rest[container.keyword().len()..])
                    .map(|(position, after)| (PathStep::Brick { container, position }, after))
            } else if let Some(after_keyword) = rest.strip_prefix(SCRIPT) {
                take_index(after_keyword).map(|(position, after)| (PathStep::Script { position }, after))
            } else {
                None
            };

            match parsed {
                Some((step, after)) => {
                    steps.push(step);
                    rest = after;
                }
                None => {
                    steps.push(PathStep::Unknown(rest.to_string()));
                    break;
                }
            }
        }

        VariablePath { steps }
    }

    /// The parsed steps.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Walks the steps from `start` and returns the variable name found at
    /// the terminal step.
    ///
    /// Returns `None` if a step leaves the tree, an unknown step is reached,
    /// or the path ends without a `userVariable` step.
    #[must_use]
    pub fn resolve(&self, start: Node<'_, '_>) -> Option<String> {
        let mut node = start;
        for step in &self.steps {
            match step {
                PathStep::Parent => node = node.parent_element()?,
                PathStep::UserVariable => {
                    return children_named(node, USER_VARIABLE)
                        .filter_map(current_variable_name)
                        .last();
                }
                PathStep::Brick { container, position } => {
                    let list = first_child_named(node, container.tag())?;
                    node = list.children().nth(sibling_slot(*position)?)?;
                }
                PathStep::Script { position } => {
                    node = node.children().nth(sibling_slot(*position)?)?;
                }
                PathStep::Unknown(rest) => {
                    tracing::debug!("Unsupported variable reference step: {}", rest);
                    return None;
                }
            }
        }
        None
    }
}

/// Reads an inline variable definition: `userVariable/default/name` below
/// `field`. The last match wins.
#[must_use]
pub fn current_variable_name(field: Node<'_, '_>) -> Option<String> {
    children_named(field, USER_VARIABLE)
        .flat_map(|variable| children_named(variable, "default"))
        .flat_map(|default| children_named(default, "name"))
        .map(text_content)
        .last()
}
