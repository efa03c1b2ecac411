//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Location-path subset of XPath used by Catrobat `reference` attributes
//!
//! Supported syntax: absolute (`/a/b`) and relative (`../../a/b[2]`) paths
//! made of `..`, `.`, element names, `*`, and a 1-based numeric position
//! predicate on name or wildcard steps. The first match in document order is
//! returned, like `XPathResult.iterateNext()` would.

use std::str::FromStr;

use roxmltree::Node;

use super::{child_elements, is_element_named};

/// One step of a location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `..`
    Parent,
    /// `.`
    Current,
    /// `name`, `*`, optionally with a `[n]` position.
    Child {
        /// Tag name to match; `None` for `*`.
        name: Option<String>,
        /// 1-based position among the matching siblings.
        position: Option<usize>,
    },
}

/// A parsed location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPath {
    /// Whether evaluation starts at the document node.
    pub absolute: bool,
    /// Steps in evaluation order.
    pub steps: Vec<Step>,
}

/// Returned when a path uses syntax outside the supported subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedPath(pub String);

impl FromStr for LocationPath {
    type Err = UnsupportedPath;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(UnsupportedPath(path.to_string()));
        }
        let (absolute, body) = match trimmed.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut steps = Vec::new();
        for segment in body.split('/') {
            steps.push(parse_step(segment).ok_or_else(|| UnsupportedPath(path.to_string()))?);
        }
        Ok(LocationPath { absolute, steps })
    }
}

fn parse_step(segment: &str) -> Option<Step> {
    match segment {
        ".." => return Some(Step::Parent),
        "." => return Some(Step::Current),
        "" => return None,
        _ => {}
    }

    let (name, position) = match segment.find('[') {
        Some(open) => {
            let inner = segment[open + 1..].strip_suffix(']')?;
            let position: usize = inner.trim().parse().ok()?;
            if position == 0 {
                return None;
            }
            (&segment[..open], Some(position))
        }
        None => (segment, None),
    };

    let name = match name {
        "*" => None,
        n if is_name(n) => Some(n.to_string()),
        _ => return None,
    };
    Some(Step::Child { name, position })
}

fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl LocationPath {
    /// Evaluates the path from `context` and returns every match in
    /// document order.
    #[must_use]
    pub fn evaluate_all<'a, 'input>(&self, context: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
        let start = if self.absolute { context.document().root() } else { context };
        let mut current = vec![start];

        for step in &self.steps {
            let mut next: Vec<Node<'a, 'input>> = Vec::new();
            for &node in &current {
                match step {
                    Step::Parent => next.extend(node.parent()),
                    Step::Current => next.push(node),
                    Step::Child { name, position } => {
                        let matching = child_elements(node)
                            .filter(|&child| name.as_deref().is_none_or(|n| is_element_named(child, n)));
                        match position {
                            Some(p) => next.extend(matching.skip(p - 1).take(1)),
                            None => next.extend(matching),
                        }
                    }
                }
            }
            next.sort_unstable_by_key(|node| node.id().get());
            next.dedup_by_key(|node| node.id());
            if next.is_empty() {
                return next;
            }
            current = next;
        }

        current
    }

    /// First match in document order.
    #[must_use]
    pub fn evaluate<'a, 'input>(&self, context: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        self.evaluate_all(context).into_iter().next()
    }
}

/// Parse and evaluate `path` relative to `context`.
///
/// Returns `None` both for unsupported syntax and for paths that match
/// nothing.
#[must_use]
pub fn evaluate_path<'a, 'input>(context: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.parse::<LocationPath>().ok()?.evaluate(context)
}
