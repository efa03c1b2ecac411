//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! XML document trees
//!
//! Both dialects handled by this crate are read into a [`roxmltree::Document`]:
//! Catrobat program files on the way in, block-editor output when it is read
//! back. The helpers here match elements by local name only, so the
//! block editor's default namespace does not get in the way.

mod reader;
pub mod xpath;

pub use reader::parse_xml_document;
pub use roxmltree::{Document, Node};
pub use xpath::{LocationPath, evaluate_path};

/// Tag name of `node` if it is an element.
#[must_use]
pub fn element_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.is_element().then(|| node.tag_name().name())
}

/// Whether `node` is an element with the given local name.
#[must_use]
pub fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Element children of `node`, in document order.
pub fn child_elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Element children of `node` named `name`.
pub fn children_named<'a, 'input>(node: Node<'a, 'input>, name: &str) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_element_named(*child, name))
}

/// First element child of `node` named `name`.
#[must_use]
pub fn first_child_named<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    children_named(node, name).next()
}

/// First element named `name` below `node` in document order, excluding
/// `node` itself.
#[must_use]
pub fn find_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|d| is_element_named(*d, name))
}

/// Concatenated text of every text node below `node`.
#[must_use]
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|d| d.text())
        .collect()
}

/// Text of the first child node, if that child is text.
#[must_use]
pub fn leading_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.first_child()
        .filter(Node::is_text)
        .and_then(|first| first.text())
}
