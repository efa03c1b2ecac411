//! SPDX-FileCopyrightText: 2026 `Catrobat`
//!
//! SPDX-License-Identifier: MIT
//!
//! Formula trees and their flattening to token strings

use roxmltree::Node;

use crate::formats::xml::{element_name, is_element_named, leading_text};

/// Token used for a formula node that carries no value.
pub const NOT_SET: &str = "not-set";

/// Most `leftChild` / `rightChild` nodes a single formula may hold.
pub const MAX_FORMULA_NODES: usize = 512;

/// A binary expression node.
///
/// Children are inserted with [`Formula::set_left`] / [`Formula::set_right`]:
/// the first insertion on a side fills the empty slot, later insertions on the
/// same side walk down that side's chain and fill the first empty slot there.
/// Repeated same-side children therefore chain instead of replacing each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// Operator, function, number or identifier at this node.
    pub value: String,
    left: Option<Box<Formula>>,
    right: Option<Box<Formula>>,
}

impl Default for Formula {
    fn default() -> Self {
        Formula::new(NOT_SET)
    }
}

impl Formula {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Formula {
            value: value.into(),
            left: None,
            right: None,
        }
    }

    /// Left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<&Formula> {
        self.left.as_deref()
    }

    /// Right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<&Formula> {
        self.right.as_deref()
    }

    /// Inserts `child` into the first free slot of the left chain.
    pub fn set_left(&mut self, child: Formula) {
        let mut slot = &mut self.left;
        while let Some(node) = slot {
            slot = &mut node.left;
        }
        *slot = Some(Box::new(child));
    }

    /// Inserts `child` into the first free slot of the right chain.
    pub fn set_right(&mut self, child: Formula) {
        let mut slot = &mut self.right;
        while let Some(node) = slot {
            slot = &mut node.right;
        }
        *slot = Some(Box::new(child));
    }

    /// Builds a tree from a `formula` element and its `leftChild` /
    /// `rightChild` / `value` children, in document order.
    ///
    /// Returns `None` if the element holds more than [`MAX_FORMULA_NODES`]
    /// child nodes.
    #[must_use]
    pub fn from_element(element: Node<'_, '_>) -> Option<Self> {
        let nodes = element
            .descendants()
            .filter(|node| is_element_named(*node, "leftChild") || is_element_named(*node, "rightChild"));
        if nodes.take(MAX_FORMULA_NODES + 1).count() > MAX_FORMULA_NODES {
            return None;
        }
        Some(Formula::build(element))
    }

    fn build(element: Node<'_, '_>) -> Self {
        let mut formula = Formula::default();
        for child in element.children() {
            match element_name(child) {
                Some("leftChild") => formula.set_left(Formula::build(child)),
                Some("rightChild") => formula.set_right(Formula::build(child)),
                Some("value") => formula.value = leading_text(child).unwrap_or(NOT_SET).to_string(),
                _ => {}
            }
        }
        formula
    }

    /// Flattens the tree in order (left, value, right); every token is
    /// followed by a single space.
    #[must_use]
    pub fn reduce(&self) -> String {
        let mut out = String::new();
        self.write_tokens(&mut out);
        out
    }

    fn write_tokens(&self, out: &mut String) {
        if let Some(left) = &self.left {
            left.write_tokens(out);
        }
        out.push_str(&self.value);
        out.push(' ');
        if let Some(right) = &self.right {
            right.write_tokens(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::xml::parse_xml_document;
    use pretty_assertions::assert_eq;

    fn nested_left(depth: usize) -> String {
        let mut xml = String::from("<formula><value>0</value>");
        for level in 1..=depth {
            xml.push_str(&format!("<leftChild><value>{level}</value>"));
        }
        xml.push_str(&"</leftChild>".repeat(depth));
        xml.push_str("</formula>");
        xml
    }

    #[test]
    fn test_binary_operator() {
        let mut plus = Formula::new("PLUS");
        plus.set_left(Formula::new("1"));
        plus.set_right(Formula::new("2"));
        assert_eq!(plus.reduce(), "1 PLUS 2 ");
    }

    #[test]
    fn test_repeated_set_right_chains() {
        let mut root = Formula::new("a");
        root.set_right(Formula::new("b"));
        root.set_right(Formula::new("c"));
        assert_eq!(root.reduce(), "a b c ");
        assert_eq!(root.right().and_then(Formula::right).map(|f| f.value.as_str()), Some("c"));
    }

    #[test]
    fn test_repeated_set_left_chains() {
        let mut root = Formula::new("a");
        root.set_left(Formula::new("b"));
        root.set_left(Formula::new("c"));
        // c hangs off b, not off the root
        assert_eq!(root.left().map(|f| f.value.as_str()), Some("b"));
        assert_eq!(root.reduce(), "c b a ");
    }

    #[test]
    fn test_from_element_nested() {
        let doc = parse_xml_document(
            r#"<formula category="X_POSITION">
                 <leftChild><type>NUMBER</type><value>10</value></leftChild>
                 <rightChild>
                   <leftChild><type>NUMBER</type><value>2</value></leftChild>
                   <rightChild><type>NUMBER</type><value>3</value></rightChild>
                   <type>OPERATOR</type><value>MULT</value>
                 </rightChild>
                 <type>OPERATOR</type>
                 <value>PLUS</value>
               </formula>"#,
        )
        .unwrap();
        let formula = Formula::from_element(doc.root_element()).unwrap();
        assert_eq!(formula.reduce(), "10 PLUS 2 MULT 3 ");
    }

    #[test]
    fn test_missing_or_empty_value_is_not_set() {
        let doc = parse_xml_document(
            "<formula><leftChild><value/></leftChild><type>FUNCTION</type></formula>",
        )
        .unwrap();
        let formula = Formula::from_element(doc.root_element()).unwrap();
        assert_eq!(formula.reduce(), "not-set not-set ");
    }

    #[test]
    fn test_node_limit() {
        let text = nested_left(MAX_FORMULA_NODES);
        let doc = parse_xml_document(&text).unwrap();
        let formula = Formula::from_element(doc.root_element()).unwrap();
        let reduced = formula.reduce();
        assert!(reduced.starts_with(&format!("{MAX_FORMULA_NODES} ")));
        assert!(reduced.ends_with("2 1 0 "));

        let text = nested_left(MAX_FORMULA_NODES + 1);
        let doc = parse_xml_document(&text).unwrap();
        assert_eq!(Formula::from_element(doc.root_element()), None);
    }

    #[test]
    fn test_very_deep_formula_is_rejected() {
        let text = nested_left(20_000);
        let doc = parse_xml_document(&text).unwrap();
        assert_eq!(Formula::from_element(doc.root_element()), None);
    }

    #[test]
    fn test_long_sibling_chain() {
        let mut root = Formula::new("r");
        for _ in 0..MAX_FORMULA_NODES {
            root.set_right(Formula::new("x"));
        }
        assert_eq!(root.reduce().len(), 2 + 2 * MAX_FORMULA_NODES);
    }
}
