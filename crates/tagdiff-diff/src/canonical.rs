//! Canonical forms: the per-node summary the differ compares.
//!
//! An element becomes its name, followed by `name=value` for each attribute
//! in name order, so attribute order in the source never matters. Text
//! becomes its content, tagged so it can never equal an element.

use std::fmt;

use serde::Serialize;
use tagdiff_parser::{Node, Tree};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CanonicalForm {
    /// `name` or `name a=1 b=2`
    Element(String),
    Text(String),
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalForm::Element(form) => f.write_str(form),
            CanonicalForm::Text(content) => write!(f, "(\"Text\", {content:?})"),
        }
    }
}

/// Canonical form of a single node.
pub fn canonical(node: &Node) -> CanonicalForm {
    match node {
        Node::Text(text) => CanonicalForm::Text(text.content.clone()),
        Node::Element(el) if el.attributes.is_empty() => CanonicalForm::Element(el.name.clone()),
        Node::Element(el) => {
            let mut attributes: Vec<(&str, &str)> = el
                .attributes
                .iter()
                .map(|attr| (attr.name.as_str(), attr.value.as_str()))
                .collect();
            attributes.sort_unstable();

            let mut form = el.name.clone();
            for (name, value) in attributes {
                form.push(' ');
                form.push_str(name);
                form.push('=');
                form.push_str(value);
            }
            CanonicalForm::Element(form)
        }
    }
}

/// Canonical forms of every node, grouped by depth (root = 0) and sorted
/// within each level.
pub fn canonical_levels(tree: &Tree) -> Vec<Vec<CanonicalForm>> {
    let mut levels: Vec<Vec<CanonicalForm>> = Vec::new();

    for (id, depth) in tree.walk() {
        if levels.len() <= depth {
            levels.resize_with(depth + 1, Vec::new);
        }
        levels[depth].push(canonical(tree.node(id)));
    }

    for level in &mut levels {
        level.sort();
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn levels(source: &str) -> Vec<Vec<CanonicalForm>> {
        canonical_levels(&tagdiff_parser::parse_str(source).unwrap())
    }

    fn el(form: &str) -> CanonicalForm {
        CanonicalForm::Element(form.into())
    }

    fn text(content: &str) -> CanonicalForm {
        CanonicalForm::Text(content.into())
    }

    // =========================================================================
    // Single nodes
    // =========================================================================

    #[test]
    fn test_element_without_attributes() {
        assert_eq!(levels("<a></a>"), vec![vec![el("a")]]);
    }

    #[test]
    fn test_attributes_sorted_by_name() {
        assert_eq!(
            levels("<book lang=\"en\" id=\"bk101\"></book>"),
            vec![vec![el("book id=bk101 lang=en")]]
        );
    }

    #[test]
    fn test_text_is_tagged() {
        assert_eq!(levels("<a>a</a>"), vec![vec![el("a")], vec![text("a")]]);
        assert_ne!(el("a"), text("a"));
    }

    // =========================================================================
    // Levels
    // =========================================================================

    #[test]
    fn test_levels_are_sorted() {
        assert_eq!(
            levels("<r><c></c><a></a><b>x</b></r>"),
            vec![
                vec![el("r")],
                vec![el("a"), el("b"), el("c")],
                vec![text("x")],
            ]
        );
    }

    #[test]
    fn test_levels_gather_cousins() {
        assert_eq!(
            levels("<r><a><x></x></a><b><y></y></b></r>")[2],
            vec![el("x"), el("y")]
        );
    }

    #[test]
    fn test_catalog_levels() {
        let lv = levels("<catalog><book id=\"bk101\"><title>T</title></book></catalog>");
        assert_eq!(lv.len(), 4);
        assert_eq!(lv[0], vec![el("catalog")]);
        assert_eq!(lv[1], vec![el("book id=bk101")]);
        assert_eq!(lv[3], vec![text("T")]);
    }

    // =========================================================================
    // Display
    // =========================================================================

    #[test]
    fn test_display() {
        assert_eq!(el("book id=1").to_string(), "book id=1");
        assert_eq!(text("T").to_string(), "(\"Text\", \"T\")");
    }
}
