//! Markup writer.
//!
//! Walks a `Tree` and writes it back out as indented markup. The output
//! tokenizes and parses to a tree with the same structure; it is not
//! byte-identical to the input document because whitespace is normalized.

use crate::ast::{Attribute, Node, NodeId, Tree};

/// Render a tree (and its declaration, if any) as markup.
pub fn render(tree: &Tree) -> String {
    let mut out = String::new();

    if let Some(decl) = tree.declaration() {
        out.push_str("<?");
        out.push_str(&decl.name);
        push_attributes(&decl.attributes, &mut out);
        out.push_str("?>\n");
    }

    render_node(tree, tree.root(), &mut out, 0);
    out
}

fn render_node(tree: &Tree, id: NodeId, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);

    let el = match tree.node(id) {
        Node::Element(el) => el,
        Node::Text(text) => {
            out.push_str(&indent);
            out.push_str(&text.content);
            out.push('\n');
            return;
        }
    };

    // Opening tag
    out.push_str(&indent);
    out.push('<');
    out.push_str(&el.name);
    push_attributes(&el.attributes, out);
    out.push('>');

    // Children: a lone text child stays inline
    match el.children.as_slice() {
        [] => {}
        [only] if tree.node(*only).is_text() => {
            if let Node::Text(text) = tree.node(*only) {
                out.push_str(&text.content);
            }
        }
        children => {
            out.push('\n');
            for &child in children {
                render_node(tree, child, out, depth + 1);
            }
            out.push_str(&indent);
        }
    }

    // Closing tag
    out.push_str(&format!("</{}>", el.name));
    out.push('\n');
}

fn push_attributes(attributes: &[Attribute], out: &mut String) {
    for attr in attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str(&format!("=\"{}\"", attr.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use pretty_assertions::assert_eq;

    fn round(source: &str) -> String {
        render(&Parser::parse_str(source).unwrap())
    }

    #[test]
    fn test_render_empty_element() {
        assert_eq!(round("<a></a>"), "<a></a>\n");
    }

    #[test]
    fn test_render_inline_text() {
        assert_eq!(round("<title>  T  </title>"), "<title>T </title>\n");
    }

    #[test]
    fn test_render_nested_indented() {
        let source = concat!(
            "<catalog>",
            "<book id=\"bk101\" lang=\"en\"><title>T</title></book>",
            "<book></book>",
            "</catalog>",
        );
        let expected = concat!(
            "<catalog>\n",
            "  <book id=\"bk101\" lang=\"en\">\n",
            "    <title>T</title>\n",
            "  </book>\n",
            "  <book></book>\n",
            "</catalog>\n",
        );
        assert_eq!(round(source), expected);
    }

    #[test]
    fn test_render_text_with_spaced_markers() {
        assert_eq!(round("<q>a = b</q>"), "<q>a = b</q>\n");
    }

    #[test]
    fn test_render_declaration() {
        assert_eq!(
            round("<?xml version=\"1.0\"?><a></a>"),
            "<?xml version=\"1.0\"?>\n<a></a>\n"
        );
    }

    #[test]
    fn test_render_is_stable() {
        let once = round("<r>\n  <a x=\"1 2\">say \"hi\", a/b</a>\n  <b><c></c></b>\n</r>");
        assert_eq!(round(&once), once);
    }
}
