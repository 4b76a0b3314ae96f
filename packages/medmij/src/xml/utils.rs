//! XML utility functions for namespace-qualified DOM navigation.
//!
//! Every element of the zorgaanbiederslijst is namespace-qualified, so all
//! selection here matches on the (namespace, local name) pair rather than
//! on the local name alone.

use roxmltree::Node;

use crate::error::{MedMijError, Result};

/// Check whether a node is an element with the given qualified name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use medmij::xml::has_qname;
///
/// let xml = r#"<root xmlns="urn:example"><child/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let child = doc.root_element().first_element_child().unwrap();
///
/// assert!(has_qname(child, "urn:example", "child"));
/// assert!(!has_qname(child, "urn:other", "child"));
/// ```
pub fn has_qname(node: Node<'_, '_>, ns: &str, local: &str) -> bool {
    node.is_element() && node.has_tag_name((ns, local))
}

/// Find the first child element with the given qualified name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use medmij::xml::find_child;
///
/// let xml = r#"<root xmlns="urn:example"><a/><b/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "urn:example", "b").is_some());
/// assert!(find_child(root, "urn:example", "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    local: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_qname(*child, ns, local))
}

/// Get all element children of a node.
///
/// Skips text nodes, comments and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

/// Find all descendant elements with the given qualified name.
///
/// The search covers the whole subtree, so elements nested under wrapper
/// elements are found without knowing the exact path.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use medmij::xml::find_descendants;
///
/// let xml = r#"<root xmlns="urn:example"><wrap><item/></wrap><item/></root>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let items: Vec<_> = find_descendants(doc.root_element(), "urn:example", "item").collect();
/// assert_eq!(items.len(), 2);
/// ```
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'a str,
    local: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |child| has_qname(*child, ns, local))
}

/// Get the text content of a node, trimmed.
///
/// Returns an empty string if the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Find the child element with the given qualified name, failing if absent.
///
/// # Errors
/// Returns `MedMijError::MalformedEntry` when no such child exists.
pub fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &str,
    local: &str,
) -> Result<Node<'a, 'input>> {
    find_child(node, ns, local).ok_or_else(|| MedMijError::MalformedEntry {
        element: local.to_string(),
        context: node.tag_name().name().to_string(),
        count: 0,
    })
}

/// Find the single descendant element with the given qualified name.
///
/// The exactly-one cardinality is a hard requirement: zero or multiple
/// matches abort the parse.
///
/// # Errors
/// Returns `MedMijError::MalformedEntry` when the number of matching
/// descendants is anything other than one.
pub fn single_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'a str,
    local: &'a str,
) -> Result<Node<'a, 'input>> {
    let mut matches = find_descendants(node, ns, local);
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(MedMijError::MalformedEntry {
            element: local.to_string(),
            context: node.tag_name().name().to_string(),
            count: 0,
        }),
        (Some(_), Some(_)) => Err(MedMijError::MalformedEntry {
            element: local.to_string(),
            context: node.tag_name().name().to_string(),
            count: 2 + matches.count(),
        }),
    }
}
