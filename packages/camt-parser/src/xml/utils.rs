//! XML utility functions for navigating and extracting data from DOM trees.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::Node;

use crate::error::{CamtError, Result};

/// Clark notation: optional `{namespace-uri}` followed by the local name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUALIFIED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\{([^}]+?)\})?(.+)$").expect("valid regex"));

/// Strip the namespace from a qualified element name.
///
/// # Arguments
/// * `qualified` - Name in Clark notation (`{uri}local`) or a bare local name
///
/// # Returns
/// The local name, or a structural error if the input matches neither shape
///
/// # Examples
/// ```
/// use camt_parser::xml::strip_namespace;
///
/// let name = "{urn:iso:std:iso:20022:tech:xsd:camt.052.001.02}Ntry";
/// assert_eq!(strip_namespace(name).unwrap(), "Ntry");
/// assert_eq!(strip_namespace("Ntry").unwrap(), "Ntry");
/// assert!(strip_namespace("").is_err());
/// ```
pub fn strip_namespace(qualified: &str) -> Result<&str> {
    QUALIFIED_NAME
        .captures(qualified)
        .and_then(|caps| caps.get(2))
        .map(|local| local.as_str())
        .ok_or_else(|| {
            CamtError::structure(
                "element name",
                format!("malformed qualified name '{qualified}'"),
            )
        })
}

/// Get the qualified name of an element in Clark notation.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use camt_parser::xml::qualified_name;
///
/// let doc = Document::parse(r#"<Document xmlns="urn:x"/>"#).unwrap();
/// assert_eq!(qualified_name(doc.root_element()), "{urn:x}Document");
/// ```
#[must_use]
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    match name.namespace() {
        Some(ns) => format!("{{{ns}}}{}", name.name()),
        None => name.name().to_string(),
    }
}

/// Get the tag name without namespace.
///
/// Dispatch throughout the parser uses this name. It is always equal to
/// `strip_namespace(&qualified_name(node))`, and never empty for a parsed
/// element, so dispatch has no malformed-name case.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use camt_parser::xml::get_tag_name;
///
/// let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.052.001.02"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "Document");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the namespace URI of an element, if any.
pub fn get_namespace<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.tag_name().namespace()
}

/// Get all element children of a node.
///
/// Excludes text nodes, comments and processing instructions.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Get the raw text content of an element.
///
/// Text is returned verbatim (not trimmed). Returns `None` for an element
/// without text.
pub fn get_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}

/// Get the raw text of an element as an owned string.
pub fn get_text_owned(node: Node<'_, '_>) -> Option<String> {
    get_text(node).map(str::to_string)
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Return the only element child of a node.
///
/// # Errors
/// Returns a `Structure` error naming `entity` when the node has zero or
/// more than one element child.
pub fn single_child<'a, 'input>(
    node: Node<'a, 'input>,
    entity: &str,
) -> Result<Node<'a, 'input>> {
    let mut children = element_children(node);
    match (children.next(), children.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(CamtError::structure(
            entity,
            format!("<{}> must have exactly one child, found none", get_tag_name(node)),
        )),
        (Some(_), Some(_)) => Err(CamtError::structure(
            entity,
            format!(
                "<{}> must have exactly one child, found {}",
                get_tag_name(node),
                element_children(node).count()
            ),
        )),
    }
}

/// Return the only element child of a node, which must carry `tag`.
///
/// # Errors
/// Returns a `Structure` error for a wrong child count and an
/// `UnknownElement` error for a wrong child name.
pub fn single_child_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    entity: &str,
) -> Result<Node<'a, 'input>> {
    let child = single_child(node, entity)?;
    if !has_tag(child, tag) {
        return Err(CamtError::unknown(get_tag_name(child), entity));
    }
    Ok(child)
}
