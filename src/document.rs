// Markup documents and tag-name queries
// Parsing is delegated to html5ever; the rcdom handle types stay private to
// this module so callers only ever see Document and Element.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::fmt;
use tracing::debug;

use crate::error::ParseError;

/// Parsed in-memory representation of a markup source.
///
/// Immutable once created and discarded after use; there is no caching
/// layer in front of the resolver. Backed by an `Rc` DOM, so a document
/// stays on the thread that parsed it.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse markup text into a document.
    ///
    /// html5ever recovers from broken markup the way browsers do, so the
    /// structural failure surfaced here is an empty source body.
    pub fn parse(markup: &str) -> Result<Document, ParseError> {
        if markup.trim().is_empty() {
            return Err(ParseError::Malformed("empty markup source".to_string()));
        }

        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        debug!(bytes = markup.len(), "parsed markup document");
        Ok(Document { dom })
    }

    /// All descendant elements with the given tag name, in document order.
    pub fn descendants(&self, tag_name: &str) -> Vec<Element> {
        // The parser lowercases HTML tag names; match queries the same way.
        let wanted = tag_name.to_ascii_lowercase();
        let mut found = Vec::new();
        collect_descendants(&self.dom.document, &wanted, &mut found);
        found
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

/// A node within a document, reachable via a tag-name query.
#[derive(Clone)]
pub struct Element {
    handle: Handle,
}

impl Element {
    /// Lowercased tag name of this element.
    pub fn tag_name(&self) -> String {
        match &self.handle.data {
            NodeData::Element { name, .. } => name.local.to_string(),
            _ => String::new(),
        }
    }

    /// Attribute value, if the attribute is present.
    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|a| &*a.name.local == name)
                .map(|a| a.value.to_string()),
            _ => None,
        }
    }

    /// Concatenated text content of this element's subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.handle, &mut out);
        out
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .finish()
    }
}

fn collect_descendants(node: &Handle, wanted: &str, found: &mut Vec<Element>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == wanted {
                found.push(Element {
                    handle: child.clone(),
                });
            }
        }
        collect_descendants(child, wanted, found);
    }
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Anchor elements of an optional document.
///
/// An absent document yields an empty list, not an error. Absence is an
/// explicit `Option`, never a sentinel value.
pub fn links(doc: Option<&Document>) -> Vec<Element> {
    match doc {
        Some(doc) => doc.descendants("a"),
        None => Vec::new(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
