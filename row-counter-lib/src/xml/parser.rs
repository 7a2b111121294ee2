use super::{PathQuery, RawDocument};
use crate::error::ParseError;
use roxmltree::{Document, Node, ParsingOptions};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A parsed report, borrowing the raw document it came from.
#[derive(Debug)]
pub struct ParsedReport<'input> {
    document: Document<'input>,
}

/// Parse a raw report body into a queryable tree.
///
/// Empty and whitespace-only bodies are rejected, as are bodies that are not UTF-8.
pub fn parse(raw: &RawDocument) -> Result<ParsedReport<'_>, ParseError> {
    let bytes = raw.as_bytes();
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = core::str::from_utf8(bytes)?;

    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(text, options)?;
    Ok(ParsedReport { document })
}

impl<'input> ParsedReport<'input> {
    /// Name of the document's root element.
    #[must_use]
    pub fn root_name(&self) -> &str {
        self.document.root_element().tag_name().name()
    }

    /// Elements matched by `query`, in document order.
    #[must_use]
    pub fn evaluate_nodes<'a>(&'a self, query: &PathQuery) -> Vec<Node<'a, 'input>> {
        let Some((first, rest)) = query.steps().split_first() else {
            return Vec::new();
        };

        let root = self.document.root_element();
        if !root.has_tag_name(first.as_str()) {
            return Vec::new();
        }

        let mut current = vec![root];
        for step in rest {
            current = current
                .iter()
                .flat_map(|node| node.children().filter(|child| child.is_element() && child.has_tag_name(step.as_str())))
                .collect();

            if current.is_empty() {
                return current;
            }
        }

        if let Some(predicate) = query.predicate() {
            current.retain(|node| predicate.matches(*node));
        }

        current
    }

    /// Number of elements matched by `query`.
    #[must_use]
    pub fn evaluate_count(&self, query: &PathQuery) -> f64 {
        as_count(self.evaluate_nodes(query).len())
    }
}

/// Convert a node-set size into the numeric type `XPath` `count()` yields.
pub(crate) fn as_count(len: usize) -> f64 {
    f64::from(u32::try_from(len).unwrap_or(u32::MAX))
}
