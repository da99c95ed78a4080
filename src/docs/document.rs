//! Documents and the immutable index over them.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::docs::render::MarkupRenderer;
use crate::docs::source::RawDocument;

/// A rendered document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    title: String,
    source: Vec<u8>,
    html: String,
}

impl Document {
    /// Render a raw document. The title falls back to the name.
    pub fn render(raw: RawDocument, renderer: &dyn MarkupRenderer) -> Self {
        let rendered = renderer.render(&raw.source);
        if rendered.degraded {
            tracing::warn!(document = %raw.name, "Document rendered as plain text");
        }
        Self {
            title: rendered.title.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            source: raw.source,
            html: rendered.html,
        }
    }

    /// Canonical name; `/doc/<name>` serves this document.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Rendered HTML fragment.
    pub fn html(&self) -> &str {
        &self.html
    }
}

/// Name → document, ordered lexicographically by name.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    docs: BTreeMap<String, Arc<Document>>,
}

impl DocumentIndex {
    /// Render every raw document into a new index.
    pub fn build(raw: Vec<RawDocument>, renderer: &dyn MarkupRenderer) -> Self {
        let mut docs = BTreeMap::new();
        for doc in raw {
            let doc = Document::render(doc, renderer);
            let name = doc.name.clone();
            if docs.insert(name.clone(), Arc::new(doc)).is_some() {
                tracing::warn!(document = %name, "Duplicate document name, keeping the last one");
            }
        }
        Self { docs }
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<Arc<Document>> {
        self.docs.get(name).cloned()
    }

    /// Documents in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.docs.values()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::render::MarkdownRenderer;

    fn index(raw: Vec<RawDocument>) -> DocumentIndex {
        DocumentIndex::build(raw, &MarkdownRenderer::new())
    }

    #[test]
    fn test_iteration_is_sorted_by_name() {
        let index = index(vec![
            RawDocument::new("zeta.md", "# Z"),
            RawDocument::new("alpha.md", "# A"),
            RawDocument::new("Mid.md", "# M"),
        ]);

        let names: Vec<_> = index.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["Mid.md", "alpha.md", "zeta.md"]);
    }

    #[test]
    fn test_lookup_is_exact() {
        let index = index(vec![RawDocument::new("test.md", "# Test\n")]);

        let doc = index.get("test.md").unwrap();
        assert_eq!(doc.title(), "Test");
        assert_eq!(doc.source(), b"# Test\n");
        assert!(index.get("test").is_none());
        assert!(index.get("TEST.md").is_none());
        assert!(index.get("./test.md").is_none());
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let index = index(vec![RawDocument::new("plain.md", "no heading here")]);
        assert_eq!(index.get("plain.md").unwrap().title(), "plain.md");
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let index = index(vec![
            RawDocument::new("a.md", "# First"),
            RawDocument::new("a.md", "# Second"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a.md").unwrap().title(), "Second");
    }
}
