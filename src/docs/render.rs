//! Markup rendering.
//!
//! Rendering is infallible by contract: whatever bytes the corpus holds, the
//! renderer produces something displayable. Sources that are not valid UTF-8
//! degrade to an escaped `<pre>` block instead of an error.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// HTML fragment (no `<html>`/`<body>` wrapper).
    pub html: String,
    /// Text of the first heading, if any.
    pub title: Option<String>,
    /// True when the source could not be parsed and was emitted as text.
    pub degraded: bool,
}

impl Rendered {
    fn degraded(text: &str) -> Self {
        let mut html = String::with_capacity(text.len() + 12);
        html.push_str("<pre>");
        html.push_str(&escape_html(text));
        html.push_str("</pre>\n");
        Self {
            html,
            title: None,
            degraded: true,
        }
    }
}

/// Converts raw document bytes to an HTML fragment.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, source: &[u8]) -> Rendered;
}

/// CommonMark renderer with the usual GitHub-style extensions.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, source: &[u8]) -> Rendered {
        let text = match std::str::from_utf8(source) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Document is not valid UTF-8, rendering as text");
                return Rendered::degraded(&String::from_utf8_lossy(source));
            }
        };

        let events: Vec<Event<'_>> = Parser::new_ext(text, self.options).collect();
        let title = first_heading(&events);

        let mut out = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut out, events.into_iter());

        Rendered {
            html: out,
            title,
            degraded: false,
        }
    }
}

fn first_heading(events: &[Event<'_>]) -> Option<String> {
    let mut in_heading = false;
    let mut title = String::new();

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => in_heading = true,
            Event::End(TagEnd::Heading(_)) if in_heading => break,
            Event::Text(text) | Event::Code(text) if in_heading => title.push_str(text),
            _ => {}
        }
    }

    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
