//! HTML page templates.
//!
//! Pages are small and fixed, so they are assembled with `format!` rather than
//! a template engine. Every interpolated value except pre-rendered document
//! HTML goes through `escape_html`.

use std::fmt::Write as _;

use crate::docs::render::escape_html;
use crate::docs::{Document, ListingEntry};
use crate::http::route::DOC_PREFIX;

const LISTING_TITLE: &str = "Documentation";

/// `/doc/<name>` with the name percent-encoded and HTML-escaped.
pub fn doc_href(name: &str) -> String {
    escape_html(&format!("{DOC_PREFIX}{}", urlencoding::encode(name)))
}

/// Index page: one anchor per document, in the order given.
pub fn listing_page(entries: &[ListingEntry]) -> String {
    let mut items = String::new();
    for entry in entries {
        let name = escape_html(&entry.name);
        let _ = write!(items, "<li><a href=\"{}\">{}</a>", doc_href(&entry.name), name);
        if entry.title != entry.name {
            let _ = write!(items, ": {}", escape_html(&entry.title));
        }
        items.push_str("</li>\n");
    }

    page(
        LISTING_TITLE,
        &format!("<h1>{LISTING_TITLE}</h1>\n<ul>\n{items}</ul>\n"),
    )
}

/// A single document wrapped in the page chrome.
pub fn document_page(doc: &Document) -> String {
    page(
        doc.title(),
        &format!(
            "<nav><a href=\"/\">{LISTING_TITLE}</a></nav>\n<article>\n{}</article>\n",
            doc.html()
        ),
    )
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         {body}\
         </body>\n\
         </html>\n",
        escape_html(title)
    )
}
