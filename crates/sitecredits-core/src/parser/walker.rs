//! Structural credit extraction
//!
//! Walks the parsed DOM in document order and feeds start-tag, end-tag and
//! text events into a small state machine. A `<span>` whose text reads
//! "Title, by " (or "Title by ") opens a pending credit; the next `<a>`
//! supplies the creator URL and, through its text, the creator name.

use ego_tree::iter::Edge;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::types::CreatorRecord;

/// Credit opened by a span and waiting for its creator link.
#[derive(Debug, Default)]
struct PendingCredit {
    title: String,
    creator: Option<String>,
    creator_url: Option<String>,
}

/// Tag-event state machine collecting creator records.
#[derive(Debug, Default)]
pub struct CreditWalker {
    in_span: bool,
    span_text: String,
    next_link_is_creator: bool,
    pending: Option<PendingCredit>,
    records: Vec<CreatorRecord>,
}

impl CreditWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every node under `element`, including `element` itself.
    ///
    /// Traversal is iterative, so nesting depth is bounded by memory rather
    /// than by the call stack.
    pub fn visit(&mut self, element: ElementRef<'_>) {
        for edge in element.traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(el) => self.start_tag(el.name(), el.attr("href")),
                    Node::Text(text) => self.text(text),
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(el) = node.value() {
                        self.end_tag(el.name());
                    }
                }
            }
        }
    }

    pub fn start_tag(&mut self, tag: &str, href: Option<&str>) {
        match tag {
            "span" => {
                self.in_span = true;
                self.span_text.clear();
            }
            "a" if self.next_link_is_creator => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.creator_url = Some(href.unwrap_or_default().to_string());
                }
            }
            _ => {}
        }
    }

    pub fn end_tag(&mut self, tag: &str) {
        match tag {
            "span" => {
                self.in_span = false;
                if let Some(pending) = open_credit(&self.span_text) {
                    self.pending = Some(pending);
                    self.next_link_is_creator = true;
                }
            }
            "a" => {
                if let Some(pending) = self.pending.take() {
                    self.next_link_is_creator = false;
                    if let Some(record) = finish_credit(pending) {
                        debug!(title = %record.title, creator = %record.creator, "walker credit");
                        self.records.push(record);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn text(&mut self, text: &str) {
        if self.in_span {
            self.span_text.push_str(text);
        } else if self.next_link_is_creator {
            if let Some(pending) = self.pending.as_mut() {
                let trimmed = text.trim();
                if pending.creator.is_none() && !trimmed.is_empty() {
                    pending.creator = Some(trimmed.to_string());
                }
            }
        }
    }

    /// Records collected so far.
    pub fn finish(self) -> Vec<CreatorRecord> {
        self.records
    }
}

/// Split span text of the form "Title, by Creator" or "Title by Creator".
///
/// The creator part is usually empty because the name sits in the following
/// link. Returns `None` unless the text splits into exactly two parts.
fn open_credit(span_text: &str) -> Option<PendingCredit> {
    if !span_text.contains("by ") {
        return None;
    }

    let split_two = |sep: &str| -> Option<(String, String)> {
        let parts: Vec<&str> = span_text.split(sep).collect();
        match parts.as_slice() {
            [title, creator] => Some((title.trim().to_string(), creator.trim().to_string())),
            _ => None,
        }
    };

    let (title, creator) = split_two(", by ").or_else(|| split_two(" by "))?;
    Some(PendingCredit {
        title,
        creator: (!creator.is_empty()).then_some(creator),
        creator_url: None,
    })
}

fn finish_credit(pending: PendingCredit) -> Option<CreatorRecord> {
    let creator = pending.creator.filter(|c| !c.is_empty())?;
    let creator_url = pending.creator_url.filter(|u| !u.is_empty())?;
    Some(CreatorRecord {
        title: pending.title,
        creator,
        creator_url,
    })
}

/// Extract creator records by walking the parsed document.
///
/// # Examples
/// ```
/// use sitecredits_core::parser::walk_creator_records;
///
/// let html = r#"<span>Recipe Box, by </span><a href="https://bsky.app/bob">Bob</a>"#;
/// let records = walk_creator_records(html);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].creator, "Bob");
/// ```
pub fn walk_creator_records(html: &str) -> Vec<CreatorRecord> {
    let document = Html::parse_document(html);
    let mut walker = CreditWalker::new();
    walker.visit(document.root_element());
    walker.finish()
}
