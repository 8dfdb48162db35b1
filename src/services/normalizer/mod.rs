//! Markdown-to-structured-record normalizer.
//!
//! The input markdown comes from a generative text service whose formatting
//! is only loosely guaranteed, so the grammar is deliberately permissive and
//! line-oriented: out-of-grammar lines are dropped, never rejected. Dropping
//! is a documented best-effort policy, not data loss.
//!
//! Grammar, one construct per physical line:
//! - headings (one to six `#` plus whitespace) are skipped,
//! - `<int>. <title> [(Trang <int>)]` starts a new item,
//! - `-`/`+` bullets attach a requirement to the current item,
//! - everything else is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Item, ItemRequirement, UNDETERMINED_PAGE};

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").unwrap());
static ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());
static CITATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(Trang\s*(\d+)\)").unwrap());

/// Classification of one markdown line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Markdown heading; skipped without affecting state.
    Heading,
    /// Numbered line opening a new item.
    ItemStart {
        title: String,
        /// Item-level citation; parsed for completeness but not retained in
        /// the output schema (only requirement pages are).
        page: Option<String>,
    },
    /// Bullet line carrying one requirement.
    Requirement {
        content: String,
        page: Option<String>,
    },
    /// Blank or out-of-grammar line.
    Other,
}

/// Extracts the first `(Trang n)` citation page from a line, if any.
pub fn citation_page(text: &str) -> Option<String> {
    CITATION_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Classifies a single (already trimmed) markdown line.
pub fn classify_line(line: &str) -> LineKind {
    if HEADING_RE.is_match(line) {
        return LineKind::Heading;
    }

    if let Some(caps) = ITEM_RE.captures(line) {
        let rest = caps[1].trim();
        let page = citation_page(rest);
        let title = match CITATION_RE.find(rest) {
            Some(m) => rest[..m.start()].trim().to_string(),
            None => rest.to_string(),
        };
        if title.is_empty() {
            // An item must have a title; a bare number line is noise.
            return LineKind::Other;
        }
        return LineKind::ItemStart { title, page };
    }

    if line.starts_with('-') || line.starts_with('+') {
        let body = line[1..].trim();
        let page = citation_page(body);
        let content = CITATION_RE.replace_all(body, "").trim().to_string();
        return LineKind::Requirement { content, page };
    }

    LineKind::Other
}

/// Parses a requirement markdown document into its item list.
///
/// A single linear pass with one piece of state, the current item. Bullets
/// arriving before any numbered item have nothing to attach to and are
/// silently dropped.
pub fn normalize(markdown: &str) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();

    for line in markdown.lines() {
        match classify_line(line.trim()) {
            LineKind::Heading | LineKind::Other => {}
            LineKind::ItemStart { title, .. } => {
                items.push(Item::new(&title));
            }
            LineKind::Requirement { content, page } => {
                if let Some(current) = items.last_mut() {
                    current.item_requirements.push(ItemRequirement {
                        page: page.unwrap_or_else(|| UNDETERMINED_PAGE.to_string()),
                        content,
                    });
                }
            }
        }
    }

    items
}

/// Re-renders items as markdown in the same grammar the normalizer reads,
/// so `normalize(render_markdown(items)) == items`.
pub fn render_markdown(items: &[Item]) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, item.item_title));
        for req in &item.item_requirements {
            if req.page == UNDETERMINED_PAGE {
                out.push_str(&format!("- {}\n", req.content));
            } else {
                out.push_str(&format!("- {} (Trang {})\n", req.content, req.page));
            }
        }
    }
    out
}

/// Serializes items in the stable output schema.
pub fn to_json(items: &[Item]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}
