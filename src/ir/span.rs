//! Inline span variants (spec §3.3).

use crate::range::TextContent;

/// An inline unit inside a block: text, emphasis, a link, a code span, …
///
/// A tagged union, not a trait-object hierarchy (§9 design notes: "no deep
/// inheritance... prefer sum types").
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Span {
    /// Plain text, already entity-decoded where applicable.
    Text(TextContent),
    Emphasis(Vec<Span>),
    Strong(Vec<Span>),
    Strikethrough(Vec<Span>),
    Underline(Vec<Span>),
    /// Raw code-span text, joined from fragments if the tokenizer split it.
    Code(TextContent),
    Link {
        children: Vec<Span>,
        destination: Option<TextContent>,
        title: Option<TextContent>,
    },
    Image {
        alt: Vec<Span>,
        source: Option<TextContent>,
        title: Option<TextContent>,
    },
    /// An explicit hard line break (two trailing spaces or `\`).
    LineBreak,
    /// An implicit line break from a single newline within a paragraph.
    SoftBreak,
    /// Raw inline HTML, e.g. `<span class="x">`.
    Html(TextContent),
    WikiLink {
        target: TextContent,
        children: Vec<Span>,
    },
    LatexInline(TextContent),
    LatexDisplay(TextContent),
}

impl Span {
    /// Recursively shifts every embedded [`crate::range::ByteRange`] by
    /// `delta`, including those inside link/image/wikilink attributes and
    /// code/html/latex content (§4.4.2).
    pub fn shift(&mut self, delta: usize) {
        match self {
            Span::Text(tc) | Span::Code(tc) | Span::Html(tc) => tc.shift(delta),
            Span::LatexInline(tc) | Span::LatexDisplay(tc) => tc.shift(delta),
            Span::Emphasis(children)
            | Span::Strong(children)
            | Span::Strikethrough(children)
            | Span::Underline(children) => {
                for child in children {
                    child.shift(delta);
                }
            }
            Span::Link {
                children,
                destination,
                title,
            } => {
                for child in children {
                    child.shift(delta);
                }
                if let Some(d) = destination {
                    d.shift(delta);
                }
                if let Some(t) = title {
                    t.shift(delta);
                }
            }
            Span::Image {
                alt,
                source,
                title,
            } => {
                for child in alt {
                    child.shift(delta);
                }
                if let Some(s) = source {
                    s.shift(delta);
                }
                if let Some(t) = title {
                    t.shift(delta);
                }
            }
            Span::WikiLink { target, children } => {
                target.shift(delta);
                for child in children {
                    child.shift(delta);
                }
            }
            Span::LineBreak | Span::SoftBreak => {}
        }
    }

    /// The minimum start / maximum end byte offset reachable from this
    /// span's content, used to compute a composite block's `range` (§4.3.2).
    /// Returns `None` for spans that carry no byte-range payload of their
    /// own (e.g. a bare `LineBreak`).
    pub fn extent(&self) -> Option<(u32, u32)> {
        match self {
            Span::Text(tc) | Span::Code(tc) | Span::Html(tc) => text_content_extent(tc),
            Span::LatexInline(tc) | Span::LatexDisplay(tc) => text_content_extent(tc),
            Span::Emphasis(children)
            | Span::Strong(children)
            | Span::Strikethrough(children)
            | Span::Underline(children) => merge_extents(children),
            Span::Link { children, .. } => merge_extents(children),
            Span::Image { alt, .. } => merge_extents(alt),
            Span::WikiLink { target, children } => {
                merge(text_content_extent(target), merge_extents(children))
            }
            Span::LineBreak | Span::SoftBreak => None,
        }
    }
}

fn text_content_extent(tc: &TextContent) -> Option<(u32, u32)> {
    use crate::range::ByteRangeSequence;
    match tc {
        TextContent::Bytes(r) => Some((r.start, r.end)),
        TextContent::String(_) => None,
        TextContent::Sequence(ByteRangeSequence(ranges)) => {
            let start = ranges.iter().map(|r| r.start).min()?;
            let end = ranges.iter().map(|r| r.end).max()?;
            Some((start, end))
        }
    }
}

fn merge_extents(spans: &[Span]) -> Option<(u32, u32)> {
    spans.iter().filter_map(Span::extent).fold(None, |acc, e| merge(acc, Some(e)))
}

fn merge(a: Option<(u32, u32)>, b: Option<(u32, u32)>) -> Option<(u32, u32)> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some((s1, e1)), Some((s2, e2))) => Some((s1.min(s2), e1.max(e2))),
    }
}
