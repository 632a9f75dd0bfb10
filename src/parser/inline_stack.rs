//! Transient inline-level stack frames (spec §4.3). The stack always has a
//! `Root` at its base while inline collection is active; every other
//! variant is a container opened by a `Start` event and drained into a
//! [`crate::ir::Span`] by the matching `End`.

use crate::ir::Span;
use crate::range::TextContent;

pub enum InlineFrame {
    Root(Vec<Span>),
    Emphasis(Vec<Span>),
    Strong(Vec<Span>),
    Strikethrough(Vec<Span>),
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
}

impl InlineFrame {
    fn children_mut(&mut self) -> &mut Vec<Span> {
        match self {
            InlineFrame::Root(v)
            | InlineFrame::Emphasis(v)
            | InlineFrame::Strong(v)
            | InlineFrame::Strikethrough(v) => v,
            InlineFrame::Link { children, .. } => children,
            InlineFrame::Image { alt, .. } => alt,
        }
    }

    /// Appends a finished span to whichever child collection this frame
    /// carries (the root's top-level spans, an emphasis run's children, a
    /// link's children, an image's alt text, …).
    pub fn push(&mut self, span: Span) {
        self.children_mut().push(span);
    }
}
