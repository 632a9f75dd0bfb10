//! Transient block-level stack frames built while draining tokenizer events
//! (spec §4.3). Each variant corresponds to one open container; frames are
//! popped and converted into [`crate::ir::Block`] values as their closing
//! event arrives.

use crate::ir::{Alignment, Cell, ListItem, Row};
use crate::range::{ByteRangeSequence, TextContent};

pub enum BlockFrame {
    Document {
        children: Vec<crate::ir::Block>,
    },
    BlockQuote {
        children: Vec<crate::ir::Block>,
    },
    List {
        ordered: bool,
        start: u64,
        delimiter: Option<char>,
        items: Vec<ListItem>,
        /// Set once a genuine (non-synthesized) paragraph is seen as an
        /// item's leading content — CommonMark's signal that the list is
        /// loose (§4.3.1).
        loose_seen: bool,
    },
    ListItem {
        children: Vec<crate::ir::Block>,
        is_task: bool,
        is_checked: bool,
        /// True until this item's first piece of content is seen. If that
        /// content turns out to be bare inline events (no enclosing
        /// `Paragraph`), the adapter synthesizes one (§4.3.1).
        pending_implicit: bool,
    },
    /// `synthesized` distinguishes the tight-list compensation paragraph
    /// from a genuine one — both drain identically, but only the
    /// synthesized kind is closed implicitly by a sibling block event.
    Paragraph {
        synthesized: bool,
    },
    Heading {
        level: u8,
    },
    CodeBlock {
        info: Option<TextContent>,
        language: Option<TextContent>,
        fragments: ByteRangeSequence,
        fence_char: Option<char>,
    },
    HtmlBlock {
        fragments: ByteRangeSequence,
    },
    Table {
        alignments: Vec<Alignment>,
        header_rows: Vec<Row>,
        body_rows: Vec<Row>,
        in_head: bool,
    },
    TableRow {
        cells: Vec<Cell>,
    },
    TableCell {
        alignment: Alignment,
    },
}
