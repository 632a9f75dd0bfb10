//! Block variants (spec §3.2).

use crate::ir::id::BlockId;
use crate::ir::span::Span;
use crate::range::{ByteRange, ByteRangeSequence, TextContent};

/// Cell alignment inherited verbatim from `pulldown_cmark::Alignment`
/// (spec §3.6) so the adapter maps it with a single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub id: BlockId,
    pub spans: Vec<Span>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub id: BlockId,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    pub id: BlockId,
    pub children: Vec<Block>,
    pub is_task: bool,
    pub is_checked: bool,
}

/// A top-level structural unit in the IR tree (spec §3.2).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    Paragraph {
        id: BlockId,
        spans: Vec<Span>,
        range: ByteRange,
    },
    Heading {
        id: BlockId,
        level: u8,
        spans: Vec<Span>,
        range: ByteRange,
    },
    CodeBlock {
        id: BlockId,
        info: Option<TextContent>,
        language: Option<TextContent>,
        content: ByteRangeSequence,
        fence_char: Option<char>,
    },
    HtmlBlock {
        id: BlockId,
        content: ByteRangeSequence,
    },
    BlockQuote {
        id: BlockId,
        children: Vec<Block>,
    },
    List {
        id: BlockId,
        ordered: bool,
        start: u64,
        delimiter: Option<char>,
        tight: bool,
        items: Vec<ListItem>,
    },
    Table {
        id: BlockId,
        alignments: Vec<Alignment>,
        header_rows: Vec<Row>,
        body_rows: Vec<Row>,
    },
    ThematicBreak {
        id: BlockId,
        range: ByteRange,
    },
}

impl Block {
    pub fn id(&self) -> BlockId {
        match self {
            Block::Paragraph { id, .. }
            | Block::Heading { id, .. }
            | Block::CodeBlock { id, .. }
            | Block::HtmlBlock { id, .. }
            | Block::BlockQuote { id, .. }
            | Block::List { id, .. }
            | Block::Table { id, .. }
            | Block::ThematicBreak { id, .. } => *id,
        }
    }

    /// A discriminant independent of byte position, used to build the
    /// "block type sequence" compared across one-shot vs. incremental
    /// parses (spec §8.1 invariant 3).
    pub fn type_tag(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::CodeBlock { .. } => "code_block",
            Block::HtmlBlock { .. } => "html_block",
            Block::BlockQuote { .. } => "block_quote",
            Block::List { .. } => "list",
            Block::Table { .. } => "table",
            Block::ThematicBreak { .. } => "thematic_break",
        }
    }

    /// Recursively shifts every embedded byte range by `delta` (§4.4.2),
    /// including container children, table cells, and every `BlockId`
    /// reachable from this block. The id's `start`/`end` fields identify a
    /// byte position exactly like the sibling `range` field does, so they
    /// must move together — an id left behind after its range is shifted
    /// would collide with an id minted fresh at the old, now-vacated
    /// position in a later sub-parse.
    pub fn shift(&mut self, delta: usize) {
        match self {
            Block::Paragraph { id, spans, range } | Block::Heading { id, spans, range, .. } => {
                id.shift(delta);
                for s in spans {
                    s.shift(delta);
                }
                *range = range.shifted(delta);
            }
            Block::CodeBlock {
                id,
                info,
                language,
                content,
                ..
            } => {
                id.shift(delta);
                if let Some(i) = info {
                    i.shift(delta);
                }
                if let Some(l) = language {
                    l.shift(delta);
                }
                content.shift(delta);
            }
            Block::HtmlBlock { id, content } => {
                id.shift(delta);
                content.shift(delta);
            }
            Block::BlockQuote { id, children } => {
                id.shift(delta);
                for c in children {
                    c.shift(delta);
                }
            }
            Block::List { id, items, .. } => {
                id.shift(delta);
                for item in items {
                    item.id.shift(delta);
                    for c in &mut item.children {
                        c.shift(delta);
                    }
                }
            }
            Block::Table {
                id,
                header_rows,
                body_rows,
                ..
            } => {
                id.shift(delta);
                for row in header_rows.iter_mut().chain(body_rows.iter_mut()) {
                    row.id.shift(delta);
                    for cell in &mut row.cells {
                        cell.id.shift(delta);
                        for s in &mut cell.spans {
                            s.shift(delta);
                        }
                    }
                }
            }
            Block::ThematicBreak { id, range } => {
                id.shift(delta);
                *range = range.shifted(delta);
            }
        }
    }
}

/// Computes `(min_start, max_end)` across the ranges reachable from a set
/// of spans, per §4.3.2. Empty span lists produce `(0, 0)` — callers must
/// not read from that as meaningful content.
pub fn range_of_spans(spans: &[Span]) -> ByteRange {
    spans
        .iter()
        .filter_map(Span::extent)
        .fold(None, |acc: Option<(u32, u32)>, (s, e)| match acc {
            None => Some((s, e)),
            Some((s0, e0)) => Some((s0.min(s), e0.max(e))),
        })
        .map(|(s, e)| ByteRange { start: s, end: e })
        .unwrap_or(ByteRange::EMPTY)
}

/// Computes the merge of child-block ranges, for container blocks
/// (BlockQuote/List/Table) per §4.3.2.
pub fn range_of_blocks(blocks: &[Block]) -> ByteRange {
    blocks
        .iter()
        .filter_map(block_extent)
        .fold(None, |acc: Option<(u32, u32)>, (s, e)| match acc {
            None => Some((s, e)),
            Some((s0, e0)) => Some((s0.min(s), e0.max(e))),
        })
        .map(|(s, e)| ByteRange { start: s, end: e })
        .unwrap_or(ByteRange::EMPTY)
}

fn block_extent(block: &Block) -> Option<(u32, u32)> {
    match block {
        Block::Paragraph { range, .. }
        | Block::Heading { range, .. }
        | Block::ThematicBreak { range, .. } => Some((range.start, range.end)),
        Block::CodeBlock { content, .. } | Block::HtmlBlock { content, .. } => {
            let start = content.0.iter().map(|r| r.start).min()?;
            let end = content.0.iter().map(|r| r.end).max()?;
            Some((start, end))
        }
        Block::BlockQuote { children, .. } => {
            if children.is_empty() {
                return None;
            }
            let r = range_of_blocks(children);
            Some((r.start, r.end))
        }
        Block::List { items, .. } => {
            let all: Vec<Block> = items.iter().flat_map(|i| i.children.clone()).collect();
            if all.is_empty() {
                return None;
            }
            let r = range_of_blocks(&all);
            Some((r.start, r.end))
        }
        Block::Table {
            header_rows,
            body_rows,
            ..
        } => {
            let spans: Vec<Span> = header_rows
                .iter()
                .chain(body_rows.iter())
                .flat_map(|row| row.cells.iter().flat_map(|c| c.spans.clone()))
                .collect();
            let r = range_of_spans(&spans);
            (!spans.is_empty()).then_some((r.start, r.end))
        }
    }
}
