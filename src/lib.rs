//! A high-throughput, streaming-capable Markdown engine producing a
//! zero-copy intermediate representation suitable for incremental UI
//! diffing.
//!
//! Three collaborating pieces:
//!
//! - [`parse`] — one-shot CommonMark+GFM parsing into a [`Document`] whose
//!   leaves reference the source buffer by byte offset.
//! - [`IncrementalParser`] — appends append-only chunks, freezing stable
//!   block prefixes as they become safe and re-deriving the pending tail
//!   on demand, with `O(total_bytes)` amortized cost.
//! - [`cache::HighlightCache`] / [`cache::CachedRenderer`] — a
//!   concurrency-safe cache for syntax highlighting and generic document
//!   rendering, both content/style-addressed rather than hash-addressed.
//!
//! The underlying CommonMark tokenizer, the view/rendering layer, and file
//! I/O are all external collaborators; this crate is a pure, synchronous
//! library core with no logging facade, since there is no I/O to
//! instrument that callers can't already observe from return values.

pub mod cache;
pub mod entities;
pub mod error;
pub mod incremental;
pub mod ir;
pub mod options;
mod parser;
pub mod range;

pub use error::{HighlightError, ParseError};
pub use incremental::IncrementalParser;
pub use ir::{Alignment, Block, BlockId, Cell, Document, ListItem, Row, Span};
pub use options::ParseOptions;
pub use parser::parse;
