//! The `Document` IR root (spec §3.1, §3.5).

use crate::ir::block::Block;

/// An immutable source buffer plus the top-level blocks parsed from it.
///
/// `Document` exclusively owns `source`; every IR node borrows from it only
/// through [`crate::range::ByteRange`] offsets, never through a lifetime
/// parameter, so the IR can be freely cloned and sent across threads (§5)
/// without tying a Rust lifetime to the buffer. Once constructed, a
/// `Document` is never mutated (§3.5) — the incremental engine produces new
/// `Document` values rather than patching one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    source: Vec<u8>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(source: Vec<u8>, blocks: Vec<Block>) -> Self {
        Document { source, blocks }
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_is_retained_byte_exact() {
        let bytes = b"# Hello\n\nworld\n".to_vec();
        let doc = Document::new(bytes.clone(), vec![]);
        assert_eq!(doc.source(), bytes.as_slice());
    }
}
