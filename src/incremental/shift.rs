//! Range-shifting traversal applied to a freshly-parsed segment before it's
//! absorbed into the global buffer (spec §4.4.2).

use crate::ir::Block;

/// Adds `delta` to every byte range reachable from `blocks`, recursively
/// through container children, table cells, and span attributes — and to
/// every `BlockId`/`ListItem`/`Row`/`Cell` id's `start`/`end`, which name a
/// byte position exactly like a sibling `range` field does. Leaving ids
/// unshifted would let two blocks frozen from different sub-parses collide
/// on identity once their (now-shifted) ranges diverge.
pub fn shift_blocks(blocks: &mut [Block], delta: usize) {
    if delta == 0 {
        return;
    }
    for block in blocks {
        block.shift(delta);
    }
}
