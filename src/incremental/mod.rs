//! The incremental engine (C5): appends append-only chunks, freezes stable
//! prefixes as they become safe, and re-derives the pending tail on demand
//! (spec §4.4).

mod boundary;
mod shift;

use std::sync::Mutex;

use uuid::Uuid;

use crate::error::ParseError;
use crate::ir::Block;
use crate::ir::Document;
use crate::options::ParseOptions;
use crate::parser;

struct State {
    stable_blocks: Vec<Block>,
    stable_data: Vec<u8>,
    pending: Vec<u8>,
    finalized: bool,
    document_id: Uuid,
    options: ParseOptions,
}

impl State {
    fn new(options: ParseOptions) -> Self {
        State {
            stable_blocks: Vec::new(),
            stable_data: Vec::new(),
            pending: Vec::new(),
            finalized: false,
            document_id: Uuid::new_v4(),
            options,
        }
    }
}

/// A single-writer incremental parser (spec §4.4, §5). Every public
/// operation acquires an internal mutex; none of them suspend while
/// holding it, so the lock is always held for `O(|chunk|)` work.
pub struct IncrementalParser {
    state: Mutex<State>,
}

impl IncrementalParser {
    pub fn new(options: ParseOptions) -> Self {
        IncrementalParser { state: Mutex::new(State::new(options)) }
    }

    /// Appends a chunk and freezes at most one newly-safe prefix (spec
    /// §4.4.1). A no-op once `finalize` has been called.
    pub fn append(&self, bytes: impl AsRef<[u8]>) -> Result<(), ParseError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Ok(());
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.finalized {
            return Ok(());
        }
        state.pending.extend_from_slice(bytes);
        Self::try_freeze_boundary(&mut state)?;
        Ok(())
    }

    fn try_freeze_boundary(state: &mut State) -> Result<(), ParseError> {
        let Some(boundary) = boundary::advance_boundary(&state.pending) else {
            return Ok(());
        };
        let prefix: Vec<u8> = state.pending.drain(..boundary).collect();
        let delta = state.stable_data.len();
        let mut doc = parser::parse(&prefix, state.options)?;
        let mut blocks = std::mem::take(&mut doc.blocks);
        shift::shift_blocks(&mut blocks, delta);
        state.stable_blocks.extend(blocks);
        state.stable_data.extend_from_slice(&prefix);
        Ok(())
    }

    /// Parses any remaining `pending` bytes as a final stable segment and
    /// marks this session closed. Idempotent: calling `finalize` again
    /// returns the same result without reparsing.
    pub fn finalize(&self) -> Result<Document, ParseError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.finalized {
            if !state.pending.is_empty() {
                let delta = state.stable_data.len();
                let tail: Vec<u8> = std::mem::take(&mut state.pending);
                let mut doc = parser::parse(&tail, state.options)?;
                let mut blocks = std::mem::take(&mut doc.blocks);
                shift::shift_blocks(&mut blocks, delta);
                state.stable_blocks.extend(blocks);
                state.stable_data.extend_from_slice(&tail);
            }
            state.finalized = true;
        }
        Ok(Document::new(state.stable_data.clone(), state.stable_blocks.clone()))
    }

    /// Discards all state and starts a new session with a fresh
    /// `document_id`.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = State::new(state.options);
    }

    /// Produces a consistent [`Document`] from the current state without
    /// mutating it: frozen blocks, followed by an isolated parse of
    /// `pending` with its ranges shifted into the global buffer (spec
    /// §3.5, §4.4).
    pub fn snapshot(&self) -> Result<Document, ParseError> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut blocks = state.stable_blocks.clone();
        let mut source = state.stable_data.clone();
        if !state.pending.is_empty() {
            let delta = source.len();
            let mut doc = parser::parse(&state.pending, state.options)?;
            shift::shift_blocks(&mut doc.blocks, delta);
            blocks.extend(doc.blocks);
            source.extend_from_slice(&state.pending);
        }
        Ok(Document::new(source, blocks))
    }

    /// A lossy-decoded view of the unfrozen tail, for debugging/tests only.
    pub fn pending_content(&self) -> String {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&state.pending).into_owned()
    }

    pub fn stable_block_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).stable_blocks.len()
    }

    pub fn document_id(&self) -> Uuid {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).document_id
    }
}
