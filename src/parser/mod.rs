//! Public one-shot parsing facade (component C4/C9).

mod adapter;
mod autolink;
mod block_stack;
mod cursor;
mod inline_stack;

use crate::error::ParseError;
use crate::ir::Document;
use crate::options::ParseOptions;

/// Parses a byte buffer into a [`Document`] (spec §6.1).
///
/// If `bytes` isn't valid UTF-8, it is first lossy-decoded; the resulting
/// `Document::source` is the bytes of that decoded form, not the original
/// input, so every stored `ByteRange` still lines up with `source` exactly
/// (spec §8.1 invariant 2 holds trivially for the common case of
/// already-valid UTF-8 input, and by construction for the fallback case).
pub fn parse(bytes: impl AsRef<[u8]>, options: ParseOptions) -> Result<Document, ParseError> {
    let bytes = bytes.as_ref();
    let source = match std::str::from_utf8(bytes) {
        Ok(_) => bytes.to_vec(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned().into_bytes(),
    };
    adapter::build_document(source, options)
}
