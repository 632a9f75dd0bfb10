//! The error taxonomy observable at the crate boundary (spec §7).
//!
//! One flat `thiserror` enum per subsystem, matching the teacher's
//! `io::IoError` pattern (`src/io/mod.rs`). `InvalidRange` and
//! `ResourceMissing` are internal-only per spec §7 ("never exposed") and
//! so are not part of this public enum at all — they are recovered from
//! silently (an event is dropped, a table lookup falls back) rather than
//! surfaced as a `Result::Err`.

/// Errors surfaced from parsing a one-shot document or an incremental
/// segment.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
    /// The underlying tokenizer reported a non-zero status. The code is an
    /// opaque integer from the tokenizer, not interpreted by this crate.
    #[error("markdown tokenizer reported failure (code {0})")]
    ParseFailure(i32),
}

/// Errors surfaced from the highlight cache surface (C7).
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum HighlightError {
    /// Never actually surfaced to callers — `set_theme` on an unrecognized
    /// name coerces to the default theme instead (spec §4.6, §7). Kept so
    /// the taxonomy documents the policy even though no code path
    /// constructs this variant.
    #[error("unknown theme {0:?}; coerced to default")]
    ThemeUnknown(String),
}
