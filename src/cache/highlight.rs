//! The highlight cache surface (component C7): a single-writer wrapper
//! around an opaque highlighter plus the LRU cache in [`crate::cache::lru`].
//!
//! Serialization is `tokio::sync::Mutex` rather than `std::sync::Mutex`
//! because the wrapped highlighter call is treated as `async` (spec §5) —
//! real syntax highlighters (syntect included) can be CPU-heavy enough that
//! a caller may want to run them on a blocking pool, and an async mutex lets
//! that `.await` happen while held without poisoning anything.

use std::collections::BTreeSet;

use tokio::sync::Mutex;

use crate::cache::lru::LruCache;
use crate::error::HighlightError;

/// A single highlighted character run with resolved foreground color and
/// font style, the smallest unit the view layer needs to paint text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledSpan {
    pub text: String,
    pub foreground: Option<(u8, u8, u8)>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyledSpan {
    fn plain(text: impl Into<String>) -> Self {
        StyledSpan { text: text.into(), foreground: None, bold: false, italic: false, underline: false }
    }
}

/// One line of highlighted output, mirroring how `syntect`/editor highlight
/// APIs segment code into lines of spans.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightedLine(pub Vec<StyledSpan>);

/// Content-addressed cache key (spec invariant I5: compare full code bytes,
/// never only a hash, so long equal-prefix blocks can't collide).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HighlightKey {
    theme: String,
    language: Option<String>,
    code: String,
}

/// The one interface-dispatch boundary in this crate (§9 design notes):
/// every other component is concrete, but the underlying syntax highlighter
/// is swappable and not assumed thread-safe, which is exactly why this
/// surface exists to serialize access to it.
pub trait HighlighterEngine: Send + Sync {
    fn highlight(&self, code: &str, language: Option<&str>, theme: &str) -> Vec<HighlightedLine>;
    fn available_themes(&self) -> BTreeSet<String>;
    fn default_theme(&self) -> String;
}

/// Renders each line as a single unstyled span. Used when no feature-gated
/// highlighter backend is compiled in, and as the fallback path inside real
/// backends when a language or theme can't be resolved.
pub struct PlainTextEngine;

impl HighlighterEngine for PlainTextEngine {
    fn highlight(&self, code: &str, _language: Option<&str>, _theme: &str) -> Vec<HighlightedLine> {
        code.lines().map(|line| HighlightedLine(vec![StyledSpan::plain(line)])).collect()
    }

    fn available_themes(&self) -> BTreeSet<String> {
        BTreeSet::from(["plain".to_string()])
    }

    fn default_theme(&self) -> String {
        "plain".to_string()
    }
}

struct Inner {
    theme: String,
    cache: LruCache<HighlightKey, Vec<HighlightedLine>>,
}

/// Serializes access to a [`HighlighterEngine`] and its content-addressed
/// LRU cache behind a single `tokio::sync::Mutex` (spec §4.6).
pub struct HighlightCache {
    engine: Box<dyn HighlighterEngine>,
    inner: Mutex<Inner>,
}

impl HighlightCache {
    pub fn new(engine: Box<dyn HighlighterEngine>, theme: impl Into<String>, capacity: usize) -> Self {
        let requested = theme.into();
        let theme = if engine.available_themes().contains(&requested) {
            requested
        } else {
            engine.default_theme()
        };
        HighlightCache { engine, inner: Mutex::new(Inner { theme, cache: LruCache::new(capacity) }) }
    }

    /// Looks up `HighlightKey{theme, language, code}`; on miss, invokes the
    /// underlying highlighter and stores the result (spec §4.6).
    pub async fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightedLine> {
        let mut inner = self.inner.lock().await;
        let key = HighlightKey { theme: inner.theme.clone(), language: language.map(str::to_string), code: code.to_string() };
        if let Some(cached) = inner.cache.get(&key) {
            return cached.clone();
        }
        let rendered = self.engine.highlight(code, language, &inner.theme);
        inner.cache.put(key, rendered.clone());
        rendered
    }

    /// Validates `name` against the themes the engine advertises; falls
    /// back to the engine's documented default and invalidates the cache
    /// either way, since every cached entry was rendered under the
    /// previous theme (spec §4.6). An unknown name is coerced silently,
    /// never surfaced as an error (spec §7 `ThemeUnknown`).
    pub async fn set_theme(&self, name: &str) -> Result<(), HighlightError> {
        let mut inner = self.inner.lock().await;
        let known = self.engine.available_themes();
        let resolved = if known.contains(name) { name.to_string() } else { self.engine.default_theme() };
        inner.theme = resolved;
        inner.cache.clear();
        Ok(())
    }

    pub async fn clear(&self) {
        self.inner.lock().await.cache.clear();
    }

    pub async fn current_theme(&self) -> String {
        self.inner.lock().await.theme.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> HighlightCache {
        HighlightCache::new(Box::new(PlainTextEngine), "plain", capacity)
    }

    #[tokio::test]
    async fn unknown_theme_coerces_to_default_without_erroring_the_caller_out() {
        let cache = cache(8);
        let result = cache.set_theme("nonexistent-theme").await;
        assert!(result.is_ok());
        assert_eq!(cache.current_theme().await, "plain");
    }

    #[tokio::test]
    async fn repeated_highlight_of_identical_code_hits_the_cache() {
        let cache = cache(8);
        let first = cache.highlight("fn main() {}", Some("rust")).await;
        let second = cache.highlight("fn main() {}", Some("rust")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn distinct_code_with_a_shared_prefix_does_not_collide() {
        let cache = cache(8);
        let a = cache.highlight("let x = 1;", None).await;
        let b = cache.highlight("let x = 12;", None).await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn set_theme_invalidates_existing_entries() {
        let cache = cache(8);
        cache.highlight("let x = 1;", None).await;
        cache.set_theme("plain").await.unwrap();
        // cache.clear() happened as part of set_theme; nothing to assert on
        // output equality here, only that it didn't panic or deadlock.
        cache.highlight("let x = 1;", None).await;
    }
}
