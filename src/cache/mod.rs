//! Caching surfaces that sit beside the IR: the generic LRU primitive
//! (C6), the concurrency-safe syntax-highlighting surface built on it
//! (C7), and the generic render cache from spec §6.1.

pub mod highlight;
pub mod lru;
#[cfg(feature = "syntect-highlighter")]
pub mod syntect_highlighter;

use uuid::Uuid;

use crate::cache::lru::LruCache;
use crate::ir::Document;

/// A caller-supplied rendering backend. This crate owns only the cache
/// around it — the styled-text representation `Output` belongs to the view
/// layer, which is an external collaborator (spec §1, §6.1).
pub trait Render {
    type Style: std::hash::Hash + Eq + Clone;
    type Output: Clone;

    fn render(&self, document: &Document, style: &Self::Style) -> Self::Output;
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct RenderKey<S> {
    document_id: Uuid,
    style: S,
}

/// Caches the (possibly expensive) output of a [`Render`] backend, keyed by
/// `(document_id, style)` so two renders of the same document under
/// different styles never collide (spec §6.1, invariant I6).
///
/// `document_id` is supplied by the caller rather than derived from
/// `Document` itself: one-shot `parse()` results have no identity of their
/// own, while an [`crate::incremental::IncrementalParser`] session's
/// `document_id()` is the natural key for documents produced from it.
pub struct CachedRenderer<R: Render> {
    renderer: R,
    cache: std::sync::Mutex<LruCache<RenderKey<R::Style>, R::Output>>,
}

impl<R: Render> CachedRenderer<R> {
    pub fn new(renderer: R, capacity: usize) -> Self {
        CachedRenderer { renderer, cache: std::sync::Mutex::new(LruCache::new(capacity)) }
    }

    pub fn render(&self, document_id: Uuid, document: &Document, style: &R::Style) -> R::Output {
        let key = RenderKey { document_id, style: style.clone() };
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = cache.get(&key) {
            return cached.clone();
        }
        let output = self.renderer.render(document, style);
        cache.put(key, output.clone());
        output
    }

    /// Drops every cached entry for `document_id`, across all styles.
    /// `LruCache` has no native "remove by predicate", so this rebuilds the
    /// cache from the entries that survive — acceptable since invalidation
    /// is rare compared to `render`.
    pub fn invalidate(&self, document_id: Uuid) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if cache.len() == 0 {
            return;
        }
        let capacity = cache.capacity();
        let survivors: Vec<_> = std::mem::replace(&mut *cache, LruCache::new(capacity))
            .drain()
            .filter(|(key, _)| key.document_id != document_id)
            .collect();
        for (key, value) in survivors {
            cache.put(key, value);
        }
    }

    pub fn clear(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Document;

    #[derive(Clone, Hash, PartialEq, Eq)]
    struct Style {
        dark_mode: bool,
    }

    struct CountingRenderer {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Render for CountingRenderer {
        type Style = Style;
        type Output = String;

        fn render(&self, document: &Document, style: &Self::Style) -> Self::Output {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            format!("{}:{}", document.source().len(), style.dark_mode)
        }
    }

    fn doc() -> Document {
        Document::new(b"hello".to_vec(), vec![])
    }

    #[test]
    fn repeated_render_with_same_key_hits_the_cache() {
        let renderer = CachedRenderer::new(CountingRenderer { calls: 0.into() }, 8);
        let id = Uuid::new_v4();
        let style = Style { dark_mode: true };
        renderer.render(id, &doc(), &style);
        renderer.render(id, &doc(), &style);
        assert_eq!(renderer.renderer.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_styles_produce_distinct_cache_entries() {
        let renderer = CachedRenderer::new(CountingRenderer { calls: 0.into() }, 8);
        let id = Uuid::new_v4();
        let light = renderer.render(id, &doc(), &Style { dark_mode: false });
        let dark = renderer.render(id, &doc(), &Style { dark_mode: true });
        assert_ne!(light, dark);
        assert_eq!(renderer.renderer.calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_drops_only_the_named_document() {
        let renderer = CachedRenderer::new(CountingRenderer { calls: 0.into() }, 8);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let style = Style { dark_mode: true };
        renderer.render(a, &doc(), &style);
        renderer.render(b, &doc(), &style);
        renderer.invalidate(a);
        renderer.render(a, &doc(), &style);
        renderer.render(b, &doc(), &style);
        assert_eq!(renderer.renderer.calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    }
}
