//! Secondary scan over plain text runs for constructs `pulldown-cmark`
//! doesn't tokenize itself: wikilinks, LaTeX spans, a lightweight
//! underline extension, and permissive (non-bracketed) autolinks.
//!
//! Grounded in the teacher's wikilink-scanning pass (`parsing/inline/wikilink.rs`,
//! `parsing/inline/parser.rs`), generalized from a single construct to the
//! small family this engine supports, and driven by the same [`super::cursor::Cursor`].
//!
//! Only called on text runs where the tokenizer's decoded string is
//! byte-identical to the source slice it was produced from (see
//! `adapter::handle_text`) — so every absolute offset computed here lines
//! up exactly with the original buffer.

use std::sync::LazyLock;

use regex::Regex;

use crate::ir::Span;
use crate::options::ParseOptions;
use crate::range::{ByteRange, TextContent};

use super::cursor::Cursor;

static WWW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^www\.[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+(?:/[^\s<>\[\]()]*)?").unwrap()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s<>\[\]()]+").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.+_-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+").unwrap()
});

/// Scans one plain-text run and returns the span sequence it expands to —
/// usually just `[Text(whole run)]`, but split around any special
/// constructs found inside it.
pub fn scan_extended_inline(base: usize, text: &str, options: ParseOptions) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cur = Cursor::new(text, base);
    let mut run_start = cur.i;

    while !cur.eof() {
        let matched = try_wikilink(&mut cur)
            .or_else(|| try_latex_display(&mut cur))
            .or_else(|| try_latex_inline(&mut cur))
            .or_else(|| try_underline(&mut cur))
            .or_else(|| try_autolink(&mut cur, options, at_word_start(text, cur.i)));

        match matched {
            Some((match_start, span)) => {
                if match_start > base + run_start {
                    spans.push(text_span(base + run_start, match_start));
                }
                spans.push(span);
                run_start = cur.i;
            }
            None => {
                cur.bump_char();
            }
        }
    }

    if run_start < cur.i {
        spans.push(text_span(base + run_start, base + cur.i));
    }

    spans
}

fn text_span(start: usize, end: usize) -> Span {
    Span::Text(TextContent::Bytes(ByteRange::new(start, end)))
}

fn at_word_start(text: &str, i: usize) -> bool {
    if i == 0 {
        return true;
    }
    match text[..i].chars().next_back() {
        Some(c) => !(c.is_alphanumeric() || c == '@' || c == '.' || c == '/'),
        None => true,
    }
}

/// `[[target]]` or `[[target|display]]`.
fn try_wikilink(cur: &mut Cursor) -> Option<(usize, Span)> {
    if !cur.starts_with("[[") {
        return None;
    }
    let open = cur.i;
    let inner_start = open + 2;
    let rel_close = cur.s[inner_start..].find("]]")?;
    let close = inner_start + rel_close;
    if close <= inner_start {
        return None;
    }
    let inner = &cur.s[inner_start..close];
    let (target_range, children) = match inner.find('|') {
        Some(rel_pipe) => {
            let pipe = inner_start + rel_pipe;
            let target = ByteRange::new(cur.base + inner_start, cur.base + pipe);
            let display = ByteRange::new(cur.base + pipe + 1, cur.base + close);
            (target, vec![Span::Text(TextContent::Bytes(display))])
        }
        None => {
            let target = ByteRange::new(cur.base + inner_start, cur.base + close);
            (target, vec![Span::Text(TextContent::Bytes(target))])
        }
    };
    cur.bump_n(close + 2 - open);
    Some((
        cur.base + open,
        Span::WikiLink {
            target: TextContent::Bytes(target_range),
            children,
        },
    ))
}

/// `$$display latex$$`.
fn try_latex_display(cur: &mut Cursor) -> Option<(usize, Span)> {
    if !cur.starts_with("$$") {
        return None;
    }
    let open = cur.i;
    let inner_start = open + 2;
    let rel_close = cur.s[inner_start..].find("$$")?;
    let close = inner_start + rel_close;
    if close <= inner_start {
        return None;
    }
    let content = ByteRange::new(cur.base + inner_start, cur.base + close);
    cur.bump_n(close + 2 - open);
    Some((cur.base + open, Span::LatexDisplay(TextContent::Bytes(content))))
}

/// `$inline latex$`, single dollar, no embedded newline.
fn try_latex_inline(cur: &mut Cursor) -> Option<(usize, Span)> {
    if cur.peek() != Some(b'$') {
        return None;
    }
    let open = cur.i;
    let inner_start = open + 1;
    let rest = &cur.s[inner_start..];
    let rel_close = rest.find('$')?;
    if rel_close == 0 {
        return None;
    }
    let inner = &rest[..rel_close];
    if inner.contains('\n') {
        return None;
    }
    let close = inner_start + rel_close;
    let content = ByteRange::new(cur.base + inner_start, cur.base + close);
    cur.bump_n(close + 1 - open);
    Some((cur.base + open, Span::LatexInline(TextContent::Bytes(content))))
}

/// `++underlined text++`, a lightweight insert/underline extension.
fn try_underline(cur: &mut Cursor) -> Option<(usize, Span)> {
    if !cur.starts_with("++") {
        return None;
    }
    let open = cur.i;
    let inner_start = open + 2;
    let rel_close = cur.s[inner_start..].find("++")?;
    let close = inner_start + rel_close;
    if close <= inner_start {
        return None;
    }
    let content = ByteRange::new(cur.base + inner_start, cur.base + close);
    cur.bump_n(close + 2 - open);
    Some((
        cur.base + open,
        Span::Underline(vec![Span::Text(TextContent::Bytes(content))]),
    ))
}

fn try_autolink(cur: &mut Cursor, options: ParseOptions, word_start: bool) -> Option<(usize, Span)> {
    if !word_start {
        return None;
    }
    let rest = &cur.s[cur.i..];
    let open = cur.i;

    if options.contains(ParseOptions::PERMISSIVE_URL_AUTOLINKS) {
        if let Some(m) = URL_RE.find(rest) {
            let text = trim_trailing_punctuation(m.as_str());
            let end = open + text.len();
            let range = ByteRange::new(cur.base + open, cur.base + end);
            cur.bump_n(end - open);
            return Some((
                cur.base + open,
                Span::Link {
                    children: vec![Span::Text(TextContent::Bytes(range))],
                    destination: Some(TextContent::Bytes(range)),
                    title: None,
                },
            ));
        }
    }
    if options.contains(ParseOptions::PERMISSIVE_WWW_AUTOLINKS) {
        if let Some(m) = WWW_RE.find(rest) {
            let text = trim_trailing_punctuation(m.as_str());
            let end = open + text.len();
            let range = ByteRange::new(cur.base + open, cur.base + end);
            cur.bump_n(end - open);
            return Some((
                cur.base + open,
                Span::Link {
                    children: vec![Span::Text(TextContent::Bytes(range))],
                    destination: Some(TextContent::String(format!("http://{text}"))),
                    title: None,
                },
            ));
        }
    }
    if options.contains(ParseOptions::PERMISSIVE_EMAIL_AUTOLINKS) {
        if let Some(m) = EMAIL_RE.find(rest) {
            let text = trim_trailing_punctuation(m.as_str());
            let end = open + text.len();
            let range = ByteRange::new(cur.base + open, cur.base + end);
            cur.bump_n(end - open);
            return Some((
                cur.base + open,
                Span::Link {
                    children: vec![Span::Text(TextContent::Bytes(range))],
                    destination: Some(TextContent::String(format!("mailto:{text}"))),
                    title: None,
                },
            ));
        }
    }
    None
}

/// Autolink regexes are greedy about trailing punctuation; GFM trims a
/// trailing `.`, `,`, `;`, `:`, `!`, or `?` that isn't part of the URL.
fn trim_trailing_punctuation(s: &str) -> &str {
    s.trim_end_matches(['.', ',', ';', ':', '!', '?'])
}
