//! A [`HighlighterEngine`] backed by `syntect`, behind the
//! `syntect-highlighter` feature.
//!
//! `SyntaxSet`/`ThemeSet` are loaded once and reused for every call — each
//! is expensive enough to build (tens of milliseconds) that doing it per
//! code block would dwarf the cost this cache exists to amortize.

use std::collections::BTreeSet;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::cache::highlight::{HighlightedLine, HighlighterEngine, StyledSpan};

const DEFAULT_THEME: &str = "base16-ocean.dark";

pub struct SyntectEngine {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl SyntectEngine {
    pub fn new() -> Self {
        SyntectEngine { syntax_set: SyntaxSet::load_defaults_newlines(), theme_set: ThemeSet::load_defaults() }
    }
}

impl Default for SyntectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlighterEngine for SyntectEngine {
    fn highlight(&self, code: &str, language: Option<&str>, theme: &str) -> Vec<HighlightedLine> {
        let syntax = language
            .and_then(|lang| self.syntax_set.find_syntax_by_token(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme_set.themes.get(theme).or_else(|| self.theme_set.themes.get(DEFAULT_THEME)) else {
            return plain_lines(code);
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let Ok(ranges) = highlighter.highlight_line(line, &self.syntax_set) else {
                lines.push(HighlightedLine(vec![StyledSpan {
                    text: line.trim_end_matches(['\r', '\n']).to_string(),
                    foreground: None,
                    bold: false,
                    italic: false,
                    underline: false,
                }]));
                continue;
            };

            let spans = ranges
                .into_iter()
                .map(|(style, text)| syntect_span(text.trim_end_matches(['\r', '\n']), style))
                .filter(|span: &StyledSpan| !span.text.is_empty())
                .collect();
            lines.push(HighlightedLine(spans));
        }
        lines
    }

    fn available_themes(&self) -> BTreeSet<String> {
        self.theme_set.themes.keys().cloned().collect()
    }

    fn default_theme(&self) -> String {
        if self.theme_set.themes.contains_key(DEFAULT_THEME) {
            DEFAULT_THEME.to_string()
        } else {
            self.theme_set.themes.keys().next().cloned().unwrap_or_else(|| "plain".to_string())
        }
    }
}

fn plain_lines(code: &str) -> Vec<HighlightedLine> {
    code.lines().map(|line| HighlightedLine(vec![StyledSpan { text: line.to_string(), foreground: None, bold: false, italic: false, underline: false }])).collect()
}

fn syntect_span(text: &str, style: SyntectStyle) -> StyledSpan {
    StyledSpan {
        text: text.to_string(),
        foreground: Some((style.foreground.r, style.foreground.g, style.foreground.b)),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}
