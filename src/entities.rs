//! HTML entity decoding (`&amp;`, `&#65;`, `&#x41;`) for inline text runs.
//!
//! The named-entity table is loaded once into a process-wide static, per
//! spec §4.2 and the "no global mutable state beyond the entity table"
//! design note (§9). Resource loading can't actually fail here (the table
//! is a compiled-in constant), but the lookup is still written as a
//! fallible resource fetch so the debug-only assertion in §7's
//! `ResourceMissing` has somewhere real to live if the table is ever
//! swapped for one loaded from disk.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A conservative, commonly-needed subset of the HTML5 named character
/// reference table. Entries absent from this table are returned verbatim
/// by [`decode`], per spec §4.2.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{00A0}"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
    ("hellip", "\u{2026}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("ldquo", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("bull", "\u{2022}"),
    ("dagger", "\u{2020}"),
    ("Dagger", "\u{2021}"),
    ("permil", "\u{2030}"),
    ("prime", "\u{2032}"),
    ("Prime", "\u{2033}"),
    ("laquo", "\u{00AB}"),
    ("raquo", "\u{00BB}"),
    ("times", "\u{00D7}"),
    ("divide", "\u{00F7}"),
    ("plusmn", "\u{00B1}"),
    ("deg", "\u{00B0}"),
    ("micro", "\u{00B5}"),
    ("para", "\u{00B6}"),
    ("sect", "\u{00A7}"),
    ("middot", "\u{00B7}"),
    ("cent", "\u{00A2}"),
    ("pound", "\u{00A3}"),
    ("yen", "\u{00A5}"),
    ("euro", "\u{20AC}"),
    ("larr", "\u{2190}"),
    ("uarr", "\u{2191}"),
    ("rarr", "\u{2192}"),
    ("darr", "\u{2193}"),
    ("harr", "\u{2194}"),
];

static NAMED_ENTITY_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(load_named_entities);

fn load_named_entities() -> HashMap<&'static str, &'static str> {
    let table: HashMap<&'static str, &'static str> = NAMED_ENTITIES.iter().copied().collect();
    // Release builds degrade gracefully to an empty map (all named entities
    // pass through verbatim); debug builds assert the resource loaded.
    debug_assert!(!table.is_empty(), "entity table failed to load");
    table
}

/// Decodes a single entity token (`&name;`, `&#NNN;`, or `&#xHHH;`/`&#XHHH;`)
/// to its literal text. Tokens that don't resolve — malformed numeric
/// references, out-of-range scalars, or unknown names — are returned
/// unchanged, per spec §4.2. Pure and deterministic.
pub fn decode(token: &str) -> String {
    let Some(body) = token.strip_prefix('&').and_then(|s| s.strip_suffix(';')) else {
        return token.to_string();
    };

    if let Some(digits) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return decode_numeric(digits, 16, token);
    }
    if let Some(digits) = body.strip_prefix('#') {
        return decode_numeric(digits, 10, token);
    }

    NAMED_ENTITY_TABLE
        .get(body)
        .map(|s| s.to_string())
        .unwrap_or_else(|| token.to_string())
}

fn decode_numeric(digits: &str, radix: u32, fallback: &str) -> String {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .map(|c| c.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_entity() {
        assert_eq!(decode("&amp;"), "&");
        assert_eq!(decode("&copy;"), "\u{00A9}");
    }

    #[test]
    fn unknown_named_entity_is_verbatim() {
        assert_eq!(decode("&notarealentity;"), "&notarealentity;");
    }

    #[test]
    fn decodes_decimal_entity() {
        assert_eq!(decode("&#65;"), "A");
    }

    #[test]
    fn decodes_hex_entity_either_case() {
        assert_eq!(decode("&#x41;"), "A");
        assert_eq!(decode("&#X41;"), "A");
    }

    #[test]
    fn invalid_scalar_is_verbatim() {
        // 0xD800 is a surrogate, not a valid scalar value.
        assert_eq!(decode("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn malformed_numeric_is_verbatim() {
        assert_eq!(decode("&#notanumber;"), "&#notanumber;");
    }
}
