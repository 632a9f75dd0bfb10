//! Parse options: a bit-flag extension set plus named presets (spec §4.7).

/// Named parser capabilities, combinable as bit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions(u32);

impl ParseOptions {
    pub const PERMISSIVE_ATX_HEADERS: ParseOptions = ParseOptions(1 << 0);
    pub const PERMISSIVE_URL_AUTOLINKS: ParseOptions = ParseOptions(1 << 1);
    pub const PERMISSIVE_EMAIL_AUTOLINKS: ParseOptions = ParseOptions(1 << 2);
    pub const PERMISSIVE_WWW_AUTOLINKS: ParseOptions = ParseOptions(1 << 3);
    pub const TABLES: ParseOptions = ParseOptions(1 << 4);
    pub const STRIKETHROUGH: ParseOptions = ParseOptions(1 << 5);
    pub const TASK_LISTS: ParseOptions = ParseOptions(1 << 6);
    pub const HARD_SOFT_BREAKS: ParseOptions = ParseOptions(1 << 7);
    pub const NO_HTML_BLOCKS: ParseOptions = ParseOptions(1 << 8);
    pub const NO_HTML_SPANS: ParseOptions = ParseOptions(1 << 9);

    pub const NONE: ParseOptions = ParseOptions(0);

    /// Empty capability set — strict CommonMark, no GFM extensions.
    pub fn commonmark() -> Self {
        ParseOptions::NONE
    }

    /// Autolinks, tables, strikethrough, and task lists — the default.
    pub fn gfm_subset() -> Self {
        Self::PERMISSIVE_URL_AUTOLINKS
            | Self::PERMISSIVE_EMAIL_AUTOLINKS
            | Self::PERMISSIVE_WWW_AUTOLINKS
            | Self::TABLES
            | Self::STRIKETHROUGH
            | Self::TASK_LISTS
    }

    pub fn contains(self, flag: ParseOptions) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn union(self, other: ParseOptions) -> ParseOptions {
        ParseOptions(self.0 | other.0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::gfm_subset()
    }
}

impl std::ops::BitOr for ParseOptions {
    type Output = ParseOptions;
    fn bitor(self, rhs: ParseOptions) -> ParseOptions {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ParseOptions {
    fn bitor_assign(&mut self, rhs: ParseOptions) {
        *self = self.union(rhs);
    }
}
