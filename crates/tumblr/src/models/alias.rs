//! Logical field names
//!
//! Every post variant exposes some of its data under more than one name: a
//! photo's caption is also its `body`, `content` and `description`, a link's
//! URL is also `related`. Each variant carries a static table mapping those
//! logical names onto the concrete field; a post resolves through the table
//! of whatever variant it currently holds.

/// Ordered `(logical, concrete)` pairs for one post variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasTable {
    entries: &'static [(&'static str, &'static str)],
}

impl AliasTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Concrete field name behind `logical`, if this variant defines one.
    pub fn resolve(&self, logical: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == logical)
            .map(|(_, target)| *target)
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

pub(crate) const POST_ALIASES: AliasTable = AliasTable::new(&[("permalink", "url")]);

pub(crate) const REGULAR_ALIASES: AliasTable = AliasTable::new(&[
    ("permalink", "url"),
    ("content", "body"),
    ("description", "body"),
]);

pub(crate) const LINK_ALIASES: AliasTable = AliasTable::new(&[
    ("permalink", "url"),
    ("body", "description"),
    ("content", "description"),
    ("related", "link_url"),
]);

pub(crate) const QUOTE_ALIASES: AliasTable = AliasTable::new(&[
    ("permalink", "url"),
    ("description", "quote"),
    ("body", "quote"),
    ("content", "quote"),
]);

pub(crate) const CONVERSATION_ALIASES: AliasTable = AliasTable::new(&[
    ("permalink", "url"),
    ("body", "description"),
    ("content", "description"),
]);

/// Shared by photo, video and audio posts.
pub(crate) const CAPTION_ALIASES: AliasTable = AliasTable::new(&[
    ("permalink", "url"),
    ("body", "caption"),
    ("content", "caption"),
    ("description", "caption"),
]);
