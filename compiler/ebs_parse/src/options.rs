//! Parser configuration supplied by the embedding host.

use rustc_hash::FxHashSet;

/// Options that change what the parser accepts.
///
/// Hosts that implement statement forms of their own (screens, queries)
/// register the leading keyword here. A statement starting with such a
/// keyword is kept as an `OpaqueStatement` whose payload is the raw source
/// text up to the terminating `;`.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    opaque_keywords: FxHashSet<String>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `keyword` (case-insensitive) for opaque statements.
    #[must_use]
    pub fn with_opaque_keyword(mut self, keyword: &str) -> Self {
        self.opaque_keywords.insert(keyword.to_ascii_lowercase());
        self
    }

    /// Whether `word` (already lowercased) starts an opaque statement.
    pub fn is_opaque_keyword(&self, word: &str) -> bool {
        self.opaque_keywords.contains(word)
    }

    /// Registered keywords, sorted.
    pub fn opaque_keywords(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.opaque_keywords.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}
