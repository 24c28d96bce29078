//! Handlers for host-defined statement forms.
//!
//! A host that reserves a keyword in [`ParseOptions`](ebs_parse::ParseOptions)
//! gets every statement starting with it as an [`OpaqueStatement`]. The
//! evaluator does not look inside the payload; it looks up the handler
//! registered for the keyword and hands the statement over.

use std::fmt;
use std::sync::Arc;

use ebs_ir::OpaqueStatement;
use rustc_hash::FxHashMap;

use crate::ScriptError;

/// Runs one opaque statement. Errors surface in the script like any raise.
pub type OpaqueHandler = Arc<dyn Fn(&OpaqueStatement) -> Result<(), ScriptError> + Send + Sync>;

/// Keyword → handler table. Keywords are case-insensitive.
#[derive(Clone, Default)]
pub struct OpaqueRegistry {
    handlers: FxHashMap<String, OpaqueHandler>,
}

impl OpaqueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, keyword: &str, handler: F)
    where
        F: Fn(&OpaqueStatement) -> Result<(), ScriptError> + Send + Sync + 'static,
    {
        self.handlers
            .insert(keyword.to_ascii_lowercase(), Arc::new(handler));
    }

    pub fn get(&self, keyword: &str) -> Option<&OpaqueHandler> {
        self.handlers.get(&keyword.to_ascii_lowercase())
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Registered keywords, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }
}

impl fmt::Debug for OpaqueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueRegistry")
            .field("keywords", &self.keywords())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use ebs_ir::ExceptionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = OpaqueRegistry::new();
        registry.register("Screen", |_| Ok(()));
        assert!(registry.contains("SCREEN"));
        assert_eq!(registry.keywords(), vec!["screen"]);
        assert!(!registry.contains("query"));
    }

    #[test]
    fn test_handler_receives_payload() {
        let mut registry = OpaqueRegistry::new();
        registry.register("query", |stmt| {
            if stmt.payload.is_empty() {
                Err(ScriptError::new(ExceptionKind::Db, "empty query"))
            } else {
                Ok(())
            }
        });
        let handler = registry.get("query").unwrap();
        let stmt = OpaqueStatement {
            keyword: "query".to_string(),
            payload: String::new(),
        };
        let err = handler(&stmt).unwrap_err();
        assert_eq!(err.standard_kind(), Some(ExceptionKind::Db));
    }
}
