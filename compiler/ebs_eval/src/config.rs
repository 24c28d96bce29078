//! Engine configuration.
//!
//! [`EngineBuilder`] collects host choices (where output goes, how deep
//! calls may nest, where imports come from, which built-ins and opaque
//! handlers exist) into an [`EngineConfig`]. The built-in and opaque
//! registries stay extendable after the engine is built.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use ebs_ir::OpaqueStatement;
use ebs_parse::ParseOptions;

use crate::builtins::register_store;
use crate::{
    stdout_handler, Arity, BuiltinRegistry, FsLoader, OpaqueRegistry, ScriptError,
    SharedMutableRegistry, SharedPrintHandler, SharedStore, SourceLoader, Value,
};

/// Nesting limit for named block calls unless the host sets one.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Everything an engine needs besides the program.
#[derive(Clone)]
pub struct EngineConfig {
    print: SharedPrintHandler,
    max_call_depth: usize,
    loader: Arc<dyn SourceLoader>,
    parse_options: ParseOptions,
    builtins: SharedMutableRegistry<BuiltinRegistry>,
    opaque: SharedMutableRegistry<OpaqueRegistry>,
    shared: Option<SharedStore>,
}

impl EngineConfig {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn loader(&self) -> &dyn SourceLoader {
        self.loader.as_ref()
    }

    /// Options imports are parsed with.
    pub fn parse_options(&self) -> &ParseOptions {
        &self.parse_options
    }

    pub fn builtins(&self) -> &SharedMutableRegistry<BuiltinRegistry> {
        &self.builtins
    }

    pub fn opaque_handlers(&self) -> &SharedMutableRegistry<OpaqueRegistry> {
        &self.opaque
    }

    pub fn shared_store(&self) -> Option<&SharedStore> {
        self.shared.as_ref()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("print", &self.print)
            .field("max_call_depth", &self.max_call_depth)
            .field("parse_options", &self.parse_options)
            .field("builtins", &self.builtins.read().len())
            .field("opaque", &self.opaque)
            .field("shared", &self.shared.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`EngineConfig`].
pub struct EngineBuilder {
    print: SharedPrintHandler,
    max_call_depth: usize,
    loader: Arc<dyn SourceLoader>,
    parse_options: ParseOptions,
    core_builtins: bool,
    builtins: BuiltinRegistry,
    opaque: OpaqueRegistry,
    shared: Option<SharedStore>,
}

impl EngineBuilder {
    /// Stdout printing, the default call depth, imports relative to the
    /// working directory and the core built-ins.
    pub fn new() -> Self {
        EngineBuilder {
            print: stdout_handler(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            loader: Arc::new(FsLoader::new(".")),
            parse_options: ParseOptions::new(),
            core_builtins: true,
            builtins: BuiltinRegistry::new(),
            opaque: OpaqueRegistry::new(),
            shared: None,
        }
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = handler;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Resolve imports against `root` on the file system.
    #[must_use]
    pub fn import_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.loader = Arc::new(FsLoader::new(root));
        self
    }

    #[must_use]
    pub fn source_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Replace the parse options. Keywords of opaque handlers registered
    /// on this builder are kept.
    #[must_use]
    pub fn parse_options(mut self, options: ParseOptions) -> Self {
        let keywords: Vec<String> = self
            .parse_options
            .opaque_keywords()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.parse_options = keywords
            .iter()
            .fold(options, |options, keyword| options.with_opaque_keyword(keyword));
        self
    }

    /// Leave out the `str`, `math`, `array` and `map` built-ins.
    #[must_use]
    pub fn without_core_builtins(mut self) -> Self {
        self.core_builtins = false;
        self
    }

    #[must_use]
    pub fn builtin<F>(mut self, name: &str, arity: Arity, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ScriptError> + Send + Sync + 'static,
    {
        self.builtins.register(name, arity, handler);
        self
    }

    /// Handle statements starting with `keyword`. The keyword is also
    /// reserved in the parse options.
    #[must_use]
    pub fn opaque_handler<F>(mut self, keyword: &str, handler: F) -> Self
    where
        F: Fn(&OpaqueStatement) -> Result<(), ScriptError> + Send + Sync + 'static,
    {
        self.opaque.register(keyword, handler);
        self.parse_options = self.parse_options.with_opaque_keyword(keyword);
        self
    }

    /// Expose `store` to scripts through the `shared.*` built-ins.
    #[must_use]
    pub fn shared_store(mut self, store: SharedStore) -> Self {
        self.shared = Some(store);
        self
    }

    pub fn build(self) -> EngineConfig {
        let mut builtins = if self.core_builtins {
            BuiltinRegistry::with_core()
        } else {
            BuiltinRegistry::new()
        };
        if let Some(store) = &self.shared {
            register_store(&mut builtins, store);
        }
        builtins.extend(self.builtins);
        tracing::debug!(
            builtins = builtins.len(),
            opaque = self.opaque.keywords().len(),
            max_call_depth = self.max_call_depth,
            "engine configured"
        );
        EngineConfig {
            print: self.print,
            max_call_depth: self.max_call_depth,
            loader: self.loader,
            parse_options: self.parse_options,
            builtins: SharedMutableRegistry::new(builtins),
            opaque: SharedMutableRegistry::new(self.opaque),
            shared: self.shared,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::{buffer_handler, MemoryLoader};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_call_depth(), DEFAULT_MAX_CALL_DEPTH);
        assert!(config.builtins().read().contains("str.trim"));
        assert!(config.shared_store().is_none());
        assert!(config.parse_options().opaque_keywords().is_empty());
    }

    #[test]
    fn test_without_core_keeps_host_builtins() {
        let config = EngineBuilder::new()
            .without_core_builtins()
            .builtin("host.ping", Arity::Exact(0), |_| Ok(Value::string("pong")))
            .build();
        let builtins = config.builtins().read();
        assert_eq!(builtins.names(), vec!["host.ping"]);
    }

    #[test]
    fn test_shared_store_installs_accessors() {
        let config = EngineBuilder::new().shared_store(SharedStore::new()).build();
        assert!(config.builtins().read().contains("shared.set"));
        assert!(config.shared_store().is_some());
    }

    #[test]
    fn test_opaque_handler_reserves_keyword() {
        let config = EngineBuilder::new()
            .opaque_handler("screen", |_| Ok(()))
            .parse_options(ParseOptions::new().with_opaque_keyword("query"))
            .build();
        assert_eq!(config.parse_options().opaque_keywords(), vec!["query", "screen"]);
        assert!(config.opaque_handlers().read().contains("screen"));
    }

    #[test]
    fn test_registries_stay_extendable() {
        let config = EngineBuilder::new()
            .print_handler(buffer_handler())
            .source_loader(MemoryLoader::new())
            .max_call_depth(8)
            .build();
        let clone = config.clone();
        config
            .builtins()
            .write()
            .register("late.one", Arity::Exact(0), |_| Ok(Value::Int(1)));
        assert!(clone.builtins().read().contains("late.one"));
        assert_eq!(clone.max_call_depth(), 8);
        assert!(format!("{config:?}").contains("max_call_depth: 8"));
    }
}
