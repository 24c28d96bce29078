//! `import "path";`
//!
//! The file is read through the configured loader, parsed with the
//! engine's parse options and recorded in the environment before its
//! statements run, so a file that imports itself (directly or through
//! others) is loaded once. Its named blocks become callable without
//! shadowing blocks of the main program.

use std::sync::Arc;

use super::Interpreter;
use crate::errors::{import_failed, import_parse_failed};
use crate::ExecResult;

impl Interpreter<'_> {
    pub(crate) fn exec_import(&mut self, path: &str) -> ExecResult {
        if self.env.is_imported(path) {
            tracing::trace!(path, "already imported");
            return Ok(());
        }
        let source = self
            .config
            .loader()
            .load(path)
            .map_err(|err| import_failed(path, &err.to_string()))?;
        let program = ebs_parse::parse_with(path, &source, self.config.parse_options())
            .map_err(|err| import_parse_failed(path, &err.to_string()))?;
        let program = Arc::new(program);
        tracing::debug!(
            path,
            blocks = program.blocks.len(),
            statements = program.statements.len(),
            "import"
        );
        self.env.record_import(path, Arc::clone(&program));

        let caller = std::mem::replace(&mut self.program, Arc::clone(&program));
        let result = self.exec_statements(&program.statements);
        self.program = caller;
        result.map(drop)
    }
}
