//! Where `import "path"` reads source text from.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Source text provider for imports.
pub trait SourceLoader: Send + Sync {
    fn load(&self, path: &str) -> io::Result<String>;
}

/// Reads files relative to a root directory.
#[derive(Clone, Debug)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsLoader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }
}

/// In-memory files, for hosts that bundle their scripts and for tests.
#[derive(Clone, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: &str, source: &str) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: &str, source: &str) {
        self.files.insert(path.to_string(), source.to_string());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file '{path}'"))
        })
    }
}

impl fmt::Debug for MemoryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.files.keys().map(String::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("MemoryLoader").field("files", &paths).finish()
    }
}
