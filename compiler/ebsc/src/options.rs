//! Command-line options shared by `run` and `exec`.

use std::path::PathBuf;

use ebs_eval::DEFAULT_MAX_CALL_DEPTH;

use crate::DriverError;

/// Environment variable holding the default call depth limit.
pub const MAX_DEPTH_ENV: &str = "EBS_MAX_CALL_DEPTH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub max_call_depth: usize,
    /// `-o` target of `compile`.
    pub output: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            output: None,
        }
    }
}

impl RunOptions {
    /// Defaults, with the call depth taken from `EBS_MAX_CALL_DEPTH` if set.
    pub fn from_env() -> Self {
        Self::with_depth_var(std::env::var(MAX_DEPTH_ENV).ok().as_deref())
    }

    /// Defaults, with the call depth taken from `value` when it is a
    /// positive integer.
    pub fn with_depth_var(value: Option<&str>) -> Self {
        let mut options = RunOptions::default();
        if let Some(raw) = value {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => options.max_call_depth = depth,
                _ => tracing::warn!(var = MAX_DEPTH_ENV, value = raw, "ignoring invalid call depth"),
            }
        }
        options
    }

    /// Apply flags from `args`. Returns the positional arguments.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>, DriverError> {
        let mut positional = Vec::new();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if let Some(value) = arg.strip_prefix("--max-depth=") {
                self.max_call_depth = parse_depth(value)?;
            } else if arg == "--max-depth" {
                let value = iter
                    .next()
                    .ok_or_else(|| DriverError::Usage("--max-depth needs a value".into()))?;
                self.max_call_depth = parse_depth(value)?;
            } else if arg == "-o" {
                let value = iter
                    .next()
                    .ok_or_else(|| DriverError::Usage("-o needs a path".into()))?;
                self.output = Some(PathBuf::from(value));
            } else if arg.starts_with('-') {
                return Err(DriverError::Usage(format!("unknown option '{arg}'")));
            } else {
                positional.push(arg.clone());
            }
        }
        Ok(positional)
    }
}

fn parse_depth(value: &str) -> Result<usize, DriverError> {
    match value.parse::<usize>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(DriverError::Usage(format!(
            "--max-depth expects a positive integer, got '{value}'"
        ))),
    }
}
