//! Exception kinds shared by the parser and the evaluator.

use std::fmt;

/// The fixed set of standard runtime error kinds.
///
/// Scripts name them with an `_ERROR` suffix (`MATH_ERROR`). The `ANY_ERROR`
/// wildcard is not a kind; it only appears as a handler label
/// ([`CatchKind::Any`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExceptionKind {
    Io,
    Db,
    Type,
    Null,
    Index,
    Math,
    Parse,
    Network,
    NotFound,
    Access,
    Validation,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 11] = [
        ExceptionKind::Io,
        ExceptionKind::Db,
        ExceptionKind::Type,
        ExceptionKind::Null,
        ExceptionKind::Index,
        ExceptionKind::Math,
        ExceptionKind::Parse,
        ExceptionKind::Network,
        ExceptionKind::NotFound,
        ExceptionKind::Access,
        ExceptionKind::Validation,
    ];

    /// Script-facing name, e.g. `MATH_ERROR`.
    pub fn name(self) -> &'static str {
        match self {
            ExceptionKind::Io => "IO_ERROR",
            ExceptionKind::Db => "DB_ERROR",
            ExceptionKind::Type => "TYPE_ERROR",
            ExceptionKind::Null => "NULL_ERROR",
            ExceptionKind::Index => "INDEX_ERROR",
            ExceptionKind::Math => "MATH_ERROR",
            ExceptionKind::Parse => "PARSE_ERROR",
            ExceptionKind::Network => "NETWORK_ERROR",
            ExceptionKind::NotFound => "NOT_FOUND_ERROR",
            ExceptionKind::Access => "ACCESS_ERROR",
            ExceptionKind::Validation => "VALIDATION_ERROR",
        }
    }

    /// Case-insensitive lookup by script-facing name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wildcard handler label.
pub const ANY_ERROR: &str = "ANY_ERROR";

/// What a `when` clause catches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CatchKind {
    /// `when ANY_ERROR`
    Any,
    Standard(ExceptionKind),
    /// Any label outside the standard set, stored lowercased.
    Custom(String),
}

impl CatchKind {
    /// Classify a handler label.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case(ANY_ERROR) {
            CatchKind::Any
        } else if let Some(kind) = ExceptionKind::from_name(label) {
            CatchKind::Standard(kind)
        } else {
            CatchKind::Custom(label.to_ascii_lowercase())
        }
    }
}

/// What a `raise exception` statement raises.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum RaiseKind {
    Standard(ExceptionKind),
    /// Custom exception name as written in the source.
    Custom(String),
}

impl RaiseKind {
    pub fn name(&self) -> &str {
        match self {
            RaiseKind::Standard(kind) => kind.name(),
            RaiseKind::Custom(name) => name,
        }
    }
}
