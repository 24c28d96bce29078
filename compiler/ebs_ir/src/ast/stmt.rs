//! Statement nodes.

use super::{Call, Expr, TypeSpec};
use crate::{CatchKind, RaiseKind};

/// A statement with the line it starts on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Stmt { kind, line }
    }
}

/// A braced statement list; executing it opens a scope.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    VarDecl(VarDecl),
    Assign(Assign),
    Print(Expr),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Block,
        cond: Expr,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Box<Stmt>>,
        body: Block,
    },
    ForEach {
        var: String,
        iterable: Expr,
        body: Block,
    },
    Block(Block),
    Call(Call),
    Return(Option<Expr>),
    Break,
    Continue,
    Try {
        body: Block,
        handlers: Vec<Handler>,
    },
    Raise {
        kind: RaiseKind,
        args: Vec<Expr>,
    },
    Typedef {
        name: String,
        ty: TypeSpec,
    },
    Import(String),
    Opaque(OpaqueStatement),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    pub name: String,
    pub ty: Option<TypeSpec>,
    pub init: Option<Expr>,
    pub constant: bool,
}

/// `target op value;`, also the desugared form of `x++` / `x--`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Assign {
    pub target: Place,
    pub op: AssignOp,
    pub value: Expr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
}

/// An assignable location: a variable followed by index/field accessors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    pub root: String,
    pub path: Vec<Accessor>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Accessor {
    Index(Vec<Expr>),
    Field(String),
}

/// One `when LABEL(captures) { ... }` clause.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Handler {
    pub catch: CatchKind,
    pub captures: Vec<String>,
    pub body: Block,
    pub line: u32,
}

/// A host-defined statement the engine stores but does not interpret.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueStatement {
    /// The reserved keyword that introduced the statement (lowercased).
    pub keyword: String,
    /// Raw source text between the keyword and the closing `;`, trimmed.
    pub payload: String,
}
