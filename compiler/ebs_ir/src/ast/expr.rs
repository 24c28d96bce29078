//! Expression nodes.

use std::fmt;

use crate::Date;

/// An expression with the line it starts on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Expr { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Literal(Literal),
    /// Variable reference by lowercased name.
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Chained comparison `a < b <= c`; every operand is evaluated once.
    Compare {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call(Call),
    /// `target[i, j, ...]`
    Index {
        target: Box<Expr>,
        indices: Vec<Expr>,
    },
    Array(Vec<Expr>),
    /// `{ key: value, ... }` with lowercased keys in source order.
    Record(Vec<(String, Expr)>),
    Property {
        target: Box<Expr>,
        name: String,
    },
    Cast {
        target: CastTarget,
        operand: Box<Expr>,
    },
    TypeOf(Box<Expr>),
    /// `x.length` / `x.size`. `name` is the word used; a record field or
    /// map key of that name is read instead of the length.
    Length { operand: Box<Expr>, name: String },
}

/// A call to a named block or a built-in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    /// Lowercased callee; built-ins use dotted names (`str.trim`).
    pub name: String,
    pub args: Vec<Arg>,
}

/// A call argument, positional or named (`param = expr`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Str(String),
    Date(Date),
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        })
    }
}

/// Target of a conversion call such as `int(x)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CastTarget {
    Byte,
    Int,
    Long,
    Float,
    Double,
    String,
    Bool,
    Date,
    Record,
    Map,
}

impl CastTarget {
    /// Canonical type name, as reported by `typeof` on a cast result.
    pub fn type_name(self) -> &'static str {
        match self {
            CastTarget::Byte => "byte",
            CastTarget::Int => "int",
            CastTarget::Long => "long",
            CastTarget::Float => "float",
            CastTarget::Double => "double",
            CastTarget::String => "string",
            CastTarget::Bool => "bool",
            CastTarget::Date => "date",
            CastTarget::Record => "record",
            CastTarget::Map => "map",
        }
    }
}
