//! EBS IR - shared data model for the script engine.
//!
//! This crate holds the types every phase agrees on:
//! - Spans and line/column lookup
//! - Tokens produced by the lexer
//! - The syntax tree (`Stmt`, `Expr`) and `Program`
//! - Exception kinds used by `try`/`raise`
//! - Calendar dates for date literals
//!
//! With the `cache` feature, all tree types derive serde traits and
//! [`Program`] gains a bincode image format.

pub mod ast;
#[cfg(feature = "cache")]
mod cache;
mod date;
mod exception;
mod span;
mod token;

pub use ast::{
    Accessor, Arg, Assign, AssignOp, BinaryOp, BitFieldSpec, BitWidth, Block, Call, CastTarget,
    Expr, ExprKind, FieldSpec, Handler, Literal, NamedBlock, OpaqueStatement, Param, Place,
    Program, Stmt, StmtKind, TypeSpec, TypeSpecKind, UnaryOp, VarDecl,
};
#[cfg(feature = "cache")]
pub use cache::CacheError;
pub use date::Date;
pub use exception::{CatchKind, ExceptionKind, RaiseKind, ANY_ERROR};
pub use span::{LineIndex, Span};
pub use token::{Token, TokenKind, TypeKeyword};
