//! Syntax tree for EBS scripts.
//!
//! Nodes own their children (`Box`/`Vec`) and carry the source line they
//! start on; runtime errors report that line.

mod expr;
mod program;
mod stmt;
mod types;

pub use expr::{Arg, BinaryOp, Call, CastTarget, Expr, ExprKind, Literal, UnaryOp};
pub use program::{NamedBlock, Param, Program};
pub use stmt::{
    Accessor, Assign, AssignOp, Block, Handler, OpaqueStatement, Place, Stmt, StmtKind, VarDecl,
};
pub use types::{BitFieldSpec, BitWidth, FieldSpec, TypeSpec, TypeSpecKind};
