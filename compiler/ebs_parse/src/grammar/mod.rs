//! Grammar productions, as `impl Parser` blocks.
//!
//! - `block.rs`: named block declarations
//! - `call.rs`: call arguments and checks against hoisted signatures
//! - `exceptions.rs`: `try`/`exceptions`/`when` and `raise exception`
//! - `stmt.rs`: statements and braced blocks
//! - `types.rs`: type annotations
//! - `expr/`: expressions

mod block;
mod call;
mod exceptions;
mod expr;
mod stmt;
mod types;
