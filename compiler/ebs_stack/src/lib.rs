//! Stack growth for deeply nested scripts.
//!
//! Both the parser and the evaluator recurse once per nesting level of
//! expressions, blocks and calls. A script with thousands of nested
//! parentheses or a deeply recursive named block would otherwise overflow
//! the native stack of whatever thread happens to host it (UI callback
//! threads often have small stacks).
//!
//! Wrap each recursive entry point with [`ensure_sufficient_stack`]:
//!
//! ```text
//! fn parse_expr(&mut self) -> Result<Expr, ParseError> {
//!     ensure_sufficient_stack(|| self.parse_binary_or())
//! }
//! ```

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
