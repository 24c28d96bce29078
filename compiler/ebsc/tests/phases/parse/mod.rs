//! Front-end phase tests.
//!
//! - `front_end` - lexer and parser agreement on generated sources

mod front_end;
