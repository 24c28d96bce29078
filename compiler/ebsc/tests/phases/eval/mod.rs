//! Evaluator phase tests.
//!
//! - `scenarios` - whole scripts with their expected output
//! - `properties` - proptest laws over arithmetic, casts and determinism

mod properties;
mod scenarios;
