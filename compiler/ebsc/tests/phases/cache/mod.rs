//! Compiled program image tests.
//!
//! - `round_trip` - bincode images run exactly like the parsed program

mod round_trip;
