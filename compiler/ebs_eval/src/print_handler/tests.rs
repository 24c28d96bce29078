#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_buffer_captures_lines() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.println("world");
    assert_eq!(handler.output(), "hello\nworld\n");
}

#[test]
fn test_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.clear();
    assert_eq!(handler.output(), "");
}

#[test]
fn test_silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(stdout_handler().output(), "");
}

#[test]
fn test_buffer_is_shared_across_threads() {
    let handler = buffer_handler();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let handler = Arc::clone(&handler);
            scope.spawn(move || {
                for _ in 0..10 {
                    handler.println("x");
                }
            });
        }
    });
    assert_eq!(handler.output().lines().count(), 40);
}
