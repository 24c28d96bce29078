use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_span_merge() {
    let a = Span::new(4, 8);
    let b = Span::new(2, 6);
    assert_eq!(a.merge(b), Span::new(2, 8));
    assert_eq!(a.len(), 4);
    assert!(Span::point(3).is_empty());
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(1, 5).to_string(), "1..5");
    assert_eq!(Span::new(1, 5).to_range(), 1..5);
}

#[test]
fn test_line_index_first_line() {
    let index = LineIndex::new("var x = 1;");
    assert_eq!(index.line_col(0), (1, 1));
    assert_eq!(index.line_col(4), (1, 5));
}

#[test]
fn test_line_index_after_newlines() {
    let index = LineIndex::new("a\nbc\n\nd");
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.line_col(2), (2, 1));
    assert_eq!(index.line_col(3), (2, 2));
    assert_eq!(index.line_col(5), (3, 1));
    assert_eq!(index.line_col(6), (4, 1));
}

#[test]
fn test_line_index_counts_chars_not_bytes() {
    let index = LineIndex::new("\"é\" x");
    // `x` sits after a two-byte character
    assert_eq!(index.line_col(5), (1, 5));
}

#[test]
fn test_line_index_clamps_past_end() {
    let index = LineIndex::new("ab");
    assert_eq!(index.line_col(99), (1, 3));
}
