use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_plain_date() {
    let date = Date::parse("2024-02-29");
    assert_eq!(
        date,
        Some(Date {
            year: 2024,
            month: 2,
            day: 29,
            time: None
        })
    );
}

#[test]
fn test_parse_date_time() {
    let date = Date::parse("2023-11-05 07:08:09");
    assert_eq!(date.map(|d| d.time), Some(Some((7, 8, 9))));

    let no_seconds = Date::parse("2023-11-05 07:08");
    assert_eq!(no_seconds.map(|d| d.to_string()).as_deref(), Some("2023-11-05 07:08:00"));
}

#[test]
fn test_parse_rejects_invalid_calendar_values() {
    assert_eq!(Date::parse("2023-02-29"), None);
    assert_eq!(Date::parse("2023-13-01"), None);
    assert_eq!(Date::parse("2023-04-31"), None);
    assert_eq!(Date::parse("2023-01-01 24:00"), None);
}

#[test]
fn test_parse_rejects_non_dates() {
    assert_eq!(Date::parse("hello"), None);
    assert_eq!(Date::parse("2023-1-01"), None);
    assert_eq!(Date::parse("2023-01-01x"), None);
    assert_eq!(Date::parse("2023-01-01T10:00"), None);
}

#[test]
fn test_display_pads_fields() {
    let date = Date::new(987, 3, 4).and_then(|d| d.with_time(1, 2, 3));
    assert_eq!(date.map(|d| d.to_string()).as_deref(), Some("0987-03-04 01:02:03"));
}

#[test]
fn test_ordering_is_chronological() {
    let earlier = Date::parse("2020-05-01");
    let later = Date::parse("2020-05-02");
    assert!(earlier < later);
}
