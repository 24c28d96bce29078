//! Calendar date values.
//!
//! Scripts write dates as string literals (`"2024-03-01"` or
//! `"2024-03-01 13:45:00"`); the lexer recognizes them with [`Date::parse`].

use std::fmt;

/// A calendar date with an optional time of day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    /// `(hour, minute, second)` when the literal carried a time.
    pub time: Option<(u8, u8, u8)>,
}

impl Date {
    /// Build a date, validating the calendar fields.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Date {
            year,
            month,
            day,
            time: None,
        })
    }

    /// Attach a time of day, validating its fields.
    #[must_use]
    pub fn with_time(self, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Date {
            time: Some((hour, minute, second)),
            ..self
        })
    }

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`.
    ///
    /// Returns `None` unless the whole text matches one of those shapes
    /// with valid calendar values.
    pub fn parse(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let year = digits(text, 0..4)?;
        let month = digits(text, 5..7)?;
        let day = digits(text, 8..10)?;
        let date = Date::new(i32::try_from(year).ok()?, narrow(month)?, narrow(day)?)?;

        match bytes.len() {
            10 => Some(date),
            16 | 19 => {
                if bytes[10] != b' ' || bytes[13] != b':' {
                    return None;
                }
                let hour = digits(text, 11..13)?;
                let minute = digits(text, 14..16)?;
                let second = if bytes.len() == 19 {
                    if bytes[16] != b':' {
                        return None;
                    }
                    digits(text, 17..19)?
                } else {
                    0
                };
                date.with_time(narrow(hour)?, narrow(minute)?, narrow(second)?)
            }
            _ => None,
        }
    }
}

fn digits(text: &str, range: std::ops::Range<usize>) -> Option<u32> {
    let part = text.get(range)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn narrow(value: u32) -> Option<u8> {
    u8::try_from(value).ok()
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if let Some((hour, minute, second)) = self.time {
            write!(f, " {hour:02}:{minute:02}:{second:02}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
