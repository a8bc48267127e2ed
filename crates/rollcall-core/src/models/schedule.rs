use std::fmt;

use serde::{Deserialize, Serialize};

use crate::availability::format_clock;

/// Last representable minute of the day (23:59).
pub const LAST_MINUTE: u16 = 23 * 60 + 59;

/// Class days that carry a busy column in the availability sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// Accepted spellings, lowercase. Full names are matched separately.
const WEEKDAY_ALIASES: &[(&str, Weekday)] = &[
    ("mon", Weekday::Monday),
    ("tue", Weekday::Tuesday),
    ("tues", Weekday::Tuesday),
    ("wed", Weekday::Wednesday),
    ("weds", Weekday::Wednesday),
    ("thu", Weekday::Thursday),
    ("thur", Weekday::Thursday),
    ("thurs", Weekday::Thursday),
    ("fri", Weekday::Friday),
];

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Parse a full English weekday name or a known abbreviation, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.name().eq_ignore_ascii_case(&lower))
            .or_else(|| {
                WEEKDAY_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .map(|(_, day)| *day)
            })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open busy block `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: u16,
    pub end: u16,
}

impl Interval {
    /// Returns `None` unless `start < end <= LAST_MINUTE`.
    pub fn new(start: u16, end: u16) -> Option<Self> {
        if start < end && end <= LAST_MINUTE {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Half-open overlap: touching blocks do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse_full_names() {
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("FRIDAY"), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("  Wednesday "), Some(Weekday::Wednesday));
    }

    #[test]
    fn test_weekday_parse_aliases() {
        assert_eq!(Weekday::parse("Mon"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("tue"), Some(Weekday::Tuesday));
        assert_eq!(Weekday::parse("Tues"), Some(Weekday::Tuesday));
        assert_eq!(Weekday::parse("WED"), Some(Weekday::Wednesday));
        assert_eq!(Weekday::parse("thurs"), Some(Weekday::Thursday));
        assert_eq!(Weekday::parse("Fri"), Some(Weekday::Friday));
    }

    #[test]
    fn test_weekday_parse_rejects_weekend_and_garbage() {
        assert_eq!(Weekday::parse("Saturday"), None);
        assert_eq!(Weekday::parse("sun"), None);
        assert_eq!(Weekday::parse(""), None);
        assert_eq!(Weekday::parse("mo"), None);
        assert_eq!(Weekday::parse("Mondays"), None);
    }

    #[test]
    fn test_interval_new_enforces_bounds() {
        assert!(Interval::new(0, 1).is_some());
        assert!(Interval::new(0, LAST_MINUTE).is_some());
        assert!(Interval::new(540, 540).is_none());
        assert!(Interval::new(600, 540).is_none());
        assert!(Interval::new(0, LAST_MINUTE + 1).is_none());
    }

    #[test]
    fn test_interval_display_is_zero_padded() {
        let interval = Interval::new(540, 810).unwrap();
        assert_eq!(interval.to_string(), "0900-1330");
        let early = Interval::new(5, 65).unwrap();
        assert_eq!(early.to_string(), "0005-0105");
    }

    #[test]
    fn test_interval_overlaps_is_half_open() {
        let a = Interval::new(480, 540).unwrap();
        let b = Interval::new(540, 600).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = Interval::new(480, 541).unwrap();
        assert!(c.overlaps(&b));
    }
}
