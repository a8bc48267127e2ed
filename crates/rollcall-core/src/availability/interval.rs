//! Parsing of free-text busy cells such as `"0900-1000, 1330-1500"`.
//!
//! Cells are typed by cadets into a form, so parsing is best effort: a token
//! that does not look like a valid range is dropped, never reported.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Interval;

/// Separators between ranges: comma, semicolon, pipe, newline, or a run of
/// two or more whitespace characters.
static SEPARATOR: OnceLock<Regex> = OnceLock::new();

/// `H{1,2}[:]?MM - H{1,2}[:]?MM`
static RANGE: OnceLock<Regex> = OnceLock::new();

fn separator() -> &'static Regex {
    SEPARATOR.get_or_init(|| Regex::new(r"[,;|\n]|\s{2,}").expect("separator pattern is valid"))
}

fn range() -> &'static Regex {
    RANGE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):?(\d{2})\s*-\s*(\d{1,2}):?(\d{2})$")
            .expect("range pattern is valid")
    })
}

fn to_minutes(hours: &str, minutes: &str) -> Option<u16> {
    let h: u16 = hours.parse().ok()?;
    let m: u16 = minutes.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

fn parse_range(token: &str) -> Option<Interval> {
    let caps = range().captures(token)?;
    let start = to_minutes(&caps[1], &caps[2])?;
    let end = to_minutes(&caps[3], &caps[4])?;
    Interval::new(start, end)
}

/// Parse one busy cell into intervals, in the order they were written.
///
/// Empty cells, placeholders like `N/A` or `none`, and malformed tokens all
/// contribute nothing. Overlapping ranges are kept as written.
pub fn parse_busy_cell(cell: &str) -> Vec<Interval> {
    if cell.trim().is_empty() {
        return Vec::new();
    }
    separator()
        .split(cell.trim())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_range)
        .collect()
}

/// Parse a query clock string: exactly 3-4 ASCII digits of 24-hour `HHMM`.
pub fn parse_clock(s: &str) -> Option<u16> {
    let s = s.trim();
    if !(3..=4).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let split = s.len() - 2;
    to_minutes(&s[..split], &s[split..])
}

pub fn format_clock(minutes: u16) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u16, end: u16) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn test_parse_single_range() {
        assert_eq!(parse_busy_cell("0900-1000"), vec![iv(540, 600)]);
        assert_eq!(parse_busy_cell("09:00-10:00"), vec![iv(540, 600)]);
        assert_eq!(parse_busy_cell("900 - 1000"), vec![iv(540, 600)]);
        assert_eq!(parse_busy_cell("9:00 -10:30"), vec![iv(540, 630)]);
    }

    #[test]
    fn test_parse_multiple_separators() {
        let expected = vec![iv(540, 600), iv(810, 900)];
        assert_eq!(parse_busy_cell("0900-1000, 1330-1500"), expected);
        assert_eq!(parse_busy_cell("0900-1000;1330-1500"), expected);
        assert_eq!(parse_busy_cell("0900-1000   1330-1500"), expected);
        assert_eq!(parse_busy_cell("0900-1000 | 1330-1500"), expected);
        assert_eq!(parse_busy_cell("0900-1000\n1330-1500"), expected);
    }

    #[test]
    fn test_parse_keeps_order_and_overlaps() {
        assert_eq!(
            parse_busy_cell("1300-1400, 0800-0900, 1330-1430"),
            vec![iv(780, 840), iv(480, 540), iv(810, 870)]
        );
    }

    #[test]
    fn test_empty_and_garbage_cells() {
        for cell in ["", "N/A", "none", "   ", "garbage", "n/a", "-", "TBD"] {
            assert!(parse_busy_cell(cell).is_empty(), "cell {cell:?} should be empty");
        }
    }

    #[test]
    fn test_bad_tokens_are_dropped_not_fatal() {
        // single time, inverted range, zero-length, out of range hour/minute
        let cell = "1100, 1000-0900, 1200-1200, 2500-2600, 0960-1000, 0800-0850";
        assert_eq!(parse_busy_cell(cell), vec![iv(480, 530)]);
    }

    #[test]
    fn test_round_trip_format_then_parse() {
        let samples = [(0, 1), (0, 1439), (5, 65), (540, 600), (1438, 1439), (719, 721)];
        for (s, e) in samples {
            let interval = iv(s, e);
            assert_eq!(parse_busy_cell(&interval.to_string()), vec![interval]);
        }
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("900"), Some(540));
        assert_eq!(parse_clock("0900"), Some(540));
        assert_eq!(parse_clock("1730"), Some(1050));
        assert_eq!(parse_clock("0000"), Some(0));
        assert_eq!(parse_clock("2359"), Some(1439));
    }

    #[test]
    fn test_parse_clock_rejects_malformed() {
        for bad in ["", "90", "09:00", "12345", "2400", "0960", "9am", "-900", "０９００"] {
            assert_eq!(parse_clock(bad), None, "clock {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(540), "0900");
        assert_eq!(format_clock(1439), "2359");
    }
}
