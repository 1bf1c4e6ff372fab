//! Schedule-code decoder for SIGAA
//!
//! Decodes the compact scheduling codes the portal renders for course
//! sections, such as `7M2345 6T2345 (09/05/2025 - 31/05/2025)`. A code
//! block packs one or more day digits, a shift letter and a run of slot
//! digits; an optional parenthesized date range scopes the blocks of a
//! comma-separated segment.
//!
//! Decoding never fails. Every malformed input class degrades silently:
//! unmatched blocks and malformed date ranges contribute nothing, an
//! unrecognized day digit maps to the `"Unknown"` weekday.

use chrono::{Duration, NaiveDate};

use crate::types::{PeriodRange, ScheduleEntry};

/// Wall-clock boundaries for every shift/slot key the portal uses.
///
/// Morning (M) and afternoon (T) shifts have six slots, the evening (N)
/// shift only four. The table is fixed; a key outside it means the code
/// block is not decodable and is skipped.
const SLOT_TIMES: [(&str, &str, &str); 16] = [
    ("M1", "07:00", "07:50"),
    ("M2", "07:50", "08:40"),
    ("M3", "08:55", "09:45"),
    ("M4", "09:45", "10:35"),
    ("M5", "10:50", "11:40"),
    ("M6", "11:40", "12:30"),
    ("T1", "13:00", "13:50"),
    ("T2", "13:50", "14:40"),
    ("T3", "14:55", "15:45"),
    ("T4", "15:45", "16:35"),
    ("T5", "16:50", "17:40"),
    ("T6", "17:40", "18:30"),
    ("N1", "18:45", "19:35"),
    ("N2", "19:35", "20:25"),
    ("N3", "20:35", "21:25"),
    ("N4", "21:25", "22:15"),
];

/// Look up the (start, end) wall-clock pair for a shift/slot key.
///
/// # Examples
/// ```
/// use sigaa_core::parser::slot_time;
///
/// assert_eq!(slot_time("M2"), Some(("07:50", "08:40")));
/// assert_eq!(slot_time("N5"), None);
/// ```
pub fn slot_time(key: &str) -> Option<(&'static str, &'static str)> {
    SLOT_TIMES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, start, end)| (*start, *end))
}

/// Map a day digit to its weekday name, '1' = Sunday through '7' = Saturday.
///
/// Any other character yields the sentinel `"Unknown"`; this is a
/// defined fallback, not an error.
///
/// # Examples
/// ```
/// use sigaa_core::parser::weekday_name;
///
/// assert_eq!(weekday_name('6'), "Friday");
/// assert_eq!(weekday_name('9'), "Unknown");
/// ```
pub fn weekday_name(digit: char) -> &'static str {
    match digit {
        '1' => "Sunday",
        '2' => "Monday",
        '3' => "Tuesday",
        '4' => "Wednesday",
        '5' => "Thursday",
        '6' => "Friday",
        '7' => "Saturday",
        _ => "Unknown",
    }
}

/// Extract every well-formed parenthesized date range from a raw
/// scheduling string, in left-to-right order of appearance.
///
/// A range reads `(D/M/Y - D/M/Y)`; whitespace around the dash is
/// tolerated. Parenthesized content that is missing the dash, one side,
/// or a parseable date contributes nothing.
///
/// # Examples
/// ```
/// use sigaa_core::parser::extract_periods;
///
/// let periods = extract_periods("6M456 (17/03/2025 - 27/03/2025)");
/// assert_eq!(periods[0].start_date, "2025-03-17");
/// assert_eq!(periods[0].end_date, "2025-03-27");
/// ```
pub fn extract_periods(raw: &str) -> Vec<PeriodRange> {
    let mut periods = Vec::new();
    if raw.trim().is_empty() {
        return periods;
    }

    if let Ok(re) = regex_lite::Regex::new(r"\(([^)]+)\)") {
        for caps in re.captures_iter(raw) {
            if let Some(inner) = caps.get(1) {
                if let Some((start_date, end_date)) = parse_period_range(inner.as_str()) {
                    periods.push(PeriodRange {
                        start_date,
                        end_date,
                    });
                }
            }
        }
    }

    periods
}

/// Decode a raw scheduling string into one entry per encoded weekday.
///
/// The string is split on commas into segments. Each segment pairs its
/// code blocks with at most one date range (the first parenthesized
/// group); when the range is absent or malformed, both period fields of
/// the segment's entries are empty strings. A block must match
/// day-digits + shift letter + slot-digits (`7M2345`) or it contributes
/// nothing, and a shift/slot combination outside the time table (an
/// evening slot 5 or 6, say) skips the whole block.
///
/// Output order follows segment order, then block order within a
/// segment, then day-digit order within a block.
///
/// # Examples
/// ```
/// use sigaa_core::parser::expand_schedule;
///
/// let entries = expand_schedule("6M456 (17/03/2025 - 27/03/2025)");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].day, "Friday");
/// assert_eq!(entries[0].start_time, "09:45");
/// assert_eq!(entries[0].end_time, "12:30");
/// ```
pub fn expand_schedule(raw: &str) -> Vec<ScheduleEntry> {
    let mut entries = Vec::new();
    if raw.trim().is_empty() {
        return entries;
    }

    let paren_re = match regex_lite::Regex::new(r"\(([^)]+)\)") {
        Ok(re) => re,
        Err(_) => return entries,
    };
    // Stripping also drops empty parens, which the range capture above
    // never matches.
    let strip_re = match regex_lite::Regex::new(r"\([^)]*\)") {
        Ok(re) => re,
        Err(_) => return entries,
    };
    let block_re = match regex_lite::Regex::new(r"(?i)^(\d+)([MTN])([1-6]+)$") {
        Ok(re) => re,
        Err(_) => return entries,
    };

    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        // At most one date range per segment; the first parenthesized
        // group wins.
        let (start_period, end_period) = paren_re
            .captures(segment)
            .and_then(|caps| caps.get(1))
            .and_then(|inner| parse_period_range(inner.as_str()))
            .unwrap_or_default();

        let code_part = strip_re.replace_all(segment, "");

        for block in code_part.split_whitespace() {
            if let Some(caps) = block_re.captures(block) {
                if let Some((start_time, end_time)) = block_time_range(&caps) {
                    if let Some(days) = caps.get(1) {
                        for digit in days.as_str().chars() {
                            entries.push(ScheduleEntry {
                                day: weekday_name(digit).to_string(),
                                start_time: start_time.to_string(),
                                end_time: end_time.to_string(),
                                start_period: start_period.clone(),
                                end_period: end_period.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    entries
}

/// Resolve a matched block's slot run to its wall-clock range.
///
/// The run collapses to its first and last digit as written, not to a
/// min/max. The portal renders slot digits in ascending contiguous
/// order and the collapse relies on that position.
fn block_time_range(caps: &regex_lite::Captures<'_>) -> Option<(&'static str, &'static str)> {
    let shift = caps.get(2)?.as_str().to_uppercase();
    let slots = caps.get(3)?.as_str();

    let first = slots.chars().next()?;
    let last = slots.chars().last()?;

    let (start, _) = slot_time(&format!("{}{}", shift, first))?;
    let (_, end) = slot_time(&format!("{}{}", shift, last))?;
    Some((start, end))
}

/// Split parenthesized content on its dash and convert both sides.
///
/// Returns `None` when either side is missing, empty, or not a date.
fn parse_period_range(content: &str) -> Option<(String, String)> {
    let mut halves = content.split('-');
    let start = halves.next()?.trim();
    let end = halves.next()?.trim();
    if start.is_empty() || end.is_empty() {
        return None;
    }
    Some((parse_date(start)?, parse_date(end)?))
}

/// Convert a `D/M/Y` date token to `YYYY-MM-DD`.
///
/// No calendar validation: out-of-range day and month components roll
/// over into neighbouring months and years, matching the arithmetic the
/// portal's own renderer applies ("31/02/2025" becomes "2025-03-03").
fn parse_date(text: &str) -> Option<String> {
    let mut parts = text.trim().split('/');
    let day: i64 = parts.next()?.trim().parse().ok()?;
    let month: i64 = parts.next()?.trim().parse().ok()?;
    let year: i64 = parts.next()?.trim().parse().ok()?;

    let year = year + (month - 1).div_euclid(12);
    let month = (month - 1).rem_euclid(12) + 1;

    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month as u32, 1)?;
    let date = first.checked_add_signed(Duration::try_days(day - 1)?)?;
    Some(date.format("%Y-%m-%d").to_string())
}
