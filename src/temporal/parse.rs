use tracing::trace;

use super::TemporalValue;
use crate::common::MAX_FSP;

/// How a TIME string with exactly one colon is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeParseMode {
    /// Digits are always read right to left as seconds, minutes, hours:
    /// `"05:07"` is 00:05:07.
    #[default]
    Positional,

    /// Compatibility with older clients: a single colon with no hour digits
    /// shifts the fields up, so `"05:07"` is 05:07:00.
    Legacy,
}

/// Parses the last two, next two and remaining digits of `digits`.
fn split_positional(digits: &str) -> Option<(u32, u32, u32)> {
    let n = digits.len();
    let sec_start = n.saturating_sub(2);
    let min_start = n.saturating_sub(4);
    let num = |s: &str| -> Option<u32> {
        if s.is_empty() {
            Some(0)
        } else {
            s.parse().ok()
        }
    };
    Some((
        num(&digits[..min_start])?,
        num(&digits[min_start..sec_start])?,
        num(&digits[sec_start..])?,
    ))
}

/// Scales up to six fraction digits to microseconds; extra digits are
/// truncated.
fn microseconds(fraction: &str) -> u32 {
    let kept = &fraction[..fraction.len().min(MAX_FSP as usize)];
    let mut micros: u32 = 0;
    for b in kept.bytes() {
        micros = micros * 10 + (b - b'0') as u32;
    }
    for _ in kept.len()..MAX_FSP as usize {
        micros *= 10;
    }
    micros
}

impl TemporalValue {
    /// Parses `[+|-][HH]:MM:SS[.ffffff]` using [`TimeParseMode::Positional`].
    pub fn from_time_string(s: &str) -> Self {
        Self::from_time_string_with(s, TimeParseMode::default())
    }

    /// Parses a signed time string.
    ///
    /// Digits before the decimal point are read positionally (last two are
    /// seconds, the two before are minutes, the rest hours); separators other
    /// than `:` and `.` are skipped and the first letter ends the scan.
    /// Fraction digits beyond six are truncated. Malformed input yields a
    /// value with `valid == false`.
    pub fn from_time_string_with(s: &str, mode: TimeParseMode) -> Self {
        let s = s.trim();
        let mut value = Self::default();
        let mut rest = s;
        if let Some(stripped) = rest.strip_prefix('-') {
            value.sign = -1;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('+') {
            rest = stripped;
        }

        let mut digits = String::new();
        let mut fraction = String::new();
        let mut colons = 0;
        let mut in_fraction = false;
        for ch in rest.chars() {
            match ch {
                '0'..='9' if in_fraction => fraction.push(ch),
                '0'..='9' => digits.push(ch),
                ':' if !in_fraction => colons += 1,
                '.' if !in_fraction => in_fraction = true,
                ':' | '.' => return Self::reject("time", s),
                c if c.is_alphabetic() => break,
                _ => {}
            }
        }
        if digits.is_empty() || colons > 2 {
            return Self::reject("time", s);
        }

        let Some((hour, minute, second)) = split_positional(&digits) else {
            return Self::reject("time", s);
        };
        if minute > 59 || second > 59 {
            return Self::reject("time", s);
        }
        value.hour = hour;
        value.minute = minute;
        value.second = second;
        value.microsecond = microseconds(&fraction);
        value.fsp = fraction.len().min(MAX_FSP as usize) as u8;

        if mode == TimeParseMode::Legacy && colons == 1 && value.hour == 0 {
            value.hour = value.minute;
            value.minute = value.second;
            value.second = 0;
        }
        value
    }

    /// Parses `YYYY-MM-DD`; any run of non-alphanumeric characters separates
    /// the three parts.
    pub fn from_date_string(s: &str) -> Self {
        let parts: Vec<&str> = s
            .trim()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 || !parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())) {
            return Self::reject("date", s);
        }
        let fields: Option<Vec<u32>> = parts.iter().map(|p| p.parse().ok()).collect();
        match fields.as_deref() {
            Some(&[year, month, day]) if month <= 12 && day <= 31 => Self::date(year, month, day),
            _ => Self::reject("date", s),
        }
    }

    /// Parses `DATE TIME`, split at the first space. A string without a space
    /// is a date at midnight.
    pub fn from_datetime_string(s: &str) -> Self {
        Self::from_datetime_string_with(s, TimeParseMode::default())
    }

    pub fn from_datetime_string_with(s: &str, mode: TimeParseMode) -> Self {
        let s = s.trim();
        let (date_part, time_part) = match s.split_once(' ') {
            Some((date, time)) => (date, Some(time)),
            None => (s, None),
        };
        let date = Self::from_date_string(date_part);
        if !date.valid {
            return Self::invalid();
        }
        let Some(time_part) = time_part else {
            return date;
        };
        let time = Self::from_time_string_with(time_part, mode);
        if !time.valid || time.is_negative() || time.hour > 23 {
            return Self::reject("datetime", s);
        }
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            ..time
        }
    }

    fn reject(what: &str, input: &str) -> Self {
        trace!(kind = what, input, "rejected temporal string");
        Self::invalid()
    }
}
