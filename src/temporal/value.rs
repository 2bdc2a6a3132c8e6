use std::fmt;

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

use crate::common::{MAX_FSP, MAX_MICROSECOND};

/// A normalized calendar/time record used to move date and time data between
/// strings, native date-times and packed column storage without loss.
///
/// `microsecond` always holds full 6-digit resolution; `fsp` only controls
/// how many fractional digits are rendered. A value that failed to parse has
/// `valid == false` and all other fields at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalValue {
    /// +1 or -1
    pub sign: i8,
    pub year: u32,
    pub month: u32,
    pub day: u32,
    /// Unbounded for TIME values
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
    /// Fractional seconds precision, 0..=6
    pub fsp: u8,
    pub valid: bool,
}

impl Default for TemporalValue {
    fn default() -> Self {
        Self {
            sign: 1,
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            fsp: 0,
            valid: true,
        }
    }
}

impl TemporalValue {
    /// An all-zero value flagged invalid.
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::default()
        }
    }

    pub fn date(year: u32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..Self::default()
        }
    }

    /// A signed time of day or duration. A `microsecond` above 999999 yields
    /// an invalid value.
    pub fn time(negative: bool, hour: u32, minute: u32, second: u32, microsecond: u32) -> Self {
        Self {
            sign: if negative { -1 } else { 1 },
            hour,
            minute,
            second,
            microsecond,
            valid: microsecond <= MAX_MICROSECOND,
            ..Self::default()
        }
    }

    pub fn datetime(
        year: u32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            microsecond,
            valid: microsecond <= MAX_MICROSECOND,
            ..Self::date(year, month, day)
        }
    }

    /// Returns a copy rendering `fsp` fractional digits (capped at 6).
    pub fn with_fsp(mut self, fsp: u8) -> Self {
        self.fsp = fsp.min(MAX_FSP);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    /// Copies calendar fields from a UTC date-time. Only millisecond
    /// resolution is taken from the native value.
    pub fn from_native_utc(d: &DateTime<Utc>) -> Self {
        Self::from_native(d)
    }

    /// Copies calendar fields from a date-time in the local time zone.
    pub fn from_native_local(d: &DateTime<Local>) -> Self {
        Self::from_native(d)
    }

    fn from_native<Tz: TimeZone>(d: &DateTime<Tz>) -> Self {
        let Ok(year) = u32::try_from(d.year()) else {
            return Self::invalid();
        };
        // Leap seconds report nanoseconds past 1e9
        let millis = (d.nanosecond() % 1_000_000_000) / 1_000_000;
        Self {
            fsp: 3,
            ..Self::datetime(
                year,
                d.month(),
                d.day(),
                d.hour(),
                d.minute(),
                d.second(),
                millis * 1000,
            )
        }
    }

    /// Builds a UTC date-time, dropping sub-millisecond digits. Returns None
    /// for invalid, negative or non-calendar values.
    pub fn to_native_utc(&self) -> Option<DateTime<Utc>> {
        self.to_naive().map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Builds a local date-time, dropping sub-millisecond digits. Local times
    /// skipped by a DST transition yield None; ambiguous ones resolve to the
    /// earlier instant.
    pub fn to_native_local(&self) -> Option<DateTime<Local>> {
        let naive = self.to_naive()?;
        Local.from_local_datetime(&naive).earliest()
    }

    fn to_naive(&self) -> Option<NaiveDateTime> {
        if !self.valid || self.is_negative() {
            return None;
        }
        let year = i32::try_from(self.year).ok()?;
        let date = NaiveDate::from_ymd_opt(year, self.month, self.day)?;
        let time = NaiveTime::from_hms_milli_opt(
            self.hour,
            self.minute,
            self.second,
            self.microsecond / 1000,
        )?;
        Some(date.and_time(time))
    }

    /// Renders `[-]HH:MM:SS[.f...]` with `fsp` fractional digits.
    pub fn to_time_string(&self) -> String {
        let mut out = String::with_capacity(16);
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(&format!(
            "{:02}:{:02}:{:02}",
            self.hour, self.minute, self.second
        ));
        let fsp = self.fsp.min(MAX_FSP) as usize;
        if fsp > 0 {
            let digits = format!("{:06}", self.microsecond);
            out.push('.');
            out.push_str(&digits[..fsp]);
        }
        out
    }

    /// Renders `YYYY-MM-DD`.
    pub fn to_date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Renders `YYYY-MM-DD HH:MM:SS[.f...]`.
    pub fn to_datetime_string(&self) -> String {
        format!("{} {}", self.to_date_string(), self.to_time_string())
    }

    fn has_date(&self) -> bool {
        self.year != 0 || self.month != 0 || self.day != 0
    }

    fn has_time(&self) -> bool {
        self.hour != 0
            || self.minute != 0
            || self.second != 0
            || self.microsecond != 0
            || self.fsp != 0
            || self.is_negative()
    }
}

impl fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "INVALID");
        }
        match (self.has_date(), self.has_time()) {
            (true, false) => write!(f, "{}", self.to_date_string()),
            (false, true) => write!(f, "{}", self.to_time_string()),
            _ => write!(f, "{}", self.to_datetime_string()),
        }
    }
}
