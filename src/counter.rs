//! Elapsed-time counter since the anchor instant.
//!
//! The anchor is a fixed civil date/time with a fixed UTC offset, converted
//! once at startup to an absolute UTC instant. Every UI tick recomputes the
//! non-negative `{days, hours, minutes, seconds}` breakdown from wall-clock
//! time; an anchor in the future yields all zeros.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::AnchorSettings;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// The fixed reference instant the counter measures against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Anchor {
    utc_ms: i64,
}

/// Calendar breakdown of time elapsed since the anchor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Elapsed {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Total whole seconds represented by this breakdown.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl Anchor {
    /// Build an anchor from a civil date/time observed at `utc_offset_minutes`
    /// east of UTC. The reference anchor (2024-05-06 20:30:00 at UTC-3)
    /// becomes 2024-05-06T23:30:00Z.
    pub fn from_civil(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        utc_offset_minutes: i32,
    ) -> Self {
        let days = days_from_civil(year as i64, month, day);
        let civil_secs =
            days * 86_400 + hour as i64 * 3_600 + minute as i64 * 60 + second as i64;
        let utc_secs = civil_secs - utc_offset_minutes as i64 * 60;
        Self {
            utc_ms: utc_secs * 1_000,
        }
    }

    /// Parse an anchor out of config settings (`date = "YYYY-MM-DD"`,
    /// `time = "HH:MM:SS"`).
    pub fn from_settings(settings: &AnchorSettings) -> Result<Self, String> {
        let (y, mo, d) = parse_date(&settings.date)
            .ok_or_else(|| format!("anchor.date is not a valid YYYY-MM-DD date: {:?}", settings.date))?;
        let (h, mi, s) = parse_time(&settings.time)
            .ok_or_else(|| format!("anchor.time is not a valid HH:MM:SS time: {:?}", settings.time))?;
        Ok(Self::from_civil(y, mo, d, h, mi, s, settings.utc_offset_minutes))
    }

    pub fn utc_ms(&self) -> i64 {
        self.utc_ms
    }

    /// Breakdown of `now_utc_ms - anchor`, clamped to zero when the anchor
    /// has not been reached yet.
    pub fn elapsed_at(&self, now_utc_ms: i64) -> Elapsed {
        let diff = now_utc_ms - self.utc_ms;
        if diff < 0 {
            return Elapsed::ZERO;
        }

        Elapsed {
            days: (diff / MS_PER_DAY) as u64,
            hours: (diff / MS_PER_HOUR % 24) as u64,
            minutes: (diff / MS_PER_MINUTE % 60) as u64,
            seconds: (diff / MS_PER_SECOND % 60) as u64,
        }
    }

    /// Breakdown against the system clock.
    pub fn elapsed_now(&self) -> Elapsed {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.elapsed_at(now_ms)
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian civil date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = if month > 2 { month - 3 } else { month + 9 } as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Parse `YYYY-MM-DD`, rejecting impossible calendar dates.
pub fn parse_date(s: &str) -> Option<(i32, u32, u32)> {
    let mut it = s.trim().split('-');
    let y: i32 = it.next()?.parse().ok()?;
    let mo: u32 = it.next()?.parse().ok()?;
    let d: u32 = it.next()?.parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    if !(1..=12).contains(&mo) || d == 0 || d > days_in_month(y, mo) {
        return None;
    }
    Some((y, mo, d))
}

/// Parse `HH:MM:SS` (seconds optional).
pub fn parse_time(s: &str) -> Option<(u32, u32, u32)> {
    let mut it = s.trim().split(':');
    let h: u32 = it.next()?.parse().ok()?;
    let m: u32 = it.next()?.parse().ok()?;
    let sec: u32 = match it.next() {
        Some(part) => part.parse().ok()?,
        None => 0,
    };
    if it.next().is_some() {
        return None;
    }
    if h >= 24 || m >= 60 || sec >= 60 {
        return None;
    }
    Some((h, m, sec))
}

#[cfg(test)]
mod tests;
