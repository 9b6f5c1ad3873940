//! Five-field cron expressions as used by backup schedules.
//!
//! Supports `*`, lists (`1,15`), ranges (`1-5`), steps (`*/10`, `0-30/5`,
//! `5/15`), month and weekday names, `7` as Sunday and the `@hourly`,
//! `@daily`, `@weekly`, `@monthly` and `@yearly` shorthands. When both
//! day-of-month and day-of-week are restricted a day matches if either does.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::{LinstorError, LinstorResult};

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];
const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Longest span searched for the next match. Covers leap-day-only
/// expressions.
const SEARCH_LIMIT_DAYS: i64 = 366 * 8;

/// A parsed cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    source: String,
    minutes: u64,
    hours: u64,
    days_of_month: u64,
    months: u64,
    days_of_week: u64,
    dom_restricted: bool,
    dow_restricted: bool,
}

struct FieldSpec {
    name: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
    /// Value of the first entry in `names`.
    names_start: u32,
}

const MINUTE: FieldSpec = FieldSpec { name: "minute", min: 0, max: 59, names: &[], names_start: 0 };
const HOUR: FieldSpec = FieldSpec { name: "hour", min: 0, max: 23, names: &[], names_start: 0 };
const DAY_OF_MONTH: FieldSpec =
    FieldSpec { name: "day-of-month", min: 1, max: 31, names: &[], names_start: 0 };
const MONTH: FieldSpec =
    FieldSpec { name: "month", min: 1, max: 12, names: &MONTH_NAMES, names_start: 1 };
const DAY_OF_WEEK: FieldSpec =
    FieldSpec { name: "day-of-week", min: 0, max: 7, names: &WEEKDAY_NAMES, names_start: 0 };

impl FieldSpec {
    fn value(&self, text: &str) -> Result<u32, String> {
        let value = match text.parse::<u32>() {
            Ok(value) => value,
            Err(_) => self
                .names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(text))
                .map(|index| index as u32 + self.names_start)
                .ok_or_else(|| format!("invalid {} value '{text}'", self.name))?,
        };
        if value < self.min || value > self.max {
            return Err(format!(
                "{} value {value} out of range {}-{}",
                self.name, self.min, self.max
            ));
        }
        Ok(value)
    }

    /// Parses one field into a bit set of allowed values.
    fn parse(&self, field: &str) -> Result<u64, String> {
        let mut bits = 0u64;
        for part in field.split(',') {
            let (range, step) = match part.split_once('/') {
                Some((range, step)) => {
                    let step = step
                        .parse::<u32>()
                        .ok()
                        .filter(|step| *step > 0)
                        .ok_or_else(|| format!("invalid {} step '{step}'", self.name))?;
                    (range, Some(step))
                }
                None => (part, None),
            };

            let (start, end) = if range == "*" {
                (self.min, self.max)
            } else if let Some((start, end)) = range.split_once('-') {
                (self.value(start)?, self.value(end)?)
            } else {
                let start = self.value(range)?;
                // `5/15` means "from 5 on, every 15".
                (start, if step.is_some() { self.max } else { start })
            };

            if start > end {
                return Err(format!("{} range {start}-{end} is reversed", self.name));
            }

            let step = step.unwrap_or(1);
            let mut value = start;
            while value <= end {
                bits |= 1 << value;
                match value.checked_add(step) {
                    Some(next) => value = next,
                    None => break,
                }
            }
        }
        Ok(bits)
    }
}

impl CronExpr {
    /// Parses a cron expression.
    ///
    /// # Errors
    ///
    /// Returns [`LinstorError::InvalidCron`] naming the offending field.
    pub fn parse(expr: &str) -> LinstorResult<Self> {
        let invalid = |reason: String| LinstorError::InvalidCron {
            expr: expr.to_string(),
            reason,
        };

        let trimmed = expr.trim();
        let expanded = match trimmed.to_ascii_lowercase().as_str() {
            "@yearly" | "@annually" => "0 0 1 1 *",
            "@monthly" => "0 0 1 * *",
            "@weekly" => "0 0 * * 0",
            "@daily" | "@midnight" => "0 0 * * *",
            "@hourly" => "0 * * * *",
            other if other.starts_with('@') => {
                return Err(invalid(format!("unknown shorthand '{trimmed}'")))
            }
            _ => trimmed,
        };

        let fields: Vec<&str> = expanded.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(invalid(format!("expected 5 fields, found {}", fields.len())));
        }

        let minutes = MINUTE.parse(fields[0]).map_err(invalid)?;
        let hours = HOUR.parse(fields[1]).map_err(invalid)?;
        let days_of_month = DAY_OF_MONTH.parse(fields[2]).map_err(invalid)?;
        let months = MONTH.parse(fields[3]).map_err(invalid)?;
        let mut days_of_week = DAY_OF_WEEK.parse(fields[4]).map_err(invalid)?;
        // 7 is another name for Sunday.
        if days_of_week & (1 << 7) != 0 {
            days_of_week = (days_of_week & !(1 << 7)) | 1;
        }

        Ok(Self {
            source: trimmed.to_string(),
            minutes,
            hours,
            days_of_month,
            months,
            days_of_week,
            dom_restricted: !fields[2].starts_with('*'),
            dow_restricted: !fields[4].starts_with('*'),
        })
    }

    /// The expression as it was written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.days_of_month & (1 << date.day()) != 0;
        let dow = self.days_of_week & (1 << date.weekday().num_days_from_sunday()) != 0;
        match (self.dom_restricted, self.dow_restricted) {
            (true, true) => dom || dow,
            _ => dom && dow,
        }
    }

    /// Returns true if the expression fires at the minute containing `time`.
    pub fn matches(&self, time: &DateTime<Utc>) -> bool {
        self.months & (1 << time.month()) != 0
            && self.day_matches(time.date_naive())
            && self.hours & (1 << time.hour()) != 0
            && self.minutes & (1 << time.minute()) != 0
    }

    /// First execution strictly after `after`, in UTC.
    pub fn next_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        let start = after.naive_utc().with_second(0)?.with_nanosecond(0)? + Duration::minutes(1);
        let limit = start + Duration::days(SEARCH_LIMIT_DAYS);
        let mut t = start;

        while t <= limit {
            if self.months & (1 << t.month()) == 0 {
                t = first_of_next_month(t)?;
                continue;
            }
            if !self.day_matches(t.date()) {
                t = t.date().succ_opt()?.and_hms_opt(0, 0, 0)?;
                continue;
            }
            if self.hours & (1 << t.hour()) == 0 {
                t = t.with_minute(0)? + Duration::hours(1);
                continue;
            }
            if self.minutes & (1 << t.minute()) == 0 {
                t += Duration::minutes(1);
                continue;
            }
            return Some(t.and_utc());
        }
        None
    }

    /// The next `count` execution times after `after`.
    pub fn upcoming(&self, after: &DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        let mut times = Vec::with_capacity(count.min(64));
        let mut cursor = *after;
        while times.len() < count {
            match self.next_after(&cursor) {
                Some(next) => {
                    times.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        times
    }
}

fn first_of_next_month(t: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if t.month() == 12 {
        (t.year() + 1, 1)
    } else {
        (t.year(), t.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

impl FromStr for CronExpr {
    type Err = LinstorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CronExpr::parse(s)
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn rejects_malformed_expressions() {
        for expr in [
            "",
            "* * * *",
            "* * * * * *",
            "60 * * * *",
            "* 24 * * *",
            "* * 0 * *",
            "* * * 13 *",
            "* * * * 8",
            "*/0 * * * *",
            "5-1 * * * *",
            "a * * * *",
            "* * * FOO *",
            "@every5m",
        ] {
            match CronExpr::parse(expr) {
                Err(LinstorError::InvalidCron { expr: e, .. }) => assert_eq!(e, expr),
                other => panic!("'{expr}' should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn every_fifteen_minutes() {
        let cron = CronExpr::parse("*/15 * * * *").unwrap();
        assert_eq!(
            cron.upcoming(&at(2026, 10, 18, 10, 7), 3),
            vec![at(2026, 10, 18, 10, 15), at(2026, 10, 18, 10, 30), at(2026, 10, 18, 10, 45)]
        );
        // Strictly after: an exact match is skipped.
        assert_eq!(cron.next_after(&at(2026, 10, 18, 10, 15)), Some(at(2026, 10, 18, 10, 30)));
    }

    #[test]
    fn nightly_rolls_over_month_and_year() {
        let cron = CronExpr::parse("30 2 * * *").unwrap();
        assert_eq!(cron.next_after(&at(2026, 12, 31, 3, 0)), Some(at(2027, 1, 1, 2, 30)));
    }

    #[test]
    fn weekdays_by_name() {
        // 2026-10-18 is a Sunday.
        let cron = CronExpr::parse("0 9 * * mon-fri").unwrap();
        assert_eq!(
            cron.upcoming(&at(2026, 10, 16, 12, 0), 2),
            vec![at(2026, 10, 19, 9, 0), at(2026, 10, 20, 9, 0)]
        );
    }

    #[test]
    fn seven_is_sunday() {
        let seven = CronExpr::parse("0 0 * * 7").unwrap();
        let zero = CronExpr::parse("0 0 * * SUN").unwrap();
        let after = at(2026, 10, 14, 0, 0);
        assert_eq!(seven.next_after(&after), zero.next_after(&after));
        assert_eq!(seven.next_after(&after), Some(at(2026, 10, 18, 0, 0)));
    }

    #[test]
    fn restricted_dom_and_dow_are_ored() {
        // The 1st of the month or any Monday.
        let cron = CronExpr::parse("0 0 1 * 1").unwrap();
        assert_eq!(
            cron.upcoming(&at(2026, 10, 18, 12, 0), 3),
            vec![at(2026, 10, 19, 0, 0), at(2026, 10, 26, 0, 0), at(2026, 11, 1, 0, 0)]
        );
    }

    #[test]
    fn leap_day_only() {
        let cron = CronExpr::parse("0 0 29 FEB *").unwrap();
        assert_eq!(cron.next_after(&at(2026, 10, 18, 0, 0)), Some(at(2028, 2, 29, 0, 0)));
    }

    #[test]
    fn impossible_date_never_fires() {
        let cron = CronExpr::parse("0 0 31 4 *").unwrap();
        assert_eq!(cron.next_after(&at(2026, 1, 1, 0, 0)), None);
        assert!(cron.upcoming(&at(2026, 1, 1, 0, 0), 5).is_empty());
    }

    #[test]
    fn lists_ranges_and_offsets() {
        let cron = CronExpr::parse("5/20 8-10,22 * * *").unwrap();
        assert_eq!(
            cron.upcoming(&at(2026, 10, 18, 10, 30), 4),
            vec![
                at(2026, 10, 18, 10, 45),
                at(2026, 10, 18, 22, 5),
                at(2026, 10, 18, 22, 25),
                at(2026, 10, 18, 22, 45),
            ]
        );
        assert!(cron.matches(&at(2026, 10, 18, 8, 25)));
        assert!(!cron.matches(&at(2026, 10, 18, 9, 0)));
    }

    #[test]
    fn shorthands() {
        let daily: CronExpr = "@daily".parse().unwrap();
        assert_eq!(daily.next_after(&at(2026, 10, 18, 5, 0)), Some(at(2026, 10, 19, 0, 0)));
        assert_eq!(daily.to_string(), "@daily");
        let weekly = CronExpr::parse("@weekly").unwrap();
        assert_eq!(weekly.next_after(&at(2026, 10, 18, 5, 0)), Some(at(2026, 10, 25, 0, 0)));
    }

    #[test]
    fn oversized_step_keeps_only_the_start() {
        let cron = CronExpr::parse("1/4294967295 * * * *").unwrap();
        assert_eq!(cron.next_after(&at(2026, 10, 18, 10, 0)), Some(at(2026, 10, 18, 10, 1)));
        assert_eq!(cron.next_after(&at(2026, 10, 18, 10, 1)), Some(at(2026, 10, 18, 11, 1)));

        let cron = CronExpr::parse("59/4294967295 * * * *").unwrap();
        assert_eq!(cron.next_after(&at(2026, 10, 18, 10, 0)), Some(at(2026, 10, 18, 10, 59)));
    }

    #[test]
    fn upcoming_stops_when_nothing_fires() {
        let cron = CronExpr::parse("0 0 30 2 *").unwrap();
        assert!(cron.upcoming(&at(2026, 10, 18, 0, 0), usize::MAX).is_empty());
    }
}
