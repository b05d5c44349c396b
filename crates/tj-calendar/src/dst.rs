//! Daylight-saving rules for the regions session hours are anchored to.
//!
//! Deterministic, pure logic. No tz database lookups on the hot path: the
//! transition Sundays are derived from the fixed EU and US rules. Evaluation
//! is at date granularity; the transition Sunday itself is inside DST for the
//! spring change and outside DST for the autumn change.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// DST rule family a session's local exchange hours follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    /// European Union: last Sunday of March to last Sunday of October.
    #[serde(rename = "EU", alias = "eu")]
    Eu,
    /// United States: second Sunday of March to first Sunday of November.
    #[serde(rename = "US", alias = "us")]
    Us,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Us => "US",
        }
    }

    /// A representative IANA zone observing this region's rules.
    pub fn reference_zone(&self) -> chrono_tz::Tz {
        match self {
            Region::Eu => chrono_tz::Europe::London,
            Region::Us => chrono_tz::America::New_York,
        }
    }

    /// First day of DST in `year`.
    pub fn dst_start(&self, year: i32) -> Option<NaiveDate> {
        match self {
            Region::Eu => last_sunday(year, 3),
            Region::Us => NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2),
        }
    }

    /// First day back on standard time in `year`.
    pub fn dst_end(&self, year: i32) -> Option<NaiveDate> {
        match self {
            Region::Eu => last_sunday(year, 10),
            Region::Us => NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EU" => Ok(Region::Eu),
            "US" => Ok(Region::Us),
            other => Err(format!("invalid region '{other}'. expected one of: EU | US")),
        }
    }
}

// ---------------------------------------------------------------------------
// DST evaluation
// ---------------------------------------------------------------------------

/// Returns `true` if `region` observes daylight-saving time on `date`.
///
/// Total over all dates: a year whose transition dates cannot be represented
/// is treated as standard time.
pub fn is_daylight_saving_time(date: NaiveDate, region: Region) -> bool {
    match (region.dst_start(date.year()), region.dst_end(date.year())) {
        (Some(start), Some(end)) => date >= start && date < end,
        _ => false,
    }
}

/// Last Sunday of a 31-day month.
fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let last = NaiveDate::from_ymd_opt(year, month, 31)?;
    let back = last.weekday().num_days_from_sunday() as i64;
    Some(last - Duration::days(back))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
