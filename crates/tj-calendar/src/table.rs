//! Session table: canonical trading sessions plus legacy aliases.
//!
//! Session boundaries are fixed in local exchange time. The table stores them
//! as **winter** UTC hours; a bound falling on a day when the session's
//! region observes DST moves one hour earlier in UTC.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dst::{is_daylight_saving_time, Region};
use crate::error::{SessionError, TableError};
use crate::window::SessionWindow;

pub const LONDON: &str = "London";
pub const NY_AM: &str = "NY AM";
pub const NY_PM: &str = "NY PM";
pub const ASIA: &str = "Asia";

// ---------------------------------------------------------------------------
// SessionSpec
// ---------------------------------------------------------------------------

/// One canonical session and its winter-time UTC boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpec {
    pub name: String,
    pub region: Region,
    /// Opening hour (UTC, standard time), `0..24`.
    pub winter_start_hour: u32,
    /// Closing hour (UTC, standard time), `0..24`. Less than the start hour
    /// for sessions that cross midnight.
    pub winter_end_hour: u32,
}

impl SessionSpec {
    pub fn new<S: Into<String>>(
        name: S,
        region: Region,
        winter_start_hour: u32,
        winter_end_hour: u32,
    ) -> Self {
        Self {
            name: name.into(),
            region,
            winter_start_hour,
            winter_end_hour,
        }
    }

    /// `true` when the window opens on the day before the reference date.
    pub fn crosses_midnight(&self) -> bool {
        self.winter_start_hour > self.winter_end_hour
    }

    /// The window for `reference_date`.
    ///
    /// Each bound takes its DST state from its own calendar day, so a session
    /// crossing midnight keeps its local opening hour on the evening before a
    /// transition. For such sessions `start` is anchored on
    /// `reference_date - 1 day`; at `NaiveDate::MIN`, which has no previous
    /// day, `start` saturates to the earliest representable instant.
    pub fn window(&self, reference_date: NaiveDate) -> SessionWindow {
        let start = if self.crosses_midnight() {
            reference_date
                .pred_opt()
                .map(|day| self.bound(day, self.winter_start_hour))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        } else {
            self.bound(reference_date, self.winter_start_hour)
        };

        SessionWindow {
            start,
            end: self.bound(reference_date, self.winter_end_hour),
        }
    }

    /// `winter_hour` on `day`, moved one hour earlier when the region is on
    /// DST that day. Saturates at the ends of the representable range.
    fn bound(&self, day: NaiveDate, winter_hour: u32) -> DateTime<Utc> {
        let shift = if is_daylight_saving_time(day, self.region) {
            1
        } else {
            0
        };
        let offset = Duration::hours(winter_hour as i64 - shift);
        day.and_time(NaiveTime::MIN)
            .and_utc()
            .checked_add_signed(offset)
            .unwrap_or(if offset < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.name.trim().is_empty() {
            return Err(TableError::EmptySessionName);
        }
        for hour in [self.winter_start_hour, self.winter_end_hour] {
            if hour >= 24 {
                return Err(TableError::HourOutOfRange {
                    session: self.name.clone(),
                    hour,
                });
            }
        }
        if self.winter_start_hour == self.winter_end_hour {
            return Err(TableError::EmptyWindow {
                session: self.name.clone(),
                hour: self.winter_start_hour,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SessionTable
// ---------------------------------------------------------------------------

/// Canonical sessions plus an alias map (alias keys are matched
/// case-insensitively and stored lowercase).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTable {
    sessions: Vec<SessionSpec>,
    aliases: BTreeMap<String, Vec<String>>,
}

static BUILTIN: LazyLock<SessionTable> = LazyLock::new(|| SessionTable {
    sessions: vec![
        SessionSpec::new(LONDON, Region::Eu, 8, 13),
        SessionSpec::new(NY_AM, Region::Us, 13, 18),
        SessionSpec::new(NY_PM, Region::Us, 18, 22),
        SessionSpec::new(ASIA, Region::Us, 23, 8),
    ],
    aliases: BTreeMap::from([
        ("london".to_string(), vec![LONDON.to_string()]),
        (
            "new-york".to_string(),
            vec![NY_AM.to_string(), NY_PM.to_string()],
        ),
        ("tokyo".to_string(), vec![ASIA.to_string()]),
        ("sydney".to_string(), vec![ASIA.to_string()]),
    ]),
});

impl SessionTable {
    /// Build a validated table.
    pub fn new<I>(sessions: Vec<SessionSpec>, aliases: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut seen: Vec<&str> = Vec::with_capacity(sessions.len());
        for spec in &sessions {
            spec.validate()?;
            if seen.contains(&spec.name.as_str()) {
                return Err(TableError::DuplicateSession(spec.name.clone()));
            }
            seen.push(spec.name.as_str());
        }

        let mut alias_map = BTreeMap::new();
        for (alias, targets) in aliases {
            if targets.is_empty() {
                return Err(TableError::EmptyAlias(alias));
            }
            if let Some(missing) = targets.iter().find(|t| !seen.contains(&t.as_str())) {
                return Err(TableError::UnknownAliasTarget {
                    alias,
                    target: missing.clone(),
                });
            }
            let key = alias.trim().to_lowercase();
            if alias_map.contains_key(&key) {
                return Err(TableError::DuplicateAlias(alias));
            }
            alias_map.insert(key, targets);
        }

        Ok(Self {
            sessions,
            aliases: alias_map,
        })
    }

    /// The built-in London / NY AM / NY PM / Asia table with legacy aliases.
    pub fn builtin() -> &'static SessionTable {
        &BUILTIN
    }

    pub fn sessions(&self) -> &[SessionSpec] {
        &self.sessions
    }

    pub fn aliases(&self) -> &BTreeMap<String, Vec<String>> {
        &self.aliases
    }

    /// Exact canonical lookup.
    pub fn get(&self, canonical: &str) -> Option<&SessionSpec> {
        self.sessions.iter().find(|s| s.name == canonical)
    }

    fn get_ignore_case(&self, name: &str) -> Option<&SessionSpec> {
        self.sessions
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Map a legacy or alternate spelling to its canonical label.
    ///
    /// Unknown input is returned unchanged so forward-compatible labels
    /// survive a round trip.
    pub fn normalize(&self, name: &str) -> String {
        self.mappings(name)
            .into_iter()
            .next()
            .unwrap_or_else(|| name.to_string())
    }

    /// All canonical sessions a name stands for. Empty for unknown names.
    pub fn mappings(&self, name: &str) -> Vec<String> {
        let key = name.trim();
        if let Some(spec) = self.get(key) {
            return vec![spec.name.clone()];
        }
        if let Some(targets) = self.aliases.get(&key.to_lowercase()) {
            return targets.clone();
        }
        match self.get_ignore_case(key) {
            Some(spec) => vec![spec.name.clone()],
            None => Vec::new(),
        }
    }

    fn resolve(&self, name: &str) -> Result<Vec<&SessionSpec>, SessionError> {
        let specs: Vec<&SessionSpec> = self
            .mappings(name)
            .iter()
            .filter_map(|canonical| self.get(canonical))
            .collect();
        if specs.is_empty() {
            return Err(SessionError::UnknownSession {
                name: name.to_string(),
            });
        }
        Ok(specs)
    }

    /// UTC window of `name` on `reference_date`.
    ///
    /// A name mapping to several sessions yields the span from the earliest
    /// start to the latest end of its members.
    pub fn time_range(
        &self,
        name: &str,
        reference_date: NaiveDate,
    ) -> Result<SessionWindow, SessionError> {
        let specs = self.resolve(name)?;
        let window = specs
            .iter()
            .map(|spec| spec.window(reference_date))
            .reduce(|acc, w| acc.span(&w))
            .ok_or_else(|| SessionError::UnknownSession {
                name: name.to_string(),
            })?;
        debug!(
            session = name,
            date = %reference_date,
            start = %window.start,
            end = %window.end,
            "session window"
        );
        Ok(window)
    }

    /// Whether `trade_time` lies in `[start, end)` of the session window.
    ///
    /// The window is derived from the trade's own UTC date. Sessions that
    /// cross midnight are also checked against the next day's window, whose
    /// start lies on the trade's date.
    pub fn contains(&self, trade_time: DateTime<Utc>, name: &str) -> Result<bool, SessionError> {
        let date = trade_time.date_naive();
        let specs = self.resolve(name)?;
        Ok(specs.iter().any(|spec| {
            if spec.window(date).contains(trade_time) {
                return true;
            }
            spec.crosses_midnight()
                && date
                    .succ_opt()
                    .is_some_and(|next| spec.window(next).contains(trade_time))
        }))
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
