use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A session's active window on one reference date, in UTC.
///
/// Invariant: `start < end`. Half-open: `start` is inside, `end` is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SessionWindow {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// The smallest window covering both `self` and `other`.
    pub fn span(&self, other: &SessionWindow) -> SessionWindow {
        SessionWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Start and end rendered in `tz` (e.g. a region's exchange-local zone).
    pub fn in_zone<Tz: TimeZone>(&self, tz: &Tz) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start.with_timezone(tz), self.end.with_timezone(tz))
    }
}
