use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use tj_events::TradeEvent;

/// The slice of a journal trade the correlation logic reads.
///
/// `trade_date`/`trade_time` are the execution date and time in UTC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub trade_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_time: Option<NaiveTime>,
    /// Session label the user tagged the trade with (canonical or legacy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default)]
    pub economic_events: Vec<TradeEvent>,
}

impl TradeRecord {
    pub fn new<S: Into<String>>(id: S, trade_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            trade_date,
            trade_time: None,
            session: None,
            economic_events: Vec::new(),
        }
    }

    pub fn at(mut self, trade_time: NaiveTime) -> Self {
        self.trade_time = Some(trade_time);
        self
    }

    pub fn tagged<S: Into<String>>(mut self, session: S) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_event(mut self, event: TradeEvent) -> Self {
        self.economic_events.push(event);
        self
    }

    /// Execution instant, when the time of day is known.
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.trade_time
            .map(|t| self.trade_date.and_time(t).and_utc())
    }
}

/// Trades attributed to one session on one date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAggregate {
    pub session: String,
    pub date: NaiveDate,
    pub trade_ids: Vec<String>,
}

impl SessionAggregate {
    pub fn count(&self) -> usize {
        self.trade_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_journal_json() {
        let raw = r#"{
            "id": "t-1",
            "trade_date": "2024-06-15",
            "trade_time": "09:30:00",
            "session": "London",
            "economic_events": [
                {"name": "ECB Press Conference", "currency": "EUR", "impact": "High"}
            ]
        }"#;
        let t: TradeRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(
            t.executed_at().unwrap().to_rfc3339(),
            "2024-06-15T09:30:00+00:00"
        );
        assert_eq!(t.economic_events.len(), 1);
        assert_eq!(t.economic_events[0].time_utc, None);
    }

    #[test]
    fn no_time_means_no_instant() {
        let t = TradeRecord::new("t-2", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(t.executed_at(), None);
    }
}
