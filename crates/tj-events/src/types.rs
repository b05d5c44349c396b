use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rules::clean_event_name_for_pinning;

/// Expected market effect of an economic release. Closed vocabulary,
/// compared case-sensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Impact::High),
            "Medium" => Ok(Impact::Medium),
            "Low" => Ok(Impact::Low),
            other => Err(format!(
                "invalid impact '{other}'. expected one of: High | Medium | Low"
            )),
        }
    }
}

/// ISO-4217 style currency code (`USD`, `EUR`, ...). Compared verbatim.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A release as delivered by the economic-calendar data source. Read-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub currency: CurrencyCode,
    pub impact: Impact,
    pub time_utc: DateTime<Utc>,
}

impl EconomicEvent {
    pub fn new<S: Into<String>>(
        name: S,
        currency: CurrencyCode,
        impact: Impact,
        time_utc: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            currency,
            impact,
            time_utc,
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A calendar annotation pinning an economic event, optionally with notes.
///
/// `event` holds the cleaned event name (see
/// [`clean_event_name_for_pinning`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedEventRecord {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub currency: CurrencyCode,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PinnedEventRecord {
    /// Pin `event`: stores the cleaned name and carries the event ID over.
    pub fn pin(event: &EconomicEvent, notes: Option<String>) -> Self {
        Self {
            event: clean_event_name_for_pinning(&event.name),
            event_id: event.id.clone(),
            currency: event.currency.clone(),
            impact: event.impact,
            notes,
        }
    }
}

/// A trade's embedded copy of an economic event. Usually carries no stable ID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    pub name: String,
    pub currency: CurrencyCode,
    pub impact: Impact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_utc: Option<DateTime<Utc>>,
}

impl From<&EconomicEvent> for TradeEvent {
    fn from(e: &EconomicEvent) -> Self {
        Self {
            name: e.name.clone(),
            currency: e.currency.clone(),
            impact: e.impact,
            time_utc: Some(e.time_utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_is_case_sensitive() {
        assert_eq!("High".parse::<Impact>(), Ok(Impact::High));
        assert!("high".parse::<Impact>().is_err());
        assert!(serde_json::from_str::<Impact>("\"HIGH\"").is_err());
    }

    #[test]
    fn economic_event_reads_camel_case_json() {
        let raw = r#"{
            "name": "Non-Farm Employment Change",
            "currency": "USD",
            "impact": "High",
            "timeUtc": "2024-06-07T12:30:00Z"
        }"#;
        let e: EconomicEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(e.id, None);
        assert_eq!(e.currency.as_str(), "USD");
        assert_eq!(e.impact, Impact::High);
        assert_eq!(e.time_utc.to_rfc3339(), "2024-06-07T12:30:00+00:00");
    }

    #[test]
    fn pin_stores_cleaned_name_and_id() {
        let e = EconomicEvent::new(
            "Initial Jobless Claims Oct25",
            CurrencyCode::new("USD"),
            Impact::Medium,
            "2024-10-24T12:30:00Z".parse().unwrap(),
        )
        .with_id("evt-42");
        let p = PinnedEventRecord::pin(&e, Some("watch revisions".to_string()));
        assert_eq!(p.event, "Initial Jobless Claims");
        assert_eq!(p.event_id.as_deref(), Some("evt-42"));
        assert_eq!(p.notes.as_deref(), Some("watch revisions"));

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["eventId"], "evt-42");
    }
}
