//! tj-correlate
//!
//! Composes session windows and event matching into the queries the journal
//! views need: which trades happened in a session, which trades are tied to a
//! calendar event, which pin annotates an event.
//!
//! Pure functions over caller-supplied slices. Results borrow from the input.

mod types;

pub use types::{SessionAggregate, TradeRecord};

use chrono::NaiveDate;
use tracing::debug;

use tj_calendar::{SessionError, SessionTable};
use tj_events::{event_match_v1, event_match_v3, EconomicEvent, PinnedEventRecord};

/// Canonical members of `session`, or `UnknownSession`.
fn members(table: &SessionTable, session: &str) -> Result<Vec<String>, SessionError> {
    let m = table.mappings(session);
    if m.is_empty() {
        return Err(SessionError::UnknownSession {
            name: session.to_string(),
        });
    }
    Ok(m)
}

/// Did `trade` happen during `session`?
///
/// Uses the execution instant when the trade has a time of day. Otherwise
/// falls back to the session the trade was tagged with: the tag matches when
/// it shares a canonical session with `session` (so a `new-york` tag matches
/// `NY PM`). Untimed, untagged trades match nothing.
pub fn trade_in_session(
    table: &SessionTable,
    trade: &TradeRecord,
    session: &str,
) -> Result<bool, SessionError> {
    let wanted = members(table, session)?;
    if let Some(at) = trade.executed_at() {
        return table.contains(at, session);
    }
    Ok(trade.session.as_deref().is_some_and(|tag| {
        table
            .mappings(tag)
            .iter()
            .any(|canonical| wanted.contains(canonical))
    }))
}

/// Trades that belong to `session` on `date`.
///
/// Timed trades are placed by the session window for `date` (so an Asia
/// session includes the previous evening). Untimed trades must be dated
/// `date` and tagged with a matching session.
pub fn trades_in_session<'a>(
    table: &SessionTable,
    trades: &'a [TradeRecord],
    session: &str,
    date: NaiveDate,
) -> Result<Vec<&'a TradeRecord>, SessionError> {
    let window = table.time_range(session, date)?;
    let mut out = Vec::new();
    for trade in trades {
        let included = match trade.executed_at() {
            Some(at) => window.contains(at),
            None => trade.trade_date == date && trade_in_session(table, trade, session)?,
        };
        if included {
            out.push(trade);
        }
    }
    debug!(
        session,
        date = %date,
        matched = out.len(),
        total = trades.len(),
        "trades in session"
    );
    Ok(out)
}

/// Session aggregate keyed by the canonical label.
pub fn session_aggregate(
    table: &SessionTable,
    trades: &[TradeRecord],
    session: &str,
    date: NaiveDate,
) -> Result<SessionAggregate, SessionError> {
    let matched = trades_in_session(table, trades, session, date)?;
    Ok(SessionAggregate {
        session: table.normalize(session),
        date,
        trade_ids: matched.iter().map(|t| t.id.clone()).collect(),
    })
}

/// Calendar events released inside the session window on `date`.
pub fn events_in_session<'a>(
    table: &SessionTable,
    events: &'a [EconomicEvent],
    session: &str,
    date: NaiveDate,
) -> Result<Vec<&'a EconomicEvent>, SessionError> {
    let window = table.time_range(session, date)?;
    Ok(events
        .iter()
        .filter(|e| window.contains(e.time_utc))
        .collect())
}

/// Trades whose embedded event copies refer to `event`.
pub fn trades_for_event<'a>(
    trades: &'a [TradeRecord],
    event: &EconomicEvent,
) -> Vec<&'a TradeRecord> {
    let out: Vec<&TradeRecord> = trades
        .iter()
        .filter(|t| t.economic_events.iter().any(|te| event_match_v3(te, event)))
        .collect();
    debug!(event = %event.name, matched = out.len(), "trades for event");
    out
}

/// The pin annotating `event`, if any. First match wins.
pub fn pinned_for_event<'a>(
    pins: &'a [PinnedEventRecord],
    event: &EconomicEvent,
) -> Option<&'a PinnedEventRecord> {
    pins.iter().find(|p| event_match_v1(event, p))
}
