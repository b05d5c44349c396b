//! Session aggregation scenarios.
//!
//! Summer reference day 2024-06-15 (EU + US DST):
//!   London 07:00–12:00 UTC, NY AM 12:00–17:00, NY PM 17:00–21:00,
//!   Asia 2024-06-14 22:00 – 2024-06-15 07:00.

use chrono::{NaiveDate, NaiveTime};
use tj_calendar::{SessionError, SessionTable};
use tj_correlate::*;
use tj_events::{CurrencyCode, EconomicEvent, Impact};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn table() -> &'static SessionTable {
    SessionTable::builtin()
}

/// Trade at 09:30 UTC tagged London, EUR/High event at 08:00 UTC:
/// the trade is in the summer London window and lands in the aggregate.
#[test]
fn end_to_end_london_trade_is_aggregated() {
    let trade = TradeRecord::new("t-london", d(2024, 6, 15))
        .at(hm(9, 30))
        .tagged("London");
    let event = EconomicEvent::new(
        "German ZEW Economic Sentiment",
        CurrencyCode::new("EUR"),
        Impact::High,
        "2024-06-15T08:00:00Z".parse().unwrap(),
    );

    assert!(trade_in_session(table(), &trade, "London").unwrap());

    let trades = vec![trade];
    let agg = session_aggregate(table(), &trades, "London", d(2024, 6, 15)).unwrap();
    assert_eq!(agg.session, "London");
    assert_eq!(agg.trade_ids, vec!["t-london".to_string()]);
    assert_eq!(agg.count(), 1);

    let events = vec![event];
    let during = events_in_session(table(), &events, "London", d(2024, 6, 15)).unwrap();
    assert_eq!(during.len(), 1);
}

#[test]
fn timed_trades_are_placed_by_window_not_tag() {
    // Tagged London but executed in the NY AM window.
    let trade = TradeRecord::new("t-1", d(2024, 6, 15))
        .at(hm(13, 0))
        .tagged("London");
    assert!(!trade_in_session(table(), &trade, "London").unwrap());
    assert!(trade_in_session(table(), &trade, "NY AM").unwrap());
    assert!(trade_in_session(table(), &trade, "new-york").unwrap());
}

#[test]
fn untimed_trades_fall_back_to_their_tag() {
    let tagged_ny = TradeRecord::new("t-ny", d(2024, 6, 15)).tagged("new-york");
    assert!(trade_in_session(table(), &tagged_ny, "NY PM").unwrap());
    assert!(trade_in_session(table(), &tagged_ny, "NY AM").unwrap());
    assert!(!trade_in_session(table(), &tagged_ny, "London").unwrap());

    let tagged_tokyo = TradeRecord::new("t-asia", d(2024, 6, 15)).tagged("tokyo");
    assert!(trade_in_session(table(), &tagged_tokyo, "Asia").unwrap());
    assert!(trade_in_session(table(), &tagged_tokyo, "sydney").unwrap());

    let untagged = TradeRecord::new("t-none", d(2024, 6, 15));
    assert!(!trade_in_session(table(), &untagged, "London").unwrap());

    let unknown_tag = TradeRecord::new("t-x", d(2024, 6, 15)).tagged("Frankfurt");
    assert!(!trade_in_session(table(), &unknown_tag, "London").unwrap());
}

#[test]
fn asia_aggregate_includes_previous_evening() {
    let trades = vec![
        TradeRecord::new("eve", d(2024, 6, 14)).at(hm(23, 15)),
        TradeRecord::new("dawn", d(2024, 6, 15)).at(hm(5, 0)),
        TradeRecord::new("london", d(2024, 6, 15)).at(hm(8, 0)),
        TradeRecord::new("prev-asia", d(2024, 6, 14)).at(hm(3, 0)),
    ];
    let agg = session_aggregate(table(), &trades, "Asia", d(2024, 6, 15)).unwrap();
    assert_eq!(agg.trade_ids, vec!["eve".to_string(), "dawn".to_string()]);
}

#[test]
fn untimed_trades_must_be_on_the_date() {
    let trades = vec![
        TradeRecord::new("today", d(2024, 6, 15)).tagged("london"),
        TradeRecord::new("yesterday", d(2024, 6, 14)).tagged("London"),
    ];
    let agg = session_aggregate(table(), &trades, "london", d(2024, 6, 15)).unwrap();
    assert_eq!(agg.session, "London");
    assert_eq!(agg.trade_ids, vec!["today".to_string()]);
}

#[test]
fn unknown_session_propagates() {
    let trades = vec![TradeRecord::new("t", d(2024, 6, 15)).at(hm(9, 0))];
    let err = session_aggregate(table(), &trades, "Frankfurt", d(2024, 6, 15)).unwrap_err();
    assert_eq!(
        err,
        SessionError::UnknownSession {
            name: "Frankfurt".to_string()
        }
    );
    assert!(trade_in_session(table(), &trades[0], "Frankfurt").is_err());
}
