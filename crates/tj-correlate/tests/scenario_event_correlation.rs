//! Trades and pins correlated with calendar events.

use chrono::NaiveDate;
use tj_correlate::*;
use tj_events::{CurrencyCode, EconomicEvent, Impact, PinnedEventRecord, TradeEvent};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn event(name: &str, currency: &str, impact: Impact) -> EconomicEvent {
    EconomicEvent::new(
        name,
        CurrencyCode::new(currency),
        impact,
        "2024-10-24T12:30:00Z".parse().unwrap(),
    )
}

fn copy(name: &str, currency: &str, impact: Impact) -> TradeEvent {
    TradeEvent {
        name: name.to_string(),
        currency: CurrencyCode::new(currency),
        impact,
        time_utc: None,
    }
}

#[test]
fn trades_tied_to_an_event_across_suffix_conventions() {
    let claims = event("Initial Jobless Claims Oct 24", "USD", Impact::Medium);
    let trades = vec![
        TradeRecord::new("a", d(2024, 10, 24))
            .with_event(copy("Initial Jobless Claims Oct24", "USD", Impact::Medium)),
        TradeRecord::new("b", d(2024, 10, 24))
            .with_event(copy("GDP q/q", "USD", Impact::High))
            .with_event(copy("Initial Jobless Claims", "USD", Impact::Medium)),
        TradeRecord::new("c", d(2024, 10, 24))
            .with_event(copy("Initial Jobless Claims", "USD", Impact::High)),
        TradeRecord::new("d", d(2024, 10, 24)),
    ];

    let ids: Vec<&str> = trades_for_event(&trades, &claims)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn pinned_record_found_by_id_or_name() {
    let nfp = event("Non-Farm Employment Change (Oct)", "USD", Impact::High).with_id("nfp-oct");
    let pins = vec![
        PinnedEventRecord::pin(
            &event("CPI m/m", "USD", Impact::High).with_id("cpi-oct"),
            None,
        ),
        PinnedEventRecord::pin(&nfp, Some("size down".to_string())),
    ];

    let found = pinned_for_event(&pins, &nfp).unwrap();
    assert_eq!(found.notes.as_deref(), Some("size down"));
    assert_eq!(found.event, "Non-Farm Employment Change");

    // Same release without an ID still finds the pin via name/currency/impact.
    let nfp_no_id = event("Non-Farm Employment Change (Oct)", "USD", Impact::High);
    assert!(pinned_for_event(&pins, &nfp_no_id).is_some());

    // Next month's release carries its own ID and does not match.
    let nfp_nov = event("Non-Farm Employment Change (Nov)", "USD", Impact::High).with_id("nfp-nov");
    assert!(pinned_for_event(&pins, &nfp_nov).is_none());
}
