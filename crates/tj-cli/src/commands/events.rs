use anyhow::Result;
use serde_json::json;
use tj_correlate::{pinned_for_event, trades_for_event, TradeRecord};
use tj_events::{base_event_name, clean_event_name_for_pinning, EconomicEvent, PinnedEventRecord};

use super::{load_json_file, print_json};

pub fn clean(name: &str) -> Result<()> {
    print_json(&json!({
        "input": name,
        "pinned": clean_event_name_for_pinning(name),
        "base": base_event_name(name),
    }))
}

pub fn match_trades(trades_path: &str, event_path: &str, pins_path: Option<&str>) -> Result<()> {
    let trades: Vec<TradeRecord> = load_json_file(trades_path)?;
    let event: EconomicEvent = load_json_file(event_path)?;
    let pins: Vec<PinnedEventRecord> = match pins_path {
        Some(p) => load_json_file(p)?,
        None => Vec::new(),
    };

    let matched: Vec<&str> = trades_for_event(&trades, &event)
        .iter()
        .map(|t| t.id.as_str())
        .collect();

    print_json(&json!({
        "event": event.name,
        "trade_ids": matched,
        "pinned": pinned_for_event(&pins, &event),
    }))
}
