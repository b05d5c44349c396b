use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use tj_calendar::{is_daylight_saving_time, Region};
use tj_config::LoadedConfig;
use tj_correlate::{session_aggregate, TradeRecord};
use tracing::info;

use super::{load_json_file, print_json};

pub fn dst(date: NaiveDate, region: Region) -> Result<()> {
    print_json(&json!({
        "date": date,
        "region": region,
        "dst": is_daylight_saving_time(date, region),
    }))
}

pub fn window(loaded: &LoadedConfig, session: &str, date: NaiveDate, local: bool) -> Result<()> {
    let table = loaded.session_table()?;
    let w = table.time_range(session, date)?;
    let canonical = table.normalize(session);

    let mut out = json!({
        "session": canonical,
        "date": date,
        "start": w.start,
        "end": w.end,
    });

    if local {
        if let Some(spec) = table.get(&canonical) {
            let zone = spec.region.reference_zone();
            let (start, end) = w.in_zone(&zone);
            out["zone"] = json!(zone.name());
            out["local_start"] = json!(start.to_rfc3339());
            out["local_end"] = json!(end.to_rfc3339());
        }
    }

    print_json(&out)
}

pub fn in_session(loaded: &LoadedConfig, at: DateTime<Utc>, session: &str) -> Result<()> {
    let table = loaded.session_table()?;
    let inside = table.contains(at, session)?;
    print_json(&json!({
        "at": at,
        "session": table.normalize(session),
        "in_session": inside,
    }))
}

pub fn normalize(loaded: &LoadedConfig, name: &str) -> Result<()> {
    let table = loaded.session_table()?;
    print_json(&json!({
        "input": name,
        "normalized": table.normalize(name),
        "mappings": table.mappings(name),
    }))
}

pub fn aggregate(
    loaded: &LoadedConfig,
    trades_path: &str,
    session: &str,
    date: NaiveDate,
) -> Result<()> {
    let table = loaded.session_table()?;
    let trades: Vec<TradeRecord> = load_json_file(trades_path)?;
    let agg = session_aggregate(&table, &trades, session, date)?;
    info!(
        session = %agg.session,
        date = %date,
        count = agg.count(),
        config_hash = %loaded.config_hash,
        "session aggregate"
    );
    print_json(&agg)
}
