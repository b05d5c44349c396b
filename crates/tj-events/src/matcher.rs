//! Same-event decisions across differently sourced records.

use tracing::trace;

use crate::rules::{base_event_name, clean_event_name_for_pinning};
use crate::types::{EconomicEvent, PinnedEventRecord, TradeEvent};

/// A present, non-blank ID.
fn usable_id(id: &Option<String>) -> Option<&str> {
    id.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Does `pinned` annotate `event`?
///
/// When both sides carry an ID the IDs decide alone: recurring releases share
/// a cleaned name, so a differing ID is a different event. Without IDs on both
/// sides, the cleaned event name must equal the stored pin name and currency
/// and impact must agree.
pub fn event_match_v1(event: &EconomicEvent, pinned: &PinnedEventRecord) -> bool {
    if let (Some(a), Some(b)) = (usable_id(&event.id), usable_id(&pinned.event_id)) {
        trace!(event_id = a, pinned_id = b, "matching by id");
        return a == b;
    }

    event.currency == pinned.currency
        && event.impact == pinned.impact
        && clean_event_name_for_pinning(&event.name) == pinned.event
}

/// Does a trade's embedded event copy refer to `calendar_event`?
///
/// Trade copies rarely carry a stable ID, so only the base name (every known
/// date-suffix convention removed on both sides), currency and impact count.
pub fn event_match_v3(trade_event: &TradeEvent, calendar_event: &EconomicEvent) -> bool {
    trade_event.currency == calendar_event.currency
        && trade_event.impact == calendar_event.impact
        && base_event_name(&trade_event.name) == base_event_name(&calendar_event.name)
}
