//! tj-events
//!
//! Economic-event name cleaning and same-event matching.
//!
//! Pure predicates: no IO, no errors. Missing IDs select the name-based
//! comparison instead of failing.

mod matcher;
mod rules;
mod types;

pub use matcher::{event_match_v1, event_match_v3};
pub use rules::{
    base_event_name, base_name_rule_set, clean_event_name_for_pinning, pinning_rule_set,
    CleaningRule, RuleSet,
};
pub use types::{CurrencyCode, EconomicEvent, Impact, PinnedEventRecord, TradeEvent};
