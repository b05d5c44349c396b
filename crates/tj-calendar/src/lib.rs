//! tj-calendar
//!
//! Trading-session windows with EU/US daylight-saving adjustment.
//!
//! Pure deterministic logic. No IO, no wall-clock. Callers supply the
//! reference date or trade instant.
//!
//! The free functions below use the built-in session table
//! ([`SessionTable::builtin`]); construct a [`SessionTable`] for configured
//! sessions.

mod dst;
mod error;
mod table;
mod window;

pub use dst::{is_daylight_saving_time, Region};
pub use error::{SessionError, TableError};
pub use table::{SessionSpec, SessionTable, ASIA, LONDON, NY_AM, NY_PM};
pub use window::SessionWindow;

use chrono::{DateTime, NaiveDate, Utc};

/// UTC window of a session on `reference_date`.
pub fn session_time_range(
    session_name: &str,
    reference_date: NaiveDate,
) -> Result<SessionWindow, SessionError> {
    SessionTable::builtin().time_range(session_name, reference_date)
}

/// Whether a trade executed at `trade_time` falls within the session.
pub fn is_trade_in_session(
    trade_time: DateTime<Utc>,
    session_name: &str,
) -> Result<bool, SessionError> {
    SessionTable::builtin().contains(trade_time, session_name)
}

/// Canonical label for a legacy or alternate session spelling.
pub fn normalize_session_name(name: &str) -> String {
    SessionTable::builtin().normalize(name)
}

/// Canonical sessions a (possibly legacy) name covers.
pub fn session_mappings(name: &str) -> Vec<String> {
    SessionTable::builtin().mappings(name)
}
