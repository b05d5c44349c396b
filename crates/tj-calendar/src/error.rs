use std::fmt;

/// Errors surfaced by session-window lookups.
///
/// An unknown session is a caller or configuration bug; it is never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The label is neither a canonical session nor a known alias.
    UnknownSession { name: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownSession { name } => {
                write!(f, "unknown session '{name}'")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors produced when building a [`crate::SessionTable`] from raw specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A session name was empty after trimming.
    EmptySessionName,
    /// Two sessions share the same canonical name.
    DuplicateSession(String),
    /// An hour bound is outside `0..24`.
    HourOutOfRange { session: String, hour: u32 },
    /// Start and end hour are equal, which leaves no window.
    EmptyWindow { session: String, hour: u32 },
    /// Two aliases collide once lowercased.
    DuplicateAlias(String),
    /// An alias maps to nothing.
    EmptyAlias(String),
    /// An alias targets a session that is not in the table.
    UnknownAliasTarget { alias: String, target: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::EmptySessionName => write!(f, "session name must not be empty"),
            TableError::DuplicateSession(name) => {
                write!(f, "session '{name}' is defined more than once")
            }
            TableError::HourOutOfRange { session, hour } => {
                write!(f, "session '{session}': hour {hour} is outside 0..24")
            }
            TableError::EmptyWindow { session, hour } => {
                write!(
                    f,
                    "session '{session}': start and end hour are both {hour} (empty window)"
                )
            }
            TableError::DuplicateAlias(alias) => {
                write!(f, "alias '{alias}' is defined more than once (aliases ignore case)")
            }
            TableError::EmptyAlias(alias) => {
                write!(f, "alias '{alias}' does not map to any session")
            }
            TableError::UnknownAliasTarget { alias, target } => {
                write!(f, "alias '{alias}' targets unknown session '{target}'")
            }
        }
    }
}

impl std::error::Error for TableError {}
