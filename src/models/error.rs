//! Errors returned by the tally.

/// Input rejected before any counting happens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TallyError {
    /// No matchUps were provided.
    MissingMatchUps,
    /// MatchUps do not describe a single round robin group.
    InvalidValues(String),
}

impl std::fmt::Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::MissingMatchUps => write!(f, "Missing matchUps"),
            TallyError::InvalidValues(reason) => write!(f, "Invalid values: {}", reason),
        }
    }
}

impl std::error::Error for TallyError {}
