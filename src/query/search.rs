//! Search term validation for the REST text-search route.
//!
//! The MCP surface deliberately skips these bounds and only requires a
//! non-empty query, so agent-generated input degrades gracefully.

use thiserror::Error;

const MIN_TRIMMED_LENGTH: usize = 2;
const MAX_LENGTH: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchTermError {
    #[error("Search term \"q\" is required")]
    Missing,
    #[error("Search query must be at least 2 characters")]
    TooShort,
    #[error("Search query cannot exceed 200 characters")]
    TooLong,
}

pub fn validate_search_term(term: Option<&str>) -> Result<&str, SearchTermError> {
    let term = match term {
        Some(t) if !t.is_empty() => t,
        _ => return Err(SearchTermError::Missing),
    };

    if term.trim().chars().count() < MIN_TRIMMED_LENGTH {
        return Err(SearchTermError::TooShort);
    }
    if term.chars().count() > MAX_LENGTH {
        return Err(SearchTermError::TooLong);
    }

    Ok(term)
}
