//! Query normalization layer.
//!
//! Translates untrusted external parameters (HTTP query strings, MCP tool
//! arguments) into bounded, whitelisted data-access requests. The REST and
//! MCP surfaces both go through this module so the two stay behaviorally
//! identical.

mod filters;
mod pagination;
mod search;

pub use filters::{reject_unknown_params, FilterSet, ALLOWED_QUERY_PARAMS};
pub use pagination::{
    clamp_limit, clamp_offset, parse_loose_int, strict_validate, PaginationError, DEFAULT_LIMIT,
    MAX_LIMIT,
};
pub use search::{validate_search_term, SearchTermError};
