//! Pagination normalization.
//!
//! Two policies coexist at different trust levels. The clamp policy silently
//! bounds whatever it is given and is applied on every listing/search path.
//! The strict policy rejects malformed input with a diagnostic message and
//! runs ahead of the clamp on the primary REST listing route only; MCP tool
//! calls get best-effort clamping so malformed agent arguments degrade
//! instead of failing hard.

use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Limit must be a positive integer")]
    LimitNotPositive,
    #[error("Limit cannot exceed 1000")]
    LimitTooLarge,
    #[error("Offset must be a non-negative integer")]
    OffsetInvalid,
}

/// Clamp policy for limits: missing, unparseable, or zero input falls back to
/// the default; values above the ceiling are clamped down. Negative values
/// pass through; the strict policy catches them where it is stacked on top.
pub fn clamp_limit(raw: Option<i64>) -> i64 {
    match raw {
        None | Some(0) => DEFAULT_LIMIT,
        Some(value) => value.min(MAX_LIMIT),
    }
}

/// Clamp policy for offsets: missing or unparseable input falls back to zero.
pub fn clamp_offset(raw: Option<i64>) -> i64 {
    raw.unwrap_or(0)
}

/// Best-effort integer extraction from MCP tool arguments, which may arrive
/// as JSON numbers or numeric strings depending on the client.
pub fn parse_loose_int(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Strict validation policy: applied ahead of the clamp on the primary
/// listing route. Absent parameters are fine; present ones must be
/// well-formed integers within range.
pub fn strict_validate(
    limit: Option<&str>,
    offset: Option<&str>,
) -> Result<(), PaginationError> {
    if let Some(raw) = limit {
        let parsed: i64 = raw.parse().map_err(|_| PaginationError::LimitNotPositive)?;
        if parsed < 1 {
            return Err(PaginationError::LimitNotPositive);
        }
        if parsed > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge);
        }
    }

    if let Some(raw) = offset {
        let parsed: i64 = raw.parse().map_err(|_| PaginationError::OffsetInvalid)?;
        if parsed < 0 {
            return Err(PaginationError::OffsetInvalid);
        }
    }

    Ok(())
}
