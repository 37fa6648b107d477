//! Time parsing for marker and segment input

use crate::domain::errors::DomainError;

/// Parser for whole-second time specifications
pub struct TimeParser;

impl TimeParser {
    /// Parse `SS`, `M:SS` or `H:MM:SS` into whole seconds.
    ///
    /// Only the leading field may exceed 59.
    pub fn parse_seconds(time_str: &str) -> Result<u64, DomainError> {
        let time_str = time_str.trim();
        let invalid = || DomainError::InvalidTimeFormat(time_str.to_string());

        let parts: Vec<&str> = time_str.split(':').collect();
        if parts.len() > 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(invalid());
        }

        let mut fields = Vec::with_capacity(parts.len());
        for part in &parts {
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            fields.push(part.parse::<u64>().map_err(|_| invalid())?);
        }

        if fields.iter().skip(1).any(|&field| field >= 60) {
            return Err(invalid());
        }

        fields
            .iter()
            .try_fold(0u64, |total, &field| total.checked_mul(60)?.checked_add(field))
            .ok_or_else(invalid)
    }

    /// Parse a `START-END` range, each side in any form accepted by
    /// [`TimeParser::parse_seconds`]. Ordering is not checked here.
    pub fn parse_range(range_str: &str) -> Result<(u64, u64), DomainError> {
        let (start, end) = range_str
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidTimeFormat(range_str.to_string()))?;
        Ok((Self::parse_seconds(start)?, Self::parse_seconds(end)?))
    }
}
