use crate::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake stored as a String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - The stored value is not a
///   valid snowflake
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        let id = parse_u64_from_string("123456789012345678".to_string()).unwrap();
        assert_eq!(id, 123456789012345678);
    }

    #[test]
    fn fails_on_non_numeric_id() {
        let result = parse_u64_from_string("not-an-id".to_string());
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { ref value, .. })) if value == "not-an-id"
        ));
    }
}
