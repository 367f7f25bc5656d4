use super::ApiError;

pub fn validate_id(kind: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {kind} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;
    const MAX_LIMIT: u64 = crate::constants::limits::MAX_LIST_LIMIT;

    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {MAX_LIMIT}"
        )));
    }
    Ok(limit)
}

pub fn validate_slug_param(slug: &str) -> Result<&str, ApiError> {
    let trimmed = slug.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Slug cannot be empty"));
    }
    Ok(trimmed)
}

/// Parses an integer multipart text field.
pub fn parse_number_field<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Field '{name}' must be an integer, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("series", 1).is_ok());
        assert!(validate_id("series", 12345).is_ok());
        assert!(validate_id("season", 0).is_err());
        assert!(validate_id("episode", -1).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(500).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }

    #[test]
    fn test_validate_slug_param() {
        assert_eq!(validate_slug_param(" dark ").unwrap(), "dark");
        assert!(validate_slug_param("   ").is_err());
    }

    #[test]
    fn test_parse_number_field() {
        assert_eq!(parse_number_field::<i32>("number", " 3 ").unwrap(), 3);
        assert_eq!(parse_number_field::<i64>("duration_secs", "3600").unwrap(), 3600);
        assert!(parse_number_field::<i32>("number", "three").is_err());
    }
}
