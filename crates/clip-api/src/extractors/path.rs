//! Path parameter helpers
//!
//! Snowflake IDs arrive as strings; parse failures become 400s naming the
//! offending parameter.

use clip_core::Snowflake;

use crate::response::ApiError;

/// Parse a Snowflake path parameter
pub fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse::<Snowflake>()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12345", "video_id").unwrap(), Snowflake::new(12345));
        assert!(parse_id("not-a-number", "video_id").is_err());
    }
}
