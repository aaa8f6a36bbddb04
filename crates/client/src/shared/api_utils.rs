//! API utilities for client-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Default backend base URL for local development
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Build a full API URL from a base URL and a path
///
/// Trailing slashes on the base are tolerated.
///
/// # Example
/// ```rust
/// use client::shared::api_utils::api_url;
/// let url = api_url("http://localhost:3000/", "/api/pilgrim");
/// assert_eq!(url, "http://localhost:3000/api/pilgrim");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_base_and_path() {
        assert_eq!(
            api_url("http://localhost:3000", "/api/pilgrim"),
            "http://localhost:3000/api/pilgrim"
        );
        assert_eq!(
            api_url("http://localhost:3000/", "/health"),
            "http://localhost:3000/health"
        );
    }
}
