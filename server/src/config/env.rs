//! Environment variable helpers
//!
//! `.env` loading itself happens once at process start via `dotenvy::dotenv()`
//! in the binaries; these helpers read the resulting process environment.

/// Get an environment variable with a default value
///
/// # Example
/// ```rust,ignore
/// let port: u16 = env("SERVER_PORT", 8080);
/// let host = env("SERVER_HOST", "127.0.0.1".to_string());
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
