//! Configuration constants and validation functions for the linter.

use url::Url;

use crate::error::{LintError, Result};

/// Default base URL of the LanguageTool server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8011";

/// Path of the check endpoint, relative to the server URL.
pub const CHECK_PATH: &str = "/v2/check";

/// Language sent with every check request.
pub const LANGUAGE: &str = "en";

/// HTTP timeout in seconds.
///
/// A hung checker aborts the run after this long instead of stalling it.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Extension of the documents picked up while walking a directory.
pub const DEFAULT_EXTENSION: &str = "cnxml";

/// Header row of the CSV output, in column order.
pub const CSV_COLUMNS: [&str; 7] = [
    "page title",
    "type",
    "message",
    "text",
    "rule",
    "file",
    "node path",
];

/// Validate the grammar checker base URL.
///
/// # Examples
/// ```
/// use cnxml_linter::config::validate_server_url;
///
/// assert!(validate_server_url("http://localhost:8011").is_ok());
/// assert!(validate_server_url("localhost:8011").is_err());
/// ```
pub fn validate_server_url(server: &str) -> Result<Url> {
    let url = Url::parse(server).map_err(|_| LintError::InvalidServerUrl(server.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(LintError::InvalidServerUrl(server.to_string()));
    }

    Ok(url)
}

/// Validate a file extension filter.
///
/// Accepts the bare extension, so `cnxml` but not `.cnxml` or `a/b`.
pub fn validate_extension(extension: &str) -> Result<()> {
    let valid = !extension.is_empty()
        && !extension
            .chars()
            .any(|c| c == '.' || c == '/' || c == '\\' || c.is_whitespace());

    if valid {
        Ok(())
    } else {
        Err(LintError::InvalidExtension(extension.to_string()))
    }
}

/// Validate the HTTP timeout in seconds.
///
/// Must be at least one second.
pub fn validate_timeout(timeout: u64) -> Result<()> {
    if timeout == 0 {
        return Err(LintError::InvalidTimeout(timeout));
    }
    Ok(())
}

/// Build the check endpoint URL for a server base URL.
///
/// A trailing slash on the base URL is ignored, so both
/// `http://host:8011` and `http://host:8011/` give `http://host:8011/v2/check`.
pub fn check_url(server: &Url) -> String {
    format!("{}{CHECK_PATH}", server.as_str().trim_end_matches('/'))
}
