//! HTTP client wrapper for talking to the grammar checker.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;

/// User agent string identifying this linter.
const USER_AGENT: &str = concat!("cnxml-linter/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Arguments
/// * `timeout` - Upper bound for a whole request, including reading the body
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout and user agent.
pub fn create_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
