//! Grammar checker interface and the LanguageTool HTTP implementation.

use reqwest::blocking::Client;
use serde::Deserialize;
use url::form_urlencoded;
use url::Url;

use crate::config::{check_url, LANGUAGE};
use crate::error::{LintError, Result};
use crate::profile::SuppressionSet;

/// A problem reported by the grammar checker.
///
/// `offset` and `length` count UTF-16 code units of the submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarMatch {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    pub rule: MatchRule,
}

/// The rule behind a [`GrammarMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchRule {
    pub id: String,
    #[serde(rename = "issueType", default)]
    pub issue_type: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<GrammarMatch>,
}

/// Trait for grammar checkers, enabling in-memory checkers in tests.
pub trait GrammarChecker {
    /// Check `text`, ignoring the rules in `disabled_rules`.
    fn check(&self, text: &str, disabled_rules: &SuppressionSet) -> Result<Vec<GrammarMatch>>;
}

/// Client for the `/v2/check` endpoint of a LanguageTool server.
pub struct LanguageToolClient {
    http: Client,
    url: String,
}

impl LanguageToolClient {
    /// Create a client for the server at `server`.
    #[must_use]
    pub fn new(http: Client, server: &Url) -> Self {
        Self {
            http,
            url: check_url(server),
        }
    }

    /// URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Build the form-encoded body of a check request.
///
/// `disabledRules` is left out when nothing is suppressed.
///
/// # Examples
/// ```
/// use cnxml_linter::checker::encode_check_form;
/// use cnxml_linter::profile::SuppressionSet;
///
/// let rules: SuppressionSet = ["B_RULE".to_string(), "A_RULE".to_string()].into();
/// assert_eq!(
///     encode_check_form("Hi there", &rules),
///     "language=en&text=Hi+there&disabledRules=A_RULE%2CB_RULE"
/// );
/// ```
#[must_use]
pub fn encode_check_form(text: &str, disabled_rules: &SuppressionSet) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    form.append_pair("language", LANGUAGE);
    form.append_pair("text", text);

    if !disabled_rules.is_empty() {
        let joined = disabled_rules
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        form.append_pair("disabledRules", &joined);
    }

    form.finish()
}

/// Parse the JSON body of a check response.
pub fn parse_check_response(body: &str) -> Result<Vec<GrammarMatch>> {
    let response: CheckResponse = serde_json::from_str(body)?;
    Ok(response.matches)
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str, disabled_rules: &SuppressionSet) -> Result<Vec<GrammarMatch>> {
        tracing::debug!(
            chars = text.chars().count(),
            disabled = disabled_rules.len(),
            "Submitting text to grammar checker"
        );

        let response = self
            .http
            .post(&self.url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(encode_check_form(text, disabled_rules))
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(LintError::CheckerStatus { status, body });
        }

        parse_check_response(&body)
    }
}
