//! Slack Web API client.
//!
//! This module wraps the three Web API methods the export needs:
//!
//! | Method | Purpose |
//! |--------|---------|
//! | `auth.test` | Validate the token before any export work |
//! | `groups.list` | Enumerate group channels (mpdm groups included) |
//! | `groups.history` | Fetch one page of a channel's history |
//!
//! Every response is Slack's `{ok, error?, ...}` envelope; an `ok: false`
//! answer maps to [`MpdumpError::Api`] with the method name and Slack's
//! error code.
//!
//! The export core never talks to [`SlackClient`] directly — it consumes
//! the [`HistorySource`] trait, which keeps the pagination and partitioning
//! logic testable against scripted stubs.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{MpdumpError, Result};
use crate::message::{Group, HistoryPage, Message};

/// The channel listing and paginated history feed the export consumes.
///
/// [`SlackClient`] is the production implementation; tests drive the
/// fetcher and driver with scripted in-memory sources instead.
pub trait HistorySource {
    /// Lists all group channels visible to the authenticated caller.
    fn list_groups(&self) -> Result<Vec<Group>>;

    /// Fetches one page of history for `channel`.
    ///
    /// The page holds at most `count` messages in strictly descending
    /// timestamp order. When `latest` is given, results are bounded to
    /// timestamps at or before it.
    fn fetch_page(&self, channel: &str, count: u32, latest: Option<&str>) -> Result<HistoryPage>;
}

/// Identity confirmed by `auth.test`.
#[derive(Debug, Clone, Default)]
pub struct AuthIdentity {
    /// Authenticated user name, if reported.
    pub user: Option<String>,
    /// Workspace name, if reported.
    pub team: Option<String>,
}

/// Blocking Slack Web API client.
///
/// The export pipeline is fully sequential — each pagination request's
/// cursor depends on the previous response — so a blocking client is the
/// natural fit; there is nothing to run concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use mpdump::api::SlackClient;
///
/// let client = SlackClient::new("xoxp-...")?;
/// let identity = client.auth_test()?;
/// println!("authenticated as {:?}", identity.user);
/// # Ok::<(), mpdump::MpdumpError>(())
/// ```
pub struct SlackClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    /// The production Web API endpoint.
    pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

    /// Creates a client for the production Slack endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, Self::DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL.
    ///
    /// Used by tests to point the client at a local mock server.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            token: token.into(),
            base_url: base_url.into(),
        })
    }

    /// Validates the token by calling `auth.test`.
    ///
    /// # Errors
    ///
    /// Returns [`MpdumpError::Api`] when Slack rejects the token and
    /// [`MpdumpError::Http`] on transport failure.
    pub fn auth_test(&self) -> Result<AuthIdentity> {
        let response: AuthTestResponse = self.call("auth.test", &[])?;
        if !response.ok {
            return Err(api_error("auth.test", response.error));
        }
        Ok(AuthIdentity {
            user: response.user,
            team: response.team,
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &'static str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;
        Ok(response.json()?)
    }
}

impl HistorySource for SlackClient {
    fn list_groups(&self) -> Result<Vec<Group>> {
        // Archived groups are listed too; eligibility is a name-prefix
        // decision made by the driver.
        let query = [("exclude_archived", "0".to_string())];
        let response: ListGroupsResponse = self.call("groups.list", &query)?;
        if !response.ok {
            return Err(api_error("groups.list", response.error));
        }
        Ok(response.groups)
    }

    fn fetch_page(&self, channel: &str, count: u32, latest: Option<&str>) -> Result<HistoryPage> {
        let mut query = vec![
            ("channel", channel.to_string()),
            ("count", count.to_string()),
        ];
        if let Some(latest) = latest {
            query.push(("latest", latest.to_string()));
        }

        let response: HistoryResponse = self.call("groups.history", &query)?;
        if !response.ok {
            return Err(api_error("groups.history", response.error));
        }
        Ok(HistoryPage::new(response.messages, response.has_more))
    }
}

fn api_error(method: &'static str, code: Option<String>) -> MpdumpError {
    MpdumpError::Api {
        method,
        code: code.unwrap_or_else(|| "unknown".to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct AuthTestResponse {
    ok: bool,
    error: Option<String>,
    user: Option<String>,
    team: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListGroupsResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    error: Option<String>,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_response_defaults() {
        // Slack omits messages/has_more on error envelopes.
        let raw = r#"{"ok": false, "error": "channel_not_found"}"#;
        let response: HistoryResponse = serde_json::from_str(raw).unwrap();
        assert!(!response.ok);
        assert!(response.messages.is_empty());
        assert!(!response.has_more);
    }

    #[test]
    fn test_api_error_uses_unknown_for_missing_code() {
        let err = api_error("groups.list", None);
        assert!(matches!(
            err,
            MpdumpError::Api { method: "groups.list", code } if code == "unknown"
        ));
    }
}
