//! Best scores kept in a hosted profile table behind a PostgREST-style API
//! (the REST surface Supabase exposes under `/rest/v1`).

use super::{beats, ScoreStore, StoreError, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 5;
const USER_AGENT: &str = "flappy-dart";

fn default_table() -> String {
    "profiles".to_string()
}

/// Connection details for the hosted table, read from settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Project URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Public (anon) API key sent as `apikey` and bearer token.
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    best_score: Option<u32>,
}

pub struct RemoteScoreStore {
    settings: RemoteSettings,
    agent: ureq::Agent,
}

impl RemoteScoreStore {
    pub fn new(settings: RemoteSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build();
        Self { settings, agent }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.table
        )
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.settings.api_key)
            .set("Authorization", &format!("Bearer {}", self.settings.api_key))
    }

    /// `None` when the user has no row; `Some(None)` when the row exists but
    /// has never recorded a score.
    fn fetch_row(&self, user: &UserId) -> Result<Option<Option<u32>>, StoreError> {
        let request = self
            .authorize(self.agent.get(&self.table_url()))
            .query("id", &format!("eq.{}", user))
            .query("select", "best_score");
        let response = request.call().map_err(http_error)?;
        let body = response.into_string()?;
        Ok(parse_rows(&body)?.first().map(|row| row.best_score))
    }

    /// Create the user's row. A conflict means another writer created it
    /// since we looked, so fall back to the conditional update.
    fn insert(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        let result = self
            .authorize(self.agent.post(&self.table_url()))
            .set("Prefer", "return=minimal")
            .send_json(serde_json::json!({
                "id": user.as_str(),
                "best_score": score,
                "updated_at": Utc::now().to_rfc3339(),
            }));
        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(409, _)) => {
                log::debug!("row for {} appeared concurrently, updating instead", user);
                self.update(user, score)
            }
            Err(e) => Err(http_error(e)),
        }
    }

    /// Raise the stored best. The filter is evaluated by the server, so a
    /// concurrent higher write is never overwritten by a lower one.
    fn update(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        self.authorize(self.agent.request("PATCH", &self.table_url()))
            .query("id", &format!("eq.{}", user))
            .query("or", &raise_filter(score))
            .set("Prefer", "return=minimal")
            .send_json(serde_json::json!({
                "best_score": score,
                "updated_at": Utc::now().to_rfc3339(),
            }))
            .map_err(http_error)?;
        Ok(())
    }
}

impl ScoreStore for RemoteScoreStore {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        match self.fetch_row(user)? {
            None => self.insert(user, score),
            Some(best) if beats(best, score) => self.update(user, score),
            Some(_) => Ok(()),
        }
    }

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        Ok(self.fetch_row(user)?.flatten())
    }
}

fn http_error(e: ureq::Error) -> StoreError {
    StoreError::Http(e.to_string())
}

/// Rows whose best is missing or strictly lower than `score`.
fn raise_filter(score: u32) -> String {
    format!("(best_score.is.null,best_score.lt.{})", score)
}

fn parse_rows(body: &str) -> Result<Vec<ProfileRow>, StoreError> {
    Ok(serde_json::from_str(body)?)
}
