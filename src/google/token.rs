use crate::config::Config;
use crate::error::{token_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Manages the Google OAuth token set, backed by a JSON file on disk.
///
/// The file is produced once by the `get_google_token` binary; after that the
/// manager serves access tokens from an in-memory cache and refreshes them
/// through the OAuth endpoint when they expire.
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    token_path: PathBuf,
    client: Client,
    cached: Arc<RwLock<Option<Value>>>,
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            token_path: token_path.into(),
            client: Client::new(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a valid access token, refreshing the token set if needed
    pub async fn access_token(&self) -> AppResult<String> {
        let token = self.get_token().await?;
        token
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| token_error("No access token available"))
    }

    /// Get the full token set, either from cache, disk, or a refresh call
    pub async fn get_token(&self) -> AppResult<Value> {
        let cached = self.cached.read().await.clone();
        let token = match cached {
            Some(token) => token,
            None => {
                let content = tokio::fs::read_to_string(&self.token_path)
                    .await
                    .map_err(|e| {
                        token_error(&format!(
                            "Failed to read token file {}: {}. Run the get_google_token binary first.",
                            self.token_path.display(),
                            e
                        ))
                    })?;
                serde_json::from_str(&content)
                    .map_err(|e| token_error(&format!("Failed to parse token JSON: {}", e)))?
            }
        };

        if let Some(expiry) = token.get("expires_at").and_then(|v| v.as_i64()) {
            let now = Utc::now().timestamp();
            if expiry > now {
                *self.cached.write().await = Some(token.clone());
                return Ok(token);
            }
            return self.refresh_token(&token).await;
        }

        Err(token_error(
            "Token file has no 'expires_at' field; re-run the get_google_token binary",
        ))
    }

    /// Refresh an expired token and persist the result
    async fn refresh_token(&self, token: &Value) -> AppResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| token_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| token_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(token_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response
            .json()
            .await
            .map_err(|e| token_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = new_token
            .get("access_token")
            .cloned()
            .ok_or_else(|| token_error("Token response missing 'access_token' field"))?;

        // Keep the original refresh token; Google only issues it on first consent
        let mut token_data = serde_json::Map::new();
        token_data.insert("access_token".to_string(), access_token);
        token_data.insert("refresh_token".to_string(), json!(refresh_token));

        let expires_in = new_token
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);
        token_data.insert(
            "expires_at".to_string(),
            json!(Utc::now().timestamp() + expires_in),
        );

        let token_json = Value::Object(token_data);
        self.store_token(&token_json).await?;
        info!("Refreshed Google OAuth access token");

        Ok(token_json)
    }

    /// Write a token set to disk and the in-memory cache
    pub async fn store_token(&self, token_json: &Value) -> AppResult<()> {
        if let Some(parent) = self.token_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.token_path, token_json.to_string()).await?;
        *self.cached.write().await = Some(token_json.clone());
        Ok(())
    }
}
