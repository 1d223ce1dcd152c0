use classmate::config::Config;
use classmate::error::{other_error, AppResult};
use classmate::google::TokenManager;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;

const REDIRECT_URI: &str = "http://localhost:8080";

const SCOPES: &str = "https://www.googleapis.com/auth/classroom.courses.readonly \
https://www.googleapis.com/auth/classroom.coursework.me.readonly \
https://www.googleapis.com/auth/classroom.student-submissions.me.readonly \
https://www.googleapis.com/auth/calendar.events";

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load()?;
    let token_path = config.google_token_path.clone();
    let client_id = config.google_client_id.clone();
    let client_secret = config.google_client_secret.clone();
    let config = Arc::new(RwLock::new(config));

    let token_manager = TokenManager::new(config, token_path);

    // Generate random state for security
    let state = uuid::Uuid::new_v4().to_string();

    // Construct authorization URL
    let auth_url = format!(
        "https://accounts.google.com/o/oauth2/v2/auth?\
        client_id={}&\
        redirect_uri={}&\
        response_type=code&\
        access_type=offline&\
        prompt=consent&\
        scope={}&\
        state={}",
        client_id,
        REDIRECT_URI,
        SCOPES.replace(' ', "%20"),
        state
    );

    // Open browser for authorization
    println!("Opening browser for Google authorization...");
    webbrowser::open(&auth_url)?;

    // Start local server to receive the callback
    let server = tiny_http::Server::http("0.0.0.0:8080")
        .map_err(|e| other_error(&format!("Failed to start callback server: {}", e)))?;
    println!("Waiting for authorization callback...");

    // Handle the callback
    let request = server
        .recv()
        .map_err(|e| other_error(&format!("Failed to receive callback: {}", e)))?;
    let url = request.url().to_string();

    // Parse the authorization code from the URL
    let code = url
        .split("code=")
        .nth(1)
        .and_then(|s| s.split('&').next())
        .ok_or_else(|| other_error("No authorization code found in callback"))?;

    // Exchange code for tokens
    let client = reqwest::Client::new();
    let response = client
        .post("https://oauth2.googleapis.com/token")
        .form(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code.to_string()),
            ("redirect_uri", REDIRECT_URI.to_string()),
            ("grant_type", "authorization_code".to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(other_error(&format!("Failed to get token: {}", error_text)));
    }

    let mut token_data: serde_json::Value = response.json().await?;

    // Add expiry timestamp
    let expires_in = token_data
        .get("expires_in")
        .and_then(|v| v.as_i64())
        .unwrap_or(3600);
    let expires_at = chrono::Utc::now().timestamp() + expires_in;

    if let Some(obj) = token_data.as_object_mut() {
        obj.insert("expires_at".to_string(), json!(expires_at));
    } else {
        return Err(other_error("Token data is not an object"));
    }

    // Save token to the configured token file
    token_manager.store_token(&token_data).await?;

    // Send success response to browser
    let response =
        tiny_http::Response::from_string("Authorization successful! You can close this window.");
    request
        .respond(response)
        .map_err(|e| other_error(&format!("Failed to respond to callback: {}", e)))?;

    println!("Token successfully saved.");

    Ok(())
}
