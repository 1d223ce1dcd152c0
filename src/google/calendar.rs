use super::models::EventPayload;
use super::token::TokenManager;
use crate::error::{calendar_error, AppResult};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Write access to the Calendar API, one insert per event.
///
/// Desugared by hand (rather than via `async_trait`) because the rig `Tool`
/// trait requires the futures it awaits to be `Sync`, which `async_trait`'s
/// boxed futures are not.
pub trait CalendarApi: Send + Sync {
    fn insert_event<'a>(
        &'a self,
        calendar_id: &'a str,
        event: &'a EventPayload,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + Sync + 'a>>;
}

/// HTTP client for the Google Calendar API
#[derive(Clone)]
pub struct CalendarClient {
    client: Client,
    token_manager: TokenManager,
}

impl CalendarClient {
    pub fn new(token_manager: TokenManager) -> Self {
        Self {
            client: Client::new(),
            token_manager,
        }
    }
}

impl CalendarApi for CalendarClient {
    fn insert_event<'a>(
        &'a self,
        calendar_id: &'a str,
        event: &'a EventPayload,
    ) -> Pin<Box<dyn Future<Output = AppResult<()>> + Send + Sync + 'a>> {
        Box::pin(async move {
            let access_token = self.token_manager.access_token().await?;

            let url = format!("{}/calendars/{}/events", CALENDAR_API_BASE, calendar_id);
            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", access_token))
                .json(event)
                .send()
                .await
                .map_err(|e| calendar_error(&format!("Failed to insert event: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Could not read error response".to_string());
                return Err(calendar_error(&format!(
                    "Failed to insert event: HTTP {} - {}",
                    status, error_body
                )));
            }

            Ok(())
        })
    }
}
