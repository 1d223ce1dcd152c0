use super::session::{GoogleServices, Role};
use super::AppState;
use crate::agent::AssignmentAgent;
use crate::assignments::{self, PendingMapping};
use crate::error::AppResult;
use crate::google::{CalendarClient, ClassroomClient, TokenManager};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub summary: String,
    pub pending_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Handler for the chat page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

/// Liveness probe
pub async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Build the Google clients from the stored token and run the initial fetch
pub async fn login_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (token_path, page_size) = {
        let config_read = state.config.read().await;
        (
            config_read.google_token_path.clone(),
            config_read.page_size,
        )
    };

    let token_manager = TokenManager::new(Arc::clone(&state.config), token_path);

    // Surface token problems at login time instead of on the first fetch
    if let Err(e) = token_manager.access_token().await {
        error!("Login failed: {:?}", e);
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: format!("Login failed: {}", e),
            }),
        )
            .into_response();
    }

    let services = GoogleServices {
        classroom: Arc::new(ClassroomClient::new(token_manager.clone(), page_size)),
        calendar: Arc::new(CalendarClient::new(token_manager)),
    };

    {
        let mut session = state.session.write().await;
        session.services = Some(services);
    }
    info!("Login successful, fetching assignments");

    fetch_and_respond(&state).await
}

/// Re-fetch assignments, replacing the session cache on success
pub async fn refresh_handler(State(state): State<AppState>) -> impl IntoResponse {
    if !state.session.read().await.is_logged_in() {
        return not_logged_in();
    }
    fetch_and_respond(&state).await
}

/// One chat turn: append the user message, run the agent, append the reply
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let (calendar, summary_context, pending, history) = {
        let session = state.session.read().await;
        let Some(services) = session.services.clone() else {
            return not_logged_in();
        };
        (
            services.calendar,
            session.summary_context.clone(),
            session.pending.clone(),
            session.history_messages(),
        )
    };

    let agent = {
        let config_read = state.config.read().await;
        AssignmentAgent::new(
            &config_read.gemini_api_key,
            config_read.gemini_model.clone(),
            calendar,
            config_read.google_calendar_id.clone(),
            config_read.timezone.clone(),
        )
    };

    let current_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let reply = match agent
        .respond(
            &request.message,
            history,
            &summary_context,
            &pending,
            &current_date,
        )
        .await
    {
        Ok(reply) => reply,
        // Agent failures become conversational replies; the session survives
        Err(e) => {
            error!("Agent error: {:?}", e);
            format!("Agent Error: {}", e)
        }
    };

    {
        let mut session = state.session.write().await;
        session.push_turn(Role::Human, request.message);
        session.push_turn(Role::Assistant, reply.clone());
    }

    Json(ChatResponse { reply }).into_response()
}

/// Fetch both assignment views and replace the session cache; on failure the
/// prior state is kept and the error is reported to the caller.
async fn fetch_and_respond(state: &AppState) -> axum::response::Response {
    match fetch_assignments(state).await {
        Ok((summary, pending)) => {
            let pending_count = pending.assignment_count();
            {
                let mut session = state.session.write().await;
                session.replace_assignments(summary.clone(), pending);
            }
            info!(pending_count, "Assignments fetched and updated");
            Json(StatusResponse {
                status: String::from("ok"),
                summary,
                pending_count,
            })
            .into_response()
        }
        Err(e) => {
            error!("Failed to fetch assignments: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Failed to fetch assignments: {}", e),
                }),
            )
                .into_response()
        }
    }
}

async fn fetch_assignments(state: &AppState) -> AppResult<(String, PendingMapping)> {
    let classroom = {
        let session = state.session.read().await;
        session
            .services
            .clone()
            .map(|s| s.classroom)
            .ok_or_else(|| crate::error::other_error("Not logged in"))?
    };

    let summary = assignments::coursework_summary(classroom.as_ref()).await?;
    let pending = assignments::pending_assignments(classroom.as_ref()).await?;
    Ok((summary, pending))
}

fn not_logged_in() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: String::from("Please log in first."),
        }),
    )
        .into_response()
}
