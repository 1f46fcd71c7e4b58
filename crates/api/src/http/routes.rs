//! Route table and handlers.

use std::future::Future;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use launchbot_domain::{AnnouncementOutcome, LaunchBotError, SkipReason, UserIdentity};
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use crate::context::AppContext;

type AppState = Arc<AppContext>;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    state: Option<String>,
    code: Option<String>,
}

/// Build the router over a shared context.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/auth", get(begin_authorization))
        .route("/callback", get(complete_authorization))
        .route("/daily-launch-reminder", get(daily_launch_reminder).post(daily_launch_reminder))
        .route("/launch-alert", get(launch_alert).post(launch_alert))
        .route("/health", get(health))
        .with_state(context)
}

async fn begin_authorization(State(ctx): State<AppState>) -> Result<Redirect, ApiError> {
    let redirect = ctx.flow.begin_authorization().await?;
    Ok(Redirect::to(&redirect.url))
}

async fn complete_authorization(
    State(ctx): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<UserIdentity>, ApiError> {
    // No received state can never match a stored one.
    let state = params.state.unwrap_or_default();
    let code = params.code.filter(|code| !code.is_empty()).ok_or_else(|| {
        LaunchBotError::InvalidInput("callback is missing the authorization code".into())
    })?;

    let flow = Arc::clone(&ctx.flow);
    let identity = detached(async move {
        flow.complete_authorization(&state, &code).await.map(|account| account.identity)
    })
    .await?;
    Ok(Json(identity))
}

async fn daily_launch_reminder(State(ctx): State<AppState>) -> Result<Response, ApiError> {
    let service = Arc::clone(&ctx.announcements);
    let outcome = detached(async move { service.daily_digest(Utc::now()).await }).await?;
    Ok(outcome_response(outcome))
}

async fn launch_alert(State(ctx): State<AppState>) -> Result<Response, ApiError> {
    let service = Arc::clone(&ctx.announcements);
    let outcome = detached(async move { service.imminent_alert(Utc::now()).await }).await?;
    Ok(outcome_response(outcome))
}

/// Run `work` on its own task. Dropping the request does not cancel it.
async fn detached<T, F>(work: F) -> Result<T, ApiError>
where
    F: Future<Output = launchbot_domain::Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| LaunchBotError::Internal(format!("request task failed: {e}")))?
        .map_err(ApiError::from)
}

async fn health(State(ctx): State<AppState>) -> Response {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status)).into_response()
}

fn outcome_response(outcome: AnnouncementOutcome) -> Response {
    match outcome {
        AnnouncementOutcome::Posted(receipt) => Json(receipt.data).into_response(),
        AnnouncementOutcome::Skipped(reason) => Json(skipped_body(&reason)).into_response(),
    }
}

fn skipped_body(reason: &SkipReason) -> Value {
    let mut body = serde_json::to_value(reason).unwrap_or_else(|_| json!({}));
    if let Value::Object(map) = &mut body {
        map.insert("status".into(), json!("skipped"));
        map.insert("detail".into(), json!(reason.to_string()));
    }
    body
}
