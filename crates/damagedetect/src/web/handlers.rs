use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::error;

use super::{render, AppState};
use crate::error::Error;

/// Query pairs as sent; repeated keys are kept.
type QueryPairs = Option<Query<Vec<(String, String)>>>;

/// The `refresh` flag accepted by the damage endpoint and page.
#[derive(Debug, Default)]
pub(crate) struct RefreshQuery {
    refresh: Option<String>,
}

impl RefreshQuery {
    /// Take the first `refresh` value; an unparseable query counts as absent.
    pub(crate) fn from_query(query: QueryPairs) -> Self {
        let refresh = query.and_then(|Query(pairs)| {
            pairs
                .into_iter()
                .find_map(|(key, value)| (key == "refresh").then_some(value))
        });
        Self { refresh }
    }

    /// `?refresh`, `?refresh=true`, `?refresh=1` select the rescan listing;
    /// an absent flag or `false`/`0`/`no`/`off` select the initial one.
    pub(crate) fn requested(&self) -> bool {
        self.refresh.as_deref().is_some_and(|value| {
            !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            )
        })
    }
}

pub(crate) async fn home_handler(State(state): State<AppState>) -> Html<String> {
    Html(render::home_page(&state.site))
}

pub(crate) async fn dashboard_handler(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Html<String> {
    let refresh = RefreshQuery::from_query(query).requested();
    let records = state
        .feed
        .damage_statuses(refresh)
        .await
        .unwrap_or_else(|err| {
            error!(feed = state.feed.name(), "Error fetching damage statuses: {err}");
            Vec::new()
        });
    Html(render::damage_page(&state.site, &records, refresh, Utc::now()))
}

pub(crate) async fn drones_handler(State(state): State<AppState>) -> Html<String> {
    let drones = state.feed.drone_statuses().await.unwrap_or_else(|err| {
        error!(feed = state.feed.name(), "Error fetching drone statuses: {err}");
        Vec::new()
    });
    Html(render::drone_page(&state.site, &drones, Utc::now()))
}

pub(crate) async fn damage_status_handler(
    State(state): State<AppState>,
    query: QueryPairs,
) -> Response {
    let refresh = RefreshQuery::from_query(query).requested();
    match state.feed.damage_statuses(refresh).await {
        Ok(records) => Json(records).into_response(),
        Err(err) => feed_failure(&state, "damage", &err),
    }
}

pub(crate) async fn drone_status_handler(State(state): State<AppState>) -> Response {
    match state.feed.drone_statuses().await {
        Ok(drones) => Json(drones).into_response(),
        Err(err) => feed_failure(&state, "drone", &err),
    }
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn feed_failure(state: &AppState, listing: &str, err: &Error) -> Response {
    error!(feed = state.feed.name(), "Error serving {listing} statuses: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
