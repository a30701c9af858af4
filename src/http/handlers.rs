//! Request handlers.
//!
//! # Request State Machine
//! ```text
//! validate set (and format) ──invalid──▶ 400
//!        │
//!        ▼
//! direct=true ──▶ Dispatcher (local)  ──▶ envelope | 404 | 500
//! direct=false ─▶ PeerClient (direct=true on the peer)
//!                   ──▶ peer body as-is | peer status + detail | 500 unreachable
//! ```

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::request::request_id;
use crate::http::response::{ParseAllResponse, ParseResponse, WelcomeResponse};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::parsing::Format;

/// Query string of the parse routes.
#[derive(Debug, Default, Deserialize)]
pub struct ParseParams {
    #[serde(default)]
    pub direct: bool,
}

/// Where a request was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Local,
    Forwarded,
}

impl Mode {
    fn from_direct(direct: bool) -> Self {
        if direct {
            Mode::Local
        } else {
            Mode::Forwarded
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Mode::Local => "local",
            Mode::Forwarded => "forwarded",
        }
    }
}

pub async fn welcome(State(state): State<AppState>) -> Json<WelcomeResponse> {
    let catalog = &state.config.catalog;
    Json(WelcomeResponse {
        message: format!("Welcome to the Data Parsing Server ({})!", state.config.node.name),
        available_sets: catalog.sets.clone(),
        available_formats: state.dispatcher.formats(),
    })
}

pub async fn parse_one(
    State(state): State<AppState>,
    Path((set, format)): Path<(String, String)>,
    params: Result<Query<ParseParams>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let result = async {
        validate_set(&state, &set)?;
        let format = validate_format(&state, &format)?;
        let Query(params) = params.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

        let mode = Mode::from_direct(params.direct);
        tracing::debug!(%set, %format, mode = mode.as_str(), "Parse request");

        let response = match mode {
            Mode::Local => {
                let data = state.dispatcher.parse(&set, format).await?;
                Json(ParseResponse { set, format, data }).into_response()
            }
            Mode::Forwarded => {
                let body = state
                    .peer
                    .fetch_one(&set, format, request_id(&headers))
                    .await?;
                json_body(body)
            }
        };
        Ok::<_, ApiError>((mode, response))
    }
    .await;

    finish(result, start)
}

pub async fn parse_all(
    State(state): State<AppState>,
    Path(set): Path<String>,
    params: Result<Query<ParseParams>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let result = async {
        validate_set(&state, &set)?;
        let Query(params) = params.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

        let mode = Mode::from_direct(params.direct);
        tracing::debug!(%set, mode = mode.as_str(), "Parse-all request");

        let response = match mode {
            Mode::Local => {
                let outcomes = state.dispatcher.parse_all(&set).await;
                for (format, outcome) in &outcomes {
                    if let Err(e) = outcome {
                        tracing::warn!(%set, %format, error = %e, "Format failed in aggregate");
                    }
                }
                Json(ParseAllResponse::from_outcomes(&set, outcomes)).into_response()
            }
            Mode::Forwarded => {
                let body = state.peer.fetch_all(&set, request_id(&headers)).await?;
                json_body(body)
            }
        };
        Ok::<_, ApiError>((mode, response))
    }
    .await;

    finish(result, start)
}

pub async fn not_found() -> ApiError {
    ApiError::NoRoute
}

fn validate_set(state: &AppState, set: &str) -> Result<(), ApiError> {
    let catalog = &state.config.catalog;
    if catalog.has_set(set) {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "Invalid set name. Available sets: [{}]",
            catalog.sets.join(", ")
        )))
    }
}

fn validate_format(state: &AppState, format: &str) -> Result<Format, ApiError> {
    let catalog = &state.config.catalog;
    match format.parse::<Format>() {
        Ok(f) if catalog.has_format(f) => Ok(f),
        _ => {
            let formats = state.dispatcher.formats();
            let available: Vec<_> = formats.iter().map(Format::as_str).collect();
            Err(ApiError::InvalidInput(format!(
                "Invalid file type. Available types: [{}]",
                available.join(", ")
            )))
        }
    }
}

/// Relay a peer body unchanged.
fn json_body(body: axum::body::Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn finish(result: Result<(Mode, Response), ApiError>, start: Instant) -> Response {
    match result {
        Ok((mode, response)) => {
            metrics::record_request(mode.as_str(), response.status().as_u16(), start);
            response
        }
        Err(e) => {
            let mode = match e {
                ApiError::Peer(_) => Mode::Forwarded.as_str(),
                ApiError::Parse(_) => Mode::Local.as_str(),
                _ => "rejected",
            };
            let response = e.into_response();
            metrics::record_request(mode, response.status().as_u16(), start);
            response
        }
    }
}
