//! Calendar filtering endpoints.

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use icsift_core::{LabelField, Sieve};

use crate::fetch;
use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/filter", get(filter_by_classification))
        .route("/filter/group", get(filter_by_group))
}

#[derive(Deserialize)]
pub struct ClassificationParams {
    pub id: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
}

/// GET /filter?id=..&include=..&exclude=..
///
/// Fetches the calendar identified by `id` and keeps or drops each event
/// by the classification code of its SUMMARY label. With neither
/// `include` nor `exclude` the feed is returned unfiltered.
async fn filter_by_classification(
    State(state): State<AppState>,
    Query(params): Query<ClassificationParams>,
) -> Result<Response, ApiError> {
    let id = params
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingParameter("id"))?;

    let sieve = Sieve::from_codes(params.include.as_deref(), params.exclude.as_deref());
    let url = state.config.upstream_url(id);

    let body =
        fetch::filtered_calendar(&state.http, &url, &sieve, LabelField::SummaryTrailingToken)
            .await?;

    Ok(ics_response("calendar-filtered.ics", body))
}

#[derive(Deserialize)]
pub struct GroupParams {
    pub url: Option<String>,
    pub group: Option<String>,
}

/// GET /filter/group?url=..&group=..
///
/// Loads the JSON filter config at `url`, builds the sieve for the named
/// group, then fetches the calendar the config points at and keeps the
/// events whose CATEGORIES label the group admits.
async fn filter_by_group(
    State(state): State<AppState>,
    Query(params): Query<GroupParams>,
) -> Result<Response, ApiError> {
    let config_url = params
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingParameter("url"))?;
    let group = params
        .group
        .as_deref()
        .filter(|group| !group.is_empty())
        .ok_or(ApiError::MissingParameter("group"))?;

    url::Url::parse(config_url).map_err(|_| ApiError::InvalidUrl(config_url.to_string()))?;

    let config = fetch::filter_config(&state.http, config_url).await?;
    let sieve = Sieve::from_group(&config, group)?;

    let body = fetch::filtered_calendar(
        &state.http,
        &config.calendar_url,
        &sieve,
        LabelField::Categories,
    )
    .await?;

    Ok(ics_response(&format!("calendar-filtered-{group}.ics"), body))
}

fn ics_response(filename: &str, body: Vec<u8>) -> Response {
    let disposition = format!("inline; filename=\"{filename}\"");
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/calendar; charset=UTF-8"),
        ),
        (
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .unwrap_or_else(|_| HeaderValue::from_static("inline")),
        ),
    ];

    (headers, body).into_response()
}
