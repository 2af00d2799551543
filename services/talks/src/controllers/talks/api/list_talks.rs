use crate::{
    app_state::AppState,
    services::talks::{Talk, TalkPoll, TalkSnapshot},
};
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use skillshare_infra::web::routing::RouteParams;
use std::time::Duration;

const PREFER: HeaderName = HeaderName::from_static("prefer");

/// The entity tag is the text between the first and the last double quote.
pub fn parse_entity_tag(value: &str) -> Option<&str> {
    let start = value.find('"')?;
    let end = value.rfind('"')?;
    if end > start {
        Some(&value[start + 1..end])
    } else {
        None
    }
}

/// Parse the first `wait=<seconds>` preference starting at a word boundary.
pub fn parse_wait(value: &str) -> Option<Duration> {
    value.match_indices("wait=").find_map(|(pos, key)| {
        let at_boundary = value[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'));
        if !at_boundary {
            return None;
        }

        let digits = value[pos + key.len()..]
            .split(|c: char| !c.is_ascii_digit())
            .next()
            .unwrap_or_default();
        if digits.is_empty() {
            return None;
        }
        // too large values are not an error, the wait is capped anyway
        let seconds = digits.parse::<u64>().unwrap_or(u64::MAX);
        Some(Duration::from_secs(seconds))
    })
}

fn talks_response(snapshot: &TalkSnapshot) -> Response {
    let mut response = Json(&snapshot.talks).into_response();
    if let Ok(etag) = HeaderValue::from_str(&snapshot.etag()) {
        response.headers_mut().insert(header::ETAG, etag);
    }
    response
}

fn not_modified_response(tag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    if let Some(etag) = tag.and_then(|tag| HeaderValue::from_str(&format!("\"{tag}\"")).ok()) {
        response.headers_mut().insert(header::ETAG, etag);
    }
    response
}

#[utoipa::path(
    get,
    path = "/talks",
    tag = "talks",
    description = "List the talks. With a matching `If-None-Match` the response is `304`, \
        unless `Prefer: wait=<seconds>` is given and a change happens within the wait.",
    params(
        ("If-None-Match" = Option<String>, Header, description = "The last seen version as an entity tag"),
        ("Prefer" = Option<String>, Header, description = "Wait for a change, `wait=<seconds>`")
    ),
    responses(
        (status = OK, body = Vec<Talk>, headers(("ETag" = String, description = "Version of the talks"))),
        (status = NOT_MODIFIED, description = "No change since the given version.")
    )
)]
pub async fn list_talks(state: AppState, _params: RouteParams, request: Request) -> Response {
    let headers = request.headers();
    let tag = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_entity_tag);
    let wait = headers
        .get(PREFER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_wait);

    match state.talks().poll(tag, wait) {
        TalkPoll::Modified(snapshot) => talks_response(&snapshot),
        TalkPoll::NotModified => not_modified_response(tag),
        TalkPoll::Pending(pending) => match pending.changed().await {
            Some(snapshot) => talks_response(&snapshot),
            None => not_modified_response(tag),
        },
    }
}

#[cfg(test)]
#[path = "./list_talks_test.rs"]
mod list_talks_test;
