//! Roster feed endpoints

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use roster_core::CalendarFeed;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roster-cycles", get(roster_feed))
        .route("/roster-cycles.ics", get(roster_feed))
}

/// GET /roster-cycles - The roster cycle calendar for today
async fn roster_feed(State(state): State<AppState>) -> Result<Response, AppError> {
    let today = state.today();
    let feed = state.generator().generate(today)?;

    tracing::info!(%today, bytes = feed.body.len(), "generated roster feed");

    Ok(feed_response(feed))
}

fn feed_response(feed: CalendarFeed) -> Response {
    let cache_control = format!("public, max-age={}", feed.max_age.as_secs());

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, feed.content_type.to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        feed.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    use crate::config::Settings;
    use crate::routes::app;

    fn pinned_state() -> AppState {
        AppState::new(&Settings {
            today: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..Settings::default()
        })
    }

    async fn get_body(uri: &str) -> (Response, String) {
        let response = app(pinned_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        (Response::from_parts(parts, Body::empty()), text)
    }

    #[tokio::test]
    async fn test_roster_feed_response() {
        let (response, body) = get_body("/roster-cycles").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/calendar");
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=86400"
        );

        assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 616);
        assert!(body.contains("UID:roster-20231211@calendars.gtch.au\r\n"));
    }

    #[tokio::test]
    async fn test_ics_alias_serves_same_feed() {
        let (_, plain) = get_body("/roster-cycles").await;
        let (response, ics) = get_body("/roster-cycles.ics").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(plain, ics);
    }

    #[tokio::test]
    async fn test_health() {
        let (response, body) = get_body("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (response, _) = get_body("/calendars").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
