use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use mockito::Server;
use tower::ServiceExt;

use icsift_server::config::ServerConfig;
use icsift_server::state::AppState;

const FEED: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "BEGIN:VEVENT\r\n",
    "SUMMARY:Algebra I loeng\r\n",
    "END:VEVENT\r\n",
    "BEGIN:VEVENT\r\n",
    "SUMMARY:Algebra I seminar\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

fn test_app(calendar_url: String) -> axum::Router {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        calendar_url,
        fetch_timeout_secs: 5,
        request_timeout_secs: 10,
    };
    icsift_server::app(AppState::new(config).unwrap())
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_filter_keeps_included_classification() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/timetable/42/et")
        .with_status(200)
        .with_body(FEED)
        .create_async()
        .await;

    let app = test_app(format!("{}/timetable/{{id}}/et", server.url()));
    let (status, headers, body) = get(app, "/filter?id=42&include=l").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/calendar; charset=UTF-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"calendar-filtered.ics\""
    );
    assert!(body.contains("SUMMARY:Algebra I loeng"));
    assert!(!body.contains("seminar"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_filter_without_criteria_returns_feed_unchanged() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/timetable/42/et")
        .with_status(200)
        .with_body(FEED)
        .create_async()
        .await;

    let app = test_app(format!("{}/timetable/{{id}}/et", server.url()));
    let (status, _, body) = get(app, "/filter?id=42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, FEED);
}

#[tokio::test]
async fn test_filter_exclude_drops_classification() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/timetable/42/et")
        .with_status(200)
        .with_body(FEED)
        .create_async()
        .await;

    let app = test_app(format!("{}/timetable/{{id}}/et", server.url()));
    let (status, _, body) = get(app, "/filter?id=42&exclude=l").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("loeng"));
    assert!(body.contains("SUMMARY:Algebra I seminar"));
}

#[tokio::test]
async fn test_filter_missing_id_is_bad_request() {
    let app = test_app("http://unused.invalid/{id}".to_string());
    let (status, _, body) = get(app, "/filter?include=l").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("id"));
}

#[tokio::test]
async fn test_filter_upstream_failure_is_bad_gateway() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/timetable/42/et")
        .with_status(500)
        .create_async()
        .await;

    let app = test_app(format!("{}/timetable/{{id}}/et", server.url()));
    let (status, _, _) = get(app, "/filter?id=42").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_group_filter_uses_config_calendar() {
    let mut server = Server::new_async().await;

    let feed = concat!(
        "BEGIN:VCALENDAR\r\n",
        "BEGIN:VEVENT\r\n",
        "CATEGORIES:KT I\r\n",
        "END:VEVENT\r\n",
        "BEGIN:VEVENT\r\n",
        "CATEGORIES:KT II\r\n",
        "END:VEVENT\r\n",
        "END:VCALENDAR\r\n",
    );
    let calendar_mock = server
        .mock("GET", "/shared/feed.ics")
        .with_status(200)
        .with_body(feed)
        .create_async()
        .await;

    let config = serde_json::json!({
        "calendar_url": format!("{}/shared/feed.ics", server.url()),
        "groups": {
            "mine": { "mode": "include", "values": ["KT I"] }
        }
    });
    let config_mock = server
        .mock("GET", "/config.json")
        .with_status(200)
        .with_body(config.to_string())
        .create_async()
        .await;

    let app = test_app("http://unused.invalid/{id}".to_string());
    let uri = format!("/filter/group?url={}/config.json&group=mine", server.url());
    let (status, headers, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"calendar-filtered-mine.ics\""
    );
    assert!(body.contains("CATEGORIES:KT I"));
    assert!(!body.contains("CATEGORIES:KT II"));
    config_mock.assert_async().await;
    calendar_mock.assert_async().await;
}

#[tokio::test]
async fn test_group_filter_unknown_group_is_bad_request() {
    let mut server = Server::new_async().await;
    let config = serde_json::json!({
        "calendar_url": format!("{}/shared/feed.ics", server.url()),
        "groups": {}
    });
    server
        .mock("GET", "/config.json")
        .with_status(200)
        .with_body(config.to_string())
        .create_async()
        .await;

    let app = test_app("http://unused.invalid/{id}".to_string());
    let uri = format!("/filter/group?url={}/config.json&group=ghost", server.url());
    let (status, _, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ghost"));
}

#[tokio::test]
async fn test_group_filter_invalid_config_is_bad_gateway() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/config.json")
        .with_status(200)
        .with_body("{definitely not json")
        .create_async()
        .await;

    let app = test_app("http://unused.invalid/{id}".to_string());
    let uri = format!("/filter/group?url={}/config.json&group=mine", server.url());
    let (status, _, _) = get(app, &uri).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_group_filter_missing_parameters() {
    let app = test_app("http://unused.invalid/{id}".to_string());
    let (status, _, body) = get(app, "/filter/group?group=mine").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("url"));

    let app = test_app("http://unused.invalid/{id}".to_string());
    let (status, _, body) = get(app, "/filter/group?url=http://example.com/c.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("group"));
}

#[tokio::test]
async fn test_group_filter_rejects_malformed_url() {
    let app = test_app("http://unused.invalid/{id}".to_string());
    let (status, _, body) = get(app, "/filter/group?url=not-a-url&group=mine").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("not-a-url"));
}

#[tokio::test]
async fn test_health() {
    let app = test_app("http://unused.invalid/{id}".to_string());
    let (status, _, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}
