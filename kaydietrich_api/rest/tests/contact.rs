use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method, Request, StatusCode,
    },
    Router,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use kaydietrich_api_rest::{RestServer, RestServerConfig};
use kaydietrich_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use kaydietrich_core_health_contracts::{HealthStatus, MockHealthService};
use kaydietrich_email_contracts::{Email, MockEmailService};
use kaydietrich_shared_contracts::time::MockTimeService;
use serde_json::{json, Value};
use tower::ServiceExt;

const THANK_YOU: &str =
    "Vielen Dank! Ihre Nachricht wurde erfolgreich gesendet. Ich melde mich schnellstmöglich bei Ihnen.";

#[tokio::test]
async fn accepts_valid_submission() {
    // Arrange
    let email = MockEmailService::new().with_send(expected_email(), true);
    let router = router(email, MockTimeService::new().with_now(sent_at()));

    // Act
    let response = router.oneshot(post_json(&valid_payload())).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        HeaderValue::from_static("https://kaydietrich.de")
    );
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        HeaderValue::from_static("application/json; charset=utf-8")
    );
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!(THANK_YOU));
}

#[tokio::test]
async fn reports_mail_failure_with_fallback_address() {
    // Arrange
    let email = MockEmailService::new().with_send(expected_email(), false);
    let router = router(email, MockTimeService::new().with_now(sent_at()));

    // Act
    let response = router.oneshot(post_json(&valid_payload())).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("kontakt@kaydietrich.de"));
}

#[tokio::test]
async fn absorbs_honeypot_submission_without_sending() {
    // Arrange: no expectations on the transport, any send attempt fails the
    // test.
    let router = router(MockEmailService::new(), MockTimeService::new());
    let mut payload = valid_payload();
    payload["phone_confirm"] = json!("555-1234");

    // Act
    let response = router.oneshot(post_json(&payload)).await.unwrap();

    // Assert: indistinguishable from a delivered submission
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!(THANK_YOU));
}

#[tokio::test]
async fn rejects_non_post_methods() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        // Arrange
        let router = router(MockEmailService::new(), MockTimeService::new());
        let request = Request::builder()
            .method(method)
            .uri("/api/contact")
            .extension(connect_info())
            .body(Body::empty())
            .unwrap();

        // Act
        let response = router.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Nur POST-Anfragen erlaubt"));
    }
}

#[tokio::test]
async fn answers_preflight_requests() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(ORIGIN, "https://kaydietrich.de")
        .header("Access-Control-Request-Method", "POST")
        .extension(connect_info())
        .body(Body::empty())
        .unwrap();

    // Act
    let response = router.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        HeaderValue::from_static("https://kaydietrich.de")
    );
}

#[tokio::test]
async fn rejects_malformed_json() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(CONTENT_TYPE, "application/json")
        .extension(connect_info())
        .body(Body::from("{not json"))
        .unwrap();

    // Act
    let response = router.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Ungültige JSON-Daten"));
}

#[tokio::test]
async fn rejects_missing_required_fields() {
    for field in ["name", "email", "message"] {
        // Arrange
        let router = router(MockEmailService::new(), MockTimeService::new());
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove(field);

        // Act
        let response = router.oneshot(post_json(&payload)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!(format!("Pflichtfeld fehlt: {field}")));
    }
}

#[tokio::test]
async fn rejects_invalid_email_address() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let mut payload = valid_payload();
    payload["email"] = json!("not-an-email");

    // Act
    let response = router.oneshot(post_json(&payload)).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Ungültige E-Mail-Adresse"));
}

#[tokio::test]
async fn rejects_too_short_name() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let mut payload = valid_payload();
    payload["name"] = json!("A");

    // Act
    let response = router.oneshot(post_json(&payload)).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Name zu kurz (min. 2 Zeichen)"));
}

#[tokio::test]
async fn rejects_too_short_message() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let mut payload = valid_payload();
    payload["message"] = json!("Hallo");

    // Act
    let response = router.oneshot(post_json(&payload)).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Nachricht zu kurz (min. 10 Zeichen)"));
}

#[tokio::test]
async fn sends_identical_submissions_independently() {
    // Arrange: two equal submissions cause two separate handoffs, there is
    // no deduplication.
    let mut email = MockEmailService::new();
    email
        .expect_send()
        .times(2)
        .returning(|_| Box::pin(std::future::ready(Ok(true))));
    let time = MockTimeService::new()
        .with_now(sent_at())
        .with_now(sent_at());
    let router = router(email, time);

    // Act
    let first = router
        .clone()
        .oneshot(post_json(&valid_payload()))
        .await
        .unwrap();
    let second = router.oneshot(post_json(&valid_payload())).await.unwrap();

    // Assert
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
}

#[tokio::test]
async fn serves_the_contact_page() {
    // Arrange
    let router = router(MockEmailService::new(), MockTimeService::new());
    let request = Request::builder()
        .uri("/")
        .extension(connect_info())
        .body(Body::empty())
        .unwrap();

    // Act
    let response = router.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(
        response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    assert!(body.contains("data-contact-form"));
    assert!(body.contains("data-success-message"));
    assert!(body.contains("phone_confirm"));
}

#[tokio::test]
async fn reports_health() {
    // Arrange
    let server = RestServer {
        health: MockHealthService::new().with_get_status(HealthStatus { email: true }),
        contact: contact_service(MockEmailService::new(), MockTimeService::new()),
        config: server_config(),
    };
    let request = Request::builder()
        .uri("/health")
        .extension(connect_info())
        .body(Body::empty())
        .unwrap();

    // Act
    let response = server.router().oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"http": true, "email": true}));
}

fn router(email: MockEmailService, time: MockTimeService) -> Router {
    RestServer {
        health: MockHealthService::new(),
        contact: contact_service(email, time),
        config: server_config(),
    }
    .router()
}

fn contact_service(
    email: MockEmailService,
    time: MockTimeService,
) -> ContactServiceImpl<MockEmailService, MockTimeService> {
    ContactServiceImpl {
        email,
        time,
        config: ContactServiceConfig {
            recipient: Arc::new("kontakt@kaydietrich.de".parse().unwrap()),
        },
    }
}

fn server_config() -> RestServerConfig {
    RestServerConfig {
        allowed_origin: HeaderValue::from_static("https://kaydietrich.de"),
        real_ip_config: None,
    }
}

fn valid_payload() -> Value {
    json!({
        "name": "Max Mustermann",
        "email": "max@example.com",
        "company": "",
        "message": "Ich interessiere mich für Ihre Dienstleistungen.",
        "phone_confirm": "",
    })
}

fn expected_email() -> Email {
    Email {
        recipient: "kontakt@kaydietrich.de".parse().unwrap(),
        subject: "Kontaktanfrage von Max Mustermann".into(),
        body: [
            "Neue Kontaktanfrage über kaydietrich.de",
            "==================================================",
            "",
            "Name:         Max Mustermann",
            "E-Mail:       max@example.com",
            "",
            "--------------------------------------------------",
            "",
            "Nachricht:",
            "",
            "Ich interessiere mich für Ihre Dienstleistungen.",
            "",
            "==================================================",
            "Gesendet am:  14.03.2025 09:30:00",
            "IP-Adresse:   203.0.113.7",
            "",
        ]
        .join("\n"),
        reply_to: Some("Max Mustermann <max@example.com>".parse().unwrap()),
    }
}

fn post_json(payload: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(CONTENT_TYPE, "application/json")
        .header(ORIGIN, "https://kaydietrich.de")
        .extension(connect_info())
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn connect_info() -> ConnectInfo<SocketAddr> {
    ConnectInfo(SocketAddr::from(([203, 0, 113, 7], 44123)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sent_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
}
