use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};
use tokio::sync::Mutex;

use super::*;

fn sample() -> ContactMessage {
    ContactMessage {
        name: "Alice Smith".to_string(),
        email: "alice@example.com".to_string(),
        message: "Hi & welcome, 100% real?".to_string(),
    }
}

async fn spawn_webhook(status: StatusCode) -> (Url, Arc<Mutex<Vec<ContactMessage>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();
    let app = Router::new().route(
        "/hook",
        post(move |Json(message): Json<ContactMessage>| {
            let sink = sink.clone();
            async move {
                sink.lock().await.push(message);
                status
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    let url = Url::parse(&format!("http://{addr}/hook")).expect("url");
    (url, received)
}

#[test]
fn mailto_link_encodes_subject_and_body_as_uri_components() {
    let outbox = MailtoOutbox::new("me@example.test");
    let link = outbox.compose(&sample());

    assert!(link.starts_with("mailto:me@example.test?subject="));
    assert!(link.contains("subject=Portfolio%20Contact%20from%20Alice%20Smith"));
    assert!(link.contains("Name%3A%20Alice%20Smith%0AEmail%3A%20alice%40example.com"));
    assert!(link.contains("Hi%20%26%20welcome%2C%20100%25%20real%3F"));
    assert!(!link.contains('+'));
}

#[tokio::test]
async fn mailto_delivery_returns_handoff_link() {
    let outbox = MailtoOutbox::new("me@example.test");
    let delivery = outbox.deliver(&sample()).await.expect("delivery");
    assert_eq!(delivery.handoff_url, Some(outbox.compose(&sample())));
}

#[tokio::test]
async fn mailto_without_recipient_fails() {
    let outbox = MailtoOutbox::new("  ");
    let err = outbox.deliver(&sample()).await.expect_err("no recipient");
    assert!(matches!(err, OutboxError::Unavailable(_)));
}

#[tokio::test]
async fn webhook_posts_payload_verbatim() {
    let (url, received) = spawn_webhook(StatusCode::NO_CONTENT).await;
    let outbox = WebhookOutbox::new(url);

    let delivery = outbox.deliver(&sample()).await.expect("delivery");
    assert_eq!(delivery, Delivery::default());

    let received = received.lock().await;
    assert_eq!(received.as_slice(), &[sample()]);
}

#[tokio::test]
async fn webhook_non_success_status_is_an_error() {
    let (url, _received) = spawn_webhook(StatusCode::SERVICE_UNAVAILABLE).await;
    let outbox = WebhookOutbox::new(url);

    let err = outbox.deliver(&sample()).await.expect_err("rejected");
    assert!(matches!(err, OutboxError::Rejected(503)));
}

#[tokio::test]
async fn webhook_transport_failure_is_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let outbox = WebhookOutbox::new(Url::parse(&format!("http://{addr}/hook")).expect("url"));
    let err = outbox.deliver(&sample()).await.expect_err("refused");
    assert!(matches!(err, OutboxError::Transport(_)));
}
