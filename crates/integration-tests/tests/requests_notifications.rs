//! Service requests and notifications.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use embermart_client::api::types::NewServiceRequest;
use embermart_core::{NotificationId, RequestId, RequestStatus};
use embermart_integration_tests::TestStack;

#[tokio::test]
async fn test_submit_service_request() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("POST"))
        .and(path("/api/requests"))
        .and(body_partial_json(serde_json::json!({
            "subject": "Annual extinguisher inspection",
            "equipment_type": "extinguisher"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 41,
            "subject": "Annual extinguisher inspection",
            "description": "Six units on the shop floor.",
            "equipment_type": "extinguisher",
            "status": "pending",
            "created_at": "2026-08-01T10:00:00Z"
        })))
        .expect(1)
        .mount(&stack.server)
        .await;

    let created = stack
        .api
        .submit_request(&NewServiceRequest {
            subject: "Annual extinguisher inspection".to_string(),
            description: "Six units on the shop floor.".to_string(),
            equipment_type: "extinguisher".to_string(),
        })
        .await
        .expect("request submitted");
    assert_eq!(created.id, RequestId::new(41));
    assert_eq!(created.status, RequestStatus::Pending);
}

#[tokio::test]
async fn test_my_requests_lists_history() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/requests/my-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 41,
                "subject": "Annual extinguisher inspection",
                "description": "Six units on the shop floor.",
                "equipment_type": "extinguisher",
                "status": "in_progress",
                "created_at": "2026-08-01T10:00:00Z"
            }
        ])))
        .mount(&stack.server)
        .await;

    let requests = stack.api.my_requests().await.expect("history listed");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests.first().expect("first request").status,
        RequestStatus::InProgress
    );
}

#[tokio::test]
async fn test_notifications_list_and_mark_read() {
    let stack = TestStack::start().await;
    stack.login("tok-123").await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 5,
                "message": "Your order #1007 has shipped.",
                "read": false,
                "created_at": "2026-08-02T09:00:00Z"
            }
        ])))
        .mount(&stack.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/notifications/5/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 5,
            "message": "Your order #1007 has shipped.",
            "read": true,
            "created_at": "2026-08-02T09:00:00Z"
        })))
        .expect(1)
        .mount(&stack.server)
        .await;

    let notifications = stack.api.notifications().await.expect("listed");
    assert_eq!(notifications.len(), 1);
    assert!(!notifications.first().expect("first notification").read);

    let updated = stack
        .api
        .mark_notification_read(NotificationId::new(5))
        .await
        .expect("marked read");
    assert!(updated.read);
}
