//! HTTP-level tests for connection request submission and the review workflow.

mod common;

use alumni_core::roles::Role;
use axum::http::{Method, StatusCode};
use common::{
    body_json, delete_auth, get, get_auth, long_message, patch_json_auth, post_json, send,
};
use serde_json::json;

fn submission(alumni_id: i64, message: &str) -> serde_json::Value {
    json!({
        "studentName": "Ravi Kumar",
        "studentEmail": "ravi@example.org",
        "subject": "Guidance on backend roles",
        "message": message,
        "category": "MENTORSHIP",
        "alumniId": alumni_id,
    })
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_creates_pending_request() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let response = post_json(app.app(), "/api/requests", submission(alumni.id, &long_message())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "PENDING");
    assert_eq!(data["category"], "MENTORSHIP");
    assert_eq!(data["student_name"], "Ravi Kumar");
    assert_eq!(data["alumni_id"], alumni.id);
    assert!(data["reviewed_by"].is_null());
    assert!(data["reviewed_by_name"].is_null());
    assert!(data["reviewed_at"].is_null());
}

#[tokio::test]
async fn test_short_message_reports_lengths_and_persists_nothing() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let token = app.token_for(&admin);

    let response = post_json(app.app(), "/api/requests", submission(alumni.id, &"x".repeat(40))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let msg = json["error"].as_str().unwrap();
    assert!(msg.contains("100"), "{msg}");
    assert!(msg.contains("40"), "{msg}");

    let list = body_json(get_auth(app.app(), "/api/requests", &token).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_field_is_named() {
    let app = common::build_test_app();

    let mut body = submission(1, &long_message());
    body.as_object_mut().unwrap().remove("studentEmail");

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("studentEmail is required"));
}

#[tokio::test]
async fn test_wrongly_typed_body_is_a_json_400() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let mut body = submission(alumni.id, &long_message());
    body["studentName"] = json!(42);

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("studentName"));

    // No body and no content type at all.
    let response = send(app.app(), Method::POST, "/api/requests", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_alumni_id_may_be_a_numeric_string() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let mut body = submission(alumni.id, &long_message());
    body["alumniId"] = json!(alumni.id.to_string());

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["alumni_id"], alumni.id);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let mut body = submission(alumni.id, &long_message());
    body["category"] = json!("FRIENDSHIP");

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_alumni_is_not_found() {
    let app = common::build_test_app();

    let response = post_json(app.app(), "/api/requests", submission(999, &long_message())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Alumni with id 999 not found");
}

#[tokio::test]
async fn test_attachment_is_appended_to_message() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let mut body = submission(alumni.id, &long_message());
    body["alumniId"] = json!(alumni.id.to_string());
    body["attachment"] = json!({ "name": "resume.pdf", "size": 2048, "type": "application/pdf" });

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let message = json["data"]["message"].as_str().unwrap();
    assert!(message.starts_with(&long_message()));
    assert!(message.ends_with("📎 Attachment: resume.pdf (2.0 KB)"), "{message}");
}

#[tokio::test]
async fn test_oversized_attachment_is_rejected() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;

    let mut body = submission(alumni.id, &long_message());
    body["attachment"] = json!({ "name": "thesis.pdf", "size": 6 * 1024 * 1024 });

    let response = post_json(app.app(), "/api/requests", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and RBAC
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_listing_requires_staff() {
    let app = common::build_test_app();
    let student = app.seed_student("ravi@example.org", true).await;

    let response = get(app.app(), "/api/requests").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.app(), "/api/requests", &app.token_for(&student)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.app(), "/api/requests", "not-a-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_is_newest_first_with_alumni_summary() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let first = app.seed_request(alumni.id, "Ravi Kumar").await;
    let second = app.seed_request(alumni.id, "Meera Nair").await;

    let json = body_json(get_auth(app.app(), "/api/requests", &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], second.id);
    assert_eq!(data[1]["id"], first.id);
    assert_eq!(data[0]["alumni"]["name"], "Priya Patel");
    assert_eq!(data[0]["alumni"]["company"], "Google");
}

#[tokio::test]
async fn test_listing_filters_by_status() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let approved = app.seed_request(alumni.id, "Ravi Kumar").await;
    app.seed_request(alumni.id, "Meera Nair").await;

    let uri = format!("/api/requests/{}", approved.id);
    patch_json_auth(app.app(), &uri, json!({ "status": "APPROVED" }), &token).await;

    let json = body_json(get_auth(app.app(), "/api/requests?status=APPROVED", &token).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], approved.id);

    let response = get_auth(app.app(), "/api/requests?status=ARCHIVED", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Review workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_approve_stamps_reviewer_and_logs() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;

    let uri = format!("/api/requests/{}", request.id);
    let response = patch_json_auth(app.app(), &uri, json!({ "status": "APPROVED" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "APPROVED");
    assert_eq!(json["data"]["reviewed_by"], admin.id);
    assert_eq!(json["data"]["reviewed_by_name"], "Asha");
    assert!(json["data"]["reviewed_at"].is_string());

    let logs = body_json(get_auth(app.app(), "/api/admin/logs", &token).await).await;
    let newest = &logs["data"][0];
    assert_eq!(newest["action"], "APPROVE_REQUEST");
    assert_eq!(newest["entity"], "ConnectionRequest");
    assert_eq!(newest["entity_id"], request.id);
    assert_eq!(
        newest["details"],
        "Asha approved request from Ravi Kumar to Priya Patel"
    );
    assert_eq!(newest["admin"]["email"], "asha@example.org");
}

#[tokio::test]
async fn test_approve_then_reopen_logs_two_entries() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;
    let uri = format!("/api/requests/{}", request.id);

    patch_json_auth(app.app(), &uri, json!({ "status": "APPROVED" }), &token).await;
    let response = patch_json_auth(app.app(), &uri, json!({ "status": "PENDING" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "PENDING");
    // Reopening still records who did it.
    assert_eq!(json["data"]["reviewed_by_name"], "Asha");
    assert!(json["data"]["reviewed_at"].is_string());

    let logs = body_json(get_auth(app.app(), "/api/admin/logs", &token).await).await;
    let request_logs: Vec<_> = logs["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["entity"] == "ConnectionRequest")
        .collect();
    assert_eq!(request_logs.len(), 2);
    assert_eq!(request_logs[0]["action"], "REOPEN_REQUEST");
    assert_eq!(request_logs[1]["action"], "APPROVE_REQUEST");
    assert!(request_logs.iter().all(|l| l["entity_id"] == request.id));
}

#[tokio::test]
async fn test_invalid_status_changes_nothing() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;
    let uri = format!("/api/requests/{}", request.id);

    for body in [json!({ "status": "ARCHIVED" }), json!({})] {
        let response = patch_json_auth(app.app(), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let json = body_json(get_auth(app.app(), &uri, &token).await).await;
    assert_eq!(json["data"]["status"], "PENDING");
    assert!(json["data"]["reviewed_by_name"].is_null());
}

#[tokio::test]
async fn test_review_unknown_request_is_not_found() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;

    let response = patch_json_auth(
        app.app(),
        "/api/requests/404",
        json!({ "status": "APPROVED" }),
        &app.token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reviewer_without_name_is_recorded_by_email() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let unnamed = app.seed_staff("  ", "ops@example.org", Role::Superadmin).await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;

    let uri = format!("/api/requests/{}", request.id);
    let response = patch_json_auth(
        app.app(),
        &uri,
        json!({ "status": "RESOLVED" }),
        &app.token_for(&unnamed),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "RESOLVED");
    assert_eq!(json["data"]["reviewed_by_name"], "ops@example.org");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_removes_request_and_logs() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;
    let uri = format!("/api/requests/{}", request.id);

    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let logs = body_json(get_auth(app.app(), "/api/admin/logs?action=DELETE_REQUEST", &token).await).await;
    let data = logs["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["details"], "Deleted request from Ravi Kumar");
    assert_eq!(data[0]["entity_id"], request.id);

    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_student_cannot_delete() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let student = app.seed_student("ravi@example.org", true).await;
    let alumni = app.seed_alumni(&admin, "Priya Patel", "Google").await;
    let request = app.seed_request(alumni.id, "Ravi Kumar").await;

    let uri = format!("/api/requests/{}", request.id);
    let response = delete_auth(app.app(), &uri, &app.token_for(&student)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.app(), &uri, &app.token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
