mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth};
use serde_json::json;

fn profile(name: &str, email: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": email,
        "course": "M.Sc Data Science",
        "graduationYear": "2015",
        "currentRole": "Data Scientist",
        "company": "Flipkart",
        "domain": "Analytics",
        "location": "Hyderabad",
        "linkedin": "https://linkedin.com/in/example",
    })
}

// ---- Test: directory reads are public and filterable ----

#[tokio::test]
async fn listing_is_public_and_sorted_by_name() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    app.seed_alumni(&admin, "Vikram Rao", "Infosys").await;
    app.seed_alumni(&admin, "Aarav Sharma", "Google").await;

    let response = get(app.app(), "/api/alumni").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Aarav Sharma", "Vikram Rao"]);
}

#[tokio::test]
async fn search_matches_company_case_insensitively() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    app.seed_alumni(&admin, "Vikram Rao", "Infosys").await;
    app.seed_alumni(&admin, "Aarav Sharma", "Google").await;

    let json = body_json(get(app.app(), "/api/alumni?search=gOOg").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Aarav Sharma");
}

#[tokio::test]
async fn filters_combine_and_all_disables_them() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    app.seed_alumni(&admin, "Vikram Rao", "Infosys").await;
    post_json_auth(
        app.app(),
        "/api/alumni",
        profile("Neha Gupta", "neha@example.org"),
        &token,
    )
    .await;

    let json = body_json(get(app.app(), "/api/alumni?year=2015&course=data").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Neha Gupta");

    let json = body_json(get(app.app(), "/api/alumni?domain=technology&year=all").await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Vikram Rao");

    let json = body_json(get(app.app(), "/api/alumni?course=all&domain=&search=").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_numeric_year_filter_is_rejected() {
    let app = common::build_test_app();

    let response = get(app.app(), "/api/alumni?year=twenty").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_unknown_alumni_is_not_found() {
    let app = common::build_test_app();

    let response = get(app.app(), "/api/alumni/77").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Alumni with id 77 not found");
}

// ---- Test: writes require staff and are audited ----

#[tokio::test]
async fn create_coerces_year_and_logs() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);

    let response = post_json_auth(
        app.app(),
        "/api/alumni",
        profile("Neha Gupta", "neha@example.org"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["graduation_year"], 2015);
    assert_eq!(json["data"]["current_role"], "Data Scientist");
    assert!(json["data"]["summary"].is_null());

    let logs = body_json(get_auth(app.app(), "/api/admin/logs?action=ADD_ALUMNI", &token).await).await;
    let data = logs["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["details"], "Added alumni: Neha Gupta");
    assert_eq!(data[0]["entity"], "Alumni");
    assert_eq!(data[0]["entity_id"], id);
}

#[tokio::test]
async fn create_requires_staff() {
    let app = common::build_test_app();
    let student = app.seed_student("ravi@example.org", true).await;

    let response = post_json(app.app(), "/api/alumni", profile("Neha Gupta", "n@example.org")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        app.app(),
        "/api/alumni",
        profile("Neha Gupta", "n@example.org"),
        &app.token_for(&student),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(get(app.app(), "/api/alumni").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_missing_required_fields() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);

    for field in ["name", "course", "graduationYear"] {
        let mut body = profile("Neha Gupta", "neha@example.org");
        body.as_object_mut().unwrap().remove(field);

        let response = post_json_auth(app.app(), "/api/alumni", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Name, course, and graduation year are required");
    }
}

#[tokio::test]
async fn create_rejects_unparseable_year() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;

    let mut body = profile("Neha Gupta", "neha@example.org");
    body["graduationYear"] = json!("last year");

    let response = post_json_auth(app.app(), "/api/alumni", body, &app.token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);

    let first = post_json_auth(
        app.app(),
        "/api/alumni",
        profile("Neha Gupta", "neha@example.org"),
        &token,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(
        app.app(),
        "/api/alumni",
        profile("Neha G.", "neha@example.org"),
        &token,
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "An alumni record with this email already exists");
}

#[tokio::test]
async fn update_replaces_fields_and_logs() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let alumni = app.seed_alumni(&admin, "Vikram Rao", "Infosys").await;

    let mut body = profile("Vikram Rao", "vikram@example.org");
    body["company"] = json!("Microsoft");
    body["graduationYear"] = json!(2012);

    let uri = format!("/api/alumni/{}", alumni.id);
    let response = put_json_auth(app.app(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["company"], "Microsoft");
    assert_eq!(json["data"]["graduation_year"], 2012);
    assert_eq!(json["data"]["email"], "vikram@example.org");

    let logs = body_json(get_auth(app.app(), "/api/admin/logs?action=UPDATE_ALUMNI", &token).await).await;
    assert_eq!(logs["data"][0]["details"], "Updated alumni: Vikram Rao");
}

#[tokio::test]
async fn update_unknown_alumni_is_not_found() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;

    let response = put_json_auth(
        app.app(),
        "/api/alumni/999",
        profile("Nobody", "nobody@example.org"),
        &app.token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---- Test: delete cascades to connection requests ----

#[tokio::test]
async fn delete_removes_requests_and_logs_once() {
    let app = common::build_test_app();
    let admin = app.seed_admin().await;
    let token = app.token_for(&admin);
    let target = app.seed_alumni(&admin, "Vikram Rao", "Infosys").await;
    let other = app.seed_alumni(&admin, "Aarav Sharma", "Google").await;
    app.seed_request(target.id, "Ravi Kumar").await;
    app.seed_request(target.id, "Meera Nair").await;
    let kept = app.seed_request(other.id, "Ravi Kumar").await;

    let uri = format!("/api/alumni/{}", target.id);
    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted_requests"], 2);

    let response = get(app.app(), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let requests = body_json(get_auth(app.app(), "/api/requests", &token).await).await;
    let remaining = requests["data"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], kept.id);

    let logs = body_json(get_auth(app.app(), "/api/admin/logs?action=DELETE_ALUMNI", &token).await).await;
    let data = logs["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["details"], "Deleted alumni: Vikram Rao (2 requests removed)");
    assert_eq!(data[0]["entity_id"], target.id);

    let response = delete_auth(app.app(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
