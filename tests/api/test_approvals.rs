//! Registration and user approval flows.

use actix_web::http::StatusCode;
use school_remarks_lib::models::{ApprovalStatus, Role};
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_registration_is_idempotent_and_pending() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let user_id = Uuid::new_v4();
    let token = mint_token(user_id);

    let (status, body) = post(
        &app,
        "/api/v1/me/profile",
        Caller::Token(&token),
        json!({ "full_name": "  Priya Nair " }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["full_name"], "Priya Nair");
    assert_eq!(body["profile"]["role"], "teacher");
    assert_eq!(body["profile"]["approval_status"], "pending");
    let profile_id = body["profile"]["id"].clone();

    let (_, again) = post(
        &app,
        "/api/v1/me/profile",
        Caller::Token(&token),
        json!({ "full_name": "Someone Else" }),
    )
    .await;
    assert_eq!(again["profile"]["id"], profile_id);
    assert_eq!(again["profile"]["full_name"], "Priya Nair");

    assert_eq!(pool.get_user_role(user_id).await.unwrap(), Some(Role::Teacher));
}

#[actix_rt::test]
async fn test_concurrent_registration_returns_one_profile() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let user_id = Uuid::new_v4();
    let token = mint_token(user_id);
    let body = json!({ "full_name": "Asha Rao" });

    let ((first_status, first), (second_status, second)) = tokio::join!(
        post(&app, "/api/v1/me/profile", Caller::Token(&token), body.clone()),
        post(&app, "/api/v1/me/profile", Caller::Token(&token), body.clone()),
    );
    assert!(first_status.is_success(), "first registration: {}", first);
    assert!(second_status.is_success(), "second registration: {}", second);
    assert_eq!(first["profile"]["id"], second["profile"]["id"]);

    let pending = pool.list_pending_profiles().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, user_id);
}

#[actix_rt::test]
async fn test_registration_requires_name() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let token = mint_token(Uuid::new_v4());

    let (status, _) = post(&app, "/api/v1/me/profile", Caller::Token(&token), json!({ "full_name": " " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_admin_lists_and_approves_pending_users() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let admin = create_approved(&pool, "Head Admin", Role::Admin).await;
    let first = create_user(&pool, "First", Role::Teacher, ApprovalStatus::Pending).await;
    let second = create_user(&pool, "Second", Role::Teacher, ApprovalStatus::Pending).await;

    let (status, pending) = get(&app, "/api/v1/users/pending", admin.caller()).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);

    let (status, body) = post(
        &app,
        &format!("/api/v1/users/{}/approve", first.profile.id),
        admin.caller(),
        json!({ "role": "principal" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approval_status"], "approved");
    assert_eq!(body["role"], "principal");

    // Newly approved principal can now use the dashboard
    let (status, overview) = get(&app, "/api/v1/dashboard", first.caller()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["role_display_name"], "Principal");

    let (status, body) = post(
        &app,
        &format!("/api/v1/users/{}/reject", second.profile.id),
        admin.caller(),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["approval_status"], "rejected");

    let (_, pending) = get(&app, "/api/v1/users/pending", admin.caller()).await;
    assert_eq!(pending, json!([]));
}

#[actix_rt::test]
async fn test_approve_validates_role_and_target() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pending = create_user(&pool, "P", Role::Teacher, ApprovalStatus::Pending).await;

    let (status, _) = post(
        &app,
        &format!("/api/v1/users/{}/approve", pending.profile.id),
        Caller::Bootstrap,
        json!({ "role": "superadmin" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        &format!("/api/v1/users/{}/approve", Uuid::new_v4()),
        Caller::Bootstrap,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bootstrap approval without a role keeps the teacher role
    let (status, body) = post(
        &app,
        &format!("/api/v1/users/{}/approve", pending.profile.id),
        Caller::Bootstrap,
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "teacher");
}

#[actix_rt::test]
async fn test_wrong_admin_key_is_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = actix_web::test::TestRequest::get()
        .uri("/api/v1/users/pending")
        .insert_header(("X-Admin-Key", "wrong"))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
