//! Session handling and role-scoped visibility.

use actix_web::http::StatusCode;
use school_remarks_lib::models::{ApprovalStatus, Role};
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = get(&app, "/api/v1/classes", Caller::Anonymous).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = get(&app, "/api/v1/classes", Caller::Token("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid token, but no profile yet
    let token = mint_token(Uuid::new_v4());
    let (status, _) = get(&app, "/api/v1/classes", Caller::Token(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_pending_user_is_blocked_but_can_read_own_profile() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let pending = create_user(&pool, "Nisha Verma", Role::Teacher, ApprovalStatus::Pending).await;

    let (status, body) = get(&app, "/api/v1/dashboard", pending.caller()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let (status, body) = get(&app, "/api/v1/me", pending.caller()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["approval_status"], "pending");
    assert_eq!(body["capabilities"], json!([]));
}

#[actix_rt::test]
async fn test_rejected_user_is_blocked() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let rejected = create_user(&pool, "R", Role::Teacher, ApprovalStatus::Rejected).await;

    let (status, _) = get(&app, "/api/v1/students", rejected.caller()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_teacher_without_assignments_sees_nothing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 4, "A").await;
    create_student(&pool, &class, "Asha", "01").await;
    let teacher = create_approved(&pool, "Mr. Khan", Role::Teacher).await;
    let admin = create_approved(&pool, "Ms. Admin", Role::Admin).await;

    let (status, classes) = get(&app, "/api/v1/classes", teacher.caller()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classes, json!([]));

    let (_, students) = get(&app, "/api/v1/students", teacher.caller()).await;
    assert_eq!(students, json!([]));

    let (_, overview) = get(&app, "/api/v1/dashboard", teacher.caller()).await;
    assert_eq!(overview["view"], "teacher");
    assert_eq!(overview["total_students"], 0);
    assert_eq!(overview["total_classes"], 0);

    // The admin still sees the class
    let (_, overview) = get(&app, "/api/v1/dashboard", admin.caller()).await;
    assert_eq!(overview["view"], "admin");
    assert_eq!(overview["total_students"], 1);
}

#[actix_rt::test]
async fn test_teacher_classes_are_deduplicated_and_sorted() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let c5 = create_class(&pool, 5, "A").await;
    let c3 = create_class(&pool, 3, "B").await;
    create_class(&pool, 8, "A").await;
    let maths = create_subject(&pool, "Mathematics").await;
    let science = create_subject(&pool, "Science").await;
    let teacher = create_approved(&pool, "Mrs. Das", Role::Teacher).await;

    assign(&pool, &teacher, &c5, Some(&maths)).await;
    assign(&pool, &teacher, &c5, Some(&science)).await;
    assign(&pool, &teacher, &c3, Some(&maths)).await;

    let (status, classes) = get(&app, "/api/v1/classes", teacher.caller()).await;
    assert_eq!(status, StatusCode::OK);
    let numbers: Vec<i64> = classes
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![3, 5]);
}

#[actix_rt::test]
async fn test_requesting_inaccessible_class_yields_empty_list() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let mine = create_class(&pool, 2, "A").await;
    let other = create_class(&pool, 6, "C").await;
    create_student(&pool, &mine, "Mine", "01").await;
    create_student(&pool, &other, "Other", "01").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    assign(&pool, &teacher, &mine, None).await;

    let (_, students) = get(&app, "/api/v1/students?class_number=6&section=C", teacher.caller()).await;
    assert_eq!(students, json!([]));

    let (_, students) = get(&app, "/api/v1/students", teacher.caller()).await;
    assert_eq!(student_names(&students), vec!["Mine"]);
}

#[actix_rt::test]
async fn test_search_requires_capability() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    let principal = create_approved(&pool, "P", Role::Principal).await;

    let (status, _) = get(&app, "/api/v1/students/search", teacher.caller()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/students/search", principal.caller()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/v1/users/pending", principal.caller()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = get(&app, "/api/v1/health", Caller::Anonymous).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/api/v1/ready", Caller::Anonymous).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}
