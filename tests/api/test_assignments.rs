//! Teacher-class-subject assignments.

use actix_web::http::StatusCode;
use school_remarks_lib::models::{ApprovalStatus, Role};
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_assign_teacher_to_several_classes() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let c3 = create_class(&pool, 3, "A").await;
    let c5 = create_class(&pool, 5, "A").await;
    let maths = create_subject(&pool, "Mathematics").await;
    let teacher = create_approved(&pool, "Mrs. Iyer", Role::Teacher).await;
    let admin = create_approved(&pool, "Admin", Role::Admin).await;

    let (status, body) = post(
        &app,
        "/api/v1/assignments",
        admin.caller(),
        json!({
            "teacher_id": teacher.user_id(),
            "subject_id": maths.id,
            "class_ids": [c5.id, c3.id, c5.id],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["assignment_ids"].as_array().unwrap().len(), 2);

    let (status, list) = get(
        &app,
        &format!("/api/v1/assignments?teacher_id={}", teacher.user_id()),
        admin.caller(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["teacher_name"], "Mrs. Iyer");
    assert_eq!(list[0]["subject_name"], "Mathematics");

    // The teacher now sees exactly those classes
    let (_, classes) = get(&app, "/api/v1/classes", teacher.caller()).await;
    assert_eq!(classes.as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_assignment_requires_teacher_subject_and_class() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 1, "A").await;
    let subject = create_subject(&pool, "English").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;

    for body in [
        json!({ "subject_id": subject.id, "class_ids": [class.id] }),
        json!({ "teacher_id": teacher.user_id(), "class_ids": [class.id] }),
        json!({ "teacher_id": teacher.user_id(), "subject_id": subject.id, "class_ids": [] }),
    ] {
        let (status, _) = post(&app, "/api/v1/assignments", Caller::Bootstrap, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let pending = create_user(&pool, "Pending", Role::Teacher, ApprovalStatus::Pending).await;
    let (status, _) = post(
        &app,
        "/api/v1/assignments",
        Caller::Bootstrap,
        json!({ "teacher_id": pending.user_id(), "subject_id": subject.id, "class_ids": [class.id] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(pool.list_teacher_classes(None).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn test_partial_failure_keeps_successful_rows() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let real = create_class(&pool, 4, "B").await;
    let subject = create_subject(&pool, "History").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    let missing = Uuid::new_v4();

    let (status, body) = post(
        &app,
        "/api/v1/assignments",
        Caller::Bootstrap,
        json!({
            "teacher_id": teacher.user_id(),
            "subject_id": subject.id,
            "class_ids": [real.id, missing],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "PARTIAL_FAILURE");
    assert_eq!(body["succeeded"], json!([real.id]));
    assert_eq!(body["failed"], json!([missing]));

    let stored = pool.list_teacher_classes(Some(teacher.user_id())).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].class_id, real.id);
}

#[actix_rt::test]
async fn test_delete_assignment() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 6, "A").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    let admin = create_approved(&pool, "A", Role::Superadmin).await;
    assign(&pool, &teacher, &class, None).await;
    let id = pool.list_teacher_classes(None).await.unwrap()[0].id;

    let (status, _) = delete(&app, &format!("/api/v1/assignments/{}", id), teacher.caller()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = delete(&app, &format!("/api/v1/assignments/{}", id), admin.caller()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = delete(&app, &format!("/api/v1/assignments/{}", id), admin.caller()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, classes) = get(&app, "/api/v1/classes", teacher.caller()).await;
    assert_eq!(classes, json!([]));
}

#[actix_rt::test]
async fn test_teacher_listing_only_includes_approved_teachers() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    create_approved(&pool, "Zara", Role::Teacher).await;
    create_approved(&pool, "Arjun", Role::Teacher).await;
    create_approved(&pool, "Boss", Role::Admin).await;
    create_user(&pool, "Waiting", Role::Teacher, ApprovalStatus::Pending).await;

    let (status, teachers) = get(&app, "/api/v1/teachers", Caller::Bootstrap).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = teachers
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Arjun", "Zara"]);
}
