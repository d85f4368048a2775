//! Tests, marks entry and results.

use actix_web::http::StatusCode;
use school_remarks_lib::models::Role;
use serde_json::{Value, json};

use super::test_helpers::*;

async fn create_school_test<S>(app: &S, caller: Caller<'_>, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    post(app, "/api/v1/tests", caller, body).await
}

#[actix_rt::test]
async fn test_create_test_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 8, "A").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    assign(&pool, &teacher, &class, None).await;

    let (status, _) = create_school_test(
        &app,
        teacher.caller(),
        json!({ "name": "Unit 1", "class_id": class.id, "total_marks": 50, "pass_marks": 60 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = create_school_test(
        &app,
        teacher.caller(),
        json!({ "name": "", "class_id": class.id, "total_marks": 50, "pass_marks": 20 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = create_school_test(
        &app,
        teacher.caller(),
        json!({ "name": "Unit 1", "class_id": class.id, "total_marks": 50, "pass_marks": 20, "test_date": "2025-02-10" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["test_date"], "2025-02-10");
    assert_eq!(body["created_by"], json!(teacher.user_id()));

    let (status, tests) = get(&app, &format!("/api/v1/classes/{}/tests", class.id), teacher.caller()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tests.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_teacher_cannot_create_test_for_other_class() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let other = create_class(&pool, 2, "B").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;

    let (status, _) = create_school_test(
        &app,
        teacher.caller(),
        json!({ "name": "Quiz", "class_id": other.id, "total_marks": 10, "pass_marks": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_resaving_marks_overwrites() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 10, "A").await;
    let student = create_student(&pool, &class, "Ira", "01").await;
    let admin = create_approved(&pool, "Admin", Role::Admin).await;

    let (_, test) = create_school_test(
        &app,
        admin.caller(),
        json!({ "name": "Final", "class_id": class.id, "total_marks": 100, "pass_marks": 40 }),
    )
    .await;
    let test_id = test["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/tests/{}/results", test_id);

    let (status, body) = put(
        &app,
        &uri,
        admin.caller(),
        json!({ "marks": [{ "student_id": student.id, "marks_obtained": 55 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], 1);

    let (status, _) = put(
        &app,
        &uri,
        admin.caller(),
        json!({ "marks": [{ "student_id": student.id, "marks_obtained": 72 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let test_uuid = uuid::Uuid::parse_str(&test_id).unwrap();
    let rows = pool.get_test_results(test_uuid).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].marks_obtained, 72);
}

#[actix_rt::test]
async fn test_marks_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 10, "A").await;
    let other_class = create_class(&pool, 11, "A").await;
    let student = create_student(&pool, &class, "Ira", "01").await;
    let stranger = create_student(&pool, &other_class, "Stranger", "01").await;
    let admin = create_approved(&pool, "Admin", Role::Admin).await;

    let (_, test) = create_school_test(
        &app,
        admin.caller(),
        json!({ "name": "Final", "class_id": class.id, "total_marks": 100, "pass_marks": 40 }),
    )
    .await;
    let uri = format!("/api/v1/tests/{}/results", test["id"].as_str().unwrap());

    for body in [
        json!({ "marks": [] }),
        json!({ "marks": [{ "student_id": student.id, "marks_obtained": 101 }] }),
        json!({ "marks": [{ "student_id": student.id, "marks_obtained": -1 }] }),
        json!({ "marks": [{ "student_id": stranger.id, "marks_obtained": 50 }] }),
    ] {
        let (status, _) = put(&app, &uri, admin.caller(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = put(
        &app,
        &format!("/api/v1/tests/{}/results", uuid::Uuid::new_v4()),
        admin.caller(),
        json!({ "marks": [{ "student_id": student.id, "marks_obtained": 5 }] }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_results_pass_fail_at_threshold() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 10, "A").await;
    let second = create_student(&pool, &class, "Zoya", "02").await;
    let first = create_student(&pool, &class, "Yash", "01").await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;
    assign(&pool, &teacher, &class, None).await;

    let (_, roster) = get(&app, &format!("/api/v1/classes/{}/roster", class.id), teacher.caller()).await;
    assert_eq!(student_names(&roster), vec!["Yash", "Zoya"]);

    let (_, test) = create_school_test(
        &app,
        teacher.caller(),
        json!({ "name": "Science", "class_id": class.id, "total_marks": 100, "pass_marks": 40 }),
    )
    .await;
    let uri = format!("/api/v1/tests/{}/results", test["id"].as_str().unwrap());

    let (status, _) = put(
        &app,
        &uri,
        teacher.caller(),
        json!({ "marks": [
            { "student_id": second.id, "marks_obtained": 40 },
            { "student_id": first.id, "marks_obtained": 39 }
        ] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, &uri, teacher.caller()).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["student_name"], "Yash");
    assert_eq!(results[0]["status"], "fail");
    assert_eq!(results[0]["percentage"], 39.0);
    assert_eq!(results[1]["status"], "pass");
    assert_eq!(results[1]["percentage"], 40.0);
    assert_eq!(body["summary"]["pass_count"], 1);
    assert_eq!(body["summary"]["fail_count"], 1);
    assert_eq!(body["summary"]["average_marks"], 39.5);
}
