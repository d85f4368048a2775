//! Student search.

use actix_web::http::StatusCode;
use school_remarks_lib::models::Role;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_tag_search_uses_and_semantics() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let class = create_class(&pool, 7, "A").await;
    let anil = create_student(&pool, &class, "Anil", "01").await;
    let bina = create_student(&pool, &class, "Bina", "02").await;
    let chetan = create_student(&pool, &class, "Chetan", "03").await;
    create_student(&pool, &class, "Deepa", "04").await;
    let admin = create_approved(&pool, "Admin", Role::Admin).await;

    let remarks = [
        (&anil, 3, vec!["Punctual"]),
        (&anil, 3, vec!["Creative"]),
        (&bina, 5, vec!["Punctual", "Creative"]),
        (&chetan, 5, vec!["Punctual"]),
    ];
    for (student, rating, tags) in remarks {
        let (status, _) = post(
            &app,
            &format!("/api/v1/students/{}/remarks", student.id),
            admin.caller(),
            json!({ "rating": rating, "tags": tags }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(
        &app,
        "/api/v1/students/search?tags=Punctual,Creative",
        admin.caller(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(student_names(&body["students"]), vec!["Bina", "Anil"]);
    assert_eq!(body["total"], 2);
    assert_eq!(body["available_tags"], json!(["Creative", "Punctual"]));

    let (_, body) = get(&app, "/api/v1/students/search", admin.caller()).await;
    assert_eq!(
        student_names(&body["students"]),
        vec!["Bina", "Chetan", "Anil", "Deepa"]
    );

    let (_, body) = get(&app, "/api/v1/students/search?q=%20CHE%20", admin.caller()).await;
    assert_eq!(student_names(&body["students"]), vec!["Chetan"]);
}

#[actix_rt::test]
async fn test_remark_tag_catalog() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let teacher = create_approved(&pool, "T", Role::Teacher).await;

    let (status, body) = get(&app, "/api/v1/remark-tags", teacher.caller()).await;
    assert_eq!(status, StatusCode::OK);
    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 12);
    assert_eq!(tags[0], "Disciplined");
    assert_eq!(tags[11], "Punctual");
}
