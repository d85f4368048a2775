//! Shared helpers for API integration tests.

use actix_web::http::StatusCode;
use actix_web::{App, dev::ServiceResponse, test, web};
use jsonwebtoken::{EncodingKey, Header, encode};
use school_remarks_lib::auth::{AdminKey, SessionClaims};
use school_remarks_lib::config::{DatabaseConfig, SessionSettings};
use school_remarks_lib::db::DbPool;
use school_remarks_lib::models::{ApprovalStatus, Class, Profile, Role, Student, Subject};
use secrecy::SecretString;
use serde_json::Value;
use uuid::Uuid;

/// Admin key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-api-tests";

/// Secret the test "identity provider" signs sessions with.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-api-tests";

/// Fresh in-memory database with all migrations applied.
pub async fn create_test_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let pool = DbPool::new(&config)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test app exposing every API route.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let settings = SessionSettings {
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
        issuer: None,
    };
    let admin_key = AdminKey::new(Some(TEST_ADMIN_KEY.to_string()));

    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(admin_key))
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/api/v1")
                    .configure(school_remarks_lib::api::configure_health_routes)
                    .configure(school_remarks_lib::api::configure_api_routes),
            ),
    )
    .await
}

/// Sign a session token for an identity user id.
pub fn mint_token(user_id: Uuid) -> String {
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        iat: Some(chrono::Utc::now().timestamp() as usize),
        iss: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

/// Who is making a request.
#[derive(Clone, Copy)]
pub enum Caller<'a> {
    Anonymous,
    Bootstrap,
    Token(&'a str),
}

/// A profile with a signed token.
pub struct TestUser {
    pub profile: Profile,
    pub token: String,
}

impl TestUser {
    pub fn caller(&self) -> Caller<'_> {
        Caller::Token(&self.token)
    }

    pub fn user_id(&self) -> Uuid {
        self.profile.user_id
    }
}

/// Insert a profile and mint its token.
pub async fn create_user(
    pool: &DbPool,
    name: &str,
    role: Role,
    status: ApprovalStatus,
) -> TestUser {
    let user_id = Uuid::new_v4();
    let profile = pool
        .insert_profile(user_id, name, role, status)
        .await
        .expect("Failed to insert profile");
    TestUser {
        profile,
        token: mint_token(user_id),
    }
}

pub async fn create_approved(pool: &DbPool, name: &str, role: Role) -> TestUser {
    create_user(pool, name, role, ApprovalStatus::Approved).await
}

pub async fn create_class(pool: &DbPool, number: i32, section: &str) -> Class {
    pool.insert_class(number, section)
        .await
        .expect("Failed to insert class")
}

pub async fn create_student(pool: &DbPool, class: &Class, name: &str, roll: &str) -> Student {
    pool.insert_student(class.id, name, roll)
        .await
        .expect("Failed to insert student")
}

pub async fn create_subject(pool: &DbPool, name: &str) -> Subject {
    pool.insert_subject(name)
        .await
        .expect("Failed to insert subject")
}

pub async fn assign(pool: &DbPool, teacher: &TestUser, class: &Class, subject: Option<&Subject>) {
    pool.insert_teacher_class(teacher.user_id(), class.id, subject.map(|s| s.id))
        .await
        .expect("Failed to insert assignment");
}

fn with_caller(req: test::TestRequest, caller: Caller<'_>) -> test::TestRequest {
    match caller {
        Caller::Anonymous => req,
        Caller::Bootstrap => req.insert_header(("X-Admin-Key", TEST_ADMIN_KEY)),
        Caller::Token(token) => req.insert_header(("Authorization", format!("Bearer {}", token))),
    }
}

async fn finish(resp: ServiceResponse) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get<S>(app: &S, uri: &str, caller: Caller<'_>) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = with_caller(test::TestRequest::get().uri(uri), caller).to_request();
    finish(test::call_service(app, req).await).await
}

pub async fn post<S>(app: &S, uri: &str, caller: Caller<'_>, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = with_caller(test::TestRequest::post().uri(uri).set_json(body), caller).to_request();
    finish(test::call_service(app, req).await).await
}

pub async fn put<S>(app: &S, uri: &str, caller: Caller<'_>, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = with_caller(test::TestRequest::put().uri(uri).set_json(body), caller).to_request();
    finish(test::call_service(app, req).await).await
}

pub async fn delete<S>(app: &S, uri: &str, caller: Caller<'_>) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = with_caller(test::TestRequest::delete().uri(uri), caller).to_request();
    finish(test::call_service(app, req).await).await
}

/// Names of the students in a JSON array, in order.
pub fn student_names(students: &Value) -> Vec<String> {
    students
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|s| s["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
