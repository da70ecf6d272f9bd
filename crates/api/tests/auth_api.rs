//! HTTP-level integration tests for the `/api/auth` endpoints.
//!
//! Covers login, registration, session lookup, password change and the
//! username change rules.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, login_cookie, post_json, put_json, session_cookie, set_cookies,
    TEST_PASSWORD,
};
use folio_api::auth::password::hash_password;
use folio_core::roles::Role;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

fn registration(email: &str, username: &str) -> serde_json::Value {
    json!({
        "email": email,
        "username": username,
        "password": "long-enough-password",
        "firstName": "Ada",
        "lastName": "Lovelace",
    })
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_sets_session_cookie(pool: PgPool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            email: "a@b.com".into(),
            username: "ab_user".into(),
            password_hash: hash_password("correct").unwrap(),
            first_name: "A".into(),
            last_name: "B".into(),
            role: Role::User,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "a@b.com", "password": "correct" }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("token cookie must be set");
    assert!(cookie.starts_with("token="));
    let raw = &set_cookies(&response)[0];
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("SameSite=Lax"));
    assert!(raw.contains("Path=/"));
    assert!(raw.contains("Max-Age=604800"));

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "a@b.com");
    assert!(json["user"].get("passwordHash").is_none());
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_user_fail_identically(pool: PgPool) {
    create_user(&pool, "grace", Role::User).await;

    let app = common::build_test_app(pool.clone());
    let wrong = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "grace@example.com", "password": "not-the-password" }),
        None,
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&wrong).is_empty(), "no cookie on failed login");
    let wrong_json = body_json(wrong).await;

    let app = common::build_test_app(pool);
    let unknown = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": "whatever" }),
        None,
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&unknown).is_empty());
    let unknown_json = body_json(unknown).await;

    assert_eq!(wrong_json, unknown_json);
    assert_eq!(wrong_json["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_missing_fields_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/auth/login", json!({ "email": "a@b.com" }), None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_email_is_case_insensitive(pool: PgPool) {
    create_user(&pool, "hopper", Role::User).await;
    let app = common::build_test_app(pool);

    login_cookie(app, "  HOPPER@example.com ", TEST_PASSWORD).await;
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user_and_starts_session(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/auth/register",
        registration("Ada@Example.com", "Ada_L"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response).expect("registration sets the cookie");
    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["user"]["username"], "ada_l");
    assert_eq!(json["user"]["role"], "USER");

    let app = common::build_test_app(pool);
    let session = get(app, "/api/auth/session", Some(&cookie)).await;
    assert_eq!(session.status(), StatusCode::OK);
    assert_eq!(body_json(session).await["user"]["username"], "ada_l");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicates_with_409(pool: PgPool) {
    create_user(&pool, "taken", Role::User).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/auth/register",
        registration("taken@example.com", "fresh_name"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Email is already registered");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/auth/register",
        registration("fresh@example.com", "TAKEN"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Username is already taken");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_validates_input(pool: PgPool) {
    let cases = [
        registration("not-an-email", "valid_name"),
        registration("ok@example.com", "9starts_with_digit"),
        registration("ok@example.com", "ab"),
        json!({
            "email": "ok@example.com",
            "username": "valid_name",
            "password": "short",
            "firstName": "A",
            "lastName": "B",
        }),
        json!({
            "email": "ok@example.com",
            "username": "valid_name",
            "password": "long-enough-password",
            "firstName": "",
            "lastName": "B",
        }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/auth/register", body.clone(), None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_flow(pool: PgPool) {
    create_user(&pool, "linus", Role::User).await;
    let cookie = login_cookie(
        common::build_test_app(pool.clone()),
        "linus@example.com",
        TEST_PASSWORD,
    )
    .await;

    // Wrong current password.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/change-password",
        json!({ "currentPassword": "nope-nope", "newPassword": "brand-new-password" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Current password is incorrect");

    // New password too short.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/change-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "short" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Success clears the cookie.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/change-password",
        json!({ "currentPassword": TEST_PASSWORD, "newPassword": "brand-new-password" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookies(&response);
    assert!(cleared.iter().any(|c| c.starts_with("token=;") && c.contains("Max-Age=0")));

    // Old password no longer works, new one does.
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/auth/login",
        json!({ "email": "linus@example.com", "password": TEST_PASSWORD }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    login_cookie(
        common::build_test_app(pool),
        "linus@example.com",
        "brand-new-password",
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn change_password_requires_session(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/auth/change-password",
        json!({ "currentPassword": "a", "newPassword": "brand-new-password" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile and username
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_reflects_live_row(pool: PgPool) {
    let user = create_user(&pool, "margaret", Role::User).await;
    let cookie = login_cookie(
        common::build_test_app(pool.clone()),
        "margaret@example.com",
        TEST_PASSWORD,
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/auth/profile",
        json!({ "bio": "Sends things to the moon", "firstName": "Maggie" }),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = session_cookie(&response).expect("name change re-issues the cookie");

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/auth/profile",
        Some(&refreshed),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["bio"], "Sends things to the moon");
    assert_eq!(json["data"]["firstName"], "Maggie");

    let response = get(
        common::build_test_app(pool),
        "/api/auth/session",
        Some(&refreshed),
    )
    .await;
    assert_eq!(body_json(response).await["user"]["firstName"], "Maggie");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_email_taken_is_400(pool: PgPool) {
    create_user(&pool, "first", Role::User).await;
    create_user(&pool, "second", Role::User).await;
    let cookie = login_cookie(
        common::build_test_app(pool.clone()),
        "second@example.com",
        TEST_PASSWORD,
    )
    .await;

    let response = put_json(
        common::build_test_app(pool),
        "/api/auth/profile",
        json!({ "email": "FIRST@example.com" }),
        Some(&cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn username_change_rules(pool: PgPool) {
    create_user(&pool, "alan", Role::User).await;
    create_user(&pool, "occupied", Role::User).await;
    let cookie = login_cookie(
        common::build_test_app(pool.clone()),
        "alan@example.com",
        TEST_PASSWORD,
    )
    .await;

    let attempt = |username: &'static str, cookie: String| {
        let pool = pool.clone();
        async move {
            put_json(
                common::build_test_app(pool),
                "/api/auth/profile/username",
                json!({ "username": username }),
                Some(&cookie),
            )
            .await
        }
    };

    assert_eq!(attempt("1bad", cookie.clone()).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(attempt("alan", cookie.clone()).await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(attempt("Occupied", cookie.clone()).await.status(), StatusCode::CONFLICT);

    let response = attempt("turing", cookie.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = session_cookie(&response).expect("username change re-issues the cookie");
    assert_eq!(body_json(response).await["data"]["username"], "turing");

    let session = get(
        common::build_test_app(pool.clone()),
        "/api/auth/session",
        Some(&refreshed),
    )
    .await;
    assert_eq!(body_json(session).await["user"]["username"], "turing");

    // A second change within a year is refused.
    let response = attempt("turing_two", refreshed).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}
