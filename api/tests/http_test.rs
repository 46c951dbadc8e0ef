use std::{collections::BTreeMap, sync::Arc};

use axum::http::{
    HeaderName, HeaderValue, StatusCode,
    header::{COOKIE, LOCATION, SET_COOKIE},
};
use axum_test::{TestResponse, TestServer};
use clap::Parser;
use pocket_recipe_api::{
    application::http::server::{app_state::AppState, http_server::routes},
    args::Args,
};
use pocket_recipe_core::{
    application::service_from_connection,
    domain::common::IdentityConfig,
    entity::{categories, recipe_categories, recipes},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Value};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

const SITE_URL: &str = "https://recipes.example.com";
const SESSION_COOKIES: &str = "sb-access-token=access-1; sb-refresh-token=refresh-1";

fn test_server(identity: &MockServer, db: MockDatabase) -> TestServer {
    let uri = identity.uri();
    let args = Args::parse_from([
        "pocket-recipe-api",
        "--supabase-url",
        uri.as_str(),
        "--supabase-anon-key",
        "anon-key",
        "--site-url",
        SITE_URL,
    ]);

    let service = service_from_connection(
        Arc::new(db.into_connection()),
        IdentityConfig {
            supabase_url: uri.clone(),
            supabase_anon_key: "anon-key".to_string(),
            site_url: SITE_URL.to_string(),
        },
    );

    let state = AppState::new(Arc::new(args), service);
    TestServer::new(routes(state)).unwrap()
}

fn empty_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn cookie_header(value: &'static str) -> (HeaderName, HeaderValue) {
    (COOKIE, HeaderValue::from_static(value))
}

fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

fn session_body(access_token: &str, refresh_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": refresh_token,
        "user": {"id": "user-1", "email": "cook@example.com"}
    })
}

async fn mount_user(identity: &MockServer, access_token: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", format!("Bearer {}", access_token).as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "user-1", "email": "cook@example.com"})),
        )
        .mount(identity)
        .await;
}

fn recipe_model(id: Uuid, title: &str) -> recipes::Model {
    let now = chrono::Utc::now().fixed_offset();
    recipes::Model {
        id,
        user_id: "user-1".to_string(),
        title: title.to_string(),
        description: None,
        servings: Some(4),
        cook_time: None,
        source_type: "manual".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_anonymous_request_is_redirected_to_login() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_provider_error_fails_closed() {
    let identity = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&identity)
        .await;
    let server = test_server(&identity, empty_db());

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server.get("/recipes/new").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_page_echoes_feedback() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server
        .get("/login?error=Invalid%20login%20credentials")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"error": "Invalid login credentials", "message": null})
    );
}

#[tokio::test]
async fn test_list_recipes_for_session_user() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;

    let soup = Uuid::now_v7();
    let salad = Uuid::now_v7();
    let dinner = categories::Model {
        id: Uuid::now_v7(),
        name: "dinner".to_string(),
        created_at: chrono::Utc::now().fixed_offset(),
    };
    let db = empty_db()
        .append_query_results([vec![recipe_model(salad, "Salad"), recipe_model(soup, "Soup")]])
        .append_query_results([vec![(
            recipe_categories::Model {
                id: Uuid::now_v7(),
                recipe_id: soup,
                category_id: dinner.id,
            },
            dinner.clone(),
        )]]);
    let server = test_server(&identity, db);

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server.get("/").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["data"][0]["title"], "Salad");
    assert_eq!(body["data"][0]["categories"], json!([]));
    assert_eq!(body["data"][1]["title"], "Soup");
    assert_eq!(body["data"][1]["categories"][0]["name"], "dinner");
    assert_eq!(body["data"][1]["source_type"], "manual");
}

#[tokio::test]
async fn test_new_recipe_draft_has_one_blank_row() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    let server = test_server(&identity, empty_db());

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server.get("/recipes/new").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["ingredients"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["title"], "");
}

#[tokio::test]
async fn test_recipe_detail_not_found_cases() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    let db = empty_db().append_query_results([Vec::<recipes::Model>::new()]);
    let server = test_server(&identity, db);

    let (name, value) = cookie_header(SESSION_COOKIES);
    let malformed = server
        .get("/recipes/not-a-uuid")
        .add_header(name.clone(), value.clone())
        .await;
    assert_eq!(malformed.status_code(), StatusCode::NOT_FOUND);

    let missing = server
        .get(&format!("/recipes/{}", Uuid::now_v7()))
        .add_header(name, value)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<serde_json::Value>()["code"], "E_NOT_FOUND");
}

#[tokio::test]
async fn test_sign_in_sets_session_cookies() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("access-1", "refresh-1")))
        .expect(1)
        .mount(&identity)
        .await;
    let db = empty_db().append_exec_results([MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }]);
    let server = test_server(&identity, db);

    let response = server
        .post("/login")
        .form(&json!({"email": "cook@example.com", "password": "secret123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=access-1")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=refresh-1")));
    assert!(cookies.iter().all(|c| !c.starts_with("sb-access-token") || c.contains("HttpOnly")));
}

#[tokio::test]
async fn test_sign_in_failure_redirects_with_message() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
        )
        .mount(&identity)
        .await;
    let server = test_server(&identity, empty_db());

    let response = server
        .post("/login")
        .form(&json!({"email": "cook@example.com", "password": "wrong"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Invalid%20login%20credentials");
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_sign_in_with_blank_email_is_rejected_locally() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server
        .post("/login")
        .form(&json!({"email": "", "password": "secret123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Email%20is%20required");
}

#[tokio::test]
async fn test_sign_up_redirects_to_login_with_message() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .expect(1)
        .mount(&identity)
        .await;
    let server = test_server(&identity, empty_db());

    let response = server
        .post("/signup")
        .form(&json!({"email": "cook@example.com", "password": "secret123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?message=Confirmation%20email%20sent"));
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_oauth_start_redirects_to_provider() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server.post("/login/oauth/google").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with(&format!("{}/auth/v1/authorize?", identity.uri())));
    assert!(target.contains("provider=google"));
    assert!(target.contains("code_challenge_method=s256"));
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("sb-code-verifier=")));
}

#[tokio::test]
async fn test_oauth_unknown_provider() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server.post("/login/oauth/myspace").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/login?error=Unsupported%20provider%3A%20myspace"
    );
}

#[tokio::test]
async fn test_oauth_callback_without_verifier_fails() {
    let identity = MockServer::start().await;
    let server = test_server(&identity, empty_db());

    let response = server.get("/auth/callback?code=abc").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=Authentication%20failed");
}

#[tokio::test]
async fn test_oauth_callback_establishes_session() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "pkce"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("access-1", "refresh-1")))
        .expect(1)
        .mount(&identity)
        .await;
    let db = empty_db().append_exec_results([MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }]);
    let server = test_server(&identity, db);

    let (name, value) = cookie_header("sb-code-verifier=verifier-1");
    let response = server
        .get("/auth/callback?code=abc")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=access-1")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-code-verifier=;")));
}

#[tokio::test]
async fn test_sign_out_clears_cookies_even_when_provider_fails() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&identity)
        .await;
    let server = test_server(&identity, empty_db());

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server.post("/auth/signout").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=;")));
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed() {
    let identity = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "JWT expired"})))
        .mount(&identity)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("access-2", "refresh-2")))
        .expect(1)
        .mount(&identity)
        .await;
    let db = empty_db().append_query_results([Vec::<recipes::Model>::new()]);
    let server = test_server(&identity, db);

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server.get("/").add_header(name, value).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=access-2")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=refresh-2")));
}

#[tokio::test]
async fn test_create_recipe_redirects_home() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    let db = empty_db().append_query_results([vec![recipe_model(Uuid::now_v7(), "Toast")]]);
    let server = test_server(&identity, db);

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server
        .post("/recipes")
        .add_header(name, value)
        .json(&json!({"title": "Toast", "servings": "2"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_create_recipe_failure_echoes_input() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    let db = empty_db().append_query_errors([DbErr::Custom("connection reset".to_string())]);
    let server = test_server(&identity, db);

    let input = json!({
        "title": "Soup",
        "description": "",
        "servings": "4",
        "cook_time": "",
        "ingredients": [{"name": "Carrot", "amount": "2", "unit": ""}],
        "steps": [{"description": "Boil"}],
        "categories": ["dinner"]
    });
    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server
        .post("/recipes")
        .add_header(name, value)
        .json(&input)
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["message"], "Failed to save recipe. Please try again.");
    assert_eq!(body["input"], input);
}

#[tokio::test]
async fn test_create_recipe_blank_title_is_unprocessable() {
    let identity = MockServer::start().await;
    mount_user(&identity, "access-1").await;
    let server = test_server(&identity, empty_db());

    let (name, value) = cookie_header(SESSION_COOKIES);
    let response = server
        .post("/recipes")
        .add_header(name, value)
        .json(&json!({"title": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["message"], "Title is required");
    assert_eq!(body["input"]["title"], "   ");
}

#[tokio::test]
async fn test_readiness_reports_both_collaborators() {
    let identity = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "GoTrue"})))
        .mount(&identity)
        .await;
    let db = empty_db().append_query_results([[BTreeMap::from([(
        "num_items",
        Value::BigInt(Some(3)),
    )])]]);
    let server = test_server(&identity, db);

    let response = server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({
            "database": {"status": "ok", "user_count": 3},
            "identity_provider": {"status": "ok"}
        })
    );
}

#[tokio::test]
async fn test_readiness_unavailable_when_database_fails() {
    let identity = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&identity)
        .await;
    let db = empty_db().append_query_errors([DbErr::Custom("down".to_string())]);
    let server = test_server(&identity, db);

    let response = server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["identity_provider"]["status"], "ok");
    assert!(
        body["database"]["status"]
            .as_str()
            .is_some_and(|status| status.starts_with("error"))
    );
}
