//! End-to-end tests of the page routes against the in-memory notes service.

use std::sync::Arc;
use std::time::Duration;

use api::MemoryApi;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use cookie::Key;
use http_body_util::BodyExt;
use tower::ServiceExt;
use web::{router, AppState, SessionStore};

const FORM: &str = "application/x-www-form-urlencoded";

fn app(api: &MemoryApi) -> Router {
    let sessions = SessionStore::new(Key::from(&[42u8; 64]));
    router(
        AppState::new(Arc::new(api.clone()), sessions),
        Duration::from_secs(5),
    )
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .unwrap()
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string())
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Sign in and return the `name=value` cookie pair to send back.
async fn sign_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post(
            "/login",
            "email=ada%40example.com&password=pw&_intent=login",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = set_cookie(&response).expect("session cookie");
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn login_sets_cookie_and_opens_notes() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);

    let response = app
        .clone()
        .oneshot(post(
            "/login",
            "email=ada%40example.com&password=pw",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Max-Age=604800"));

    let pair = cookie.split(';').next().unwrap();
    let response = app.clone().oneshot(get("/notes", Some(pair))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("ada@example.com"));
    assert!(html.contains("No notes found."));

    let response = app.oneshot(get("/", Some(pair))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");
}

#[tokio::test]
async fn register_creates_account() {
    let api = MemoryApi::new();
    let app = app(&api);

    let response = app
        .oneshot(post(
            "/login",
            "email=new%40example.com&password=pw&_intent=register",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(set_cookie(&response).is_some());
}

#[tokio::test]
async fn invalid_login_sets_no_cookie() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);

    let response = app
        .clone()
        .oneshot(post(
            "/login",
            "email=ada%40example.com&password=wrong",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Invalid email or password"));
    assert!(html.contains("ada@example.com"));

    let response = app.oneshot(get("/notes", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn blank_credentials_are_rejected_locally() {
    let api = MemoryApi::new();
    api.set_unreachable(true);

    let response = app(&api)
        .oneshot(post("/login", "email=&password=", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Email and password are required."));
}

#[tokio::test]
async fn logout_twice_clears_session() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);
    let cookie = sign_in(&app).await;

    for session in [Some(cookie.as_str()), None] {
        let response = app
            .clone()
            .oneshot(post("/logout", "", session))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("auth_token=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    let response = app.oneshot(get("/logout", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn protected_routes_redirect_without_session() {
    let api = MemoryApi::new();
    let app = app(&api);
    let forged = "auth_token=forged";

    for cookie in [None, Some(forged)] {
        let requests = vec![
            get("/notes", cookie),
            get("/notes?q=x&tag=y", cookie),
            get("/notes/new", cookie),
            get("/notes/1", cookie),
            post("/notes", "title=A", cookie),
            post("/notes/new", "title=A&content=B&tags=x", cookie),
            post("/notes/1", "title=A&_intent=save", cookie),
            post("/notes/1", "_intent=delete", cookie),
        ];
        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), "/login");
            assert!(set_cookie(&response).is_none());
        }
    }
    assert_eq!(api.mutation_count(), 0);
}

fn raw_post(uri: &str, content_type: Option<&str>, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    request.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn unreadable_requests_still_redirect_without_session() {
    let api = MemoryApi::new();
    let app = app(&api);

    let requests = vec![
        raw_post("/notes/1", None, "", None),
        raw_post("/notes/new", Some("application/json"), r#"{"title":"A"}"#, None),
        raw_post("/notes", Some("text/plain"), "title=A", None),
        get("/notes?q=a&q=b", None),
        get("/notes/1?tag=a&tag=b", None),
    ];
    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }
    assert_eq!(api.mutation_count(), 0);
}

#[tokio::test]
async fn unreadable_requests_render_inline_errors() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);
    let cookie = sign_in(&app).await;
    let cookie = Some(cookie.as_str());

    let response = app
        .clone()
        .oneshot(post("/notes/new", "title=Kept&content=body", cookie))
        .await
        .unwrap();
    let note_url = location(&response).to_string();
    let writes = api.mutation_count();

    let response = app
        .clone()
        .oneshot(get("/notes?q=a&q=b", cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Kept"));

    let response = app
        .clone()
        .oneshot(raw_post(&note_url, None, "", cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("The form could not be read."));
    assert!(html.contains("Kept"));

    let response = app
        .clone()
        .oneshot(raw_post(
            "/notes/new",
            Some("application/json"),
            r#"{"title":"A"}"#,
            cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("The form could not be read."));

    let response = app
        .clone()
        .oneshot(raw_post("/login", Some("application/json"), "{}", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
    assert!(body_text(response)
        .await
        .contains("The form could not be read."));

    let response = app.oneshot(get(&note_url, cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(api.mutation_count(), writes);
}

#[tokio::test]
async fn create_edit_and_delete_note() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);
    let cookie = sign_in(&app).await;
    let cookie = Some(cookie.as_str());

    let response = app
        .clone()
        .oneshot(post(
            "/notes/new",
            "title=Groceries&content=milk%0Aeggs&tags=home%2C+errands%2C%2C",
            cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let note_url = location(&response).to_string();
    assert!(note_url.starts_with("/notes/"));

    let response = app.clone().oneshot(get(&note_url, cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Groceries"));
    assert!(html.contains("home, errands"));

    let response = app
        .clone()
        .oneshot(post(
            &format!("{note_url}?tag=home"),
            "title=Shopping&content=milk&tags=home&_intent=save",
            cookie,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Saved."));
    assert!(html.contains("Shopping"));
    assert!(html.contains("notes?tag=home"));

    let response = app
        .clone()
        .oneshot(get("/notes?tag=home", cookie))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Shopping"));

    let response = app
        .clone()
        .oneshot(post(&note_url, "_intent=delete", cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");

    let response = app.clone().oneshot(get(&note_url, cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Note not found"));

    let response = app.oneshot(get("/notes", cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(!html.contains("Shopping"));
    assert!(html.contains("No notes found."));
}

#[tokio::test]
async fn quick_create_returns_to_list() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);
    let cookie = sign_in(&app).await;
    let cookie = Some(cookie.as_str());

    let response = app
        .clone()
        .oneshot(post("/notes", "title=+", cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/notes");

    let response = app.oneshot(get("/notes", cookie)).await.unwrap();
    assert!(body_text(response).await.contains("Untitled"));
    assert_eq!(api.mutation_count(), 1);
}

#[tokio::test]
async fn outage_sends_user_to_login_with_notice() {
    let api = MemoryApi::new().with_account("ada@example.com", "pw");
    let app = app(&api);
    let cookie = sign_in(&app).await;
    api.set_unreachable(true);

    let response = app
        .clone()
        .oneshot(get("/notes", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).is_none());

    let response = app.oneshot(get("/login", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("currently unreachable"));
}
