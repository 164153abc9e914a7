//! Helpers for driving the router in tests.

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request, StatusCode,
    },
    response::Response,
    Router,
};
use tower::ServiceExt;

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    cookie: Option<&str>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(COOKIE, cookie);
    }
    let body = match body {
        Some(b) => {
            req = req.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(b.to_owned())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(req.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    send(app, Method::POST, uri, Some(body), cookie).await
}

pub async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// `name=value` of the first Set-Cookie header for `name`.
pub fn set_cookie(res: &Response, name: &str) -> Option<String> {
    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{name}=")))
        .map(str::to_owned)
}

pub fn session_cookie(res: &Response) -> Option<String> {
    set_cookie(res, "session")
}

pub fn location(res: &Response) -> &str {
    res.headers()[LOCATION].to_str().unwrap()
}

/// Registers `username` and logs in, returning the `session=...` cookie pair.
pub async fn signup_and_login(app: &Router, username: &str, password: &str) -> String {
    let signup = format!("username={username}&password={password}&email={username}%40example.com");
    let res = post_form(app, "/create_account", &signup, None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let login = format!("username={username}&password={password}");
    let res = post_form(app, "/login", &login, None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/recipes");
    session_cookie(&res).expect("session cookie")
}
