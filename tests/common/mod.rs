#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::SignedCookieJar;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use movieshelf::{AppState, config::Config, csrf, db};

pub const ACCESS_TOKEN: &str = "test-token";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Counts the calls the fake movie database has served.
#[derive(Clone, Default)]
pub struct FakeTmdb {
    pub searches: Arc<AtomicUsize>,
    pub lookups: Arc<AtomicUsize>,
}

impl FakeTmdb {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub tmdb: FakeTmdb,
}

/// Builds the real router on an in-memory database, talking to a fake TMDB
/// served from a local listener.
pub async fn build_test_app() -> TestApp {
    let tmdb = FakeTmdb::default();
    let base_url = spawn_fake_tmdb(tmdb.clone()).await;

    let config = Arc::new(Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        secret_key: "test-secret-key-that-is-long-enough-000".to_string(),
        tmdb_access_token: ACCESS_TOKEN.to_string(),
        tmdb_base_url: base_url,
        tmdb_image_base_url: IMAGE_BASE.to_string(),
        database_url: "sqlite::memory:".to_string(),
        tmdb_rps: 100,
        http_timeout_secs: 5,
    });

    let db = db::connect_and_migrate(&config.database_url).await.unwrap();
    let http = wreq::Client::builder().build().unwrap();
    let state = AppState::new(config, db, http);

    TestApp { router: movieshelf::app(state.clone()), state, tmdb }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Posts a urlencoded form carrying a valid CSRF cookie and token.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let (cookie, token) = self.csrf_pair();
        let mut fields = fields.to_vec();
        fields.push(("csrf_token", token.as_str()));
        self.post_raw(uri, &encode(&fields), Some(&cookie)).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(Body::from(body.to_string())).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// A signed `csrf_token` cookie header value and the matching token.
    pub fn csrf_pair(&self) -> (String, String) {
        let (jar, token) = csrf::issue(SignedCookieJar::new(self.state.key.clone()));
        let response = jar.into_response();
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();
        (cookie, token)
    }
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

fn encode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v.replace('%', "%25").replace('&', "%26").replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

async fn spawn_fake_tmdb(tmdb: FakeTmdb) -> String {
    let router = Router::new()
        .route("/search/movie", get(fake_search))
        .route("/movie/{id}", get(fake_details))
        .with_state(tmdb);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ACCESS_TOKEN}"))
}

async fn fake_search(
    State(tmdb): State<FakeTmdb>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    tmdb.searches.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let query = params.get("query").map(String::as_str).unwrap_or_default();
    let results = match query {
        "Heat" => json!([
            {"id": 949, "title": "Heat", "release_date": "1995-12-15", "poster_path": "/heat.jpg"},
            {"id": 11859, "title": "Heat", "release_date": "1986-03-14", "poster_path": null},
        ]),
        "Fight Club" => json!([
            {"id": 550, "title": "Fight Club", "release_date": "1999-10-15", "poster_path": "/fc.jpg"},
        ]),
        _ => json!([]),
    };
    Json(json!({"page": 1, "results": results, "total_pages": 1})).into_response()
}

async fn fake_details(
    State(tmdb): State<FakeTmdb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    tmdb.lookups.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let body = match id.parse::<i64>().unwrap_or_default() {
        550 => json!({
            "id": 550,
            "title": "Fight Club",
            "release_date": "1999-10-15",
            "overview": "A ticking-time-bomb insomniac and a slippery soap salesman...",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
        }),
        949 => json!({
            "id": 949,
            "title": "Heat",
            "release_date": "1995-12-15",
            "overview": "Obsessive master thief Neil McCauley...",
            "poster_path": "/heat.jpg",
        }),
        777 => json!({"id": 777, "title": "Untitled Project", "release_date": "", "overview": ""}),
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"status_code": 34, "status_message": "The resource you requested could not be found."})),
            )
                .into_response();
        },
    };
    Json(body).into_response()
}
