#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{Value, json};

use gymsite::config::Config;
use gymsite::contact::HostedFormClient;
use gymsite::contact::parser::{FieldMap, parse_multipart};
use gymsite::site::SiteRegistry;

pub const SITE: &str = "velozo-boxing";

/// How the stand-in hosted form service answers.
#[derive(Debug, Clone, Copy)]
pub enum Upstream {
    /// `{"ok": true}`
    Accept,
    /// 422 with `{"errors": [{"message": ...}]}`
    RejectWithMessage,
    /// 400 with `{"ok": false}` and no errors list
    RejectBare,
    /// 200 with an HTML body
    NotJson,
    /// Accepts after a delay, long enough to overlap a second request.
    Slow,
    /// Nothing listens at the endpoint.
    Unreachable,
}

impl Upstream {
    fn path(&self) -> &'static str {
        match self {
            Upstream::Accept | Upstream::Unreachable => "accept",
            Upstream::RejectWithMessage => "reject",
            Upstream::RejectBare => "reject-bare",
            Upstream::NotJson => "html",
            Upstream::Slow => "slow",
        }
    }
}

pub const UPSTREAM_ERROR: &str = "Zadejte platný email";

/// Submissions the stand-in service received, in arrival order.
#[derive(Clone, Default)]
pub struct Received(Arc<Mutex<Vec<FieldMap>>>);

impl Received {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn all(&self) -> Vec<FieldMap> {
        self.0.lock().unwrap().clone()
    }
}

async fn hosted_form(
    State(received): State<Received>,
    Path(mode): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Ok(fields) = parse_multipart(&headers, body).await else {
        return (StatusCode::BAD_REQUEST, "expected multipart").into_response();
    };
    received.0.lock().unwrap().push(fields);

    match mode.as_str() {
        "accept" => Json(json!({ "ok": true, "next": "/thanks" })).into_response(),
        "reject" => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": [{ "field": "email", "message": UPSTREAM_ERROR }] })),
        )
            .into_response(),
        "reject-bare" => (StatusCode::BAD_REQUEST, Json(json!({ "ok": false }))).into_response(),
        "html" => "<html><body>Thanks!</body></html>".into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({ "ok": true })).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_upstream() -> (SocketAddr, Received) {
    let received = Received::default();
    let app = Router::new()
        .route("/f/{mode}", post(hosted_form))
        .with_state(received.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Upstream failed");
    });

    (addr, received)
}

/// A running gymsite instance wired to a stand-in hosted form service.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub received: Received,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed")
    }

    pub async fn get_text(&self, path: &str) -> (String, StatusCode) {
        let resp = self.get(path).await;
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }

    /// Post the contact form urlencoded, asking for JSON, return (body, status).
    pub async fn submit_json(&self, slug: &str, fields: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/{slug}/contact")))
            .header("accept", "application/json")
            .form(fields)
            .send()
            .await
            .expect("contact submit failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Post the contact form the way a browser without script does, return (html, status).
    pub async fn submit_html(&self, slug: &str, fields: &[(&str, &str)]) -> (String, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/{slug}/contact")))
            .header("accept", "text/html")
            .form(fields)
            .send()
            .await
            .expect("contact submit failed");
        let status = resp.status();
        (resp.text().await.unwrap_or_default(), status)
    }
}

/// A complete, valid submission for the boxing site.
pub fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("firstName", "Jan"),
        ("lastName", "Novák"),
        ("email", "jan@example.com"),
        ("phone", "+420 777 123 456"),
        ("interest", "boxing"),
        ("message", "Chci začít trénovat."),
    ]
}

pub fn test_config(rate_limit: u32) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        sites_dir: PathBuf::from("sites"),
        static_dir: PathBuf::from("static"),
        max_body_size: 65_536,
        form_timeout: Duration::from_secs(5),
        rate_limit,
        rate_window_secs: 60,
        trusted_proxies: vec![],
        log_level: "warn".to_string(),
    }
}

/// Bundled sites with every form endpoint pointed at `url`.
pub fn sites_posting_to(url: &str) -> SiteRegistry {
    let bundled = SiteRegistry::load_dir(std::path::Path::new("sites")).expect("bundled sites load");
    let sites = bundled
        .iter()
        .map(|site| {
            let mut site = (**site).clone();
            site.form.endpoint.url = url.to_string();
            site
        })
        .collect();
    SiteRegistry::from_sites(sites).expect("rewired sites validate")
}

/// An address that was just free and now has no listener.
fn closed_port_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    listener.local_addr().unwrap()
}

pub async fn spawn_app(upstream: Upstream) -> TestApp {
    spawn_app_with(upstream, 100).await
}

pub async fn spawn_app_with(upstream: Upstream, rate_limit: u32) -> TestApp {
    let (upstream_addr, received) = spawn_upstream().await;

    let endpoint = match upstream {
        Upstream::Unreachable => format!("http://{}/f/accept", closed_port_addr()),
        other => format!("http://{upstream_addr}/f/{}", other.path()),
    };

    let config = test_config(rate_limit);
    let forms = Arc::new(HostedFormClient::new(config.form_timeout).expect("http client"));
    let app = gymsite::build_app(config, sites_posting_to(&endpoint), forms);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        received,
    }
}
