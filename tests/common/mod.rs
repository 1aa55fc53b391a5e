//! Common test utilities for e2e tests
//!
//! Builds the full router (request-id middleware, tracing, panic recovery,
//! documentation endpoint) around a sample module exercising every handler
//! shape.

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;
use validator::Validate;

use web_service_template::application::route_handlers::Handler;
use web_service_template::infrastructure::driven_adapters::config::AppConfig;
use web_service_template::infrastructure::driving_adapters::api_rest::modules::health;
use web_service_template::infrastructure::driving_adapters::api_rest::{create_router, RequestBinder, RouteModule};

/// Test application context
pub struct TestApp {
    pub router: axum::Router,
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application mounting the health and sample modules
    pub fn new() -> Self {
        let config = create_test_config();
        let router = create_router(&config, vec![health::module().unwrap(), sample_module(&config)])
            .expect("Failed to build test router");

        Self { router, config }
    }

    /// Send a request without a body
    pub async fn send(&self, method: Method, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Send a request with a raw JSON body
    pub async fn send_json(&self, method: Method, uri: &str, body: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Create a test configuration
fn create_test_config() -> AppConfig {
    AppConfig::from_toml(
        r#"
[server]
host = "127.0.0.1"
port = 0

[metadata]
title = "Sample API"
version = "v1"
docs_path = "/docs"

[metadata.host]
description = "Test host"
url = "http://localhost:8080"

[binding]
body_limit = 4096
"#,
    )
    .expect("Failed to build test config")
}

/// Request model for the sample greeting routes
#[derive(Debug, Deserialize, Validate)]
pub struct GreetingRequest {
    #[validate(required(message = "name is required"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 10, message = "times must be between 1 and 10"))]
    #[serde(default = "default_times")]
    pub times: u32,
}

fn default_times() -> u32 {
    1
}

/// Response payload of the sample greeting routes
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GreetingResponse {
    pub greeting: String,
}

/// Nested request model for the sample order route
#[derive(Debug, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(nested)]
    pub address: Address,
    #[validate(nested)]
    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderLine {
    #[validate(length(min = 3, message = "sku must have at least 3 characters"))]
    pub sku: String,
}

fn greet(request: &GreetingRequest) -> anyhow::Result<Json<GreetingResponse>> {
    let name = request.name.as_deref().unwrap_or_default();
    if name == "error" {
        anyhow::bail!("greeting service unavailable");
    }
    Ok(Json(GreetingResponse {
        greeting: vec![format!("hello {name}"); request.times as usize].join(" "),
    }))
}

/// A module with one route per handler shape
fn sample_module(config: &AppConfig) -> RouteModule {
    let mut module = RouteModule::with_binder("/sample", RequestBinder::from(&config.binding));
    module
        .get_named("sample-ok", "/ok", Handler::sync(|| Ok("ok")))
        .unwrap()
        .get_named(
            "sample-ok-async",
            "/ok-async",
            Handler::from_async(|| async { Ok("ok") }),
        )
        .unwrap()
        .get_named(
            "sample-fail",
            "/fail",
            Handler::<_, &str>::sync(|| Err(anyhow::anyhow!("something broke"))),
        )
        .unwrap()
        .get_named(
            "sample-panic",
            "/panic",
            Handler::<_, &str>::sync(|| panic!("handler exploded")),
        )
        .unwrap()
        .post_named(
            "sample-greet",
            "/greetings",
            Handler::with_model(|request: GreetingRequest| greet(&request)),
        )
        .unwrap()
        .get_named(
            "sample-greet-query",
            "/greetings",
            Handler::with_model(|request: GreetingRequest| greet(&request)),
        )
        .unwrap()
        .post_named(
            "sample-greet-async",
            "/greetings/:lang",
            Handler::with_model_async(|request: GreetingRequest| async move {
                tokio::task::yield_now().await;
                greet(&request)
            }),
        )
        .unwrap()
        .post_named(
            "sample-order",
            "/orders",
            Handler::with_model(|order: OrderRequest| Ok(format!("order to {}", order.address.city))),
        )
        .unwrap();
    module
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Read a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
