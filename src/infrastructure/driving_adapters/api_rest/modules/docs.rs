//! Documentation Module
//!
//! Serves the API documentation:
//! - `GET {docs_path}` redirects to the viewer
//! - `GET {docs_path}/openapi.json` returns the generated OpenAPI document
//! - `GET /index.html` is the Swagger UI page, which loads the document,
//!   with its assets next to it at the root

use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use utoipa_swagger_ui::Config;

use crate::application::route_handlers::Handler;
use crate::domain::models::route::{join_path, RouteRegistration};
use crate::infrastructure::driven_adapters::config::MetadataConfig;
use crate::infrastructure::driving_adapters::api_rest::module::RouteModule;
use crate::infrastructure::driving_adapters::api_rest::openapi::build_document;
use crate::shared::errors::RouteError;

/// Location of the documentation viewer page
pub const VIEWER_PATH: &str = "/index.html";

/// Path of the OpenAPI document, relative to the docs path
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Files the viewer page loads, served from the root beside it
const VIEWER_ASSETS: [&str; 8] = [
    "swagger-ui.css",
    "index.css",
    "swagger-ui-bundle.js",
    "swagger-ui-standalone-preset.js",
    "swagger-initializer.js",
    "favicon-32x32.png",
    "favicon-16x16.png",
    "oauth2-redirect.html",
];

/// Build the documentation module describing `routes`
///
/// Metadata is read once here; the served document never changes afterward.
///
/// # Errors
///
/// Returns `RouteError::Duplicate` if the docs path collides with the viewer page.
pub fn module(routes: &[RouteRegistration], metadata: &MetadataConfig) -> Result<RouteModule, RouteError> {
    let docs_path = join_path("/", &metadata.docs_path);
    let document = build_document(routes, metadata);
    let viewer = Arc::new(Config::new([join_path(&docs_path, OPENAPI_PATH)]));

    tracing::info!(
        docs_path = %docs_path,
        routes = routes.len(),
        "Documentation endpoint configured"
    );

    let mut docs = RouteModule::new(docs_path);
    docs.get_named("docs", "/", Handler::from_async(|| async { Ok(Redirect::to(VIEWER_PATH)) }))?
        .get_named("docs-openapi", OPENAPI_PATH, Handler::sync(move || Ok(Json(document.clone()))))?;

    let mut assets = RouteModule::new("/");
    for asset in std::iter::once("index.html").chain(VIEWER_ASSETS) {
        let config = Arc::clone(&viewer);
        assets.get_named(
            &format!("docs-viewer-{asset}"),
            &format!("/{asset}"),
            Handler::sync(move || viewer_file(asset, &config)),
        )?;
    }

    docs.mount(assets)?;
    Ok(docs)
}

/// Serve one Swagger UI file, with the initializer pointed at the document
fn viewer_file(asset: &str, config: &Arc<Config<'static>>) -> anyhow::Result<Response> {
    let file = utoipa_swagger_ui::serve(asset, Arc::clone(config))
        .map_err(|err| anyhow::anyhow!("Failed to serve {asset}: {err}"))?;

    Ok(match file {
        Some(file) => ([(header::CONTENT_TYPE, file.content_type)], file.bytes.into_owned()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}
