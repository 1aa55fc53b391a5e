//! OpenAPI Document
//!
//! Builds an OpenAPI 3.0 document from the registered routes and the API
//! metadata in configuration.

use std::collections::BTreeMap;

use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::path::{OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItemBuilder, PathItemType};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::server::ServerBuilder;
use utoipa::openapi::{OpenApi, OpenApiBuilder, PathsBuilder, Required};

use crate::domain::models::route::{RouteRegistration, Verb};
use crate::infrastructure::driven_adapters::config::MetadataConfig;

/// Describe `routes` using the title, version and host from `metadata`
#[must_use]
pub fn build_document(routes: &[RouteRegistration], metadata: &MetadataConfig) -> OpenApi {
    let mut items: BTreeMap<String, PathItemBuilder> = BTreeMap::new();
    for route in routes {
        let (path, parameters) = openapi_path(route.path());
        let item = items.remove(&path).unwrap_or_else(PathItemBuilder::new);
        items.insert(path, item.operation(path_item_type(route.verb()), operation(route, parameters)));
    }

    let paths = items
        .into_iter()
        .fold(PathsBuilder::new(), |paths, (path, item)| paths.path(path, item.build()));

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(metadata.title.clone())
                .version(metadata.version.clone())
                .build(),
        )
        .servers(Some(vec![ServerBuilder::new()
            .url(metadata.host.url.clone())
            .description(Some(metadata.host.description.clone()))
            .build()]))
        .paths(paths.build())
        .build()
}

fn operation(route: &RouteRegistration, parameters: Vec<Parameter>) -> utoipa::openapi::path::Operation {
    let mut operation = parameters
        .into_iter()
        .fold(OperationBuilder::new(), |builder, parameter| builder.parameter(parameter))
        .operation_id(Some(route.name()))
        .response("200", ResponseBuilder::new().description("Success").build());

    if route.accepts_model() {
        operation = operation.response(
            "400",
            ResponseBuilder::new()
                .description("The request model did not bind or failed validation")
                .build(),
        );
    }

    operation
        .response("500", ResponseBuilder::new().description("The handler failed").build())
        .build()
}

fn path_item_type(verb: Verb) -> PathItemType {
    match verb {
        Verb::Get => PathItemType::Get,
        Verb::Post => PathItemType::Post,
        Verb::Put => PathItemType::Put,
        Verb::Patch => PathItemType::Patch,
        Verb::Delete => PathItemType::Delete,
    }
}

/// Rewrite axum `:param` and `*rest` segments as OpenAPI `{param}` templates
fn openapi_path(path: &str) -> (String, Vec<Parameter>) {
    let mut parameters = Vec::new();
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| match segment.strip_prefix(':').or_else(|| segment.strip_prefix('*')) {
            Some(name) if !name.is_empty() => {
                parameters.push(
                    ParameterBuilder::new()
                        .name(name)
                        .parameter_in(ParameterIn::Path)
                        .required(Required::True)
                        .schema(Some(Schema::Object(
                            ObjectBuilder::new().schema_type(SchemaType::String).build(),
                        )))
                        .build(),
                );
                format!("{{{name}}}")
            }
            _ => segment.to_string(),
        })
        .collect();

    (segments.join("/"), parameters)
}
