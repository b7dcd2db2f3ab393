use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tera::Context;
use tracing::error;

use crate::models::{BlockingPolicy, DistributionPolicy, EndpointGroup};
use crate::state::AppState;
use crate::synthesis;

/// Body of POST /api/design.
#[derive(Debug, Deserialize)]
pub struct DesignRequest {
    pub leaf_model: String,
    pub spine_model: String,
    pub endpoint_groups: Vec<EndpointGroup>,
    pub blocking: BlockingPolicy,
    #[serde(default)]
    pub distribution: DistributionPolicy,
}

fn render_template(
    tera: &tera::Tera,
    template: &str,
    context: &Context,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    tera.render(template, context).map(Html).map_err(|e| {
        error!("Template render error for '{}': {}", template, e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Render error")
    })
}

fn unprocessable(tag: &'static str, message: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": tag, "message": message })),
    )
        .into_response()
}

/// GET / - The designer page.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut context = Context::new();
    context.insert("switches", &state.catalog);
    render_template(&state.tera, "index.html", &context)
}

/// GET /api/catalog - The loaded switch catalog.
pub async fn api_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.clone())
}

/// POST /api/design - Run one synthesis request.
///
/// Request-shape problems (unknown models, empty groups, bad uplink count)
/// are rejected here; everything else is the synthesis core's verdict,
/// returned as a tagged JSON value either way.
pub async fn api_design(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DesignRequest>,
) -> Response {
    let Some(leaf) = state.find_switch(&request.leaf_model) else {
        return unprocessable(
            "unknown-switch-model",
            format!("leaf model '{}' is not in the catalog", request.leaf_model),
        );
    };
    let Some(spine) = state.find_switch(&request.spine_model) else {
        return unprocessable(
            "unknown-switch-model",
            format!("spine model '{}' is not in the catalog", request.spine_model),
        );
    };
    if request.endpoint_groups.is_empty()
        || request.endpoint_groups.iter().all(|group| group.count == 0)
    {
        return unprocessable(
            "empty-endpoint-groups",
            "at least one endpoint group with a non-zero count is required".to_string(),
        );
    }
    if matches!(
        request.blocking,
        BlockingPolicy::Custom { uplinks_per_leaf: 0 }
    ) {
        return unprocessable(
            "invalid-uplink-count",
            "custom uplinks per leaf must be a positive integer".to_string(),
        );
    }

    match synthesis::synthesize(
        leaf,
        spine,
        &request.endpoint_groups,
        request.blocking,
        request.distribution,
    ) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(err) => {
            // The error serializes with its own tag; attach the display
            // string for consumers that only want text.
            let mut body = serde_json::to_value(&err)
                .unwrap_or_else(|_| json!({ "error": "synthesis-failed" }));
            if let Some(fields) = body.as_object_mut() {
                fields.insert("message".to_string(), json!(err.to_string()));
            }
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
    }
}
