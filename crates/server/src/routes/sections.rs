use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use common::types::WriteResult;
use serde_json::Value;
use service::section::{default_document, validate, SectionName, SectionSummary};
use tracing::{info, warn};

use crate::{errors::JsonApiError, state::ServerState};

fn resolve(slug: &str) -> Result<SectionName, JsonApiError> {
    SectionName::from_slug(slug).ok_or_else(|| JsonApiError::unknown_section(slug))
}

/// Current document for a section, creating it from the builtin default on first read.
/// Store failures degrade to the builtin default instead of failing the request.
#[utoipa::path(
    get, path = "/api/{slug}", tag = "sections",
    params(("slug" = String, Path, description = "Section slug: hero-data, about-data, skills-data, projects-data, contact-data, footer-data or resume-data")),
    responses(
        (status = 200, description = "Section document"),
        (status = 404, description = "Unknown section", body = crate::openapi::WriteResultDoc)
    )
)]
pub async fn get_section(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let name = resolve(&slug)?;
    let fallback = default_document(name);
    match state.sections.read_or_create(name.as_str(), fallback.clone()).await {
        Ok(doc) => Ok(Json(doc)),
        Err(e) => {
            warn!(section = %name, error = %e, "section store failed; serving builtin default");
            Ok(Json(fallback))
        }
    }
}

/// Replace a section document with the JSON request body.
#[utoipa::path(
    post, path = "/api/{slug}", tag = "sections",
    params(("slug" = String, Path, description = "Section slug, e.g. hero-data")),
    responses(
        (status = 200, description = "Saved", body = crate::openapi::WriteResultDoc),
        (status = 401, description = "Admin key required", body = crate::openapi::WriteResultDoc),
        (status = 404, description = "Unknown section", body = crate::openapi::WriteResultDoc),
        (status = 500, description = "Invalid body or store failure", body = crate::openapi::WriteResultDoc)
    )
)]
pub async fn post_section(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    body: Bytes,
) -> Result<Json<WriteResult>, JsonApiError> {
    let name = resolve(&slug)?;

    let doc: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(section = %name, error = %e, "rejecting unparsable section body");
        JsonApiError::internal(format!("invalid JSON body for {name}: {e}"))
    })?;
    validate(name, &doc).map_err(|e| {
        warn!(section = %name, error = %e, "rejecting section body");
        JsonApiError::internal(e.to_string())
    })?;

    if state.sections.upsert(name.as_str(), doc).await {
        info!(section = %name, "section updated");
        Ok(Json(WriteResult::ok(format!("{name} data saved"))))
    } else {
        Err(JsonApiError::internal(format!("failed to save {name} data")))
    }
}

/// Stored sections with their last update time.
#[utoipa::path(
    get, path = "/api/sections", tag = "sections",
    responses(
        (status = 200, description = "Stored sections", body = [crate::openapi::SectionSummaryDoc]),
        (status = 500, description = "Store failure", body = crate::openapi::WriteResultDoc)
    )
)]
pub async fn list_sections(State(state): State<ServerState>) -> Result<Json<Vec<SectionSummary>>, JsonApiError> {
    state
        .sections
        .list()
        .await
        .map(Json)
        .map_err(|e| JsonApiError::internal(format!("cannot list sections: {e}")))
}
