//! OpenAPI surface used by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{ApiError, ErrorCode, Project, ProjectDraft, ProjectPatch, ProjectStatus};
use crate::inbound::http::{health, projects};

/// Aggregated OpenAPI document for the public and administrative APIs.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::live,
        health::ready,
        projects::list_published,
        projects::get_project,
        projects::list_projects,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        Project,
        ProjectDraft,
        ProjectPatch,
        ProjectStatus,
    )),
    tags(
        (name = "projects", description = "Public portfolio projects"),
        (name = "manage", description = "Administrative project management"),
        (name = "health", description = "Orchestration probes"),
    )
)]
pub struct ApiDoc;
