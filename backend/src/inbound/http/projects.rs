//! Project API handlers.
//!
//! ```text
//! GET    /api/projects                  public, published only
//! GET    /api/projects/{id}            public
//! GET    /api/manage/projects?status=  admin
//! POST   /api/manage/projects          admin
//! PUT    /api/manage/projects/{id}     admin
//! DELETE /api/manage/projects/{id}     admin
//! ```
//!
//! Role enforcement for the `/api/manage` routes happens in the
//! authorization middleware, not here; handlers stay request/response
//! mapping only.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::{ApiError, Project, ProjectDraft, ProjectPatch, ProjectStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query filter for the administrative listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusFilter {
    /// Partition to enumerate.
    pub status: ProjectStatus,
}

/// List published projects for the public site.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Published projects", body = [Project]),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["projects"],
    operation_id = "listPublishedProjects",
    security([])
)]
#[get("/projects")]
pub async fn list_published(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Project>>> {
    let projects = state
        .projects
        .list_by_status(ProjectStatus::Published)
        .await?;
    Ok(web::Json(projects))
}

/// Fetch a single project by id, whatever its status.
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    responses(
        (status = 200, description = "Project", body = Project),
        (status = 404, description = "Unknown project", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["projects"],
    operation_id = "getProject",
    security([])
)]
#[get("/projects/{id}")]
pub async fn get_project(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Project>> {
    let project = state.projects.get(path.into_inner()).await?;
    Ok(web::Json(project))
}

/// Enumerate one partition for the admin console.
#[utoipa::path(
    get,
    path = "/api/manage/projects",
    params(StatusFilter),
    responses(
        (status = 200, description = "Projects in the partition", body = [Project]),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Missing the admin role", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["manage"],
    operation_id = "listProjectsByStatus"
)]
#[get("/manage/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    filter: web::Query<StatusFilter>,
) -> ApiResult<web::Json<Vec<Project>>> {
    let projects = state.projects.list_by_status(filter.status).await?;
    Ok(web::Json(projects))
}

/// Create a project in the partition matching its initial status.
#[utoipa::path(
    post,
    path = "/api/manage/projects",
    request_body = ProjectDraft,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Missing the admin role", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["manage"],
    operation_id = "createProject"
)]
#[post("/manage/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    payload: web::Json<ProjectDraft>,
) -> ApiResult<HttpResponse> {
    let project = state.projects.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Patch a project; a status change relocates it between partitions.
#[utoipa::path(
    put,
    path = "/api/manage/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Updated project", body = Project),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Missing the admin role", body = ApiError),
        (status = 404, description = "Unknown project", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["manage"],
    operation_id = "updateProject"
)]
#[put("/manage/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<ProjectPatch>,
) -> ApiResult<web::Json<Project>> {
    let project = state
        .projects
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(project))
}

/// Delete a project from whichever partition holds it.
#[utoipa::path(
    delete,
    path = "/api/manage/projects/{id}",
    params(("id" = Uuid, Path, description = "Project identifier")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Not authenticated", body = ApiError),
        (status = 403, description = "Missing the admin role", body = ApiError),
        (status = 404, description = "Unknown project", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["manage"],
    operation_id = "deleteProject"
)]
#[delete("/manage/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.projects.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    //! Handler mapping tests without the middleware chain; the full
    //! pipeline is covered by the integration tests.

    use super::*;
    use crate::domain::{ErrorCode, ProjectRepository};
    use crate::inbound::http;
    use crate::inbound::http::health::HealthState;
    use crate::outbound::persistence::InMemoryDocumentStore;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> HttpState {
        HttpState::new(ProjectRepository::new(Arc::new(
            InMemoryDocumentStore::default(),
        )))
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(web::Data::new(HealthState::new()))
                    .configure(http::configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn create_then_get_round_trips_caller_fields() {
        let app = init_app!(state());

        let create = test::TestRequest::post()
            .uri("/api/manage/projects")
            .set_json(json!({
                "title": "Observatory",
                "summary": "Night-sky gallery",
                "status": "draft",
            }))
            .to_request();
        let created: Project = test::call_and_read_body_json(&app, create).await;
        assert_eq!(created.title, "Observatory");
        assert_eq!(created.status, ProjectStatus::Draft);

        let fetch = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", created.id))
            .to_request();
        let fetched: Project = test::call_and_read_body_json(&app, fetch).await;
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn unknown_ids_map_to_resource_not_found() {
        let app = init_app!(state());
        let req = test::TestRequest::get()
            .uri(&format!("/api/projects/{}", Uuid::new_v4()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let payload: ApiError = test::read_body_json(res).await;
        assert_eq!(payload.code(), ErrorCode::ResourceNotFound);
    }

    #[actix_web::test]
    async fn out_of_range_status_maps_to_validation_failed() {
        let app = init_app!(state());
        let req = test::TestRequest::post()
            .uri("/api/manage/projects")
            .set_json(json!({ "title": "Observatory", "status": "retired" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: ApiError = test::read_body_json(res).await;
        assert_eq!(payload.code(), ErrorCode::ValidationFailed);
    }

    #[actix_web::test]
    async fn blank_titles_map_to_validation_failed() {
        let app = init_app!(state());
        let req = test::TestRequest::post()
            .uri("/api/manage/projects")
            .set_json(json!({ "title": "   ", "status": "draft" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_path_ids_map_to_validation_failed() {
        let app = init_app!(state());
        let req = test::TestRequest::get()
            .uri("/api/projects/not-a-uuid")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let payload: ApiError = test::read_body_json(res).await;
        assert_eq!(payload.code(), ErrorCode::ValidationFailed);
    }

    #[actix_web::test]
    async fn delete_distinguishes_gone_from_just_deleted() {
        let app = init_app!(state());

        let create = test::TestRequest::post()
            .uri("/api/manage/projects")
            .set_json(json!({ "title": "Observatory", "status": "draft" }))
            .to_request();
        let created: Project = test::call_and_read_body_json(&app, create).await;

        let uri = format!("/api/manage/projects/{}", created.id);
        let first = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request())
            .await;
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        let second = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request())
            .await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }
}
