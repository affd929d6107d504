//! Portfolio content handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::portfolio::{
    ExperienceRepository, ProfileRepository, ProjectRepository, SkillRepository,
};
use crate::web::dto::{
    ApiResponse, ExperienceRequest, ExperienceResponse, ExperienceUpdateRequest, ProfileRequest,
    ProfileResponse, ProjectRequest, ProjectResponse, ProjectUpdateRequest, SkillRequest,
    SkillResponse, SkillUpdateRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Query parameters for the public project list.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    /// When true, return only featured projects.
    pub featured: Option<bool>,
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/profile - Public profile.
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let repo = ProfileRepository::new(state.db.pool());
    let profile = repo
        .get()
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(Json(ApiResponse::new(ProfileResponse::from(profile))))
}

/// PUT /api/admin/profile - Replace the profile.
pub async fn put_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedJson(req): ValidatedJson<ProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let repo = ProfileRepository::new(state.db.pool());
    let profile = repo.upsert(&req.into_input()).await?;

    Ok(Json(ApiResponse::new(ProfileResponse::from(profile))))
}

// ============================================================================
// Projects
// ============================================================================

/// GET /api/projects - Public project list.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    let projects = if query.featured.unwrap_or(false) {
        repo.list_featured().await?
    } else {
        repo.list().await?
    };

    let data = projects.into_iter().map(ProjectResponse::from).collect();
    Ok(Json(ApiResponse::new(data)))
}

/// POST /api/admin/projects - Create a project.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedJson(req): ValidatedJson<ProjectRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    let project = repo.create(&req.into_new()).await?;

    Ok(Json(ApiResponse::new(ProjectResponse::from(project))))
}

/// PUT /api/admin/projects/:id - Update a project.
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ProjectUpdateRequest>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    let project = repo
        .update(id, &req.into_update())
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;

    Ok(Json(ApiResponse::new(ProjectResponse::from(project))))
}

/// DELETE /api/admin/projects/:id - Delete a project.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Project not found"));
    }

    Ok(Json(ApiResponse::new(())))
}

// ============================================================================
// Experience
// ============================================================================

/// GET /api/experience - Public experience list.
pub async fn list_experience(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ExperienceResponse>>>, ApiError> {
    let repo = ExperienceRepository::new(state.db.pool());
    let entries = repo.list().await?;

    let data = entries.into_iter().map(ExperienceResponse::from).collect();
    Ok(Json(ApiResponse::new(data)))
}

/// POST /api/admin/experience - Create an experience entry.
pub async fn create_experience(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedJson(req): ValidatedJson<ExperienceRequest>,
) -> Result<Json<ApiResponse<ExperienceResponse>>, ApiError> {
    let repo = ExperienceRepository::new(state.db.pool());
    let entry = repo.create(&req.into_new()).await?;

    Ok(Json(ApiResponse::new(ExperienceResponse::from(entry))))
}

/// PUT /api/admin/experience/:id - Update an experience entry.
pub async fn update_experience(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ExperienceUpdateRequest>,
) -> Result<Json<ApiResponse<ExperienceResponse>>, ApiError> {
    let repo = ExperienceRepository::new(state.db.pool());
    let entry = repo
        .update(id, &req.into_update())
        .await?
        .ok_or_else(|| ApiError::not_found("Experience entry not found"))?;

    Ok(Json(ApiResponse::new(ExperienceResponse::from(entry))))
}

/// DELETE /api/admin/experience/:id - Delete an experience entry.
pub async fn delete_experience(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = ExperienceRepository::new(state.db.pool());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Experience entry not found"));
    }

    Ok(Json(ApiResponse::new(())))
}

// ============================================================================
// Skills
// ============================================================================

/// GET /api/skills - Public skill list.
pub async fn list_skills(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SkillResponse>>>, ApiError> {
    let repo = SkillRepository::new(state.db.pool());
    let skills = repo.list().await?;

    let data = skills.into_iter().map(SkillResponse::from).collect();
    Ok(Json(ApiResponse::new(data)))
}

/// POST /api/admin/skills - Create a skill.
pub async fn create_skill(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedJson(req): ValidatedJson<SkillRequest>,
) -> Result<Json<ApiResponse<SkillResponse>>, ApiError> {
    let repo = SkillRepository::new(state.db.pool());
    let skill = repo.create(&req.into_new()).await?;

    Ok(Json(ApiResponse::new(SkillResponse::from(skill))))
}

/// PUT /api/admin/skills/:id - Update a skill.
pub async fn update_skill(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<SkillUpdateRequest>,
) -> Result<Json<ApiResponse<SkillResponse>>, ApiError> {
    let repo = SkillRepository::new(state.db.pool());
    let skill = repo
        .update(id, &req.into_update())
        .await?
        .ok_or_else(|| ApiError::not_found("Skill not found"))?;

    Ok(Json(ApiResponse::new(SkillResponse::from(skill))))
}

/// DELETE /api/admin/skills/:id - Delete a skill.
pub async fn delete_skill(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = SkillRepository::new(state.db.pool());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Skill not found"));
    }

    Ok(Json(ApiResponse::new(())))
}
