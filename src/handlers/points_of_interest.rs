use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateLength, ValidationErrors};

use crate::entities::point_of_interest;
use crate::error::{AppError, AppResult};
use crate::handlers::{created, Created};
use crate::repository::CityInfoRepository;
use crate::utils::patch::{PatchOperation, PatchPath, Patchable};
use crate::utils::validation::{rule_error, ValidatedJson, NAME_PATTERN};
use crate::AppState;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// Field rules, plus the conditional one: a point of interest may be
/// anonymous unless it carries a description. Every failure is reported
/// against the field it concerns.
impl Validate for PointOfInterestRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !self.name.validate_length(None, Some(50u64), None) {
            errors.add("name", rule_error("length", "must be at most 50 characters"));
        }
        if !NAME_PATTERN.is_match(&self.name) {
            errors.add(
                "name",
                rule_error("regex", "must contain only letters and spaces"),
            );
        }

        let described = self.description.as_deref().is_some_and(|d| !d.is_empty());
        if described && self.name.trim().is_empty() {
            errors.add(
                "name",
                rule_error("required", "name is required when a description is given"),
            );
        }

        if let Some(description) = &self.description {
            if !description.validate_length(None, Some(200u64), None) {
                errors.add(
                    "description",
                    rule_error("length", "must be at most 200 characters"),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<&point_of_interest::Model> for PointOfInterestRequest {
    fn from(model: &point_of_interest::Model) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }
}

impl From<PointOfInterestRequest> for point_of_interest::ActiveModel {
    fn from(request: PointOfInterestRequest) -> Self {
        point_of_interest::ActiveModel {
            name: Set(request.name),
            description: Set(request.description),
            ..Default::default()
        }
    }
}

impl Patchable for PointOfInterestRequest {
    fn set_field(&mut self, path: PatchPath, value: Option<String>) {
        match path {
            PatchPath::Name => self.name = value.unwrap_or_default(),
            PatchPath::Description => self.description = value,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterestResponse {
    pub id: i32,
    pub city_id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<point_of_interest::Model> for PointOfInterestResponse {
    fn from(model: point_of_interest::Model) -> Self {
        Self {
            id: model.id,
            city_id: model.city_id,
            name: model.name,
            description: model.description,
        }
    }
}

async fn ensure_city_exists(repo: &CityInfoRepository, city_id: i32) -> AppResult<()> {
    if !repo.city_exists(city_id).await? {
        return Err(AppError::NotFound(format!("City {}", city_id)));
    }
    Ok(())
}

async fn find_point_of_interest(
    repo: &CityInfoRepository,
    city_id: i32,
    id: i32,
) -> AppResult<point_of_interest::Model> {
    ensure_city_exists(repo, city_id).await?;

    repo.get_point_of_interest_for_city(city_id, id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Point of interest {} in city {}", id, city_id))
        })
}

/// List the points of interest of a city
pub async fn list_points_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
) -> AppResult<Json<Vec<PointOfInterestResponse>>> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    ensure_city_exists(&repo, city_id).await?;

    let points = repo.get_points_of_interest_for_city(city_id).await?;

    Ok(Json(points.into_iter().map(Into::into).collect()))
}

/// Get one point of interest of a city
pub async fn get_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
) -> AppResult<Json<PointOfInterestResponse>> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let point = find_point_of_interest(&repo, city_id, id).await?;

    Ok(Json(point.into()))
}

/// Create a point of interest under a city
pub async fn create_point_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<PointOfInterestRequest>,
) -> AppResult<Created<PointOfInterestResponse>> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    ensure_city_exists(&repo, city_id).await?;

    let point = repo
        .add_point_of_interest_for_city(city_id, payload.into())
        .await?;
    repo.save().await?;

    tracing::info!(city_id, point_of_interest_id = point.id, "Point of interest created");

    let location = format!("/api/cities/{}/pointsofinterest/{}", city_id, point.id);
    Ok(created(location, point.into()))
}

/// Replace a point of interest
pub async fn update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<PointOfInterestRequest>,
) -> AppResult<StatusCode> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let mut point = find_point_of_interest(&repo, city_id, id).await?;

    point.name = payload.name;
    point.description = payload.description;

    repo.update_point_of_interest_for_city(city_id, point).await?;
    repo.save().await?;

    tracing::info!(city_id, point_of_interest_id = id, "Point of interest updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Apply a patch document to a point of interest
///
/// The operations run in order against the request view of the stored point
/// of interest. The result has to pass the same rules as a full replace
/// before anything is written.
pub async fn partially_update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
    WithRejection(Json(operations), _): WithRejection<Json<Vec<PatchOperation>>, AppError>,
) -> AppResult<StatusCode> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let mut point = find_point_of_interest(&repo, city_id, id).await?;

    let mut patched = PointOfInterestRequest::from(&point);
    patched.apply_patch(operations);
    patched.validate()?;

    point.name = patched.name;
    point.description = patched.description;

    repo.update_point_of_interest_for_city(city_id, point).await?;
    repo.save().await?;

    tracing::info!(city_id, point_of_interest_id = id, "Point of interest patched");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a point of interest
pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let point = find_point_of_interest(&repo, city_id, id).await?;

    repo.delete_point_of_interest_for_city(point).await?;
    repo.save().await?;

    tracing::info!(city_id, point_of_interest_id = id, "Point of interest deleted");

    Ok(StatusCode::NO_CONTENT)
}
