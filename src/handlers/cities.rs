use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::city;
use crate::error::{AppError, AppResult};
use crate::handlers::points_of_interest::{PointOfInterestRequest, PointOfInterestResponse};
use crate::handlers::{created, Created};
use crate::repository::{CityInfoRepository, CityWithPointsOfInterest};
use crate::utils::validation::{not_blank, ValidatedJson, NAME_PATTERN};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CityRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "must be at most 50 characters"),
        regex(path = *NAME_PATTERN, message = "must contain only letters and spaces")
    )]
    pub name: String,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub points_of_interest: Vec<PointOfInterestRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub points_of_interest: Vec<PointOfInterestResponse>,
}

impl From<CityWithPointsOfInterest> for CityResponse {
    fn from((city, points): CityWithPointsOfInterest) -> Self {
        Self {
            id: city.id,
            name: city.name,
            description: city.description,
            points_of_interest: points.into_iter().map(Into::into).collect(),
        }
    }
}

/// List all cities with their points of interest
pub async fn list_cities(State(state): State<AppState>) -> AppResult<Json<Vec<CityResponse>>> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let cities = repo.get_cities().await?;

    Ok(Json(cities.into_iter().map(Into::into).collect()))
}

/// Get a city by id
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
) -> AppResult<Json<CityResponse>> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let city = repo
        .get_city(city_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City {}", city_id)))?;

    Ok(Json(city.into()))
}

/// Create a city, along with any points of interest in the body
pub async fn create_city(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CityRequest>,
) -> AppResult<Created<CityResponse>> {
    let repo = CityInfoRepository::begin(&state.db).await?;

    let city = repo
        .add_city(city::ActiveModel {
            name: Set(payload.name),
            description: Set(payload.description),
            ..Default::default()
        })
        .await?;

    let mut points = Vec::with_capacity(payload.points_of_interest.len());
    for point in payload.points_of_interest {
        points.push(repo.add_point_of_interest_for_city(city.id, point.into()).await?);
    }

    repo.save().await?;

    tracing::info!(city_id = city.id, "City created");

    let location = format!("/api/cities/{}", city.id);
    Ok(created(location, (city, points).into()))
}

/// Replace the name and description of a city
pub async fn update_city(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CityRequest>,
) -> AppResult<StatusCode> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let (mut city, _) = repo
        .get_city(city_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City {}", city_id)))?;

    city.name = payload.name;
    city.description = payload.description;

    repo.update_city(city).await?;
    repo.save().await?;

    tracing::info!(city_id, "City updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a city and its points of interest
pub async fn delete_city(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
) -> AppResult<StatusCode> {
    let repo = CityInfoRepository::begin(&state.db).await?;
    let (city, points) = repo
        .get_city(city_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City {}", city_id)))?;

    repo.delete_city(city).await?;
    repo.save().await?;

    tracing::info!(city_id, points_of_interest = points.len(), "City deleted");

    Ok(StatusCode::NO_CONTENT)
}
