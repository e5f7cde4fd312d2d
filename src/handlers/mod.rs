pub mod cities;
pub mod points_of_interest;

use axum::{
    http::{header, HeaderName, StatusCode},
    Json,
};

/// 201 response with a `Location` header pointing at the new resource.
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}
