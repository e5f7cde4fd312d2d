use axum::{
    routing::get,
    Router,
};

use crate::handlers::{cities, points_of_interest};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let city_routes = Router::new()
        .route("/cities", get(cities::list_cities).post(cities::create_city))
        .route(
            "/cities/{city_id}",
            get(cities::get_city)
                .put(cities::update_city)
                .delete(cities::delete_city),
        );

    let point_of_interest_routes = Router::new()
        .route(
            "/cities/{city_id}/pointsofinterest",
            get(points_of_interest::list_points_of_interest)
                .post(points_of_interest::create_point_of_interest),
        )
        .route(
            "/cities/{city_id}/pointsofinterest/{id}",
            get(points_of_interest::get_point_of_interest)
                .put(points_of_interest::update_point_of_interest)
                .patch(points_of_interest::partially_update_point_of_interest)
                .delete(points_of_interest::delete_point_of_interest),
        );

    Router::new()
        .nest("/api", city_routes.merge(point_of_interest_routes))
        .with_state(state)
}
