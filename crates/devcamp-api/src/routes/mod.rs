mod bootcamps;
mod courses;
mod health;
mod items;
mod reviews;

use axum::Router;
use axum::routing::get;
use devcamp_lists::{ListError, ListService, Resources};
use devcamp_store::MemoryStore;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/api/v1/bootcamps",
            get(bootcamps::list).post(bootcamps::create),
        )
        .route(
            "/api/v1/bootcamps/{id}",
            get(bootcamps::get)
                .put(bootcamps::update)
                .delete(bootcamps::delete),
        )
        .route(
            "/api/v1/bootcamps/{id}/courses",
            get(courses::for_bootcamp).post(courses::create),
        )
        .route(
            "/api/v1/bootcamps/{id}/reviews",
            get(reviews::for_bootcamp).post(reviews::create),
        )
        .route("/api/v1/courses", get(courses::list))
        .route(
            "/api/v1/courses/{id}",
            get(courses::get).put(courses::update).delete(courses::delete),
        )
        .route("/api/v1/reviews", get(reviews::list))
        .route(
            "/api/v1/reviews/{id}",
            get(reviews::get).put(reviews::update).delete(reviews::delete),
        )
}

/// Run a store operation on the blocking pool, bounded by the request timeout.
pub(crate) async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ListService<MemoryStore>, &Resources) -> Result<T, ListError> + Send + 'static,
{
    let lists = state.lists.clone();
    let resources = state.resources.clone();
    let task = tokio::task::spawn_blocking(move || f(&lists, &resources));

    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(join)) => Err(ApiError::Internal(join.to_string())),
        Err(_) => Err(ApiError::Timeout),
    }
}
