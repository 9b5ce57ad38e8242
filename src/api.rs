use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use log::error;

use crate::{
    models::{Activity, ActivityFilter},
    store::ActivityStore,
};

const INDEX_PAGE: &str = include_str!("../static/index.html");

pub fn router(store: ActivityStore) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/activities", get(list_activities))
        .with_state(store)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn list_activities(
    State(store): State<ActivityStore>,
    Query(filter): Query<ActivityFilter>,
) -> Result<Json<Vec<Activity>>, StatusCode> {
    match store.list(&filter).await {
        Ok(activities) => Ok(Json(activities)),
        Err(e) => {
            error!("Failed to list activities: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
