// REST API endpoints and the table page

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{view, ErrorResponse, SortRequest};
use crate::error::AppError;
use crate::routes::sorter::{RouteTable, SortKey};
use crate::routes::{Route, TableSnapshot};

/// Shared application state. The table is the only mutable piece.
#[derive(Debug)]
pub struct AppState {
    table: RwLock<RouteTable>,
    title: String,
    hostname: String,
}

impl AppState {
    pub fn new(routes: Vec<Route>, title: String, hostname: String) -> Self {
        AppState {
            table: RwLock::new(RouteTable::new(routes)),
            title,
            hostname,
        }
    }

    async fn snapshot(&self) -> TableSnapshot {
        let table = self.table.read().await;
        self.snapshot_of(&table)
    }

    fn snapshot_of(&self, table: &RouteTable) -> TableSnapshot {
        TableSnapshot {
            hostname: self.hostname.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            sort: table.state(),
            routes: table.routes().to_vec(),
        }
    }

    /// Apply a header click under the write lock and return the new snapshot.
    async fn sort_by(&self, key: SortKey) -> TableSnapshot {
        let mut table = self.table.write().await;
        let state = table.apply(key);
        tracing::info!("Sorted {} routes by {} ({:?})", table.routes().len(), key, state.direction);
        self.snapshot_of(&table)
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(err: AppError) -> ApiError {
    tracing::warn!("Rejected request: {}", err);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&err)))
}

pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/sort/:key", post(sort_click))
        .route("/api/routes", get(get_routes))
        .route("/api/sort", post(post_sort))
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let table = state.table.read().await;
    Html(view::render_page(&state.title, &table))
}

async fn sort_click(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Redirect, ApiError> {
    let key: SortKey = key.parse().map_err(bad_request)?;
    state.sort_by(key).await;
    Ok(Redirect::to("/"))
}

async fn get_routes(State(state): State<Arc<AppState>>) -> Json<TableSnapshot> {
    Json(state.snapshot().await)
}

async fn post_sort(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SortRequest>,
) -> Result<Json<TableSnapshot>, ApiError> {
    let key: SortKey = request.key.parse().map_err(bad_request)?;
    Ok(Json(state.sort_by(key).await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::sorter::SortDirection;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let routes = vec![
            Route::new("10.0.0.1", "/24", "192.168.0.10", "eth1"),
            Route::new("1.1.1.1", "/32", "192.168.0.2", "Eth0"),
            Route::new("10.0.0.2", "/16", "10.1.0.1", "eth10"),
        ];
        let state = Arc::new(AppState::new(routes, "Routes".to_string(), "testhost".to_string()));
        create_api_router(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_sort_request(key: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/sort")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"key":"{}"}}"#, key)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_routes_unsorted() {
        let app = test_app();
        let response = app
            .oneshot(Request::builder().uri("/api/routes").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot: TableSnapshot = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot.hostname, "testhost");
        assert_eq!(snapshot.sort.key, None);
        assert_eq!(snapshot.routes[0].address, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_post_sort_toggles() {
        let app = test_app();

        let response = app.clone().oneshot(post_sort_request("gateway")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let first: TableSnapshot = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(first.sort.key, Some(SortKey::Gateway));
        assert_eq!(first.sort.direction, SortDirection::Ascending);
        assert_eq!(first.routes[0].gateway, "10.1.0.1");

        let response = app.oneshot(post_sort_request("gateway")).await.unwrap();
        let second: TableSnapshot = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(second.sort.direction, SortDirection::Descending);

        let mut reversed = first.routes.clone();
        reversed.reverse();
        assert_eq!(second.routes, reversed);
    }

    #[tokio::test]
    async fn test_post_sort_unknown_key() {
        let response = test_app().oneshot(post_sort_request("metric")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(error.error, "InvalidSortKey");
    }

    fn header_click(key: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/sort/{}", key))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_header_click_redirects_and_renders_arrow() {
        let app = test_app();

        let response = app.clone().oneshot(header_click("address")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Destination address ▲"));
        let first = html.find("1.1.1.1/32").unwrap();
        let second = html.find("10.0.0.1/24").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_header_click_unknown_column() {
        let response = test_app().oneshot(header_click("metric")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_on_sort_link_leaves_state_alone() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/sort/address").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let response = app
            .oneshot(Request::builder().uri("/api/routes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let snapshot: TableSnapshot = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(snapshot.sort.key, None);
    }
}
