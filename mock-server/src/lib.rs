use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const TITLE_MAX: usize = 63;
pub const DESCRIPTION_MAX: usize = 250;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub user_id: u64,
    pub count: u32,
    pub date: NaiveDate,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub wishlist_id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WishlistPayload {
    pub title: String,
    pub description: String,
    pub user_id: u64,
    pub count: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    #[serde(alias = "item_name")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<u64>,
}

impl SearchQuery {
    fn matches(&self, w: &Wishlist) -> bool {
        self.title.as_ref().is_none_or(|t| &w.title == t)
            && self.description.as_ref().is_none_or(|d| &w.description == d)
            && self.user_id.is_none_or(|u| w.user_id == u)
    }
}

#[derive(Debug, Default)]
pub struct Store {
    wishlists: BTreeMap<u64, Wishlist>,
    next_wishlist_id: u64,
    next_item_id: u64,
}

impl Store {
    fn wishlist_id(&mut self) -> u64 {
        self.next_wishlist_id += 1;
        self.next_wishlist_id
    }

    fn item_id(&mut self) -> u64 {
        self.next_item_id += 1;
        self.next_item_id
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Wishlist, AppError> {
        self.wishlists.get_mut(&id).ok_or_else(|| AppError::wishlist_not_found(id))
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error response carrying the JSON body every failing route returns.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn wishlist_not_found(id: u64) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Wishlist with id '{id}' was not found."))
    }

    fn item_not_found(id: u64) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Item with id '{id}' was not found."))
    }

    fn invalid(reason: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, format!("Invalid Wishlist: {reason}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(status = self.status.as_u16(), message = %self.message, "request failed");
        let body = ErrorBody {
            status: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json",
            ),
            other => Self::invalid(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

fn validate(payload: &WishlistPayload) -> Result<(), AppError> {
    if payload.title.chars().count() > TITLE_MAX {
        return Err(AppError::invalid(format!("title exceeds {TITLE_MAX} characters")));
    }
    if payload.description.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::invalid(format!(
            "description exceeds {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(())
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/wishlists", get(list_wishlists).post(create_wishlist))
        .route(
            "/wishlists/{id}",
            get(get_wishlist).put(update_wishlist).delete(delete_wishlist),
        )
        .route("/wishlists/{id}/duplicate", post(duplicate_wishlist))
        .route("/wishlists/{id}/clear", post(clear_wishlist))
        .route("/wishlists/{id}/items", get(list_items).post(create_item))
        .route(
            "/wishlists/{id}/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> &'static str {
    "Wishlists REST API Service: wishlists are where users save items they want \
     but are not yet ready to buy. See /wishlists and /wishlists/{id}/items."
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": 200, "message": "Healthy" }))
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{method} is not allowed on {}", uri.path()),
    )
}

// --- wishlists ---

async fn list_wishlists(
    State(db): State<Db>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Wishlist>>, AppError> {
    let Query(query) = query?;
    info!(?query, "request for wishlist list");
    let store = db.read().await;
    Ok(Json(
        store.wishlists.values().filter(|w| query.matches(w)).cloned().collect(),
    ))
}

async fn create_wishlist(
    State(db): State<Db>,
    headers: HeaderMap,
    payload: Result<Json<WishlistPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    validate(&input)?;
    let mut store = db.write().await;
    let wishlist = Wishlist {
        id: store.wishlist_id(),
        title: input.title,
        description: input.description,
        user_id: input.user_id,
        count: input.count,
        date: input.date,
        items: Vec::new(),
    };
    store.wishlists.insert(wishlist.id, wishlist.clone());
    info!(id = wishlist.id, "wishlist created");

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let location = format!("http://{host}/wishlists/{}", wishlist.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(wishlist)))
}

async fn get_wishlist(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Wishlist>, AppError> {
    let Path(id) = path?;
    info!(id, "request for wishlist");
    let store = db.read().await;
    store
        .wishlists
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::wishlist_not_found(id))
}

async fn update_wishlist(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<WishlistPayload>, JsonRejection>,
) -> Result<Json<Wishlist>, AppError> {
    let Path(id) = path?;
    let Json(input) = payload?;
    validate(&input)?;
    let mut store = db.write().await;
    let wishlist = store.get_mut(id)?;
    wishlist.title = input.title;
    wishlist.description = input.description;
    wishlist.user_id = input.user_id;
    wishlist.count = input.count;
    wishlist.date = input.date;
    info!(id, "wishlist updated");
    Ok(Json(wishlist.clone()))
}

/// Idempotent: deleting a missing wishlist still answers 204.
async fn delete_wishlist(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    db.write().await.wishlists.remove(&id);
    info!(id, "wishlist delete complete");
    Ok(StatusCode::NO_CONTENT)
}

async fn duplicate_wishlist(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<(StatusCode, Json<Wishlist>), AppError> {
    let Path(id) = path?;
    let mut store = db.write().await;
    let mut copy = store.get_mut(id)?.clone();
    copy.id = store.wishlist_id();
    for item in &mut copy.items {
        item.id = store.item_id();
        item.wishlist_id = copy.id;
    }
    store.wishlists.insert(copy.id, copy.clone());
    info!(source = id, id = copy.id, "wishlist duplicated");
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn clear_wishlist(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Wishlist>, AppError> {
    let Path(id) = path?;
    let mut store = db.write().await;
    let wishlist = store.get_mut(id)?;
    wishlist.items.clear();
    info!(id, "wishlist cleared");
    Ok(Json(wishlist.clone()))
}

// --- items ---

async fn create_item(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let mut store = db.write().await;
    if !store.wishlists.contains_key(&id) {
        return Err(AppError::wishlist_not_found(id));
    }
    let item = Item {
        id: store.item_id(),
        wishlist_id: id,
        name: input.name,
    };
    store.get_mut(id)?.items.push(item.clone());
    info!(wishlist_id = id, id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_items(
    State(db): State<Db>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<Item>>, AppError> {
    let Path(id) = path?;
    let store = db.read().await;
    let wishlist = store.wishlists.get(&id).ok_or_else(|| AppError::wishlist_not_found(id))?;
    Ok(Json(wishlist.items.clone()))
}

async fn get_item(
    State(db): State<Db>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let Path((id, item_id)) = path?;
    let store = db.read().await;
    store
        .wishlists
        .get(&id)
        .and_then(|w| w.items.iter().find(|i| i.id == item_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::item_not_found(item_id))
}

async fn update_item(
    State(db): State<Db>,
    path: Result<Path<(u64, u64)>, PathRejection>,
    payload: Result<Json<ItemPayload>, JsonRejection>,
) -> Result<Json<Item>, AppError> {
    let Path((id, item_id)) = path?;
    let Json(input) = payload?;
    let mut store = db.write().await;
    let item = store
        .wishlists
        .get_mut(&id)
        .and_then(|w| w.items.iter_mut().find(|i| i.id == item_id))
        .ok_or_else(|| AppError::item_not_found(item_id))?;
    item.name = input.name;
    info!(wishlist_id = id, id = item_id, "item updated");
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    path: Result<Path<(u64, u64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path((id, item_id)) = path?;
    if let Some(wishlist) = db.write().await.wishlists.get_mut(&id) {
        wishlist.items.retain(|i| i.id != item_id);
    }
    info!(wishlist_id = id, id = item_id, "item delete complete");
    Ok(StatusCode::NO_CONTENT)
}
