//! Stateless HTTP request builder and response parser for the wishlist API.
//!
//! # Design
//! `WishlistClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Every request declares a JSON content type, bodies or not. Any 2xx
//! status counts as success.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, JSON_CONTENT_TYPE};
use crate::query::SearchFilters;
use crate::types::{Health, Item, ItemInput, Wishlist, WishlistAction, WishlistInput};

/// Synchronous, stateless client for the wishlist API.
#[derive(Debug, Clone)]
pub struct WishlistClient {
    base_url: String,
}

impl WishlistClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/wishlists", self.base_url)
    }

    fn resource(&self, id: u64) -> String {
        format!("{}/wishlists/{id}", self.base_url)
    }

    // -----------------------------------------------------------------------
    // Wishlists
    // -----------------------------------------------------------------------

    pub fn build_create(&self, input: &WishlistInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_update(&self, id: u64, input: &WishlistInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.resource(id), input)
    }

    pub fn build_get(&self, id: u64) -> HttpRequest {
        bare_request(HttpMethod::Get, self.resource(id))
    }

    pub fn build_delete(&self, id: u64) -> HttpRequest {
        bare_request(HttpMethod::Delete, self.resource(id))
    }

    /// `GET /wishlists`, with a query string only when a filter is set.
    pub fn build_search(&self, filters: &SearchFilters) -> HttpRequest {
        let query = filters.to_query();
        let path = if query.is_empty() {
            self.collection()
        } else {
            format!("{}?{query}", self.collection())
        };
        bare_request(HttpMethod::Get, path)
    }

    /// `POST /wishlists/{id}/{action}` with an empty body.
    pub fn build_action(&self, id: u64, action: WishlistAction) -> HttpRequest {
        bare_request(
            HttpMethod::Post,
            format!("{}/{}", self.resource(id), action.path_segment()),
        )
    }

    pub fn build_health(&self) -> HttpRequest {
        bare_request(HttpMethod::Get, format!("{}/health", self.base_url))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Wishlist, ApiError> {
        parse_json(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Wishlist, ApiError> {
        parse_json(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Wishlist, ApiError> {
        parse_json(response)
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<Wishlist>, ApiError> {
        parse_json(response)
    }

    pub fn parse_action(&self, response: HttpResponse) -> Result<Wishlist, ApiError> {
        parse_json(response)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    pub fn build_create_item(&self, wishlist_id: u64, input: &ItemInput) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, format!("{}/items", self.resource(wishlist_id)), input)
    }

    pub fn build_list_items(&self, wishlist_id: u64) -> HttpRequest {
        bare_request(HttpMethod::Get, format!("{}/items", self.resource(wishlist_id)))
    }

    pub fn build_get_item(&self, wishlist_id: u64, item_id: u64) -> HttpRequest {
        bare_request(
            HttpMethod::Get,
            format!("{}/items/{item_id}", self.resource(wishlist_id)),
        )
    }

    pub fn build_update_item(
        &self,
        wishlist_id: u64,
        item_id: u64,
        input: &ItemInput,
    ) -> Result<HttpRequest, ApiError> {
        json_request(
            HttpMethod::Put,
            format!("{}/items/{item_id}", self.resource(wishlist_id)),
            input,
        )
    }

    pub fn build_delete_item(&self, wishlist_id: u64, item_id: u64) -> HttpRequest {
        bare_request(
            HttpMethod::Delete,
            format!("{}/items/{item_id}", self.resource(wishlist_id)),
        )
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())]
}

fn bare_request(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: json_headers(),
        body: None,
    }
}

fn json_request<T: Serialize>(method: HttpMethod, path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: json_headers(),
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to `RequestFailed`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}
