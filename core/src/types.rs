//! Domain DTOs for the wishlist API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently
//! so the FFI surface never couples to axum internals. Integration tests
//! catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A wishlist record as returned by the API.
///
/// Only `id` is required. Fields the server leaves out read as blank so a
/// partial record still fills the form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wishlist {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// ISO calendar date, `YYYY-MM-DD`. Kept opaque on the client side.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Request payload for creating or replacing a wishlist. The identifier
/// travels in the URL; blank numeric fields are left out of the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WishlistInput {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    pub date: String,
}

/// An item stored on a wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub wishlist_id: u64,
    pub name: String,
}

/// Request payload for creating or renaming an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
}

/// Non-CRUD operations exposed as `POST /wishlists/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAction {
    /// Copies the wishlist (items included) under a new id.
    Duplicate,
    /// Removes every item from the wishlist.
    Clear,
}

impl WishlistAction {
    pub fn path_segment(self) -> &'static str {
        match self {
            WishlistAction::Duplicate => "duplicate",
            WishlistAction::Clear => "clear",
        }
    }
}

/// Body of a non-2xx response. Only `message` matters to the client.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: u16,
    pub message: String,
}
