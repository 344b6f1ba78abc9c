//! Form-bound API client core for the wishlist service.
//!
//! # Overview
//! Turns form triggers (create, update, retrieve, delete, search, custom
//! actions, clear-form) into `HttpRequest` values and turns the matching
//! `HttpResponse` values back into form updates, a status line and a result
//! table. The core never touches the network (host-does-IO pattern): the
//! caller executes the round-trip, directly or through a [`Transport`].
//!
//! # Design
//! - `WishlistClient` is stateless and holds only `base_url`; each operation
//!   is split into `build_*` and `parse_*`.
//! - `FormController` maps a trigger to a request and a response to a
//!   [`Patch`]; `ViewState::apply` is the only place the view changes.
//! - `Session` ties a controller, a view and a transport together.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod messages;
pub mod query;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

pub use client::WishlistClient;
pub use error::ApiError;
pub use form::{FormField, FormState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::SearchFilters;
pub use session::{Session, Transport};
pub use types::{Health, Item, ItemInput, Wishlist, WishlistAction, WishlistInput};
pub use view::{FormChange, FormController, Patch, Trigger, ViewState};
