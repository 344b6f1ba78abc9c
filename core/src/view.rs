//! Form-bound view: triggers, patches and the controller that maps one to
//! the other.
//!
//! # Design
//! A trigger runs in two halves around the network call:
//!
//! 1. [`FormController::begin`] clears the status and builds the request
//!    from the form. Local triggers (clear-form) and pre-flight failures
//!    (missing or non-numeric id) finish here and return `None`.
//! 2. [`FormController::complete`] (or [`FormController::abort`] when the
//!    transport failed) resolves the outcome into a [`Patch`] and applies it.
//!
//! Resolution is pure: [`FormController::resolve`] and
//! [`FormController::failure`] only look at the trigger and the response.
//! Nothing is de-duplicated. Two requests for the same trigger resolve
//! independently and the patch applied last wins.

use tracing::{debug, warn};

use crate::client::WishlistClient;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::messages;
use crate::render;
use crate::types::{Wishlist, WishlistAction};

/// A UI button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Create,
    Update,
    Retrieve,
    Delete,
    Search,
    Action(WishlistAction),
    ClearForm,
}

impl Trigger {
    pub fn name(self) -> &'static str {
        match self {
            Trigger::Create => "create",
            Trigger::Update => "update",
            Trigger::Retrieve => "retrieve",
            Trigger::Delete => "delete",
            Trigger::Search => "search",
            Trigger::Action(action) => action.path_segment(),
            Trigger::ClearForm => "clear-form",
        }
    }
}

/// How a trigger's outcome changes the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormChange {
    Keep,
    /// Overwrite every field, identifier included.
    Fill(Wishlist),
    /// Empty the editable fields, keep the identifier.
    ClearFields,
    ClearAll,
}

/// Everything a finished trigger does to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub form: FormChange,
    /// `Some` replaces the result table; `None` leaves it alone.
    pub results: Option<Vec<Wishlist>>,
    pub status: String,
}

impl Patch {
    fn new(form: FormChange, status: impl Into<String>) -> Self {
        Self {
            form,
            results: None,
            status: status.into(),
        }
    }

    pub fn status_only(status: impl Into<String>) -> Self {
        Self::new(FormChange::Keep, status)
    }
}

/// The form, the status line and the rendered result table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub form: FormState,
    pub status: String,
    pub results: Option<String>,
}

impl ViewState {
    pub fn with_form(form: FormState) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, patch: Patch) {
        match patch.form {
            FormChange::Keep => {}
            FormChange::Fill(wishlist) => self.form.fill(&wishlist),
            FormChange::ClearFields => self.form.clear_fields(),
            FormChange::ClearAll => self.form.clear_all(),
        }
        if let Some(results) = patch.results {
            self.results = Some(render::results_table(&results));
        }
        self.status = patch.status;
    }
}

/// Maps triggers to requests and responses to patches.
#[derive(Debug, Clone)]
pub struct FormController {
    client: WishlistClient,
}

impl FormController {
    pub fn new(client: WishlistClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &WishlistClient {
        &self.client
    }

    /// Request for `trigger`, or `None` when the trigger makes no network
    /// call.
    pub fn prepare(&self, trigger: Trigger, form: &FormState) -> Result<Option<HttpRequest>, ApiError> {
        let request = match trigger {
            Trigger::Create => self.client.build_create(&form.to_input()?)?,
            Trigger::Update => {
                let id = form.wishlist_id()?;
                self.client.build_update(id, &form.to_input()?)?
            }
            Trigger::Retrieve => self.client.build_get(form.wishlist_id()?),
            Trigger::Delete => self.client.build_delete(form.wishlist_id()?),
            Trigger::Search => self.client.build_search(&form.search_filters()),
            Trigger::Action(action) => self.client.build_action(form.wishlist_id()?, action),
            Trigger::ClearForm => return Ok(None),
        };
        Ok(Some(request))
    }

    /// First half of a trigger. Returns the request the host must execute,
    /// or `None` when the trigger already finished.
    pub fn begin(&self, trigger: Trigger, state: &mut ViewState) -> Option<HttpRequest> {
        state.status.clear();
        match self.prepare(trigger, &state.form) {
            Ok(Some(request)) => Some(request),
            Ok(None) => {
                state.apply(Patch::new(FormChange::ClearAll, ""));
                None
            }
            Err(err) => {
                debug!(trigger = trigger.name(), error = %err, "trigger rejected before dispatch");
                let patch = match trigger {
                    // A retrieve that cannot be sent fails like one the server refused.
                    Trigger::Retrieve => self.failure(trigger, &err),
                    _ => Patch::status_only(err.user_message()),
                };
                state.apply(patch);
                None
            }
        }
    }

    pub fn complete(&self, trigger: Trigger, response: HttpResponse, state: &mut ViewState) {
        state.apply(self.resolve(trigger, response));
    }

    /// Second half of a trigger whose request never got a response.
    pub fn abort(&self, trigger: Trigger, err: &ApiError, state: &mut ViewState) {
        state.apply(self.failure(trigger, err));
    }

    /// Patch for a response to `trigger`.
    pub fn resolve(&self, trigger: Trigger, response: HttpResponse) -> Patch {
        let outcome = match trigger {
            Trigger::Create => self.client.parse_create(response).map(fill),
            Trigger::Update => self.client.parse_update(response).map(fill),
            Trigger::Retrieve => self.client.parse_get(response).map(fill),
            Trigger::Delete => self
                .client
                .parse_delete(response)
                .map(|()| Patch::new(FormChange::ClearFields, messages::DELETED)),
            Trigger::Search => self.client.parse_search(response).map(search_results),
            Trigger::Action(WishlistAction::Duplicate) => self.client.parse_action(response).map(fill),
            Trigger::Action(WishlistAction::Clear) => self
                .client
                .parse_action(response)
                .map(|_| Patch::new(FormChange::ClearFields, messages::CLEARED)),
            Trigger::ClearForm => Ok(Patch::new(FormChange::ClearAll, "")),
        };
        outcome.unwrap_or_else(|err| self.failure(trigger, &err))
    }

    /// Patch for a failed `trigger`. Retrieve also empties the editable
    /// fields; delete never shows the server's message.
    pub fn failure(&self, trigger: Trigger, err: &ApiError) -> Patch {
        warn!(trigger = trigger.name(), error = %err, "wishlist request failed");
        match trigger {
            Trigger::Retrieve => Patch::new(FormChange::ClearFields, err.user_message()),
            Trigger::Delete => Patch::status_only(messages::SERVER_ERROR),
            _ => Patch::status_only(err.user_message()),
        }
    }
}

fn fill(wishlist: Wishlist) -> Patch {
    Patch::new(FormChange::Fill(wishlist), messages::SUCCESS)
}

fn search_results(wishlists: Vec<Wishlist>) -> Patch {
    let form = match wishlists.first() {
        Some(first) => FormChange::Fill(first.clone()),
        None => FormChange::Keep,
    };
    Patch {
        form,
        results: Some(wishlists),
        status: messages::SUCCESS.to_string(),
    }
}
