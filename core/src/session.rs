//! Drives triggers end to end through a pluggable transport.

use tracing::debug;

use crate::client::WishlistClient;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::view::{FormController, Trigger, ViewState};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses are responses, not errors: only failures that produced
/// no response at all (refused connection, broken pipe) belong in `Err`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: FnMut(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// A view plus the transport it talks through.
pub struct Session<T> {
    controller: FormController,
    transport: T,
    state: ViewState,
}

impl<T: Transport> Session<T> {
    pub fn new(client: WishlistClient, transport: T) -> Self {
        Self {
            controller: FormController::new(client),
            transport,
            state: ViewState::default(),
        }
    }

    pub fn with_form(mut self, form: FormState) -> Self {
        self.state.form = form;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.state.form
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `trigger` to completion.
    pub fn trigger(&mut self, trigger: Trigger) -> &ViewState {
        let Some(request) = self.controller.begin(trigger, &mut self.state) else {
            return &self.state;
        };
        debug!(trigger = trigger.name(), method = %request.method, path = %request.path, "dispatching");
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(trigger = trigger.name(), status = response.status, "response received");
                self.controller.complete(trigger, response, &mut self.state);
            }
            Err(err) => self.controller.abort(trigger, &err, &mut self.state),
        }
        &self.state
    }
}
