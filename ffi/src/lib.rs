//! C-ABI wrapper around the `wishlist-core` form view.
//!
//! # Overview
//! Exposes the form-bound wishlist client through `extern "C"` functions so
//! a UI written in any language with a C FFI can keep its form in the core
//! and do the HTTP round-trip itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A trigger is two calls: `wishlist_view_begin` hands out the request to
//!   execute (or null when the trigger finished locally), and
//!   `wishlist_view_complete` / `wishlist_view_abort` apply the outcome.
//!   Several requests may be in flight; outcomes apply in call order.
//! - The C caller owns all returned pointers and must call the matching
//!   `wishlist_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use wishlist_core::{ApiError, FormController, ViewState, WishlistClient};

use types::*;

// ---------------------------------------------------------------------------
// View lifecycle
// ---------------------------------------------------------------------------

/// Create a new view with an empty form, bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `wishlist_view_free`.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_new(base_url: *const c_char) -> *mut FfiWishlistView {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { from_c_str(base_url) };
        let view = FfiWishlistView {
            controller: FormController::new(WishlistClient::new(url)),
            state: ViewState::default(),
        };
        Box::into_raw(Box::new(view))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a view created by `wishlist_view_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_free(view: *mut FfiWishlistView) {
    if !view.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(view) });
        });
    }
}

// ---------------------------------------------------------------------------
// Form access
// ---------------------------------------------------------------------------

/// Set one form field. A null `value` empties the field.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_set_field(
    view: *mut FfiWishlistView,
    field: FfiFormField,
    value: *const c_char,
) -> FfiStatus {
    if view.is_null() {
        return FfiStatus::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let view = unsafe { &mut *view };
        let value = unsafe { from_c_str(value) };
        view.state.form.set(field.into(), value);
        FfiStatus::Ok
    }))
    .unwrap_or(FfiStatus::Panic)
}

/// Current value of one form field. Returns null if `view` is null.
/// The caller must free the result with `wishlist_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_field(view: *const FfiWishlistView, field: FfiFormField) -> *mut c_char {
    catch_unwind(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &*view };
        to_c_string(view.state.form.get(field.into()))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Current status line (possibly empty). Returns null if `view` is null.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_status(view: *const FfiWishlistView) -> *mut c_char {
    catch_unwind(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &*view };
        to_c_string(view.state.status.as_str())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Rendered HTML of the last successful search, or null when no search has
/// succeeded yet.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_results(view: *const FfiWishlistView) -> *mut c_char {
    catch_unwind(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &*view };
        match &view.state.results {
            Some(table) => to_c_string(table.as_str()),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Start `trigger`: clears the status and returns the request to execute.
///
/// Returns null when the trigger needs no network call (clear-form, or a
/// form the request cannot be built from; the status then says why) and
/// when `view` is null.
/// The caller must free a non-null result with `wishlist_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_begin(view: *mut FfiWishlistView, trigger: FfiTrigger) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if view.is_null() {
            return std::ptr::null_mut();
        }
        let view = unsafe { &mut *view };
        match view.controller.begin(trigger.into(), &mut view.state) {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Apply the response to a request obtained from `wishlist_view_begin`.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_complete(
    view: *mut FfiWishlistView,
    trigger: FfiTrigger,
    response: *const FfiHttpResponse,
) -> FfiStatus {
    if view.is_null() || response.is_null() {
        return FfiStatus::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let view = unsafe { &mut *view };
        let response = unsafe { (*response).to_core() };
        view.controller.complete(trigger.into(), response, &mut view.state);
        FfiStatus::Ok
    }))
    .unwrap_or(FfiStatus::Panic)
}

/// Report that a request obtained from `wishlist_view_begin` got no
/// response at all. `reason` is only logged and may be null.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_view_abort(
    view: *mut FfiWishlistView,
    trigger: FfiTrigger,
    reason: *const c_char,
) -> FfiStatus {
    if view.is_null() {
        return FfiStatus::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let view = unsafe { &mut *view };
        let err = ApiError::Transport(unsafe { from_c_str(reason) }.to_string());
        view.controller.abort(trigger.into(), &err, &mut view.state);
        FfiStatus::Ok
    }))
    .unwrap_or(FfiStatus::Panic)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `wishlist_view_begin`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wishlist_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn new_view() -> *mut FfiWishlistView {
        let url = CString::new("http://localhost:3000").unwrap();
        wishlist_view_new(url.as_ptr())
    }

    fn take_string(s: *mut c_char) -> String {
        assert!(!s.is_null());
        let out = unsafe { CStr::from_ptr(s) }.to_str().unwrap().to_string();
        wishlist_free_string(s);
        out
    }

    fn set(view: *mut FfiWishlistView, field: FfiFormField, value: &str) {
        let value = CString::new(value).unwrap();
        assert_eq!(wishlist_view_set_field(view, field, value.as_ptr()), FfiStatus::Ok);
    }

    fn field(view: *mut FfiWishlistView, field: FfiFormField) -> String {
        take_string(wishlist_view_field(view, field))
    }

    fn status(view: *mut FfiWishlistView) -> String {
        take_string(wishlist_view_status(view))
    }

    fn fill_form(view: *mut FfiWishlistView) {
        set(view, FfiFormField::Title, "Book");
        set(view, FfiFormField::Description, "Sci-fi");
        set(view, FfiFormField::UserId, "1");
        set(view, FfiFormField::Count, "0");
        set(view, FfiFormField::Date, "2024-01-31");
    }

    #[test]
    fn view_new_null_returns_null() {
        let view = wishlist_view_new(std::ptr::null());
        assert!(view.is_null());
    }

    #[test]
    fn view_free_null_is_safe() {
        wishlist_view_free(std::ptr::null_mut());
    }

    #[test]
    fn set_and_read_fields() {
        let view = new_view();
        set(view, FfiFormField::Title, "Book");
        assert_eq!(field(view, FfiFormField::Title), "Book");
        assert_eq!(field(view, FfiFormField::Id), "");
        assert_eq!(
            wishlist_view_set_field(view, FfiFormField::Title, std::ptr::null()),
            FfiStatus::Ok
        );
        assert_eq!(field(view, FfiFormField::Title), "");
        wishlist_view_free(view);
    }

    #[test]
    fn begin_create_produces_post() {
        let view = new_view();
        fill_form(view);
        let req = wishlist_view_begin(view, FfiTrigger::Create);
        assert!(!req.is_null());
        let r = unsafe { &*req };
        assert!(matches!(r.method, FfiHttpMethod::Post));
        let path = unsafe { CStr::from_ptr(r.path) }.to_str().unwrap();
        assert_eq!(path, "http://localhost:3000/wishlists");
        assert_eq!(r.headers_len, 1);
        let header = unsafe { &*r.headers };
        let key = unsafe { CStr::from_ptr(header.key) }.to_str().unwrap();
        assert_eq!(key, "content-type");
        let body = unsafe { CStr::from_ptr(r.body) }.to_str().unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["title"], "Book");
        assert_eq!(body["user_id"], 1);

        wishlist_free_request(req);
        wishlist_view_free(view);
    }

    #[test]
    fn complete_create_fills_id() {
        let view = new_view();
        fill_form(view);
        let req = wishlist_view_begin(view, FfiTrigger::Create);
        wishlist_free_request(req);

        let body = CString::new(
            r#"{"id":7,"title":"Book","description":"Sci-fi","user_id":1,"count":0,"date":"2024-01-31"}"#,
        )
        .unwrap();
        let resp = FfiHttpResponse {
            status: 201,
            body: body.as_ptr(),
        };
        assert_eq!(wishlist_view_complete(view, FfiTrigger::Create, &resp), FfiStatus::Ok);
        assert_eq!(field(view, FfiFormField::Id), "7");
        assert_eq!(status(view), "Success");
        wishlist_view_free(view);
    }

    #[test]
    fn begin_without_id_finishes_locally() {
        let view = new_view();
        let req = wishlist_view_begin(view, FfiTrigger::Retrieve);
        assert!(req.is_null());
        assert_eq!(status(view), "Wishlist ID is required");
        wishlist_view_free(view);
    }

    #[test]
    fn clear_form_has_no_request() {
        let view = new_view();
        fill_form(view);
        set(view, FfiFormField::Id, "7");
        assert!(wishlist_view_begin(view, FfiTrigger::ClearForm).is_null());
        assert_eq!(field(view, FfiFormField::Id), "");
        assert_eq!(field(view, FfiFormField::Title), "");
        assert_eq!(status(view), "");
        wishlist_view_free(view);
    }

    #[test]
    fn delete_with_null_body() {
        let view = new_view();
        fill_form(view);
        set(view, FfiFormField::Id, "7");
        let req = wishlist_view_begin(view, FfiTrigger::Delete);
        assert!(unsafe { &*req }.body.is_null());
        wishlist_free_request(req);

        let resp = FfiHttpResponse {
            status: 204,
            body: std::ptr::null(),
        };
        wishlist_view_complete(view, FfiTrigger::Delete, &resp);
        assert_eq!(status(view), "Wishlist has been Deleted!");
        assert_eq!(field(view, FfiFormField::Title), "");
        assert_eq!(field(view, FfiFormField::Id), "7");
        wishlist_view_free(view);
    }

    #[test]
    fn search_results_are_exposed() {
        let view = new_view();
        assert!(wishlist_view_results(view).is_null());
        let req = wishlist_view_begin(view, FfiTrigger::Search);
        wishlist_free_request(req);
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        wishlist_view_complete(view, FfiTrigger::Search, &resp);
        let table = take_string(wishlist_view_results(view));
        assert!(table.contains("<tbody></tbody>"));
        wishlist_view_free(view);
    }

    #[test]
    fn abort_reports_generic_error() {
        let view = new_view();
        set(view, FfiFormField::Id, "7");
        let req = wishlist_view_begin(view, FfiTrigger::Duplicate);
        wishlist_free_request(req);
        let reason = CString::new("connection refused").unwrap();
        assert_eq!(
            wishlist_view_abort(view, FfiTrigger::Duplicate, reason.as_ptr()),
            FfiStatus::Ok
        );
        assert_eq!(status(view), "Server error!");
        wishlist_view_free(view);
    }

    #[test]
    fn null_arguments_are_rejected() {
        let view = new_view();
        assert_eq!(
            wishlist_view_complete(view, FfiTrigger::Create, std::ptr::null()),
            FfiStatus::NullArg
        );
        assert_eq!(
            wishlist_view_set_field(std::ptr::null_mut(), FfiFormField::Title, std::ptr::null()),
            FfiStatus::NullArg
        );
        assert!(wishlist_view_begin(std::ptr::null_mut(), FfiTrigger::Search).is_null());
        assert!(wishlist_view_status(std::ptr::null()).is_null());
        assert!(wishlist_view_field(std::ptr::null(), FfiFormField::Id).is_null());
        wishlist_view_free(view);
    }

    #[test]
    fn free_request_null_is_safe() {
        wishlist_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        wishlist_free_string(std::ptr::null_mut());
    }
}
