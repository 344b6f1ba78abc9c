//! C-side shapes of the view handle, the buttons, the form inputs and the
//! HTTP round-trip.
//!
//! Strings cross as NUL-terminated `c_char` pointers and header lists as a
//! pointer plus length. Enums carry fixed discriminants so the generated
//! header stays stable.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use wishlist_core::{FormField, FormController, HttpMethod, HttpResponse, Trigger, ViewState, WishlistAction};

/// Opaque view handle: the controller bound to one base URL plus the form,
/// status and result table it drives.
pub struct FfiWishlistView {
    pub(crate) controller: FormController,
    pub(crate) state: ViewState,
}

/// Allocate a C string; interior NULs are dropped rather than failing.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut bytes = s.into().into_bytes();
    bytes.retain(|b| *b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Borrow a C string as UTF-8, treating invalid input as empty.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string that outlives the
/// returned slice.
pub(crate) unsafe fn from_c_str<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    unsafe { CStr::from_ptr(s) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Triggers and fields
// ---------------------------------------------------------------------------

/// A UI button as a C enum.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiTrigger {
    Create = 0,
    Update = 1,
    Retrieve = 2,
    Delete = 3,
    Search = 4,
    Duplicate = 5,
    Clear = 6,
    ClearForm = 7,
}

impl From<FfiTrigger> for Trigger {
    fn from(t: FfiTrigger) -> Self {
        match t {
            FfiTrigger::Create => Trigger::Create,
            FfiTrigger::Update => Trigger::Update,
            FfiTrigger::Retrieve => Trigger::Retrieve,
            FfiTrigger::Delete => Trigger::Delete,
            FfiTrigger::Search => Trigger::Search,
            FfiTrigger::Duplicate => Trigger::Action(WishlistAction::Duplicate),
            FfiTrigger::Clear => Trigger::Action(WishlistAction::Clear),
            FfiTrigger::ClearForm => Trigger::ClearForm,
        }
    }
}

/// A form input as a C enum.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiFormField {
    Id = 0,
    Title = 1,
    Description = 2,
    UserId = 3,
    Count = 4,
    Date = 5,
}

impl From<FfiFormField> for FormField {
    fn from(f: FfiFormField) -> Self {
        match f {
            FfiFormField::Id => FormField::Id,
            FfiFormField::Title => FormField::Title,
            FfiFormField::Description => FormField::Description,
            FfiFormField::UserId => FormField::UserId,
            FfiFormField::Count => FormField::Count,
            FfiFormField::Date => FormField::Date,
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Verb of an outgoing request.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// One request header. Both strings are owned by the request.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// Request the host must execute for a pending trigger.
///
/// Returned by `wishlist_view_begin`. The C caller executes the request and
/// passes the response back through `wishlist_view_complete`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Move `req` onto the heap for the host. Free with `wishlist_free_request`.
    pub(crate) fn from_core(req: wishlist_core::HttpRequest) -> *mut Self {
        let path = to_c_string(req.path);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input
// ---------------------------------------------------------------------------

/// What the server answered, as filled in by the host.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to `wishlist_view_complete`. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    /// # Safety
    /// `body` must be null or a valid NUL-terminated string.
    pub(crate) unsafe fn to_core(&self) -> HttpResponse {
        HttpResponse::new(self.status, unsafe { from_c_str(self.body) })
    }
}

/// Outcome of an FFI call that returns no payload.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    NullArg = 1,
    Panic = 2,
}
