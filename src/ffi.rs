//! C ABI over the JSON request envelope.
//!
//! Callers pass a NUL-terminated UTF-8 JSON [`Request`](crate::api::Request)
//! and receive a heap-allocated JSON string that must be released with
//! [`u_delivery_free_string`].

use std::ffi::{CStr, CString};
use std::ptr;

use libc::c_char;

use crate::api::{error_json, handle_json};

fn into_raw(s: String) -> *mut c_char {
    CString::new(s).map_or(ptr::null_mut(), CString::into_raw)
}

/// Executes a JSON request and returns a JSON response.
///
/// # Safety
///
/// `request` must be null or point to a valid NUL-terminated string that
/// stays alive for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn u_delivery_handle(request: *const c_char) -> *mut c_char {
    if request.is_null() {
        return into_raw(error_json("null request"));
    }
    match CStr::from_ptr(request).to_str() {
        Ok(input) => into_raw(handle_json(input)),
        Err(_) => into_raw(error_json("request is not valid UTF-8")),
    }
}

/// Releases a string returned by [`u_delivery_handle`].
///
/// # Safety
///
/// `s` must be null or a pointer obtained from [`u_delivery_handle`] that
/// has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn u_delivery_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
