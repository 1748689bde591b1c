//! Memory management utilities for FFI
//!
//! This module provides string allocation and last-error storage for use
//! across the FFI boundary.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::types::FooResult;

// Thread-local storage for last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message for the current thread
pub fn set_last_error<S: Into<String>>(err: S) {
    let error_string = CString::new(err.into())
        .unwrap_or_else(|_| CString::new("Error message contained null byte").unwrap());
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = Some(error_string);
    });
}

/// Clear the last error message
pub fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Allocate a new string for FFI return
///
/// # Safety
/// The caller must free this string using `foo_string_free`
pub unsafe fn allocate_string(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => {
            set_last_error("String contains null byte");
            ptr::null_mut()
        }
    }
}

/// Convert a C string to a Rust string
///
/// # Safety
/// The pointer must be a valid null-terminated C string
pub unsafe fn c_str_to_string(s: *const c_char) -> Result<String, FooResult> {
    if s.is_null() {
        return Err(FooResult::NullPointer);
    }
    match CStr::from_ptr(s).to_str() {
        Ok(str) => Ok(str.to_string()),
        Err(_) => {
            set_last_error("Invalid UTF-8 in input string");
            Err(FooResult::Utf8Error)
        }
    }
}

/// Free a string allocated by this library
///
/// # Safety
/// The pointer must have been returned by a `foo_*` function documented to
/// require `foo_string_free`
#[no_mangle]
pub unsafe extern "C" fn foo_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // Reconstruct the CString and let it drop
    let _ = CString::from_raw(s);
}

/// Get the last error message for the current thread
///
/// # Safety
/// Returns a pointer that should NOT be freed by the caller; it stays valid
/// until the next failing `foo_*` call on this thread
#[no_mangle]
pub unsafe extern "C" fn foo_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(err) => err.as_ptr(),
        None => ptr::null(),
    })
}

/// Clear the last error message
#[no_mangle]
pub extern "C" fn foo_clear_error() {
    clear_last_error();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_handling() {
        set_last_error("Test error");
        unsafe {
            let error = foo_get_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert_eq!(error_str, "Test error");
        }

        clear_last_error();
        unsafe {
            let error = foo_get_last_error();
            assert!(error.is_null());
        }
    }

    #[test]
    fn test_string_allocation() {
        unsafe {
            let s = allocate_string("Hello, FFI!");
            assert!(!s.is_null());

            let c_str = CStr::from_ptr(s);
            assert_eq!(c_str.to_str().unwrap(), "Hello, FFI!");

            foo_string_free(s);
        }
    }

    #[test]
    fn test_c_str_round_trip() {
        let owned = CString::new("foo.txt").unwrap();
        unsafe {
            assert_eq!(c_str_to_string(owned.as_ptr()).unwrap(), "foo.txt");
            assert_eq!(
                c_str_to_string(ptr::null()).unwrap_err(),
                FooResult::NullPointer
            );
        }
    }
}
