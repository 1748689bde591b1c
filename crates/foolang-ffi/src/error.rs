//! Error handling for the FFI boundary
//!
//! This module provides utilities for safely propagating errors across the
//! FFI boundary without panics or undefined behavior.

use std::any::Any;
use std::panic;

use crate::memory::set_last_error;
use crate::types::FooResult;

/// Convert a core library error to an FFI result code
pub fn map_core_error(error: foolang_core::Error) -> FooResult {
    use foolang_core::Error;

    match &error {
        Error::Configuration { .. } | Error::UnknownCharset { .. } => {
            set_last_error(error.to_string());
            FooResult::InvalidInput
        }
        Error::Io { .. } => {
            set_last_error(error.to_string());
            FooResult::UnitError
        }
        Error::KindMismatch { .. } => {
            set_last_error(error.to_string());
            FooResult::InvalidInput
        }
        Error::StaleNode { .. } => {
            set_last_error(error.to_string());
            FooResult::StaleNode
        }
        Error::NoSuchUnit { .. } => {
            set_last_error(error.to_string());
            FooResult::UnitError
        }
        Error::Internal { .. } => {
            set_last_error(error.to_string());
            FooResult::InternalError
        }
    }
}

/// Safely execute a closure that might panic
///
/// Catches any panic and converts it to an error code, preventing unwinding
/// across the FFI boundary.
pub fn catch_panic<F, R>(f: F) -> Result<R, FooResult>
where
    F: FnOnce() -> Result<R, FooResult> + panic::UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(result) => result,
        Err(panic_info) => {
            let msg = get_panic_message(&panic_info);
            set_last_error(format!("Panic occurred: {}", msg));
            Err(FooResult::InternalError)
        }
    }
}

/// Extract a message from panic info
fn get_panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

/// Macro for safely executing FFI function bodies
#[macro_export]
macro_rules! ffi_boundary {
    ($body:expr) => {{
        match $crate::error::catch_panic(|| $body) {
            Ok(result) => result,
            Err(code) => return code,
        }
    }};
}

/// Validate that a pointer is not null
pub fn validate_ptr<T>(ptr: *const T, name: &str) -> Result<(), FooResult> {
    if ptr.is_null() {
        set_last_error(format!("{} is null", name));
        Err(FooResult::NullPointer)
    } else {
        Ok(())
    }
}

/// Validate that a mutable pointer is not null
pub fn validate_mut_ptr<T>(ptr: *mut T, name: &str) -> Result<(), FooResult> {
    if ptr.is_null() {
        set_last_error(format!("{} is null", name));
        Err(FooResult::NullPointer)
    } else {
        Ok(())
    }
}
