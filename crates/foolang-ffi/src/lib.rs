//! Foolang FFI - C API for the foolang analysis library
//!
//! This crate provides a C-compatible layer over `foolang-core`, enabling
//! integration with C and with language bindings built on the C ABI.
//!
//! # Lifecycle
//!
//! Contexts go through a two-stage lifecycle so bindings can register a
//! handle before any user code runs:
//!
//! 1. `foo_allocate_analysis_context` returns an uninitialized handle;
//! 2. `foo_initialize_analysis_context` makes it usable;
//! 3. `foo_context_free` releases it - or, if initialization never
//!    happened, `foo_release_uninitialized_analysis_context` does.
//!
//! # Safety
//!
//! All FFI functions taking pointers are marked `unsafe` as they deal with
//! raw pointers and cross-language boundaries. Users must ensure:
//! - Proper memory management (free allocated strings/arrays)
//! - Valid UTF-8 for string parameters
//! - Non-null pointers where required
//! - Unit and node handles are not used after their owner is freed
//!
//! Entry points never panic across the boundary: panics are caught and
//! reported as `InternalError` with a message in the thread-local error
//! slot.

#![warn(missing_docs)]

#[macro_use]
mod error;
mod context;
mod memory;
mod node;
mod types;
mod unit;

// Re-export public API
pub use context::{
    foo_allocate_analysis_context, foo_context_free, foo_context_remove_unit,
    foo_context_unit_count, foo_get_analysis_unit_from_buffer, foo_get_analysis_unit_from_file,
    foo_initialize_analysis_context, foo_release_uninitialized_analysis_context,
};
pub use memory::{foo_clear_error, foo_get_last_error, foo_string_free};
pub use node::{
    foo_node_all_items, foo_node_array_free, foo_node_child, foo_node_children_count,
    foo_node_count, foo_node_example_items, foo_node_image, foo_node_is_null, foo_node_kind,
    foo_node_kind_name, foo_node_sloc_range_json,
};
pub use types::{FooAnalysisContext, FooAnalysisUnit, FooNode, FooNodeArray, FooNodeKind, FooResult};
pub use unit::{
    foo_unit_diagnostic, foo_unit_diagnostic_count, foo_unit_filename,
    foo_unit_reparse_from_buffer, foo_unit_root, foo_unit_token_count,
};

use std::os::raw::c_char;

/// Get version information
///
/// # Returns
/// A static string containing version information
///
/// # Safety
/// The returned string should NOT be freed
#[no_mangle]
pub unsafe extern "C" fn foo_version() -> *const c_char {
    concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
