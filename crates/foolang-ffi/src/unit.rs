//! Unit entry points
//!
//! Accessors over analysis units: the tree root, diagnostics, tokens and
//! reparsing. Structured payloads (diagnostics) cross the boundary as JSON
//! strings the caller frees with `foo_string_free`.

use std::os::raw::{c_char, c_int};
use std::slice;

use foolang_core::AnalysisUnit;

use crate::error::{validate_mut_ptr, validate_ptr};
use crate::ffi_boundary;
use crate::memory::{allocate_string, clear_last_error, set_last_error};
use crate::types::{FooAnalysisUnit, FooNode, FooResult};

/// Borrow the unit behind a handle
///
/// # Safety
/// `unit` must be a handle obtained from a `foo_get_analysis_unit_*`
/// function whose context is still alive.
pub(crate) unsafe fn unit_ref<'a>(
    unit: *const FooAnalysisUnit,
) -> Result<&'a AnalysisUnit, FooResult> {
    validate_ptr(unit, "unit")?;
    Ok(&*(unit as *const AnalysisUnit))
}

/// Root node of a unit's parse tree
///
/// A unit whose parse produced nothing (only diagnostics) has a null root;
/// that is a successful call, with `out_node` set to the null node.
///
/// # Safety
/// `unit` must be a live unit handle; `out_node` must be writable.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_root(
    unit: *const FooAnalysisUnit,
    out_node: *mut FooNode,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_node, "out_node")?;

        let unit_data = unit_ref(unit)?;
        *out_node = match unit_data.root() {
            Some(root) => FooNode {
                unit,
                id: root.id().0,
            },
            None => FooNode::NULL,
        };
        Ok(FooResult::Ok)
    })
}

/// Number of diagnostics attached to a unit, or -1 on a null handle
///
/// # Safety
/// `unit` must be a live unit handle or null.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_diagnostic_count(unit: *const FooAnalysisUnit) -> c_int {
    if unit.is_null() {
        set_last_error("unit is null");
        return -1;
    }
    let unit = &*(unit as *const AnalysisUnit);
    unit.diagnostics().len() as c_int
}

/// Fetch one diagnostic, serialized as JSON
///
/// The payload has the shape
/// `{"sloc_range": {"start": ..., "end": ...}, "message": "..."}`.
///
/// # Safety
/// `unit` must be a live unit handle; the output string must be freed with
/// `foo_string_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_diagnostic(
    unit: *const FooAnalysisUnit,
    index: usize,
    out_json: *mut *mut c_char,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_json, "out_json")?;

        let unit = unit_ref(unit)?;
        let diagnostic = unit.diagnostics().get(index).ok_or_else(|| {
            set_last_error(format!(
                "diagnostic index {} out of range ({} available)",
                index,
                unit.diagnostics().len()
            ));
            FooResult::InvalidInput
        })?;

        let json = serde_json::to_string(diagnostic).map_err(|e| {
            set_last_error(format!("Failed to serialize diagnostic: {}", e));
            FooResult::JsonError
        })?;

        *out_json = allocate_string(&json);
        if (*out_json).is_null() {
            return Err(FooResult::MemoryError);
        }
        Ok(FooResult::Ok)
    })
}

/// Filename the unit is keyed by
///
/// # Safety
/// `unit` must be a live unit handle; the output string must be freed with
/// `foo_string_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_filename(
    unit: *const FooAnalysisUnit,
    out_filename: *mut *mut c_char,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_filename, "out_filename")?;

        let unit = unit_ref(unit)?;
        *out_filename = allocate_string(unit.filename());
        if (*out_filename).is_null() {
            return Err(FooResult::MemoryError);
        }
        Ok(FooResult::Ok)
    })
}

/// Number of tokens in the unit's stream, or -1 on a null handle
///
/// # Safety
/// `unit` must be a live unit handle or null.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_token_count(unit: *const FooAnalysisUnit) -> c_int {
    if unit.is_null() {
        set_last_error("unit is null");
        return -1;
    }
    let unit = &*(unit as *const AnalysisUnit);
    unit.token_count() as c_int
}

/// Reparse a unit from an in-memory buffer
///
/// Node handles previously obtained from this unit no longer resolve after
/// a reparse; using one fails with `StaleNode`.
///
/// # Safety
/// `unit` must be a live unit handle; `buffer` must point to at least
/// `length` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn foo_unit_reparse_from_buffer(
    unit: *mut FooAnalysisUnit,
    buffer: *const c_char,
    length: usize,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(unit, "unit")?;
        validate_ptr(buffer, "buffer")?;

        let unit = &mut *(unit as *mut AnalysisUnit);
        let bytes = slice::from_raw_parts(buffer as *const u8, length);
        unit.reparse_from_buffer(bytes);
        Ok(FooResult::Ok)
    })
}
