//! Context lifecycle entry points
//!
//! The C-side lifecycle of an analysis context has two stages: allocation
//! returns an uninitialized handle that language bindings can register
//! before any user code runs, and initialization turns it into a working
//! context. A handle that was allocated but never initialized is reclaimed
//! through `foo_release_uninitialized_analysis_context`; an initialized one
//! through `foo_context_free`.

use std::os::raw::{c_char, c_int, c_uint};
use std::slice;

use foolang_core::{AnalysisContext, ContextConfig};

use crate::error::{map_core_error, validate_mut_ptr, validate_ptr};
use crate::ffi_boundary;
use crate::memory::{c_str_to_string, clear_last_error, set_last_error};
use crate::types::{FooAnalysisContext, FooAnalysisUnit, FooResult};

/// Internal state behind a `FooAnalysisContext` pointer
pub(crate) enum ContextHandle {
    Uninitialized,
    Initialized(AnalysisContext),
}

/// Borrow the handle behind a context pointer
///
/// # Safety
/// `ctx` must be a pointer obtained from `foo_allocate_analysis_context`
/// that has not been released yet.
pub(crate) unsafe fn context_handle_mut<'a>(
    ctx: *mut FooAnalysisContext,
) -> Result<&'a mut ContextHandle, FooResult> {
    validate_mut_ptr(ctx, "context")?;
    Ok(&mut *(ctx as *mut ContextHandle))
}

/// Borrow the analysis context, requiring the initialized state
pub(crate) fn initialized_context_mut(
    handle: &mut ContextHandle,
) -> Result<&mut AnalysisContext, FooResult> {
    match handle {
        ContextHandle::Initialized(context) => Ok(context),
        ContextHandle::Uninitialized => {
            set_last_error("context is not initialized");
            Err(FooResult::PreconditionFailure)
        }
    }
}

/// Allocate a new analysis context in the uninitialized state
///
/// The returned handle must be passed to `foo_initialize_analysis_context`
/// before any unit can be created from it.
///
/// # Safety
/// The handle must eventually be released, either with
/// `foo_release_uninitialized_analysis_context` (if never initialized) or
/// with `foo_context_free` (after initialization).
#[no_mangle]
pub unsafe extern "C" fn foo_allocate_analysis_context() -> *mut FooAnalysisContext {
    clear_last_error();
    Box::into_raw(Box::new(ContextHandle::Uninitialized)) as *mut FooAnalysisContext
}

/// Initialize an allocated analysis context
///
/// # Parameters
/// - `charset`: charset name (`utf-8`, `ascii`, `iso-8859-1`); null selects
///   the default (`utf-8`)
/// - `tab_stop`: column width of a TAB character; 0 selects the default (8)
/// - `with_trivia`: nonzero to keep whitespace/comment tokens in unit token
///   streams
///
/// # Safety
/// `ctx` must come from `foo_allocate_analysis_context` and must not have
/// been initialized or released already.
#[no_mangle]
pub unsafe extern "C" fn foo_initialize_analysis_context(
    ctx: *mut FooAnalysisContext,
    charset: *const c_char,
    tab_stop: c_uint,
    with_trivia: c_int,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();

        let handle = context_handle_mut(ctx)?;
        if matches!(handle, ContextHandle::Initialized(_)) {
            set_last_error("context is already initialized");
            return Err(FooResult::PreconditionFailure);
        }

        let mut builder = ContextConfig::builder().with_trivia(with_trivia != 0);
        if !charset.is_null() {
            builder = builder.charset(c_str_to_string(charset)?);
        }
        if tab_stop != 0 {
            builder = builder.tab_stop(tab_stop);
        }
        let config = builder.build().map_err(map_core_error)?;

        *handle = ContextHandle::Initialized(AnalysisContext::new(config));
        Ok(FooResult::Ok)
    })
}

/// Release an analysis context that was allocated but never initialized
///
/// Null is a no-op. Passing an initialized context here is a caller bug;
/// the handle is still reclaimed safely.
///
/// # Safety
/// `ctx` must come from `foo_allocate_analysis_context` and must not be
/// used again after this call.
#[no_mangle]
pub unsafe extern "C" fn foo_release_uninitialized_analysis_context(ctx: *mut FooAnalysisContext) {
    if ctx.is_null() {
        return;
    }
    drop(Box::from_raw(ctx as *mut ContextHandle));
}

/// Free an initialized analysis context and every unit it owns
///
/// Null is a no-op. Unit and node handles obtained from this context are
/// invalid afterwards.
///
/// # Safety
/// `ctx` must come from `foo_allocate_analysis_context` and must not be
/// used again after this call.
#[no_mangle]
pub unsafe extern "C" fn foo_context_free(ctx: *mut FooAnalysisContext) {
    if ctx.is_null() {
        return;
    }
    drop(Box::from_raw(ctx as *mut ContextHandle));
}

/// Create or reparse the unit for `filename` from an in-memory buffer
///
/// # Parameters
/// - `filename`: unit key, a null-terminated UTF-8 string
/// - `buffer`/`length`: the raw source bytes, decoded per the context
///   charset; not required to be null-terminated
/// - `out_unit`: receives the unit handle, owned by the context
///
/// # Safety
/// - `ctx` must be an initialized context
/// - `buffer` must point to at least `length` readable bytes
/// - The unit handle stays valid until the unit is removed or the context
///   is freed
#[no_mangle]
pub unsafe extern "C" fn foo_get_analysis_unit_from_buffer(
    ctx: *mut FooAnalysisContext,
    filename: *const c_char,
    buffer: *const c_char,
    length: usize,
    out_unit: *mut *mut FooAnalysisUnit,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();

        validate_ptr(filename, "filename")?;
        validate_ptr(buffer, "buffer")?;
        validate_mut_ptr(out_unit, "out_unit")?;

        let handle = context_handle_mut(ctx)?;
        let context = initialized_context_mut(handle)?;

        let filename = c_str_to_string(filename)?;
        let bytes = slice::from_raw_parts(buffer as *const u8, length);

        let unit = context.get_from_buffer(&filename, bytes);
        *out_unit = unit as *mut foolang_core::AnalysisUnit as *mut FooAnalysisUnit;
        Ok(FooResult::Ok)
    })
}

/// Create or reparse the unit for a file on disk
///
/// A file that cannot be read still produces a unit; the failure is
/// reported through the unit's diagnostics, matching the library behavior.
///
/// # Safety
/// Same contract as `foo_get_analysis_unit_from_buffer`.
#[no_mangle]
pub unsafe extern "C" fn foo_get_analysis_unit_from_file(
    ctx: *mut FooAnalysisContext,
    path: *const c_char,
    out_unit: *mut *mut FooAnalysisUnit,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();

        validate_ptr(path, "path")?;
        validate_mut_ptr(out_unit, "out_unit")?;

        let handle = context_handle_mut(ctx)?;
        let context = initialized_context_mut(handle)?;

        let path = c_str_to_string(path)?;
        let unit = context.get_from_file(&path);
        *out_unit = unit as *mut foolang_core::AnalysisUnit as *mut FooAnalysisUnit;
        Ok(FooResult::Ok)
    })
}

/// Number of units owned by the context
///
/// # Safety
/// `ctx` must be an initialized context; `out_count` must be writable.
#[no_mangle]
pub unsafe extern "C" fn foo_context_unit_count(
    ctx: *mut FooAnalysisContext,
    out_count: *mut usize,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_count, "out_count")?;

        let handle = context_handle_mut(ctx)?;
        let context = initialized_context_mut(handle)?;
        *out_count = context.unit_count();
        Ok(FooResult::Ok)
    })
}

/// Remove a unit from the context
///
/// # Safety
/// `ctx` must be an initialized context. Handles on the removed unit (and
/// its nodes) are invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn foo_context_remove_unit(
    ctx: *mut FooAnalysisContext,
    filename: *const c_char,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_ptr(filename, "filename")?;

        let handle = context_handle_mut(ctx)?;
        let context = initialized_context_mut(handle)?;
        let filename = c_str_to_string(filename)?;
        context.remove_unit(&filename).map_err(map_core_error)?;
        Ok(FooResult::Ok)
    })
}
