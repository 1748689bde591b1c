//! Node entry points
//!
//! Nodes cross the boundary by value as `FooNode` handles (unit pointer +
//! tree index). Every accessor re-resolves the handle against the unit's
//! current tree, so handles left over from before a reparse fail with
//! `StaleNode` instead of reading freed memory.

use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use foolang_core::{Node, NodeId, NodeKind};

use crate::error::{map_core_error, validate_mut_ptr, validate_ptr};
use crate::ffi_boundary;
use crate::memory::{allocate_string, clear_last_error, set_last_error};
use crate::types::{FooNode, FooNodeArray, FooNodeKind, FooResult};
use crate::unit::unit_ref;

fn kind_to_ffi(kind: NodeKind) -> FooNodeKind {
    match kind {
        NodeKind::ItemList => FooNodeKind::ItemList,
        NodeKind::Example => FooNodeKind::Example,
        NodeKind::NullItem => FooNodeKind::NullItem,
    }
}

/// Resolve a by-value handle against its unit's current tree
///
/// # Safety
/// `node.unit`, when non-null, must point at a live unit.
unsafe fn resolve_node<'a>(node: FooNode) -> Result<Node<'a>, FooResult> {
    if node.unit.is_null() {
        set_last_error("node is the null node");
        return Err(FooResult::NullPointer);
    }
    let unit = unit_ref(node.unit)?;
    unit.node(NodeId(node.id)).map_err(map_core_error)
}

fn allocate_node_array(nodes: Vec<FooNode>) -> *mut FooNodeArray {
    let n = nodes.len();
    let items = if n == 0 {
        ptr::null_mut()
    } else {
        Box::into_raw(nodes.into_boxed_slice()) as *mut FooNode
    };
    Box::into_raw(Box::new(FooNodeArray { n, items }))
}

/// Whether this is the null node
#[no_mangle]
pub extern "C" fn foo_node_is_null(node: FooNode) -> c_int {
    node.is_null() as c_int
}

/// Kind of a node
///
/// # Safety
/// `node` must be a live node handle; `out_kind` must be writable.
#[no_mangle]
pub unsafe extern "C" fn foo_node_kind(node: FooNode, out_kind: *mut FooNodeKind) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_kind, "out_kind")?;

        let node = resolve_node(node)?;
        *out_kind = kind_to_ffi(node.kind());
        Ok(FooResult::Ok)
    })
}

/// Static name of a node kind
///
/// # Safety
/// The returned string is static and must NOT be freed.
#[no_mangle]
pub unsafe extern "C" fn foo_node_kind_name(kind: FooNodeKind) -> *const c_char {
    match kind {
        FooNodeKind::ItemList => c"ItemList".as_ptr(),
        FooNodeKind::Example => c"Example".as_ptr(),
        FooNodeKind::NullItem => c"NullItem".as_ptr(),
    }
}

/// Number of children, or -1 on an unresolvable handle
///
/// # Safety
/// `node` must be a live node handle or the null node.
#[no_mangle]
pub unsafe extern "C" fn foo_node_children_count(node: FooNode) -> c_int {
    match resolve_node(node) {
        Ok(node) => node.children_count() as c_int,
        Err(_) => -1,
    }
}

/// Fetch the nth child
///
/// An out-of-range index is not an error: `out_child` is set to the null
/// node, matching the walk-until-null idiom C callers use.
///
/// # Safety
/// `node` must be a live node handle; `out_child` must be writable.
#[no_mangle]
pub unsafe extern "C" fn foo_node_child(
    node: FooNode,
    index: usize,
    out_child: *mut FooNode,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_child, "out_child")?;

        let resolved = resolve_node(node)?;
        *out_child = match resolved.child(index) {
            Some(child) => FooNode {
                unit: node.unit,
                id: child.id().0,
            },
            None => FooNode::NULL,
        };
        Ok(FooResult::Ok)
    })
}

/// Source location range of a node, serialized as JSON
///
/// # Safety
/// `node` must be a live node handle; the output string must be freed with
/// `foo_string_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_node_sloc_range_json(
    node: FooNode,
    out_json: *mut *mut c_char,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_json, "out_json")?;

        let node = resolve_node(node)?;
        let json = serde_json::to_string(&node.sloc_range()).map_err(|e| {
            set_last_error(format!("Failed to serialize sloc range: {}", e));
            FooResult::JsonError
        })?;

        *out_json = allocate_string(&json);
        if (*out_json).is_null() {
            return Err(FooResult::MemoryError);
        }
        Ok(FooResult::Ok)
    })
}

/// Debug image of a node, e.g. `<Example foo.txt:1:1-1:8>`
///
/// # Safety
/// `node` must be a live node handle; the output string must be freed with
/// `foo_string_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_node_image(node: FooNode, out_image: *mut *mut c_char) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_image, "out_image")?;

        let node = resolve_node(node)?;
        *out_image = allocate_string(&node.image());
        if (*out_image).is_null() {
            return Err(FooResult::MemoryError);
        }
        Ok(FooResult::Ok)
    })
}

/// All items of an `ItemList` node
///
/// # Safety
/// `node` must be a live node handle; the output array must be freed with
/// `foo_node_array_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_node_all_items(
    node: FooNode,
    out_array: *mut *mut FooNodeArray,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_array, "out_array")?;

        let resolved = resolve_node(node)?;
        let items = resolved.all_items().map_err(map_core_error)?;
        let handles = items
            .iter()
            .map(|item| FooNode {
                unit: node.unit,
                id: item.id().0,
            })
            .collect();
        *out_array = allocate_node_array(handles);
        Ok(FooResult::Ok)
    })
}

/// Items of an `ItemList` node that are `Example` nodes
///
/// # Safety
/// `node` must be a live node handle; the output array must be freed with
/// `foo_node_array_free`.
#[no_mangle]
pub unsafe extern "C" fn foo_node_example_items(
    node: FooNode,
    out_array: *mut *mut FooNodeArray,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_mut_ptr(out_array, "out_array")?;

        let resolved = resolve_node(node)?;
        let items = resolved.example_items().map_err(map_core_error)?;
        let handles = items
            .iter()
            .map(|item| FooNode {
                unit: node.unit,
                id: item.id().0,
            })
            .collect();
        *out_array = allocate_node_array(handles);
        Ok(FooResult::Ok)
    })
}

/// Number of items in an array of `Example` nodes
///
/// Every element must resolve to an `Example` node; anything else is an
/// `InvalidInput` error, matching the argument checking the original API
/// performs on typed arrays.
///
/// # Safety
/// `node` must be a live node handle; `items` must be an array from
/// `foo_node_all_items`/`foo_node_example_items` (or caller-built with live
/// handles); `out_count` must be writable.
#[no_mangle]
pub unsafe extern "C" fn foo_node_count(
    node: FooNode,
    items: *const FooNodeArray,
    out_count: *mut usize,
) -> FooResult {
    ffi_boundary!({
        clear_last_error();
        validate_ptr(items, "items")?;
        validate_mut_ptr(out_count, "out_count")?;

        // The receiver must itself be a live node
        resolve_node(node)?;

        let array = &*items;
        let handles: &[FooNode] = if array.n == 0 {
            &[]
        } else {
            slice::from_raw_parts(array.items, array.n)
        };
        for &handle in handles {
            let item = resolve_node(handle)?;
            if item.kind() != NodeKind::Example {
                set_last_error(format!(
                    "expected an array of Example nodes, got {}",
                    item.kind()
                ));
                return Err(FooResult::InvalidInput);
            }
        }

        *out_count = array.n;
        Ok(FooResult::Ok)
    })
}

/// Free a node array returned by the item queries
///
/// # Safety
/// `array` must come from `foo_node_all_items` or `foo_node_example_items`
/// and must not be used again after this call.
#[no_mangle]
pub unsafe extern "C" fn foo_node_array_free(array: *mut FooNodeArray) {
    if array.is_null() {
        return;
    }
    let array = Box::from_raw(array);
    if !array.items.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
            array.items,
            array.n,
        )));
    }
}
