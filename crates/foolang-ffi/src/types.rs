//! FFI-safe type definitions
//!
//! All types in this module are designed to be safely passed across the FFI
//! boundary with C ABI compatibility.

use std::os::raw::c_uint;

/// Result codes for FFI operations
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooResult {
    /// Operation completed successfully
    Ok = 0,
    /// Invalid input parameters
    InvalidInput = -1,
    /// Null pointer provided
    NullPointer = -2,
    /// Invalid UTF-8 string
    Utf8Error = -3,
    /// Operation not legal in the handle's current state
    PreconditionFailure = -4,
    /// Unit-level operation failed
    UnitError = -5,
    /// A node handle no longer resolves against its unit's tree
    StaleNode = -6,
    /// JSON serialization error
    JsonError = -7,
    /// Memory allocation failure
    MemoryError = -8,
    /// Internal error
    InternalError = -99,
}

impl FooResult {
    /// Check if the result indicates success
    pub fn is_ok(self) -> bool {
        self == FooResult::Ok
    }

    /// Get a human-readable error message
    pub fn error_message(self) -> &'static str {
        match self {
            FooResult::Ok => "Success",
            FooResult::InvalidInput => "Invalid input parameters",
            FooResult::NullPointer => "Null pointer provided",
            FooResult::Utf8Error => "Invalid UTF-8 string",
            FooResult::PreconditionFailure => "Operation not legal in this state",
            FooResult::UnitError => "Unit operation failed",
            FooResult::StaleNode => "Stale node handle",
            FooResult::JsonError => "JSON serialization error",
            FooResult::MemoryError => "Memory allocation failed",
            FooResult::InternalError => "Internal error",
        }
    }
}

/// Opaque handle for an analysis context
///
/// Created in the uninitialized state by `foo_allocate_analysis_context`;
/// becomes usable after `foo_initialize_analysis_context`.
#[repr(C)]
pub struct FooAnalysisContext {
    _private: [u8; 0],
}

/// Opaque handle for an analysis unit
///
/// Owned by its context; valid until the unit is removed or the context is
/// freed.
#[repr(C)]
pub struct FooAnalysisUnit {
    _private: [u8; 0],
}

/// Kinds of parse tree nodes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooNodeKind {
    /// Root node: the list of items in a unit
    ItemList = 1,
    /// An `example` item
    Example = 2,
    /// A `null` item
    NullItem = 3,
}

/// By-value node handle: a unit plus an index into its tree
///
/// The null node has a null `unit` pointer. Handles stay cheap to copy and
/// require no freeing; they are only valid while their unit is alive, and a
/// reparse invalidates them (lookups then fail with `StaleNode` rather than
/// misbehave).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FooNode {
    /// Owning unit; null for the null node
    pub unit: *const FooAnalysisUnit,
    /// Index into the unit's tree
    pub id: c_uint,
}

impl FooNode {
    /// The null node
    pub const NULL: FooNode = FooNode {
        unit: std::ptr::null(),
        id: 0,
    };

    /// Whether this is the null node
    pub fn is_null(self) -> bool {
        self.unit.is_null()
    }
}

/// Owned array of node handles
///
/// Returned by the item queries; must be freed with `foo_node_array_free`.
#[repr(C)]
pub struct FooNodeArray {
    /// Number of elements
    pub n: usize,
    /// Pointer to `n` contiguous node handles
    pub items: *mut FooNode,
}
