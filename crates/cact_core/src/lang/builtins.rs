//! Builtin function vocabulary.
//!
//! This module defines the runtime I/O functions that every CACT program can call without declaring them.
//! The semantic analyzer pre-declares each entry in the global scope before analysis starts.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Signatures use scalar types only; no builtin takes or returns an array.
//!
//! ## Examples
//! ```rust
//! use cact_core::lang::builtins::{self, BuiltinFnId};
//! use cact_core::lang::types::ScalarTypeId;
//!
//! assert_eq!(builtins::from_str("print_int"), Some(BuiltinFnId::PrintInt));
//! assert_eq!(builtins::info_for(BuiltinFnId::GetDouble).ret, ScalarTypeId::Double);
//! ```

use super::types::ScalarTypeId;

/// Stable identifier for a builtin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFnId {
    PrintInt,
    PrintFloat,
    PrintDouble,
    PrintBool,
    GetInt,
    GetFloat,
    GetDouble,
}

/// Metadata for a builtin function.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFnInfo {
    pub id: BuiltinFnId,
    pub canonical: &'static str,
    pub params: &'static [ScalarTypeId],
    pub ret: ScalarTypeId,
    pub description: &'static str,
}

/// Registry of all builtin functions.
pub const BUILTIN_FUNCTIONS: &[BuiltinFnInfo] = &[
    info(
        BuiltinFnId::PrintInt,
        "print_int",
        &[ScalarTypeId::Int],
        ScalarTypeId::Void,
        "Print an int to stdout.",
    ),
    info(
        BuiltinFnId::PrintFloat,
        "print_float",
        &[ScalarTypeId::Float],
        ScalarTypeId::Void,
        "Print a float to stdout.",
    ),
    info(
        BuiltinFnId::PrintDouble,
        "print_double",
        &[ScalarTypeId::Double],
        ScalarTypeId::Void,
        "Print a double to stdout.",
    ),
    info(
        BuiltinFnId::PrintBool,
        "print_bool",
        &[ScalarTypeId::Bool],
        ScalarTypeId::Void,
        "Print a bool to stdout.",
    ),
    info(BuiltinFnId::GetInt, "get_int", &[], ScalarTypeId::Int, "Read an int from stdin."),
    info(
        BuiltinFnId::GetFloat,
        "get_float",
        &[],
        ScalarTypeId::Float,
        "Read a float from stdin.",
    ),
    info(
        BuiltinFnId::GetDouble,
        "get_double",
        &[],
        ScalarTypeId::Double,
        "Read a double from stdin.",
    ),
];

/// Canonical spelling.
pub fn as_str(id: BuiltinFnId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinFnId) -> &'static BuiltinFnInfo {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|b| b.id == id)
        .expect("builtin function info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<BuiltinFnId> {
    BUILTIN_FUNCTIONS.iter().find(|b| b.canonical == s).map(|b| b.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: BuiltinFnId,
    canonical: &'static str,
    params: &'static [ScalarTypeId],
    ret: ScalarTypeId,
    description: &'static str,
) -> BuiltinFnInfo {
    BuiltinFnInfo {
        id,
        canonical,
        params,
        ret,
        description,
    }
}
