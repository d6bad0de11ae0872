//! Scalar type vocabulary.
//!
//! CACT has five scalar type names. Compound types (arrays, functions) are built by the compiler
//! from these; this registry only records the spellings and the storage layout of each scalar.
//!
//! ## Examples
//! ```rust
//! use cact_core::lang::types::{self, ScalarTypeId};
//!
//! assert_eq!(types::from_str("double"), Some(ScalarTypeId::Double));
//! assert_eq!(types::info_for(ScalarTypeId::Int).size, 4);
//! ```

/// Stable identifier for a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarTypeId {
    Void,
    Bool,
    Int,
    Float,
    Double,
}

/// Metadata for a scalar type.
///
/// ## Notes
/// - `size` and `align` are in bytes. `void` has neither.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTypeInfo {
    pub id: ScalarTypeId,
    pub canonical: &'static str,
    pub size: u32,
    pub align: u32,
    pub arithmetic: bool,
}

/// Registry of all scalar types.
pub const SCALAR_TYPES: &[ScalarTypeInfo] = &[
    info(ScalarTypeId::Void, "void", 0, 0, false),
    info(ScalarTypeId::Bool, "bool", 1, 1, false),
    info(ScalarTypeId::Int, "int", 4, 4, true),
    info(ScalarTypeId::Float, "float", 4, 4, true),
    info(ScalarTypeId::Double, "double", 8, 8, true),
];

/// Canonical spelling.
pub fn as_str(id: ScalarTypeId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ScalarTypeId) -> &'static ScalarTypeInfo {
    SCALAR_TYPES.iter().find(|t| t.id == id).expect("scalar type info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<ScalarTypeId> {
    SCALAR_TYPES.iter().find(|t| t.canonical == s).map(|t| t.id)
}

const fn info(id: ScalarTypeId, canonical: &'static str, size: u32, align: u32, arithmetic: bool) -> ScalarTypeInfo {
    ScalarTypeInfo {
        id,
        canonical,
        size,
        align,
        arithmetic,
    }
}
