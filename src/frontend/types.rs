//! The CACT type system.
//!
//! Types are immutable and shared through [`TypeRef`]. Scalars come from one [`Primitives`] set
//! created per compilation; arrays and function types are built on demand with [`array_of`] and
//! [`func_of`] and compared structurally. There are no implicit conversions: two types either are
//! equal or the checker reports a mismatch.

use std::fmt;
use std::rc::Rc;

use cact_core::lang::types::{self as scalar_types, ScalarTypeId};

/// Shared, immutable handle to a type.
pub type TypeRef = Rc<Type>;

/// Size in bytes of a function designator and of an array passed by reference.
pub const POINTER_SIZE: u64 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Void,
    Bool,
    Int,
    Float,
    Double,
    /// `len` is `None` only for the first dimension of an array parameter (`int a[]`).
    Array {
        base: TypeRef,
        len: Option<u32>,
    },
    Func {
        ret: TypeRef,
        params: Vec<TypeRef>,
    },
}

impl Type {
    /// Scalar id for the five primitive types.
    pub fn scalar_id(&self) -> Option<ScalarTypeId> {
        Some(match self {
            Type::Void => ScalarTypeId::Void,
            Type::Bool => ScalarTypeId::Bool,
            Type::Int => ScalarTypeId::Int,
            Type::Float => ScalarTypeId::Float,
            Type::Double => ScalarTypeId::Double,
            Type::Array { .. } | Type::Func { .. } => return None,
        })
    }

    /// Size in bytes, or `None` if it does not fit in a `u64`.
    pub fn size(&self) -> Option<u64> {
        match self {
            Type::Array { base, len: Some(len) } => base.size()?.checked_mul(u64::from(*len)),
            Type::Array { len: None, .. } | Type::Func { .. } => Some(POINTER_SIZE),
            scalar => Some(scalar.scalar_id().map(|id| u64::from(scalar_types::info_for(id).size)).unwrap_or(0)),
        }
    }

    pub fn align(&self) -> u64 {
        match self {
            Type::Array { base, len: Some(_) } => base.align(),
            Type::Array { len: None, .. } | Type::Func { .. } => POINTER_SIZE,
            scalar => scalar.scalar_id().map(|id| u64::from(scalar_types::info_for(id).align)).unwrap_or(0),
        }
    }

    /// `int`, `float` or `double`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Type::Int | Type::Float | Type::Double)
    }

    pub fn is_scalar(&self) -> bool {
        self.scalar_id().is_some()
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Element type of one indexing step.
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            Type::Array { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Innermost non-array type (`int` for `int[2][3]`).
    pub fn element_scalar(&self) -> &Type {
        match self {
            Type::Array { base, .. } => base.element_scalar(),
            other => other,
        }
    }

    /// Number of scalars an array holds, or `None` if any dimension is unsized or the count
    /// overflows.
    pub fn scalar_count(&self) -> Option<u64> {
        match self {
            Type::Array { base, len } => u64::from((*len)?).checked_mul(base.scalar_count()?),
            _ => Some(1),
        }
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        match self {
            Type::Func { ret, .. } => Some(ret),
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&[TypeRef]> {
        match self {
            Type::Func { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Whether a value of type `arg` may be passed to a parameter of this type.
    ///
    /// An unsized first dimension accepts an array of any length with an equal element type;
    /// everything else requires structural equality.
    pub fn accepts_argument(&self, arg: &Type) -> bool {
        match (self, arg) {
            (Type::Array { base, len: None }, Type::Array { base: arg_base, .. }) => base == arg_base,
            _ => self == arg,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Array { .. } => {
                write!(f, "{}", self.element_scalar())?;
                let mut current = self;
                while let Type::Array { base, len } = current {
                    match len {
                        Some(len) => write!(f, "[{}]", len)?,
                        None => f.write_str("[]")?,
                    }
                    current = base;
                }
                Ok(())
            }
            Type::Func { ret, params } => {
                write!(f, "{}(", ret)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                f.write_str(")")
            }
            scalar => match scalar.scalar_id() {
                Some(id) => f.write_str(scalar_types::as_str(id)),
                None => Ok(()),
            },
        }
    }
}

/// The five scalar types of one compilation.
#[derive(Debug, Clone)]
pub struct Primitives {
    pub void: TypeRef,
    pub bool: TypeRef,
    pub int: TypeRef,
    pub float: TypeRef,
    pub double: TypeRef,
}

impl Primitives {
    pub fn new() -> Self {
        Self {
            void: Rc::new(Type::Void),
            bool: Rc::new(Type::Bool),
            int: Rc::new(Type::Int),
            float: Rc::new(Type::Float),
            double: Rc::new(Type::Double),
        }
    }

    /// Shared handle for a scalar type id.
    pub fn scalar(&self, id: ScalarTypeId) -> TypeRef {
        let ty = match id {
            ScalarTypeId::Void => &self.void,
            ScalarTypeId::Bool => &self.bool,
            ScalarTypeId::Int => &self.int,
            ScalarTypeId::Float => &self.float,
            ScalarTypeId::Double => &self.double,
        };
        Rc::clone(ty)
    }
}

impl Default for Primitives {
    fn default() -> Self {
        Self::new()
    }
}

/// Array of `len` elements of `base`.
pub fn array_of(base: &TypeRef, len: Option<u32>) -> TypeRef {
    Rc::new(Type::Array {
        base: Rc::clone(base),
        len,
    })
}

/// Function returning `ret` and taking `params` in order.
pub fn func_of(ret: &TypeRef, params: Vec<TypeRef>) -> TypeRef {
    Rc::new(Type::Func {
        ret: Rc::clone(ret),
        params,
    })
}

/// Build a (possibly multi-dimensional) array type from declarator dimensions, outermost first.
///
/// `int a[2][3]` is an array of 2 arrays of 3 ints, so dimensions are folded from the innermost.
pub fn array_from_dims(base: &TypeRef, dims: &[Option<u32>]) -> TypeRef {
    dims.iter().rev().fold(Rc::clone(base), |inner, &len| array_of(&inner, len))
}
