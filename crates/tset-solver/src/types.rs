//! Type representation for the interface engine.
//!
//! Every semantic entity lives in the [`TypeStore`](crate::TypeStore) arena
//! and is addressed by a small copyable id. Ids give entities a stable
//! identity, which the method-set merge relies on: the same [`MethodId`]
//! reached through two embedding paths is the same method.

use smallvec::SmallVec;
use tset_common::{Atom, Pos};

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u32);

            impl $name {
                #[inline]
                pub const fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

define_id! {
    /// Handle to any type in the store.
    TypeId,
    /// Handle to a declared (named) type.
    NamedId,
    /// Handle to a function signature.
    SignatureId,
    /// Handle to an interface entity.
    InterfaceId,
    /// Handle to a union of terms.
    UnionId,
    /// Handle to a type parameter.
    TypeParamId,
    /// Handle to a method. Compared by identity, never by structure.
    MethodId,
    /// Handle to a (possibly in-progress) resolved type set.
    TypeSetId,
}

impl TypeId {
    /// Marker for types that failed to resolve. Errors involving it have
    /// already been reported and are not reported again.
    pub const INVALID: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const INT8: TypeId = TypeId(3);
    pub const INT16: TypeId = TypeId(4);
    pub const INT32: TypeId = TypeId(5);
    pub const INT64: TypeId = TypeId(6);
    pub const UINT: TypeId = TypeId(7);
    pub const UINT8: TypeId = TypeId(8);
    pub const UINT16: TypeId = TypeId(9);
    pub const UINT32: TypeId = TypeId(10);
    pub const UINT64: TypeId = TypeId(11);
    pub const UINTPTR: TypeId = TypeId(12);
    pub const FLOAT32: TypeId = TypeId(13);
    pub const FLOAT64: TypeId = TypeId(14);
    pub const COMPLEX64: TypeId = TypeId(15);
    pub const COMPLEX128: TypeId = TypeId(16);
    pub const STRING: TypeId = TypeId(17);

    #[inline]
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

impl TypeSetId {
    /// The shared top type set: no methods, no type restriction.
    pub const TOP: TypeSetId = TypeSetId(0);
}

/// Predeclared basic types. The discriminant equals the `TypeId` index the
/// store reserves for the kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BasicKind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
}

impl BasicKind {
    pub const ALL: [BasicKind; 18] = [
        BasicKind::Invalid,
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int8,
        BasicKind::Int16,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint,
        BasicKind::Uint8,
        BasicKind::Uint16,
        BasicKind::Uint32,
        BasicKind::Uint64,
        BasicKind::Uintptr,
        BasicKind::Float32,
        BasicKind::Float64,
        BasicKind::Complex64,
        BasicKind::Complex128,
        BasicKind::String,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Invalid => "invalid type",
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
        }
    }

    #[inline]
    pub const fn type_id(self) -> TypeId {
        TypeId(self as u32)
    }
}

/// Structure of a type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Basic(BasicKind),
    Named(NamedId),
    Pointer(TypeId),
    Slice(TypeId),
    Signature(SignatureId),
    Interface(InterfaceId),
    Union(UnionId),
    TypeParam(TypeParamId),
}

/// A declared type. The underlying type is set after declaration so that
/// forward and cyclic references can be created first.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: Atom,
    /// Package path; `Atom::NONE` for predeclared types.
    pub pkg: Atom,
    pub underlying: Option<TypeId>,
}

pub type TypeList = SmallVec<[TypeId; 4]>;

/// A function signature. Receivers live on [`Method`], not here, so two
/// methods with the same signature literal compare identical.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    pub type_params: Vec<TypeId>,
    pub params: TypeList,
    pub results: TypeList,
    pub variadic: bool,
}

#[derive(Clone, Debug)]
pub struct TypeParamInfo {
    pub name: Atom,
    pub index: u32,
    /// Constraint type; `TypeId::INVALID` until resolved.
    pub constraint: TypeId,
}

/// One alternative of a union.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub ty: TypeId,
    /// `~T`: admits every type whose underlying type is `T`.
    pub approximate: bool,
}

impl Term {
    #[inline]
    pub const fn exact(ty: TypeId) -> Self {
        Term {
            ty,
            approximate: false,
        }
    }

    #[inline]
    pub const fn approximate(ty: TypeId) -> Self {
        Term {
            ty,
            approximate: true,
        }
    }
}

/// An ordered set of alternative terms. An empty union admits no type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Union {
    pub terms: Vec<Term>,
}

/// A method contributed by an interface.
#[derive(Clone, Debug)]
pub struct Method {
    pub name: Atom,
    /// Package path of the declaring unit.
    pub pkg: Atom,
    /// The signature type (`TypeData::Signature`).
    pub sig: TypeId,
    /// The receiver: the declaring interface, or its named type.
    pub recv: TypeId,
    pub pos: Pos,
}

/// An interface entity.
///
/// `methods` and `embeddeds` are frozen once `complete` is set.
/// `embedded_pos[i]` is the source position of `embeddeds[i]`.
#[derive(Clone, Debug, Default)]
pub struct Interface {
    pub methods: Vec<MethodId>,
    pub embeddeds: Vec<TypeId>,
    pub embedded_pos: Vec<Pos>,
    pub complete: bool,
    pub tset: Option<TypeSetId>,
}

impl Interface {
    #[inline]
    pub fn num_explicit_methods(&self) -> usize {
        self.methods.len()
    }

    #[inline]
    pub fn num_embeddeds(&self) -> usize {
        self.embeddeds.len()
    }

    #[inline]
    pub fn embedded_pos(&self, index: usize) -> Pos {
        self.embedded_pos.get(index).copied().unwrap_or(Pos::NONE)
    }
}

/// How an embedded element participates in type-set computation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Embedded {
    Interface(InterfaceId),
    Union(UnionId),
    TypeParam(TypeParamId),
    Other(TypeId),
    Invalid,
}

/// The type component of a type set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Constraint {
    /// Every type is admitted.
    #[default]
    All,
    /// Exactly the types admitted by some term of the union.
    Union(UnionId),
    /// Deferred to instantiation: the type set of this type parameter.
    TypeParam(TypeId),
}

/// The resolved contract of an interface.
#[derive(Clone, Debug, Default)]
pub struct TypeSet {
    pub(crate) methods: Vec<MethodId>,
    pub(crate) constraint: Constraint,
    pub(crate) finalized: bool,
}

impl TypeSet {
    pub(crate) fn top() -> Self {
        TypeSet {
            methods: Vec::new(),
            constraint: Constraint::All,
            finalized: true,
        }
    }

    /// All methods, sorted canonically, without duplicate names.
    #[inline]
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    #[inline]
    pub fn num_methods(&self) -> usize {
        self.methods.len()
    }

    #[inline]
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    /// False while the set is a cycle placeholder.
    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// No methods and no type restriction.
    #[inline]
    pub fn is_all(&self) -> bool {
        self.methods.is_empty() && self.constraint == Constraint::All
    }
}
