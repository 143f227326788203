//! Arena storage for types, interfaces, methods and type sets.
//!
//! The store is append-only: entities are never removed, so every id stays
//! valid for the lifetime of the store. Pointer and slice types are
//! deduplicated structurally; everything else (named types, signatures,
//! interfaces, unions, type parameters) gets a fresh id per construction,
//! because those entities carry identity or are mutated after creation.

use crate::ordering::{sort_methods, type_cmp};
use crate::types::*;
use rustc_hash::FxHashMap;
use tracing::trace;
use tset_common::limits::MAX_UNDERLYING_CHAIN;
use tset_common::{Atom, Interner, Pos};

pub struct TypeStore {
    interner: Interner,
    types: Vec<TypeData>,
    named: Vec<NamedType>,
    signatures: Vec<Signature>,
    interfaces: Vec<Interface>,
    unions: Vec<Union>,
    type_params: Vec<TypeParamInfo>,
    methods: Vec<Method>,
    type_sets: Vec<TypeSet>,
    pointers: FxHashMap<TypeId, TypeId>,
    slices: FxHashMap<TypeId, TypeId>,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// Create a store with the basic types and the top type set reserved.
    pub fn new() -> Self {
        let mut interner = Interner::new();
        interner.intern_common();
        let mut store = TypeStore {
            interner,
            types: Vec::with_capacity(64),
            named: Vec::new(),
            signatures: Vec::new(),
            interfaces: Vec::new(),
            unions: Vec::new(),
            type_params: Vec::new(),
            methods: Vec::new(),
            type_sets: vec![TypeSet::top()],
            pointers: FxHashMap::default(),
            slices: FxHashMap::default(),
        };
        for kind in BasicKind::ALL {
            let id = store.alloc(TypeData::Basic(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        store
    }

    fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    // =========================================================================
    // Strings
    // =========================================================================

    #[inline]
    pub fn intern(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    #[inline]
    pub fn resolve_atom(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    #[inline]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn lookup(&self, ty: TypeId) -> TypeData {
        self.types
            .get(ty.index())
            .copied()
            .unwrap_or(TypeData::Basic(BasicKind::Invalid))
    }

    #[inline]
    pub fn named(&self, id: NamedId) -> &NamedType {
        &self.named[id.index()]
    }

    #[inline]
    pub fn signature(&self, id: SignatureId) -> &Signature {
        &self.signatures[id.index()]
    }

    #[inline]
    pub fn interface(&self, id: InterfaceId) -> &Interface {
        &self.interfaces[id.index()]
    }

    #[inline]
    pub(crate) fn interface_mut(&mut self, id: InterfaceId) -> &mut Interface {
        &mut self.interfaces[id.index()]
    }

    #[inline]
    pub fn union(&self, id: UnionId) -> &Union {
        &self.unions[id.index()]
    }

    #[inline]
    pub fn type_param(&self, id: TypeParamId) -> &TypeParamInfo {
        &self.type_params[id.index()]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id.index()]
    }

    #[inline]
    pub fn type_set(&self, id: TypeSetId) -> &TypeSet {
        &self.type_sets[id.index()]
    }

    #[inline]
    pub(crate) fn type_set_mut(&mut self, id: TypeSetId) -> &mut TypeSet {
        &mut self.type_sets[id.index()]
    }

    /// Name of a method as a string.
    #[inline]
    pub fn method_name(&self, id: MethodId) -> &str {
        self.resolve_atom(self.method(id).name)
    }

    /// Key under which a method is merged into a method set. Exported names
    /// are global; unexported names are scoped to their package.
    pub fn method_key(&self, id: MethodId) -> (Atom, Atom) {
        let m = self.method(id);
        let exported = self
            .resolve_atom(m.name)
            .chars()
            .next()
            .is_some_and(char::is_uppercase);
        if exported { (m.name, Atom::NONE) } else { (m.name, m.pkg) }
    }

    /// The underlying type: named types are followed to their definition.
    /// Unresolved or cyclic chains yield `TypeId::INVALID`.
    pub fn under(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_UNDERLYING_CHAIN {
            match self.lookup(current) {
                TypeData::Named(id) => match self.named(id).underlying {
                    Some(next) => current = next,
                    None => return TypeId::INVALID,
                },
                _ => return current,
            }
        }
        TypeId::INVALID
    }

    /// The interface behind `ty`, looking through named types.
    pub fn as_interface(&self, ty: TypeId) -> Option<InterfaceId> {
        match self.lookup(self.under(ty)) {
            TypeData::Interface(id) => Some(id),
            _ => None,
        }
    }

    /// The signature id if `ty` is a signature literal (not a named func type).
    pub fn as_signature(&self, ty: TypeId) -> Option<SignatureId> {
        match self.lookup(ty) {
            TypeData::Signature(id) => Some(id),
            _ => None,
        }
    }

    /// Classify an embedded element by its underlying type.
    pub fn classify_embedded(&self, ty: TypeId) -> Embedded {
        if ty.is_invalid() {
            return Embedded::Invalid;
        }
        // Type parameters are never named, and their "underlying" type is
        // their constraint, so check them before looking through names.
        if let TypeData::TypeParam(id) = self.lookup(ty) {
            return Embedded::TypeParam(id);
        }
        let under = self.under(ty);
        match self.lookup(under) {
            TypeData::Interface(id) => Embedded::Interface(id),
            TypeData::Union(id) => Embedded::Union(id),
            TypeData::Basic(BasicKind::Invalid) => Embedded::Invalid,
            _ => Embedded::Other(ty),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Declare a named type whose underlying type is set later.
    pub fn named_type(&mut self, name: Atom, pkg: Atom) -> TypeId {
        let id = NamedId(self.named.len() as u32);
        self.named.push(NamedType {
            name,
            pkg,
            underlying: None,
        });
        self.alloc(TypeData::Named(id))
    }

    /// Set the underlying type of a named type. Has no effect on other types.
    pub fn set_underlying(&mut self, named: TypeId, underlying: TypeId) {
        if let TypeData::Named(id) = self.lookup(named) {
            self.named[id.index()].underlying = Some(underlying);
        }
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.pointers.get(&elem) {
            return id;
        }
        let id = self.alloc(TypeData::Pointer(elem));
        self.pointers.insert(elem, id);
        id
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.slices.get(&elem) {
            return id;
        }
        let id = self.alloc(TypeData::Slice(elem));
        self.slices.insert(elem, id);
        id
    }

    pub fn signature_type(&mut self, sig: Signature) -> TypeId {
        let id = SignatureId(self.signatures.len() as u32);
        self.signatures.push(sig);
        self.alloc(TypeData::Signature(id))
    }

    /// Allocate a union entity without a type handle (used for constraints).
    pub fn alloc_union(&mut self, terms: Vec<Term>) -> UnionId {
        let id = UnionId(self.unions.len() as u32);
        self.unions.push(Union { terms });
        id
    }

    /// Allocate a union usable as an embedded element.
    pub fn union_type(&mut self, terms: Vec<Term>) -> TypeId {
        let id = self.alloc_union(terms);
        self.alloc(TypeData::Union(id))
    }

    pub fn type_param_type(&mut self, name: Atom, index: u32) -> TypeId {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(TypeParamInfo {
            name,
            index,
            constraint: TypeId::INVALID,
        });
        self.alloc(TypeData::TypeParam(id))
    }

    pub fn set_type_param_constraint(&mut self, tparam: TypeId, constraint: TypeId) {
        if let TypeData::TypeParam(id) = self.lookup(tparam) {
            self.type_params[id.index()].constraint = constraint;
        }
    }

    /// Allocate an empty, incomplete interface.
    pub fn new_interface(&mut self) -> (TypeId, InterfaceId) {
        let id = InterfaceId(self.interfaces.len() as u32);
        self.interfaces.push(Interface::default());
        (self.alloc(TypeData::Interface(id)), id)
    }

    /// Create a method. `recv` may be `TypeId::INVALID` and bound later by
    /// [`new_interface_type`](Self::new_interface_type).
    pub fn new_method(
        &mut self,
        name: Atom,
        pkg: Atom,
        sig: TypeId,
        recv: TypeId,
        pos: Pos,
    ) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(Method {
            name,
            pkg,
            sig,
            recv,
            pos,
        });
        id
    }

    /// Allocate an empty, unfinalized type set slot.
    pub(crate) fn alloc_type_set(&mut self) -> TypeSetId {
        let id = TypeSetId(self.type_sets.len() as u32);
        self.type_sets.push(TypeSet::default());
        id
    }

    /// Build a complete interface from already-constructed methods and
    /// embedded types, without a checker.
    ///
    /// Methods without a receiver get the new interface as receiver. Both
    /// lists are sorted canonically. An interface with neither methods nor
    /// embeddeds shares the top type set.
    pub fn new_interface_type(&mut self, methods: Vec<MethodId>, embeddeds: Vec<TypeId>) -> TypeId {
        let (ty, id) = self.new_interface();
        for &m in &methods {
            if self.methods[m.index()].recv.is_invalid() {
                self.methods[m.index()].recv = ty;
            }
        }

        let mut methods = methods;
        sort_methods(self, &mut methods);
        let mut embeddeds = embeddeds;
        embeddeds.sort_by(|&a, &b| type_cmp(self, a, b));

        let iface = &mut self.interfaces[id.index()];
        iface.embedded_pos = vec![Pos::NONE; embeddeds.len()];
        iface.methods = methods;
        iface.embeddeds = embeddeds;
        iface.complete = true;
        if iface.methods.is_empty() && iface.embeddeds.is_empty() {
            iface.tset = Some(TypeSetId::TOP);
        }
        trace!(iface = id.0, "new_interface_type");
        ty
    }
}
