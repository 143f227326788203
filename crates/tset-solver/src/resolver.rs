//! Name resolution for type expressions.

use crate::store::TypeStore;
use crate::types::{BasicKind, Signature, TypeId};
use rustc_hash::FxHashMap;
use smallvec::smallvec;
use tset_common::{Atom, Pos};

/// Resolves identifiers in type expressions to types.
///
/// Structural expressions (pointers, functions, interfaces, unions) are
/// walked by the checker; only names go through this seam.
pub trait ExprResolver {
    /// Look up `name`, qualified by a package name when `qualifier` is set.
    fn lookup(&self, store: &TypeStore, qualifier: Option<Atom>, name: Atom) -> Option<TypeId>;
}

/// A flat map of declared names, with optional imported packages.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    names: FxHashMap<Atom, TypeId>,
    packages: FxHashMap<Atom, FxHashMap<Atom, TypeId>>,
    parent: Option<Box<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// The predeclared types: basic types, `byte`, `rune`, `any` and `error`.
    pub fn universe(store: &mut TypeStore) -> Self {
        let mut scope = Scope::new();
        for kind in BasicKind::ALL.into_iter().skip(1) {
            let name = store.intern(kind.name());
            scope.insert(name, kind.type_id());
        }
        let byte = store.intern("byte");
        let rune = store.intern("rune");
        scope.insert(byte, TypeId::UINT8);
        scope.insert(rune, TypeId::INT32);

        let any = store.intern("any");
        let empty = store.new_interface_type(Vec::new(), Vec::new());
        scope.insert(any, empty);

        // type error interface { Error() string }
        let error = store.intern("error");
        let error_ty = store.named_type(error, Atom::NONE);
        let sig = store.signature_type(Signature {
            results: smallvec![TypeId::STRING],
            ..Signature::default()
        });
        let method = store.intern("Error");
        let m = store.new_method(method, Atom::NONE, sig, error_ty, Pos::NONE);
        let iface = store.new_interface_type(vec![m], Vec::new());
        store.set_underlying(error_ty, iface);
        scope.insert(error, error_ty);
        scope
    }

    /// A scope nested in `parent`; names declared here shadow the parent's.
    pub fn with_parent(parent: Scope) -> Self {
        Scope {
            parent: Some(Box::new(parent)),
            ..Scope::default()
        }
    }

    /// Declare `name`. Returns the previous binding in this scope, if any.
    pub fn insert(&mut self, name: Atom, ty: TypeId) -> Option<TypeId> {
        self.names.insert(name, ty)
    }

    /// Make `pkg.name` resolvable.
    pub fn insert_qualified(&mut self, pkg: Atom, name: Atom, ty: TypeId) {
        self.packages.entry(pkg).or_default().insert(name, ty);
    }

    pub fn get(&self, name: Atom) -> Option<TypeId> {
        self.names
            .get(&name)
            .copied()
            .or_else(|| self.parent.as_ref().and_then(|p| p.get(name)))
    }

    fn get_qualified(&self, pkg: Atom, name: Atom) -> Option<TypeId> {
        self.packages
            .get(&pkg)
            .and_then(|names| names.get(&name).copied())
            .or_else(|| self.parent.as_ref().and_then(|p| p.get_qualified(pkg, name)))
    }
}

impl ExprResolver for Scope {
    fn lookup(&self, _store: &TypeStore, qualifier: Option<Atom>, name: Atom) -> Option<TypeId> {
        match qualifier {
            Some(pkg) => self.get_qualified(pkg, name),
            None => self.get(name),
        }
    }
}
