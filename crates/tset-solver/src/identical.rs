//! Structural type identity.
//!
//! Named types and type parameters are identical only to themselves. Every
//! other type constructor is compared structurally. Interfaces compare by
//! their resolved type sets; a pair of interfaces already under comparison
//! is assumed identical, which makes recursive interfaces terminate.
//! An interface whose type set is not resolved yet is identical only to
//! itself; callers comparing method signatures resolve the interfaces they
//! mention first.

use crate::store::TypeStore;
use crate::types::{Constraint, InterfaceId, Term, TypeData, TypeId, UnionId};
use rustc_hash::FxHashSet;

/// Report whether `a` and `b` are identical types.
pub fn identical(store: &TypeStore, a: TypeId, b: TypeId) -> bool {
    IdentityChecker::new(store).identical(a, b)
}

struct IdentityChecker<'a> {
    store: &'a TypeStore,
    assumed: FxHashSet<(InterfaceId, InterfaceId)>,
}

impl<'a> IdentityChecker<'a> {
    fn new(store: &'a TypeStore) -> Self {
        IdentityChecker {
            store,
            assumed: FxHashSet::default(),
        }
    }

    fn identical(&mut self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        let store = self.store;
        match (store.lookup(a), store.lookup(b)) {
            (TypeData::Basic(x), TypeData::Basic(y)) => x == y,
            (TypeData::Pointer(x), TypeData::Pointer(y))
            | (TypeData::Slice(x), TypeData::Slice(y)) => self.identical(x, y),
            (TypeData::Signature(x), TypeData::Signature(y)) => {
                let (x, y) = (store.signature(x), store.signature(y));
                x.variadic == y.variadic
                    && x.type_params.len() == y.type_params.len()
                    && self.lists(&x.params, &y.params)
                    && self.lists(&x.results, &y.results)
            }
            (TypeData::Union(x), TypeData::Union(y)) => self.unions(x, y),
            (TypeData::Interface(x), TypeData::Interface(y)) => self.interfaces(x, y),
            // Named types and type parameters: identity only.
            _ => false,
        }
    }

    fn lists(&mut self, a: &[TypeId], b: &[TypeId]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.identical(x, y))
    }

    fn term_in(&mut self, term: Term, terms: &[Term]) -> bool {
        terms
            .iter()
            .any(|t| t.approximate == term.approximate && self.identical(t.ty, term.ty))
    }

    /// Unions are sets of terms: order does not matter.
    fn unions(&mut self, a: UnionId, b: UnionId) -> bool {
        if a == b {
            return true;
        }
        let store = self.store;
        let (x, y) = (&store.union(a).terms, &store.union(b).terms);
        x.iter().all(|&t| self.term_in(t, y)) && y.iter().all(|&t| self.term_in(t, x))
    }

    fn interfaces(&mut self, a: InterfaceId, b: InterfaceId) -> bool {
        let store = self.store;
        let (Some(sa), Some(sb)) = (store.interface(a).tset, store.interface(b).tset) else {
            return false;
        };
        if sa == sb {
            return true;
        }
        let (sa, sb) = (store.type_set(sa), store.type_set(sb));
        if !sa.is_finalized() || !sb.is_finalized() {
            return false;
        }
        if sa.num_methods() != sb.num_methods() {
            return false;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.assumed.insert(key) {
            return true;
        }
        // Both method lists are sorted canonically, so pairs line up.
        let same = sa.methods().iter().zip(sb.methods()).all(|(&ma, &mb)| {
            store.method_key(ma) == store.method_key(mb)
                && self.identical(store.method(ma).sig, store.method(mb).sig)
        }) && self.constraints(sa.constraint(), sb.constraint());
        self.assumed.remove(&key);
        same
    }

    fn constraints(&mut self, a: Constraint, b: Constraint) -> bool {
        match (a, b) {
            (Constraint::All, Constraint::All) => true,
            (Constraint::Union(x), Constraint::Union(y)) => self.unions(x, y),
            (Constraint::TypeParam(x), Constraint::TypeParam(y)) => x == y,
            _ => false,
        }
    }
}
