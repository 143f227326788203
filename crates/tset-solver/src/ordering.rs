//! Canonical ordering of methods and embedded types.
//!
//! Resolved method lists are part of the observable output, so they must not
//! depend on declaration or embedding order. Ordering compares the resolved
//! strings, never interner indices: atom numbering depends on the order in
//! which names were first seen.

use crate::store::TypeStore;
use crate::types::{MethodId, TypeData, TypeId};
use std::cmp::Ordering;

/// Total order over methods: name, then package path.
pub fn method_cmp(store: &TypeStore, a: MethodId, b: MethodId) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let ma = store.method(a);
    let mb = store.method(b);
    store
        .resolve_atom(ma.name)
        .cmp(store.resolve_atom(mb.name))
        .then_with(|| store.resolve_atom(ma.pkg).cmp(store.resolve_atom(mb.pkg)))
}

/// Stable sort of a method list.
pub fn sort_methods(store: &TypeStore, methods: &mut [MethodId]) {
    methods.sort_by(|&a, &b| method_cmp(store, a, b));
}

fn named_key(store: &TypeStore, ty: TypeId) -> Option<(&str, &str)> {
    match store.lookup(ty) {
        TypeData::Named(id) => {
            let named = store.named(id);
            Some((store.resolve_atom(named.name), store.resolve_atom(named.pkg)))
        }
        _ => None,
    }
}

/// Order over embedded types. Named types rank by (name, package); all
/// unnamed types rank equal and before named ones.
pub fn type_cmp(store: &TypeStore, a: TypeId, b: TypeId) -> Ordering {
    named_key(store, a).cmp(&named_key(store, b))
}

/// Stable sort of embedded types together with their source positions.
pub fn sort_embeddeds<P: Copy>(store: &TypeStore, embeddeds: &mut [(TypeId, P)]) {
    embeddeds.sort_by(|a, b| type_cmp(store, a.0, b.0));
}

/// Check that `methods` is in canonical order. Only active in debug builds.
#[inline]
pub fn assert_sorted_methods(store: &TypeStore, methods: &[MethodId]) {
    if cfg!(debug_assertions) {
        for pair in methods.windows(2) {
            assert!(
                method_cmp(store, pair[0], pair[1]) != Ordering::Greater,
                "methods not sorted: {} after {}",
                store.method_name(pair[1]),
                store.method_name(pair[0]),
            );
        }
    }
}
