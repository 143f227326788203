//! Term and union algebra for type-set constraints.
//!
//! A term `T` admits exactly `T`; a term `~T` admits every type whose
//! underlying type is `T`. A union admits the types admitted by any of its
//! terms. Embedding several constrained interfaces intersects their
//! constraints.

use crate::identical::identical;
use crate::store::TypeStore;
use crate::types::{Constraint, Term, TypeId, UnionId};
use tracing::trace;

/// Report whether `x` and `y` admit no common type.
pub fn term_disjoint(store: &TypeStore, x: Term, y: Term) -> bool {
    let ux = if y.approximate { store.under(x.ty) } else { x.ty };
    let uy = if x.approximate { store.under(y.ty) } else { y.ty };
    !identical(store, ux, uy)
}

/// The term admitting exactly the types admitted by both `x` and `y`, or
/// `None` if they are disjoint.
pub fn term_intersect(store: &TypeStore, x: Term, y: Term) -> Option<Term> {
    if term_disjoint(store, x, y) {
        return None;
    }
    // ~T ∩ U = U; every other combination keeps the left term.
    if x.approximate && !y.approximate {
        Some(y)
    } else {
        Some(x)
    }
}

/// Report whether `term` admits the type `t`.
pub fn term_includes(store: &TypeStore, term: Term, t: TypeId) -> bool {
    if term.approximate {
        identical(store, store.under(t), store.under(term.ty))
    } else {
        identical(store, t, term.ty)
    }
}

/// Report whether some term of `union` admits `t`.
pub fn union_includes(store: &TypeStore, union: UnionId, t: TypeId) -> bool {
    store
        .union(union)
        .terms
        .iter()
        .any(|&term| term_includes(store, term, t))
}

/// Drop duplicate terms and exact terms already admitted by an approximate
/// term. Surviving terms keep their order of first appearance.
pub fn normalize_terms(store: &TypeStore, terms: &[Term]) -> Vec<Term> {
    let mut out: Vec<Term> = Vec::with_capacity(terms.len());
    for &t in terms {
        if out
            .iter()
            .any(|o| o.approximate == t.approximate && identical(store, o.ty, t.ty))
        {
            continue;
        }
        if !t.approximate
            && terms
                .iter()
                .any(|&o| o.approximate && term_includes(store, o, t.ty))
        {
            continue;
        }
        out.push(t);
    }
    out
}

/// Intersect two constraints.
///
/// The unrestricted constraint is the identity element. A type-parameter
/// constraint cannot be evaluated before instantiation, so it absorbs the
/// other side; between two type parameters the left one is kept.
pub fn intersect(store: &mut TypeStore, x: Constraint, y: Constraint) -> Constraint {
    match (x, y) {
        (Constraint::All, other) | (other, Constraint::All) => other,
        (Constraint::TypeParam(_), _) => x,
        (_, Constraint::TypeParam(_)) => y,
        (Constraint::Union(a), Constraint::Union(b)) => {
            let mut terms = Vec::new();
            for &tx in &store.union(a).terms {
                for &ty in &store.union(b).terms {
                    if let Some(t) = term_intersect(store, tx, ty) {
                        terms.push(t);
                    }
                }
            }
            let terms = normalize_terms(store, &terms);
            trace!(left = a.0, right = b.0, terms = terms.len(), "intersect unions");
            Constraint::Union(store.alloc_union(terms))
        }
    }
}

impl Constraint {
    /// Report whether the constraint admits `t`. Unknown (`None`) for a
    /// type-parameter constraint, which depends on instantiation.
    pub fn includes(self, store: &TypeStore, t: TypeId) -> Option<bool> {
        match self {
            Constraint::All => Some(true),
            Constraint::Union(u) => Some(union_includes(store, u, t)),
            Constraint::TypeParam(_) => None,
        }
    }

    /// Report whether the constraint admits no type at all.
    pub fn is_empty(self, store: &TypeStore) -> bool {
        match self {
            Constraint::Union(u) => store.union(u).terms.is_empty(),
            _ => false,
        }
    }
}
