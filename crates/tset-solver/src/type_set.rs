//! Type-set resolution.
//!
//! `compute_type_set` turns a complete interface into its resolved
//! [`TypeSet`]: the merged, sorted method list of the interface and
//! everything it embeds, plus the intersection of all embedded constraints.
//!
//! Each interface is resolved at most once. Before recursing into embedded
//! interfaces the resolver stores an empty placeholder slot in the
//! interface, so a cycle (`type I interface{ I }`) sees the placeholder and
//! terminates with a degraded, empty result instead of recursing forever.

use crate::checker::CheckState;
use crate::format::TypeFormatter;
use crate::identical::identical;
use crate::ordering::{assert_sorted_methods, sort_methods};
use crate::store::TypeStore;
use crate::term::intersect;
use crate::types::{Constraint, Embedded, InterfaceId, MethodId, Term, TypeData, TypeId, TypeSet, TypeSetId};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::{debug, debug_span, trace};
use tset_common::diagnostics::diagnostic_codes;
use tset_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use tset_common::{Atom, Diagnostic, GoVersion, Pos};

/// Failure to resolve a type set without a checker.
///
/// With a checker, the same conditions are reported as diagnostics and
/// resolution recovers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSetError {
    DuplicateMethod { name: String, pos: Pos, other: Pos },
}

impl fmt::Display for TypeSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSetError::DuplicateMethod { name, pos, .. } => {
                write!(f, "{pos}: duplicate method {name}")
            }
        }
    }
}

impl std::error::Error for TypeSetError {}

/// Report a duplicate method at `pos`, citing the first declaration.
fn duplicate_method(name: &str, pos: Pos, other: Pos) -> Diagnostic {
    Diagnostic::from_code(pos, diagnostic_codes::DUPLICATE_METHOD, &[name]).with_related(
        other,
        diagnostic_codes::OTHER_DECLARATION,
        &[name],
    )
}

/// Method set under construction. Entries keep insertion order; the final
/// list is sorted once all contributions are in.
#[derive(Default)]
struct MethodSet {
    /// method key -> (first method seen, its position, declared explicitly)
    seen: IndexMap<(Atom, Atom), (MethodId, Pos, bool)>,
    /// Distinct same-name methods from embeddings, compared after all
    /// embeddings are collected (checkerless mode only).
    todo: Vec<(MethodId, MethodId)>,
}

impl MethodSet {
    fn add(
        &mut self,
        store: &TypeStore,
        state: Option<&mut CheckState>,
        pos: Pos,
        m: MethodId,
        explicit: bool,
    ) -> Result<(), TypeSetError> {
        let key = store.method_key(m);
        let Some(&(other, other_pos, other_explicit)) = self.seen.get(&key) else {
            self.seen.insert(key, (m, pos, explicit));
            return Ok(());
        };
        if other == m {
            // Same method reached through another embedding path.
            return Ok(());
        }
        let name = store.method_name(m).to_string();
        if explicit {
            let Some(state) = state else {
                return Err(TypeSetError::DuplicateMethod {
                    name,
                    pos,
                    other: other_pos,
                });
            };
            state.report(duplicate_method(&name, pos, other_pos));
            return Ok(());
        }
        if other_explicit {
            // An explicit declaration shadows embedded ones.
            trace!(method = %name, "embedded method shadowed by explicit declaration");
            return Ok(());
        }
        match state {
            None => self.todo.push((m, other)),
            Some(state) => {
                // Signatures may still be unresolved; compare once the
                // current declarations are done.
                state.later(move |store, state| {
                    let sig = store.method(m).sig;
                    let other_sig = store.method(other).sig;
                    let comparable = resolve_mentioned_interfaces(store, Some(&mut *state), sig).is_ok()
                        && resolve_mentioned_interfaces(store, Some(&mut *state), other_sig).is_ok();
                    if !state.allow_version(GoVersion::GO1_14)
                        || !comparable
                        || !identical(store, sig, other_sig)
                    {
                        state.report(duplicate_method(&name, pos, other_pos));
                    }
                });
            }
        }
        Ok(())
    }

    fn into_methods(self) -> Vec<MethodId> {
        self.seen.into_values().map(|(m, _, _)| m).collect()
    }
}

/// Resolve the type set of every interface mentioned by `ty`, including
/// those inside the methods of the interfaces found, so that [`identical`]
/// compares them by type set. Named types are not entered.
fn resolve_mentioned_interfaces(
    store: &mut TypeStore,
    mut state: Option<&mut CheckState>,
    ty: TypeId,
) -> Result<(), TypeSetError> {
    let mut pending = vec![ty];
    let mut visited = FxHashSet::default();
    while let Some(ty) = pending.pop() {
        if !visited.insert(ty) {
            continue;
        }
        match store.lookup(ty) {
            TypeData::Pointer(elem) | TypeData::Slice(elem) => pending.push(elem),
            TypeData::Signature(sig) => {
                let sig = store.signature(sig);
                pending.extend(sig.params.iter().chain(&sig.results).copied());
            }
            TypeData::Union(union) => pending.extend(store.union(union).terms.iter().map(|t| t.ty)),
            TypeData::Interface(iface) => {
                let tset = compute_type_set(store, state.as_deref_mut(), Pos::NONE, iface)?;
                let set = store.type_set(tset);
                pending.extend(set.methods.iter().map(|&m| store.method(m).sig));
                if let Constraint::Union(union) = set.constraint {
                    pending.extend(store.union(union).terms.iter().map(|t| t.ty));
                }
            }
            TypeData::Basic(_) | TypeData::Named(_) | TypeData::TypeParam(_) => {}
        }
    }
    Ok(())
}

/// Compute (or return the memoized) type set of `iface`.
///
/// `state` is `None` when no checker is available: duplicate methods then
/// fail with an error instead of being reported, and version gates are
/// treated as satisfied.
pub(crate) fn compute_type_set(
    store: &mut TypeStore,
    state: Option<&mut CheckState>,
    pos: Pos,
    iface: InterfaceId,
) -> Result<TypeSetId, TypeSetError> {
    if let Some(tset) = store.interface(iface).tset {
        return Ok(tset);
    }
    // An incomplete interface would produce a partial type set. Don't store
    // anything so the full set is still computed once it is complete.
    if !store.interface(iface).complete {
        trace!(iface = iface.0, "incomplete interface, using top type set");
        return Ok(TypeSetId::TOP);
    }

    let slot = store.alloc_type_set();
    store.interface_mut(iface).tset = Some(slot);

    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
        let result = fill_type_set(store, state, pos, iface, slot);
        if result.is_err() {
            store.interface_mut(iface).tset = None;
        }
        result
    })
}

fn fill_type_set(
    store: &mut TypeStore,
    mut state: Option<&mut CheckState>,
    pos: Pos,
    iface: InterfaceId,
    slot: TypeSetId,
) -> Result<TypeSetId, TypeSetError> {
    let span = debug_span!("type_set", iface = iface.0, pos = %pos);
    let _enter = span.enter();

    let data = store.interface(iface);
    let explicit = data.methods.clone();
    let embeddeds: Vec<(TypeId, Pos)> = data
        .embeddeds
        .iter()
        .enumerate()
        .map(|(i, &ty)| (ty, data.embedded_pos(i)))
        .collect();

    let mut set = MethodSet::default();
    for m in explicit {
        let m_pos = store.method(m).pos;
        set.add(store, state.as_deref_mut(), m_pos, m, true)?;
    }

    let mut constraint = Constraint::All;
    for (ty, pos) in embeddeds {
        let contribution = match store.classify_embedded(ty) {
            Embedded::Interface(embedded) => {
                let tset = compute_type_set(store, state.as_deref_mut(), pos, embedded)?;
                let methods = store.type_set(tset).methods.clone();
                for m in methods {
                    // Embedded methods are attributed to the embedding site.
                    set.add(store, state.as_deref_mut(), pos, m, false)?;
                }
                store.type_set(tset).constraint
            }
            Embedded::Union(union) => Constraint::Union(union),
            Embedded::TypeParam(_) => {
                if let Some(state) = state.as_deref_mut()
                    && !state.allow_version(GoVersion::GO1_18)
                {
                    let name = TypeFormatter::new(store).with_package(state.pkg).format(ty);
                    state.error(pos, diagnostic_codes::EMBEDDED_TYPE_PARAMETER, &[name.as_str()]);
                    continue;
                }
                Constraint::TypeParam(ty)
            }
            Embedded::Invalid => continue,
            Embedded::Other(other) => {
                if let Some(state) = state.as_deref_mut()
                    && !state.allow_version(GoVersion::GO1_18)
                {
                    let name = TypeFormatter::new(store).with_package(state.pkg).format(other);
                    state.error(pos, diagnostic_codes::EMBEDDED_NOT_AN_INTERFACE, &[name.as_str()]);
                    continue;
                }
                Constraint::Union(store.alloc_union(vec![Term::exact(other)]))
            }
        };
        constraint = intersect(store, constraint, contribution);
    }

    for &(m, other) in &set.todo {
        let (sig, other_sig) = (store.method(m).sig, store.method(other).sig);
        resolve_mentioned_interfaces(store, None, sig)?;
        resolve_mentioned_interfaces(store, None, other_sig)?;
        if !identical(store, sig, other_sig) {
            return Err(TypeSetError::DuplicateMethod {
                name: store.method_name(m).to_string(),
                pos: store.method(m).pos,
                other: store.method(other).pos,
            });
        }
    }

    let mut methods = set.into_methods();
    sort_methods(store, &mut methods);
    assert_sorted_methods(store, &methods);
    debug!(methods = methods.len(), ?constraint, "type set resolved");

    let tset = store.type_set_mut(slot);
    tset.methods = methods;
    tset.constraint = constraint;
    tset.finalized = true;
    Ok(slot)
}

impl TypeStore {
    /// Resolve the type set of `iface` without a checker.
    ///
    /// Fails if two distinct methods of the same name conflict. On failure
    /// every interface whose resolution was interrupted is left unresolved.
    pub fn resolve_type_set(&mut self, iface: InterfaceId) -> Result<TypeSetId, TypeSetError> {
        compute_type_set(self, None, Pos::NONE, iface)
    }

    /// Resolve the type set of the interface behind `ty`. Non-interface
    /// types have the top type set.
    pub fn type_set_of(&mut self, ty: TypeId) -> Result<TypeSetId, TypeSetError> {
        match self.as_interface(ty) {
            Some(iface) => self.resolve_type_set(iface),
            None => Ok(TypeSetId::TOP),
        }
    }

    /// All methods of `iface`, explicit and embedded, in canonical order.
    pub fn all_methods(&mut self, iface: InterfaceId) -> Result<Vec<MethodId>, TypeSetError> {
        let tset = self.resolve_type_set(iface)?;
        Ok(self.type_set(tset).methods.clone())
    }

    /// Report whether `iface` places no requirement on its types: no
    /// methods and no type restriction.
    pub fn is_unrestricted(&mut self, iface: InterfaceId) -> Result<bool, TypeSetError> {
        let tset = self.resolve_type_set(iface)?;
        Ok(self.type_set(tset).is_all())
    }
}

impl TypeSet {
    /// The method named `name`, if any.
    pub fn lookup_method(&self, store: &TypeStore, name: &str) -> Option<MethodId> {
        self.methods
            .iter()
            .copied()
            .find(|&m| store.method_name(m) == name)
    }

    /// Report whether no type satisfies the set.
    pub fn is_empty(&self, store: &TypeStore) -> bool {
        self.constraint.is_empty(store)
    }
}
