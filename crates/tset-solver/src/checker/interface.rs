//! Interface declarations and union elements.

use super::{CheckState, Checker, resolve_checked};
use crate::ast::{InterfaceTypeExpr, TypeExpr, TypeExprKind};
use crate::format::TypeFormatter;
use crate::identical::identical;
use crate::ordering::{sort_embeddeds, sort_methods};
use crate::store::TypeStore;
use crate::term::term_disjoint;
use crate::types::{Term, TypeData, TypeId, TypeSetId};
use tracing::{debug, trace};
use tset_common::diagnostics::diagnostic_codes;
use tset_common::{GoVersion, Pos};

/// Reserved element name introducing a legacy type list entry.
const TYPE_LIST_MARKER: &str = "type";

/// Collect the alternatives of `x | y | z` left to right.
fn flatten_union<'e>(list: &mut Vec<&'e TypeExpr>, x: &'e TypeExpr) {
    if let TypeExprKind::Or(lhs, rhs) = &x.kind {
        flatten_union(list, lhs);
        list.push(rhs);
    } else {
        list.push(x);
    }
}

impl Checker<'_> {
    /// Build the interface declared by `expr`.
    ///
    /// `def` is the named type being declared, if any; it becomes the
    /// receiver of the explicit methods. Type-set computation is deferred
    /// until the rest of the unit has been declared.
    pub fn interface_type(&mut self, expr: &InterfaceTypeExpr, pos: Pos, def: Option<TypeId>) -> TypeId {
        let (ty, iface) = self.store.new_interface();
        let recv = def.unwrap_or(ty);
        let allow_type_lists = !self.state.allow_version(GoVersion::GO1_18);

        let mut methods = Vec::new();
        let mut embeddeds: Vec<(TypeId, Pos)> = Vec::new();
        let mut type_list: Vec<&TypeExpr> = Vec::new();
        let mut type_list_name: Option<Pos> = None;

        for elem in &expr.elems {
            let Some(name) = &elem.name else {
                let embedded = self.embedded_type(&elem.ty);
                embeddeds.push((embedded, elem.ty.pos));
                continue;
            };

            if name.name.is_empty() || name.name == "_" {
                self.state.error(name.pos, diagnostic_codes::BLANK_METHOD_NAME, &[]);
                continue;
            }

            if name.name == TYPE_LIST_MARKER {
                if !allow_type_lists && type_list.is_empty() {
                    self.state.soft_error(name.pos, diagnostic_codes::LEGACY_TYPE_LIST, &[]);
                }
                type_list.push(&elem.ty);
                if allow_type_lists && type_list_name.is_some_and(|p| p != name.pos) {
                    self.state.error(name.pos, diagnostic_codes::MULTIPLE_TYPE_LISTS, &[]);
                }
                type_list_name = Some(name.pos);
                continue;
            }

            let typ = self.typ(&elem.ty);
            let Some(sig) = self.store.as_signature(typ) else {
                if !typ.is_invalid() {
                    let shown = self.format(typ);
                    self.state.error(elem.ty.pos, diagnostic_codes::NOT_A_METHOD_SIGNATURE, &[shown.as_str()]);
                }
                continue;
            };
            if !self.store.signature(sig).type_params.is_empty() {
                self.state.error(elem.ty.pos, diagnostic_codes::METHOD_TYPE_PARAMETERS, &[]);
            }

            let atom = self.store.intern(&name.name);
            let method = self.store.new_method(atom, self.state.pkg, typ, recv, name.pos);
            methods.push(method);
        }

        // A type list behaves like one more embedded union of ~T terms.
        if let Some(first) = type_list.first() {
            let first_pos = first.pos;
            let union = self.type_list_union(&type_list);
            embeddeds.push((union, first_pos));
        }

        sort_methods(self.store, &mut methods);
        sort_embeddeds(self.store, &mut embeddeds);

        let empty = methods.is_empty() && embeddeds.is_empty();
        let data = self.store.interface_mut(iface);
        data.methods = methods;
        data.embedded_pos = embeddeds.iter().map(|&(_, p)| p).collect();
        data.embeddeds = embeddeds.into_iter().map(|(t, _)| t).collect();
        data.complete = true;

        if empty {
            data.tset = Some(TypeSetId::TOP);
            trace!(iface = iface.0, "empty interface");
            return ty;
        }

        debug!(iface = iface.0, "scheduling type set");
        self.state.later(move |store, state| {
            resolve_checked(store, state, pos, iface);
        });
        ty
    }

    /// Resolve an embedded element: a union of terms or a single type.
    pub(crate) fn embedded_type(&mut self, expr: &TypeExpr) -> TypeId {
        let mut list = Vec::new();
        flatten_union(&mut list, expr);
        if let [single] = list.as_slice()
            && !matches!(single.kind, TypeExprKind::Tilde(_))
        {
            return self.typ(single);
        }
        self.parse_union(&list)
    }

    fn resolve_terms(&mut self, list: &[&TypeExpr], force_approximate: bool) -> Vec<(Term, Pos)> {
        let mut terms = Vec::with_capacity(list.len());
        for &x in list {
            let (approximate, inner) = match &x.kind {
                TypeExprKind::Tilde(inner) => (true, inner.as_ref()),
                _ => (force_approximate, x),
            };
            let ty = self.typ(inner);
            if ty.is_invalid() {
                continue;
            }
            terms.push((Term { ty, approximate }, x.pos));
        }
        terms
    }

    /// Build a union from its alternatives and schedule term validation.
    fn parse_union(&mut self, list: &[&TypeExpr]) -> TypeId {
        let terms = self.resolve_terms(list, false);
        if terms.is_empty() {
            return TypeId::INVALID;
        }
        let union = self
            .store
            .union_type(terms.iter().map(|&(t, _)| t).collect());
        self.state.later(move |store, state| validate_terms(store, state, &terms));
        union
    }

    /// Type list entries are collected as `~T` terms. They are not validated.
    fn type_list_union(&mut self, list: &[&TypeExpr]) -> TypeId {
        let terms = self.resolve_terms(list, true);
        if terms.is_empty() {
            return TypeId::INVALID;
        }
        self.store
            .union_type(terms.into_iter().map(|(t, _)| t).collect())
    }
}

/// Check union terms once their types are fully declared: `~T` requires
/// `T` to be its own underlying type, and no two terms may overlap.
fn validate_terms(store: &TypeStore, state: &mut CheckState, terms: &[(Term, Pos)]) {
    let fmt = TypeFormatter::new(store).with_package(state.pkg);
    let mut found: Vec<(Pos, u32, [String; 2])> = Vec::new();
    for (i, &(term, pos)) in terms.iter().enumerate() {
        let under = store.under(term.ty);
        if term.approximate && !identical(store, under, term.ty) {
            found.push((
                pos,
                diagnostic_codes::INVALID_TILDE,
                [fmt.format(term.ty), fmt.format(under)],
            ));
            continue;
        }
        // Interface terms are not compared for overlap.
        if matches!(store.lookup(under), TypeData::Interface(_)) {
            continue;
        }
        if let Some(&(other, _)) = terms[..i]
            .iter()
            .find(|&&(other, _)| !term_disjoint(store, term, other))
        {
            found.push((
                pos,
                diagnostic_codes::OVERLAPPING_TERMS,
                [fmt.format_term(term), fmt.format_term(other)],
            ));
        }
    }
    for (pos, code, [a, b]) in found {
        state.error(pos, code, &[a.as_str(), b.as_str()]);
    }
}
