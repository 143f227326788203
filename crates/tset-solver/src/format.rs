//! Rendering of semantic types for diagnostics and CLI output.

use crate::store::TypeStore;
use crate::types::{Constraint, InterfaceId, MethodId, Signature, Term, TypeData, TypeId, TypeSetId};
use tset_common::Atom;

/// Formats types in Go syntax. Named types declared outside the current
/// package are qualified with their package path.
pub struct TypeFormatter<'a> {
    store: &'a TypeStore,
    pkg: Atom,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(store: &'a TypeStore) -> Self {
        TypeFormatter {
            store,
            pkg: Atom::NONE,
        }
    }

    /// Names from `pkg` are written unqualified.
    pub fn with_package(mut self, pkg: Atom) -> Self {
        self.pkg = pkg;
        self
    }

    pub fn format(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    pub fn format_term(&self, term: Term) -> String {
        let mut out = String::new();
        self.write_term(&mut out, term);
        out
    }

    /// `any` for the unrestricted constraint, `∅` for an empty union.
    pub fn format_constraint(&self, constraint: Constraint) -> String {
        match constraint {
            Constraint::All => "any".to_string(),
            Constraint::TypeParam(ty) => self.format(ty),
            Constraint::Union(u) => {
                let terms = &self.store.union(u).terms;
                if terms.is_empty() {
                    return "∅".to_string();
                }
                let mut out = String::new();
                self.write_terms(&mut out, terms);
                out
            }
        }
    }

    /// A method as it appears in an interface: `M(int) string`.
    pub fn format_method(&self, method: MethodId) -> String {
        let m = self.store.method(method);
        let mut out = self.store.resolve_atom(m.name).to_string();
        match self.store.lookup(m.sig) {
            TypeData::Signature(sig) => self.write_signature(&mut out, self.store.signature(sig)),
            _ => out.push_str("()"),
        }
        out
    }

    /// `{M(); N() int; ~int | string}`; `𝓤` for the top type set.
    pub fn format_type_set(&self, tset: TypeSetId) -> String {
        let set = self.store.type_set(tset);
        if set.is_all() {
            return "𝓤".to_string();
        }
        let mut parts: Vec<String> = set.methods().iter().map(|&m| self.format_method(m)).collect();
        if set.constraint() != Constraint::All {
            parts.push(self.format_constraint(set.constraint()));
        }
        format!("{{{}}}", parts.join("; "))
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        let store = self.store;
        match store.lookup(ty) {
            TypeData::Basic(kind) => out.push_str(kind.name()),
            TypeData::Named(id) => {
                let named = store.named(id);
                if !named.pkg.is_none() && named.pkg != self.pkg {
                    out.push_str(store.resolve_atom(named.pkg));
                    out.push('.');
                }
                out.push_str(store.resolve_atom(named.name));
            }
            TypeData::Pointer(elem) => {
                out.push('*');
                self.write_type(out, elem);
            }
            TypeData::Slice(elem) => {
                out.push_str("[]");
                self.write_type(out, elem);
            }
            TypeData::Signature(sig) => {
                out.push_str("func");
                self.write_signature(out, store.signature(sig));
            }
            TypeData::Interface(iface) => self.write_interface(out, iface),
            TypeData::Union(u) => self.write_terms(out, &store.union(u).terms),
            TypeData::TypeParam(id) => out.push_str(store.resolve_atom(store.type_param(id).name)),
        }
    }

    fn write_term(&self, out: &mut String, term: Term) {
        if term.approximate {
            out.push('~');
        }
        self.write_type(out, term.ty);
    }

    fn write_terms(&self, out: &mut String, terms: &[Term]) {
        for (i, &term) in terms.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            self.write_term(out, term);
        }
    }

    fn write_list(&self, out: &mut String, list: &[TypeId], variadic: bool) {
        for (i, &ty) in list.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if variadic && i + 1 == list.len() {
                out.push_str("...");
                match self.store.lookup(ty) {
                    TypeData::Slice(elem) => self.write_type(out, elem),
                    _ => self.write_type(out, ty),
                }
            } else {
                self.write_type(out, ty);
            }
        }
    }

    fn write_signature(&self, out: &mut String, sig: &Signature) {
        if !sig.type_params.is_empty() {
            out.push('[');
            for (i, &tp) in sig.type_params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_type(out, tp);
                if let TypeData::TypeParam(id) = self.store.lookup(tp) {
                    let constraint = self.store.type_param(id).constraint;
                    if !constraint.is_invalid() {
                        out.push(' ');
                        self.write_type(out, constraint);
                    }
                }
            }
            out.push(']');
        }
        out.push('(');
        self.write_list(out, &sig.params, sig.variadic);
        out.push(')');
        match sig.results.len() {
            0 => {}
            1 => {
                out.push(' ');
                self.write_type(out, sig.results[0]);
            }
            _ => {
                out.push_str(" (");
                self.write_list(out, &sig.results, false);
                out.push(')');
            }
        }
    }

    fn write_interface(&self, out: &mut String, iface: InterfaceId) {
        let data = self.store.interface(iface);
        if data.methods.is_empty() && data.embeddeds.is_empty() {
            out.push_str("interface{}");
            return;
        }
        out.push_str("interface{");
        let mut first = true;
        for &m in &data.methods {
            if !first {
                out.push_str("; ");
            }
            first = false;
            out.push_str(&self.format_method(m));
        }
        for &e in &data.embeddeds {
            if !first {
                out.push_str("; ");
            }
            first = false;
            self.write_type(out, e);
        }
        out.push('}');
    }
}
