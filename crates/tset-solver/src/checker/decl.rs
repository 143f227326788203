//! Checking a compilation unit of type declarations.
//!
//! All names are declared before any right-hand side is resolved, so
//! declarations may refer to each other in any order.

use super::{Checker, CheckerOptions};
use crate::ast::{TypeExpr, TypeExprKind};
use crate::resolver::Scope;
use crate::store::TypeStore;
use crate::types::TypeId;
use serde::Deserialize;
use tracing::{debug, info_span, warn};
use tset_common::{Atom, Diagnostic, GoVersion, Pos};

/// A top-level declaration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub pos: Pos,
    pub kind: TypeDeclKind,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub enum TypeDeclKind {
    /// `type Name <expr>`
    Type(TypeExpr),
    /// A type parameter in scope for the whole unit, e.g. `T any`.
    TypeParam {
        #[serde(default)]
        constraint: Option<TypeExpr>,
    },
}

impl TypeDecl {
    pub fn type_decl(name: &str, pos: Pos, ty: TypeExpr) -> Self {
        TypeDecl {
            name: name.to_string(),
            pos,
            kind: TypeDeclKind::Type(ty),
        }
    }

    pub fn type_param(name: &str, pos: Pos, constraint: Option<TypeExpr>) -> Self {
        TypeDecl {
            name: name.to_string(),
            pos,
            kind: TypeDeclKind::TypeParam { constraint },
        }
    }
}

/// A compilation unit as read from JSON. Missing options take the values
/// of [`CheckerOptions::default`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Unit {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub go_version: Option<GoVersion>,
    #[serde(default)]
    pub decls: Vec<TypeDecl>,
}

impl Unit {
    /// Options for checking this unit; unit fields override `base`.
    pub fn options(&self, base: &CheckerOptions) -> CheckerOptions {
        CheckerOptions {
            package: self.package.clone().unwrap_or_else(|| base.package.clone()),
            go_version: self.go_version.unwrap_or(base.go_version),
        }
    }
}

/// Result of checking a unit.
#[derive(Debug, Default)]
pub struct CheckedUnit {
    /// Declared names with their types, in declaration order.
    pub declared: Vec<(Atom, TypeId)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckedUnit {
    pub fn lookup(&self, store: &TypeStore, name: &str) -> Option<TypeId> {
        let atom = store.interner().get(name)?;
        self.declared
            .iter()
            .find(|&&(n, _)| n == atom)
            .map(|&(_, ty)| ty)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Declare, resolve and finish every declaration of a unit.
pub fn check_unit(store: &mut TypeStore, options: &CheckerOptions, decls: &[TypeDecl]) -> CheckedUnit {
    let span = info_span!("check_unit", package = %options.package, version = %options.go_version);
    let _enter = span.enter();

    let pkg = store.intern(&options.package);
    let universe = Scope::universe(store);
    let mut scope = Scope::with_parent(universe);

    let mut declared = Vec::with_capacity(decls.len());
    let mut tparam_index = 0u32;
    for decl in decls {
        let name = store.intern(&decl.name);
        let ty = match decl.kind {
            TypeDeclKind::Type(_) => store.named_type(name, pkg),
            TypeDeclKind::TypeParam { .. } => {
                tparam_index += 1;
                store.type_param_type(name, tparam_index - 1)
            }
        };
        if scope.insert(name, ty).is_some() {
            warn!(name = %decl.name, "redeclared; the last declaration wins");
        }
        declared.push((name, ty));
    }

    let mut checker = Checker::new(store, &scope, options);
    for (decl, &(_, ty)) in decls.iter().zip(&declared) {
        match &decl.kind {
            TypeDeclKind::Type(expr) => {
                let underlying = match &expr.kind {
                    TypeExprKind::Interface(iface) => checker.interface_type(iface, expr.pos, Some(ty)),
                    _ => checker.typ(expr),
                };
                checker.store_mut().set_underlying(ty, underlying);
            }
            TypeDeclKind::TypeParam { constraint } => {
                let constraint = match constraint {
                    Some(expr) => checker.typ(expr),
                    None => TypeId::INVALID,
                };
                checker.store_mut().set_type_param_constraint(ty, constraint);
            }
        }
    }

    debug!(jobs = checker.state().pending_jobs(), "declarations done");
    checker.process_delayed();
    CheckedUnit {
        declared,
        diagnostics: checker.into_diagnostics(),
    }
}
