//! Checker: resolves type expressions and builds interfaces.
//!
//! The checker owns the diagnostics of a compilation unit and a FIFO queue
//! of deferred jobs. Interface declarations schedule their type-set
//! computation on that queue, so that every declaration of the unit exists
//! (and forward or cyclic references resolve) before any type set is
//! computed. [`Checker::process_delayed`] drains the queue to a fixed point.

mod decl;
mod interface;

pub use decl::{CheckedUnit, TypeDecl, TypeDeclKind, Unit, check_unit};

use crate::ast::{FuncTypeExpr, TypeExpr, TypeExprKind};
use crate::format::TypeFormatter;
use crate::resolver::ExprResolver;
use crate::store::TypeStore;
use crate::type_set::compute_type_set;
use crate::types::{InterfaceId, Signature, TypeId, TypeList, TypeSetId};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::collections::VecDeque;
use tracing::{debug, trace};
use tset_common::diagnostics::diagnostic_codes;
use tset_common::{Atom, Diagnostic, DiagnosticCategory, GoVersion, Pos};

/// A unit of work run after the current declaration pass.
pub type Job = Box<dyn FnOnce(&mut TypeStore, &mut CheckState)>;

/// Options for checking one compilation unit.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerOptions {
    /// Package path of the unit. Unexported method names are scoped to it.
    pub package: String,
    /// Minimum language version the unit targets.
    pub go_version: GoVersion,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            package: "main".to_string(),
            go_version: GoVersion::LATEST,
        }
    }
}

/// Per-unit state shared by the checker and its deferred jobs.
pub struct CheckState {
    pub pkg: Atom,
    pub version: GoVersion,
    diagnostics: Vec<Diagnostic>,
    queue: VecDeque<Job>,
}

impl CheckState {
    pub fn new(pkg: Atom, version: GoVersion) -> Self {
        CheckState {
            pkg,
            version,
            diagnostics: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Report whether the unit's language version is at least `min`.
    #[inline]
    pub fn allow_version(&self, min: GoVersion) -> bool {
        self.version.at_least(min)
    }

    /// Schedule `job` to run after the current declaration pass.
    pub fn later(&mut self, job: impl FnOnce(&mut TypeStore, &mut CheckState) + 'static) {
        self.queue.push_back(Box::new(job));
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        trace!(code = diagnostic.code, message = %diagnostic.message_text, "report");
        self.diagnostics.push(diagnostic);
    }

    /// Report the diagnostic `code` at `pos`.
    pub fn error(&mut self, pos: Pos, code: u32, args: &[&str]) {
        self.report(Diagnostic::from_code(pos, code, args));
    }

    /// Report `code` at `pos` as a warning, whatever its usual category.
    pub fn soft_error(&mut self, pos: Pos, code: u32, args: &[&str]) {
        let mut diagnostic = Diagnostic::from_code(pos, code, args);
        diagnostic.category = DiagnosticCategory::Warning;
        self.report(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn pending_jobs(&self) -> usize {
        self.queue.len()
    }
}

/// Resolves type expressions against a store and a name resolver.
pub struct Checker<'a> {
    store: &'a mut TypeStore,
    resolver: &'a dyn ExprResolver,
    state: CheckState,
    /// Innermost last. Type parameters shadow resolver names.
    type_param_scopes: Vec<FxHashMap<Atom, TypeId>>,
}

impl<'a> Checker<'a> {
    pub fn new(store: &'a mut TypeStore, resolver: &'a dyn ExprResolver, options: &CheckerOptions) -> Self {
        let pkg = store.intern(&options.package);
        Checker {
            store,
            resolver,
            state: CheckState::new(pkg, options.go_version),
            type_param_scopes: Vec::new(),
        }
    }

    pub fn store(&self) -> &TypeStore {
        self.store
    }

    pub fn store_mut(&mut self) -> &mut TypeStore {
        self.store
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.state.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.state.diagnostics
    }

    /// Schedule `job` to run after the current declaration pass.
    pub fn later(&mut self, job: impl FnOnce(&mut TypeStore, &mut CheckState) + 'static) {
        self.state.later(job);
    }

    /// Run deferred jobs, including jobs they schedule, until none remain.
    pub fn process_delayed(&mut self) {
        let mut processed = 0usize;
        while let Some(job) = self.state.queue.pop_front() {
            job(self.store, &mut self.state);
            processed += 1;
        }
        debug!(processed, "deferred jobs done");
    }

    /// The type set of `iface`, reporting problems as diagnostics.
    pub fn type_set(&mut self, iface: InterfaceId) -> TypeSetId {
        resolve_checked(self.store, &mut self.state, Pos::NONE, iface)
    }

    pub(crate) fn format(&self, ty: TypeId) -> String {
        TypeFormatter::new(self.store).with_package(self.state.pkg).format(ty)
    }

    /// Resolve a type expression. Failures are reported and yield
    /// `TypeId::INVALID`.
    pub fn typ(&mut self, expr: &TypeExpr) -> TypeId {
        match &expr.kind {
            TypeExprKind::Name(name) => {
                let atom = self.store.intern(name);
                if let Some(ty) = self.lookup_type_param(atom) {
                    return ty;
                }
                match self.resolver.lookup(self.store, None, atom) {
                    Some(ty) => ty,
                    None => {
                        self.state.error(expr.pos, diagnostic_codes::UNDECLARED_NAME, &[name.as_str()]);
                        TypeId::INVALID
                    }
                }
            }
            TypeExprKind::Qualified { pkg, name } => {
                let pkg_atom = self.store.intern(pkg);
                let atom = self.store.intern(name);
                match self.resolver.lookup(self.store, Some(pkg_atom), atom) {
                    Some(ty) => ty,
                    None => {
                        let qualified = format!("{pkg}.{name}");
                        self.state.error(expr.pos, diagnostic_codes::UNDECLARED_NAME, &[qualified.as_str()]);
                        TypeId::INVALID
                    }
                }
            }
            TypeExprKind::Pointer(elem) => {
                let elem = self.typ(elem);
                self.store.pointer(elem)
            }
            TypeExprKind::Slice(elem) => {
                let elem = self.typ(elem);
                self.store.slice(elem)
            }
            TypeExprKind::Func(func) => self.func_type(func),
            TypeExprKind::Interface(iface) => self.interface_type(iface, expr.pos, None),
            TypeExprKind::Tilde(_) | TypeExprKind::Or(..) => self.embedded_type(expr),
            TypeExprKind::Bad => TypeId::INVALID,
        }
    }

    fn lookup_type_param(&self, name: Atom) -> Option<TypeId> {
        self.type_param_scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    /// Declare type parameters, in order, in a new innermost scope. All
    /// parameters are visible in every constraint.
    fn declare_type_params(&mut self, fields: &[crate::ast::Field]) -> Vec<TypeId> {
        let mut scope = FxHashMap::default();
        let mut tparams = Vec::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            let name = self.store.intern(field.name.as_deref().unwrap_or("_"));
            let tparam = self.store.type_param_type(name, index as u32);
            scope.insert(name, tparam);
            tparams.push(tparam);
        }
        self.type_param_scopes.push(scope);
        for (field, &tparam) in fields.iter().zip(&tparams) {
            let constraint = self.typ(&field.ty);
            self.store.set_type_param_constraint(tparam, constraint);
        }
        tparams
    }

    /// Resolve a function type. The last parameter of a variadic function
    /// has slice type.
    pub fn func_type(&mut self, func: &FuncTypeExpr) -> TypeId {
        let has_scope = !func.type_params.is_empty();
        let type_params = if has_scope {
            self.declare_type_params(&func.type_params)
        } else {
            Vec::new()
        };

        let mut params: TypeList = func.params.iter().map(|p| self.typ(&p.ty)).collect();
        if func.variadic
            && let Some(last) = params.last_mut()
        {
            *last = self.store.slice(*last);
        }
        let results: TypeList = func.results.iter().map(|r| self.typ(&r.ty)).collect();

        if has_scope {
            self.type_param_scopes.pop();
        }
        self.store.signature_type(Signature {
            type_params,
            params,
            results,
            variadic: func.variadic,
        })
    }
}

/// Resolve a type set with a checker. Duplicate methods are reported as
/// diagnostics, so resolution always succeeds.
pub(crate) fn resolve_checked(
    store: &mut TypeStore,
    state: &mut CheckState,
    pos: Pos,
    iface: InterfaceId,
) -> TypeSetId {
    compute_type_set(store, Some(state), pos, iface).unwrap_or(TypeSetId::TOP)
}
