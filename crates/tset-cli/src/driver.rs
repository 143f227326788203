//! Loads a compilation unit, checks it, and collects the resolved type sets.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info_span};
use tset_common::{Diagnostic, GoVersion};
use tset_solver::{CheckerOptions, TypeData, TypeFormatter, TypeStore, Unit, check_unit};

use crate::args::{CheckArgs, OutputFormat};

/// The resolved type set of one declared interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterfaceReport {
    pub name: String,
    pub methods: Vec<String>,
    pub constraint: String,
    /// No type satisfies the interface.
    pub empty: bool,
    /// Formatted as `{M(); ~int | string}`.
    pub type_set: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckReport {
    pub package: String,
    pub go_version: GoVersion,
    pub interfaces: Vec<InterfaceReport>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to serialize check report")
            }
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        for iface in &self.interfaces {
            out.push_str(&iface.name);
            out.push_str(": ");
            out.push_str(&iface.type_set);
            out.push('\n');
        }
        out
    }
}

pub fn load_unit(path: &Path) -> Result<Unit> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("failed to parse unit {}", path.display()))
}

/// Options for `unit`: command-line flags override the unit's own fields.
pub fn effective_options(args: &CheckArgs, unit: &Unit) -> CheckerOptions {
    let mut options = unit.options(&CheckerOptions::default());
    if let Some(package) = &args.package {
        options.package = package.clone();
    }
    if let Some(version) = args.go_version {
        options.go_version = version;
    }
    options
}

pub fn check(args: &CheckArgs) -> Result<CheckReport> {
    let unit = load_unit(&args.unit)?;
    let options = effective_options(args, &unit);
    check_with_options(&unit, options)
}

pub fn check_with_options(unit: &Unit, options: CheckerOptions) -> Result<CheckReport> {
    let span = info_span!("driver_check", decls = unit.decls.len());
    let _enter = span.enter();

    let mut store = TypeStore::new();
    let checked = check_unit(&mut store, &options, &unit.decls);
    let pkg = store.intern(&options.package);

    let mut interfaces = Vec::new();
    for &(name, ty) in &checked.declared {
        if !matches!(store.lookup(ty), TypeData::Named(_)) || store.as_interface(ty).is_none() {
            continue;
        }
        let tset = store
            .type_set_of(ty)
            .with_context(|| format!("failed to resolve {}", store.resolve_atom(name)))?;
        let formatter = TypeFormatter::new(&store).with_package(pkg);
        let set = store.type_set(tset);
        interfaces.push(InterfaceReport {
            name: store.resolve_atom(name).to_string(),
            methods: set.methods().iter().map(|&m| formatter.format_method(m)).collect(),
            constraint: formatter.format_constraint(set.constraint()),
            empty: set.is_empty(&store),
            type_set: formatter.format_type_set(tset),
        });
    }
    debug!(interfaces = interfaces.len(), diagnostics = checked.diagnostics.len(), "unit checked");

    Ok(CheckReport {
        package: options.package,
        go_version: options.go_version,
        interfaces,
        diagnostics: checked.diagnostics,
    })
}
