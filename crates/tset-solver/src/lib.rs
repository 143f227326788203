//! Interface Type-Set Engine
//!
//! Computes the *type set* of an interface: the methods it guarantees and
//! the types allowed to satisfy it when used as a constraint.
//!
//! - **Arena store**: every type, interface, method and type set is an id
//!   into [`TypeStore`]; ids are stable identities
//! - **Deferred resolution**: interface declarations schedule their
//!   type-set computation on the checker's FIFO job queue
//! - **Cycle safety**: a placeholder slot is stored before recursing into
//!   embedded interfaces
//! - **Term algebra**: embedded constraints are intersected term by term
pub mod ast;
pub mod checker;
mod format;
pub mod identical;
pub mod ordering;
mod resolver;
mod store;
pub mod term;
mod type_set;
pub mod types;

pub use ast::{Field, FuncTypeExpr, Ident, InterfaceElem, InterfaceTypeExpr, TypeExpr, TypeExprKind};
pub use checker::{CheckState, CheckedUnit, Checker, CheckerOptions, Job, TypeDecl, TypeDeclKind, Unit, check_unit};
pub use format::TypeFormatter;
pub use identical::identical;
pub use resolver::{ExprResolver, Scope};
pub use store::TypeStore;
pub use type_set::TypeSetError;
pub use types::*;

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;
#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;
#[cfg(test)]
#[path = "../tests/type_set_tests.rs"]
mod type_set_tests;
#[cfg(test)]
#[path = "../tests/term_tests.rs"]
mod term_tests;
#[cfg(test)]
#[path = "../tests/ordering_tests.rs"]
mod ordering_tests;
#[cfg(test)]
#[path = "../tests/unit_tests.rs"]
mod unit_tests;
