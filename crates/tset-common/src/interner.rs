//! Identifier pool.
//!
//! Method names, type names and package paths share one pool and travel as
//! `Atom`s, so the method-set merge compares integers instead of strings.
//!
//! Atom order is allocation order, not lexical order. Anything that must be
//! sorted by name (see `tset_solver::ordering`) resolves the atoms first.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::rc::Rc;

/// Handle to an interned string. `Atom::NONE` is the empty string and
/// doubles as "no package".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Atom::NONE
    }
}

/// Predeclared identifiers and reserved element names.
const PREDECLARED: &[&str] = &[
    "_", "type", "main", "bool", "int", "int8", "int16", "int32", "int64", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128",
    "string", "byte", "rune", "error", "any", "comparable",
];

/// Deduplicating string pool.
///
/// ```
/// use tset_common::interner::Interner;
/// let mut pool = Interner::new();
/// let name = pool.intern("String");
/// assert_eq!(pool.intern("String"), name);
/// assert_eq!(pool.resolve(name), "String");
/// ```
#[derive(Default)]
pub struct Interner {
    ids: FxHashMap<Rc<str>, Atom>,
    names: Vec<Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        let mut pool = Interner {
            ids: FxHashMap::default(),
            names: Vec::with_capacity(PREDECLARED.len() + 64),
        };
        let none = pool.intern("");
        debug_assert_eq!(none, Atom::NONE);
        pool
    }

    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.ids.get(s) {
            return atom;
        }
        let atom = Atom(self.names.len() as u32);
        let name: Rc<str> = Rc::from(s);
        self.ids.insert(Rc::clone(&name), atom);
        self.names.push(name);
        atom
    }

    /// The atom for `s`, if it was ever interned.
    pub fn get(&self, s: &str) -> Option<Atom> {
        self.ids.get(s).copied()
    }

    /// Unknown atoms resolve to the empty string.
    pub fn resolve(&self, atom: Atom) -> &str {
        self.names.get(atom.0 as usize).map_or("", |s| &**s)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Only the empty string is present.
    pub fn is_empty(&self) -> bool {
        self.names.len() <= 1
    }

    pub fn intern_common(&mut self) {
        for name in PREDECLARED {
            self.intern(name);
        }
    }
}
