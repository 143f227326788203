//! Source positions.
//!
//! Declarations arrive already parsed; the engine only needs to point
//! diagnostics at a byte offset inside the compilation unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A byte offset into the source of a compilation unit.
///
/// `Pos::NONE` marks synthesized nodes (programmatically built interfaces,
/// embedded elements without a recorded position).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pos(pub u32);

impl Pos {
    pub const NONE: Pos = Pos(u32::MAX);

    #[inline]
    pub const fn new(offset: u32) -> Self {
        Pos(offset)
    }

    #[inline]
    pub fn is_known(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub fn offset(self) -> u32 {
        self.0
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "@{}", self.0)
        } else {
            f.write_str("@?")
        }
    }
}
