//! Centralized limits and thresholds for the type-set engine.
//!
//! Type-set resolution recurses once per embedding level. Cycles are cut by
//! the placeholder slot, so the recursion always terminates, but a long
//! acyclic chain (`I0` embeds `I1` embeds ... `In`) still nests `n` frames.
//! Rather than capping the chain, the resolver grows its stack on demand.

/// Remaining stack below which the resolver switches to a fresh segment.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated when the red zone is reached.
pub const STACK_GROWTH_SIZE: usize = 1024 * 1024;

/// Maximum number of `Named -> Named` hops followed when computing an
/// underlying type. `type A B; type B A` is diagnosed elsewhere; here the
/// chain simply resolves to the invalid type.
pub const MAX_UNDERLYING_CHAIN: u32 = 100;
