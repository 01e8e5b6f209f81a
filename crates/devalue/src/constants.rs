//! Reserved negative indices for values that have no element of their own.

pub const UNDEFINED: i64 = -1;
pub const HOLE: i64 = -2;
pub const NAN: i64 = -3;
pub const POSITIVE_INFINITY: i64 = -4;
pub const NEGATIVE_INFINITY: i64 = -5;
pub const NEGATIVE_ZERO: i64 = -6;

/// Deepest chain of nested slots accepted by `stringify` and `parse`.
pub const MAX_DEPTH: usize = 128;
