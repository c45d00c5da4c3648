//! Operation surface contract tests
//!
//! These tests define the stable host-facing operation set: the names a
//! host may call, the argument counts each accepts, and the shape of the
//! value each returns.

// ===== Canonical Operation Table =====

/// Every operation a host may invoke, with its arity bounds.
///
/// Order matches registration order. Adding an operation extends this
/// table; renaming or re-counting an existing one is a contract break.
pub const OPERATION_CONTRACT: [(&str, usize, usize); 13] = [
    ("add-key", 4, 4),
    ("new-keyring", 2, 2),
    ("update-key", 2, 2),
    ("link", 2, 2),
    ("unlink", 2, 2),
    ("raw-describe", 1, 1),
    ("describe", 1, 1),
    ("read", 1, 1),
    ("list", 1, 1),
    ("search", 3, 4),
    ("clear", 1, 1),
    ("set-timeout", 2, 2),
    ("revoke", 1, 1),
];

// ===== Contract Tests =====
