//! Well-known keyring constant contract tests
//!
//! These tests pin the names and values hosts use to address the kernel's
//! special keyrings without first resolving a serial.

// ===== Canonical Constant Table =====

/// Every exported constant, in registration order, with its kernel value
pub const CONSTANT_CONTRACT: [(&str, i64); 6] = [
    ("KEY-SPEC-THREAD-KEYRING", -1),
    ("KEY-SPEC-PROCESS-KEYRING", -2),
    ("KEY-SPEC-SESSION-KEYRING", -3),
    ("KEY-SPEC-USER-SESSION-KEYRING", -5),
    ("KEY-SPEC-USER-KEYRING", -4),
    ("KEY-SPEC-GROUP-KEYRING", -6),
];

// ===== Contract Tests =====
