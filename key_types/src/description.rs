//! Structured key descriptions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key permission mask, as reported hexadecimal in describe replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPermissions(u32);

impl KeyPermissions {
    /// Creates a permission mask from a raw kernel value
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw mask
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Parses the hexadecimal `perm` field of a describe reply
    pub fn parse_hex(field: &str) -> Option<Self> {
        u32::from_str_radix(field, 16).ok().map(Self)
    }
}

impl fmt::Display for KeyPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Structured decode of the kernel's `type;uid;gid;perm;description` reply.
///
/// The trailing `description` field is free text owned by the key type; for
/// non-generic key types it is often a further semicolon-delimited payload,
/// so it is carried verbatim rather than split again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescription {
    /// Key type tag ("user", "keyring", ...)
    pub key_type: String,
    /// Owning user id
    pub uid: u32,
    /// Owning group id
    pub gid: u32,
    /// Permission mask
    pub permissions: KeyPermissions,
    /// Type-specific description text, possibly containing semicolons
    pub description: String,
}

impl fmt::Display for KeyDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{}",
            self.key_type, self.uid, self.gid, self.permissions, self.description
        )
    }
}
