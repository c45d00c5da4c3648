//! Kernel key and keyring identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed identifier naming a kernel key or keyring.
///
/// Positive serials name concrete keys. The negative values are well-known
/// sentinels that the kernel resolves at call time to a thread-, process-,
/// session-, user-, or group-scoped keyring. A serial is never checked for
/// existence before use; only the kernel call's outcome determines validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeySerial(i32);

impl KeySerial {
    /// Thread-specific keyring, resolved by the kernel per calling thread.
    pub const THREAD_KEYRING: KeySerial = KeySerial(-1);

    /// Process-specific keyring.
    pub const PROCESS_KEYRING: KeySerial = KeySerial(-2);

    /// Session-specific keyring.
    pub const SESSION_KEYRING: KeySerial = KeySerial(-3);

    /// UID-specific keyring.
    pub const USER_KEYRING: KeySerial = KeySerial(-4);

    /// UID-session keyring.
    pub const USER_SESSION_KEYRING: KeySerial = KeySerial(-5);

    /// GID-specific keyring.
    pub const GROUP_KEYRING: KeySerial = KeySerial(-6);

    /// "No destination keyring" sentinel accepted by search.
    pub const NO_DESTINATION: KeySerial = KeySerial(0);

    /// Creates a serial from a raw kernel value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw kernel value
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns true for the well-known negative sentinel serials
    pub fn is_special(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for KeySerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_values_match_kernel() {
        assert_eq!(KeySerial::THREAD_KEYRING.raw(), -1);
        assert_eq!(KeySerial::PROCESS_KEYRING.raw(), -2);
        assert_eq!(KeySerial::SESSION_KEYRING.raw(), -3);
        assert_eq!(KeySerial::USER_KEYRING.raw(), -4);
        assert_eq!(KeySerial::USER_SESSION_KEYRING.raw(), -5);
        assert_eq!(KeySerial::GROUP_KEYRING.raw(), -6);
        assert_eq!(KeySerial::NO_DESTINATION.raw(), 0);
    }

    #[test]
    fn test_special_serials() {
        assert!(KeySerial::SESSION_KEYRING.is_special());
        assert!(!KeySerial::NO_DESTINATION.is_special());
        assert!(!KeySerial::from_raw(42).is_special());
    }

    #[test]
    fn test_display_is_raw_value() {
        assert_eq!(KeySerial::from_raw(123).to_string(), "123");
        assert_eq!(KeySerial::SESSION_KEYRING.to_string(), "-3");
    }

    #[test]
    fn test_serde_round_trip() {
        let serial = KeySerial::from_raw(7);
        let json = serde_json::to_string(&serial).unwrap();
        assert_eq!(json, "7");
        let back: KeySerial = serde_json::from_str(&json).unwrap();
        assert_eq!(back, serial);
    }
}
