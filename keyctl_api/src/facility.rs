//! The kernel facility seam

use crate::errno::Errno;
use key_types::KeySerial;

/// Low-level key-management facility.
///
/// One method per kernel primitive; each performs (or simulates) exactly one
/// kernel call, blocking the calling thread until it returns, and reports
/// failures as the captured [`Errno`]. Implemented by the real syscall layer
/// (`keyctl_linux`) and by the in-memory simulation (`sim_keyring`).
///
/// Variable-length replies come back as owned buffers; describe has the
/// reply's trailing NUL already stripped, read is the exact kernel-reported
/// byte count with nothing stripped.
pub trait KeyFacility {
    /// Creates or updates a key and links it into `keyring`
    fn add_key(
        &mut self,
        key_type: &str,
        description: &str,
        payload: &[u8],
        keyring: KeySerial,
    ) -> Result<KeySerial, Errno>;

    /// Replaces a key's payload
    fn update(&mut self, key: KeySerial, payload: &[u8]) -> Result<(), Errno>;

    /// Links `key` into `keyring`
    fn link(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno>;

    /// Removes the link to `key` from `keyring`
    fn unlink(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno>;

    /// Fetches the raw `type;uid;gid;perm;description` reply
    fn describe(&mut self, key: KeySerial) -> Result<String, Errno>;

    /// Fetches a key's payload verbatim
    fn read(&mut self, key: KeySerial) -> Result<Vec<u8>, Errno>;

    /// Recursively searches `keyring` for a key of `key_type` and
    /// `description`, linking the result into `destination` unless it is
    /// [`KeySerial::NO_DESTINATION`]
    fn search(
        &mut self,
        keyring: KeySerial,
        key_type: &str,
        description: &str,
        destination: KeySerial,
    ) -> Result<KeySerial, Errno>;

    /// Unlinks every member of `keyring`
    fn clear(&mut self, keyring: KeySerial) -> Result<(), Errno>;

    /// Sets a key's expiration timer; zero cancels expiration
    fn set_timeout(&mut self, key: KeySerial, timeout_seconds: u32) -> Result<(), Errno>;

    /// Marks a key revoked; further access fails with EKEYREVOKED
    fn revoke(&mut self, key: KeySerial) -> Result<(), Errno>;
}
