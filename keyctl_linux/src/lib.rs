//! # Keyctl Linux
//!
//! This crate implements the [`KeyFacility`] seam over the real Linux
//! kernel, via raw add_key(2) and keyctl(2) syscalls.
//!
//! ## Philosophy
//!
//! - **One call per primitive**: each facility method issues a single
//!   syscall (per attempt) and blocks until it returns
//! - **Errno travels with the result**: captured the instant a call fails,
//!   never read lazily from the process global later
//! - **Scoped buffers**: argument strings and reply buffers are owned values
//!   released by drop on every exit path
//!
//! Linux-only: the syscall numbers and keyctl commands have no portable
//! equivalent.

pub mod syscall;

use key_types::KeySerial;
use keyctl_api::{Errno, KeyFacility};

/// The real, syscall-backed key facility.
///
/// Stateless: every operation goes straight to the kernel, which is the
/// single source of truth and already safe for concurrent callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxKeyFacility;

impl LinuxKeyFacility {
    /// Creates a facility handle
    pub fn new() -> Self {
        Self
    }
}

impl KeyFacility for LinuxKeyFacility {
    fn add_key(
        &mut self,
        key_type: &str,
        description: &str,
        payload: &[u8],
        keyring: KeySerial,
    ) -> Result<KeySerial, Errno> {
        let key_type = syscall::to_cstring(key_type)?;
        let description = syscall::to_cstring(description)?;
        let serial = syscall::add_key(&key_type, &description, payload, keyring.raw())?;
        Ok(KeySerial::from_raw(serial))
    }

    fn update(&mut self, key: KeySerial, payload: &[u8]) -> Result<(), Errno> {
        syscall::keyctl_update(key.raw(), payload)
    }

    fn link(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno> {
        syscall::keyctl_link(key.raw(), keyring.raw())
    }

    fn unlink(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno> {
        syscall::keyctl_unlink(key.raw(), keyring.raw())
    }

    fn describe(&mut self, key: KeySerial) -> Result<String, Errno> {
        syscall::keyctl_describe_alloc(key.raw())
    }

    fn read(&mut self, key: KeySerial) -> Result<Vec<u8>, Errno> {
        syscall::keyctl_read_alloc(key.raw())
    }

    fn search(
        &mut self,
        keyring: KeySerial,
        key_type: &str,
        description: &str,
        destination: KeySerial,
    ) -> Result<KeySerial, Errno> {
        let key_type = syscall::to_cstring(key_type)?;
        let description = syscall::to_cstring(description)?;
        let serial =
            syscall::keyctl_search(keyring.raw(), &key_type, &description, destination.raw())?;
        Ok(KeySerial::from_raw(serial))
    }

    fn clear(&mut self, keyring: KeySerial) -> Result<(), Errno> {
        syscall::keyctl_clear(keyring.raw())
    }

    fn set_timeout(&mut self, key: KeySerial, timeout_seconds: u32) -> Result<(), Errno> {
        syscall::keyctl_set_timeout(key.raw(), timeout_seconds)
    }

    fn revoke(&mut self, key: KeySerial) -> Result<(), Errno> {
        syscall::keyctl_revoke(key.raw())
    }
}
