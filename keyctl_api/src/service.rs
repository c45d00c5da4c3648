//! Typed operation wrappers over a key facility

use crate::errno::Errno;
use crate::error::KeyError;
use crate::facility::KeyFacility;
use crate::reply::{parse_description, parse_key_list, KEY_SERIAL_WIDTH};
use key_types::{KeyDescription, KeySerial};

/// Executes key-management operations against any [`KeyFacility`].
///
/// Each wrapper follows the same shape: convert arguments, make exactly one
/// facility call (list makes two by contract), map a failing errno through
/// [`KeyError::from_errno`] with the literal tag naming the kernel call, and
/// convert the success result. Reply buffers are owned values and drop on
/// every exit path.
pub struct KeyService<F: KeyFacility> {
    facility: F,
}

impl<F: KeyFacility> KeyService<F> {
    /// Creates a service over the given facility
    pub fn new(facility: F) -> Self {
        Self { facility }
    }

    /// Returns the underlying facility
    pub fn facility(&self) -> &F {
        &self.facility
    }

    /// Returns the underlying facility mutably
    pub fn facility_mut(&mut self) -> &mut F {
        &mut self.facility
    }

    /// Consumes the service, yielding the facility
    pub fn into_inner(self) -> F {
        self.facility
    }

    /// Creates or updates a key and links it into `keyring`.
    ///
    /// `payload` is the exact logical byte count; no terminator is stored.
    pub fn add_key(
        &mut self,
        key_type: &str,
        description: &str,
        payload: &[u8],
        keyring: KeySerial,
    ) -> Result<KeySerial, KeyError> {
        self.facility
            .add_key(key_type, description, payload, keyring)
            .map_err(|errno| KeyError::from_errno(errno, "add_key"))
    }

    /// Creates a new keyring named `name` linked into `keyring`.
    ///
    /// Implemented as add_key with the fixed type "keyring" and an empty
    /// payload, so failures carry the "add_key" tag.
    pub fn new_keyring(&mut self, name: &str, keyring: KeySerial) -> Result<KeySerial, KeyError> {
        self.facility
            .add_key("keyring", name, &[], keyring)
            .map_err(|errno| KeyError::from_errno(errno, "add_key"))
    }

    /// Replaces the payload of `key`
    pub fn update_key(&mut self, key: KeySerial, payload: &[u8]) -> Result<(), KeyError> {
        self.facility
            .update(key, payload)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_update"))
    }

    /// Links `key` into `keyring`; fails if the keyring has no spare capacity
    pub fn link(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), KeyError> {
        self.facility
            .link(key, keyring)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_link"))
    }

    /// Removes the link to `key` from `keyring`
    pub fn unlink(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), KeyError> {
        self.facility
            .unlink(key, keyring)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_unlink"))
    }

    /// Returns the kernel's description reply verbatim
    pub fn describe_raw(&mut self, key: KeySerial) -> Result<String, KeyError> {
        self.facility
            .describe(key)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_describe"))
    }

    /// Returns the structured decode of the description reply.
    ///
    /// A reply that does not yield exactly the four leading fields is a
    /// parse error naming the key, distinct from "key not found".
    pub fn describe(&mut self, key: KeySerial) -> Result<KeyDescription, KeyError> {
        let raw = self.describe_raw(key)?;
        parse_description(&raw).ok_or(KeyError::MalformedDescription { key })
    }

    /// Returns the payload of `key`, exactly the kernel-reported byte count
    pub fn read(&mut self, key: KeySerial) -> Result<Vec<u8>, KeyError> {
        self.facility
            .read(key)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_read"))
    }

    /// Returns the serials linked into `keyring`.
    ///
    /// Confirms the target's type field is exactly "keyring" before reading
    /// the member list; a mismatch stops here, no read is issued. An empty
    /// keyring yields an empty vector, which is a result, not an error.
    pub fn list(&mut self, keyring: KeySerial) -> Result<Vec<KeySerial>, KeyError> {
        let description = self.describe(keyring)?;
        if description.key_type != "keyring" {
            return Err(KeyError::NotAKeyring { key: keyring });
        }

        // Membership may have changed since the describe; that race is the
        // kernel's to arbitrate, not ours.
        let raw = self.read(keyring)?;
        parse_key_list(&raw).ok_or(KeyError::MalformedKeyList {
            key: keyring,
            length: raw.len(),
            width: KEY_SERIAL_WIDTH,
        })
    }

    /// Recursively searches `keyring`; links the found key into
    /// `destination` when one is supplied
    pub fn search(
        &mut self,
        keyring: KeySerial,
        key_type: &str,
        description: &str,
        destination: Option<KeySerial>,
    ) -> Result<KeySerial, KeyError> {
        let destination = destination.unwrap_or(KeySerial::NO_DESTINATION);
        self.facility
            .search(keyring, key_type, description, destination)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_search"))
    }

    /// Unlinks every member of `keyring`
    pub fn clear(&mut self, keyring: KeySerial) -> Result<(), KeyError> {
        self.facility
            .clear(keyring)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_clear"))
    }

    /// Sets the expiration timer of `key`; zero cancels expiration
    pub fn set_timeout(&mut self, key: KeySerial, timeout_seconds: u32) -> Result<(), KeyError> {
        self.facility
            .set_timeout(key, timeout_seconds)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_set_timeout"))
    }

    /// Marks `key` revoked
    pub fn revoke(&mut self, key: KeySerial) -> Result<(), KeyError> {
        self.facility
            .revoke(key)
            .map_err(|errno| KeyError::from_errno(errno, "keyctl_revoke"))
    }
}
