//! # Simulated Keyring
//!
//! This crate provides a simulated implementation of the key facility.
//!
//! ## Purpose
//!
//! The simulated facility allows testing the whole bridge without touching
//! the running kernel's keyrings:
//! - Runs under `cargo test`, no privileges, no seccomp surprises
//! - Deterministic (no shared session keyring state between tests)
//! - Inspectable (state is in-process)
//!
//! ## Philosophy
//!
//! **Testability is a first-class design constraint.**
//!
//! This is not a stub that returns canned answers: it keeps real keyring
//! membership, resolves the well-known sentinel serials, enforces revocation
//! and type rules, and serializes member lists in the kernel's binary reply
//! format, so everything above the [`KeyFacility`] seam behaves as it would
//! against the real kernel.

use key_types::KeySerial;
use keyctl_api::{Errno, KeyFacility};
use std::collections::{HashMap, HashSet};

/// Supported simulated key types.
///
/// Only the generic payload type and keyrings exist here; any other type
/// tag fails with ENODEV, which is deliberately outside the bridge's known
/// errno set and exercises the generic error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    User,
    Keyring,
}

impl KeyKind {
    fn from_tag(tag: &str) -> Result<Self, Errno> {
        match tag {
            "user" => Ok(KeyKind::User),
            "keyring" => Ok(KeyKind::Keyring),
            "" => Err(Errno(libc::EINVAL)),
            _ => Err(Errno(libc::ENODEV)),
        }
    }

    fn tag(self) -> &'static str {
        match self {
            KeyKind::User => "user",
            KeyKind::Keyring => "keyring",
        }
    }
}

#[derive(Debug, Clone)]
struct SimKey {
    kind: KeyKind,
    description: String,
    payload: Vec<u8>,
    members: Vec<i32>,
    uid: u32,
    gid: u32,
    permissions: u32,
    revoked: bool,
    expired: bool,
    timeout_seconds: Option<u32>,
}

impl SimKey {
    fn new(kind: KeyKind, description: &str, payload: &[u8]) -> Self {
        let permissions = match kind {
            KeyKind::User => 0x3f01_0000,
            KeyKind::Keyring => 0x3f1f_0000,
        };
        Self {
            kind,
            description: description.to_string(),
            payload: payload.to_vec(),
            members: Vec::new(),
            uid: 1000,
            gid: 1000,
            permissions,
            revoked: false,
            expired: false,
            timeout_seconds: None,
        }
    }

    /// EKEYREVOKED / EKEYEXPIRED gate applied before any use of the key
    fn check_usable(&self) -> Result<(), Errno> {
        if self.revoked {
            return Err(Errno(libc::EKEYREVOKED));
        }
        if self.expired {
            return Err(Errno(libc::EKEYEXPIRED));
        }
        Ok(())
    }
}

/// Simulated key facility state.
///
/// All six well-known sentinel keyrings are created up front, so calls
/// naming them resolve the way they do against a running kernel.
pub struct SimKeyFacility {
    keys: HashMap<i32, SimKey>,
    /// Sentinel raw value -> backing keyring serial
    specials: HashMap<i32, i32>,
    next_serial: i32,
    fail_next: Option<Errno>,
}

impl SimKeyFacility {
    /// Creates a facility with the six well-known keyrings in place
    pub fn new() -> Self {
        let mut facility = Self {
            keys: HashMap::new(),
            specials: HashMap::new(),
            next_serial: 1,
            fail_next: None,
        };
        let sentinels = [
            (KeySerial::THREAD_KEYRING, "_tid"),
            (KeySerial::PROCESS_KEYRING, "_pid"),
            (KeySerial::SESSION_KEYRING, "_ses"),
            (KeySerial::USER_KEYRING, "_uid.1000"),
            (KeySerial::USER_SESSION_KEYRING, "_uid_ses.1000"),
            (KeySerial::GROUP_KEYRING, "_gid.1000"),
        ];
        for (sentinel, name) in sentinels {
            let serial = facility.insert(SimKey::new(KeyKind::Keyring, name, &[]));
            facility.specials.insert(sentinel.raw(), serial);
        }
        facility
    }

    /// Forces the next facility call to fail with `errno`.
    ///
    /// Lets tests exercise arbitrary kernel failure modes, including errnos
    /// outside the known set, without arranging real kernel state.
    pub fn fail_next(&mut self, errno: Errno) {
        self.fail_next = Some(errno);
    }

    /// Marks a key expired, as if its timeout had elapsed
    pub fn force_expire(&mut self, key: KeySerial) {
        if let Some(entry) = self.keys.get_mut(&key.raw()) {
            entry.expired = true;
        }
    }

    /// Number of keys currently known to the facility
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn insert(&mut self, key: SimKey) -> i32 {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.keys.insert(serial, key);
        serial
    }

    fn take_fault(&mut self) -> Result<(), Errno> {
        match self.fail_next.take() {
            Some(errno) => Err(errno),
            None => Ok(()),
        }
    }

    /// Resolves sentinels to their backing keyrings and rejects serials the
    /// facility has never issued
    fn resolve(&self, serial: KeySerial) -> Result<i32, Errno> {
        let raw = serial.raw();
        if raw < 0 {
            return self.specials.get(&raw).copied().ok_or(Errno(libc::ENOKEY));
        }
        if self.keys.contains_key(&raw) {
            Ok(raw)
        } else {
            Err(Errno(libc::ENOKEY))
        }
    }

    fn key(&self, serial: i32) -> &SimKey {
        // resolve() precedes every lookup
        &self.keys[&serial]
    }

    fn resolve_keyring(&self, serial: KeySerial) -> Result<i32, Errno> {
        let resolved = self.resolve(serial)?;
        let entry = self.key(resolved);
        entry.check_usable()?;
        if entry.kind != KeyKind::Keyring {
            return Err(Errno(libc::ENOTDIR));
        }
        Ok(resolved)
    }

    /// True when `target` can be reached by walking members from `ring`
    fn reaches(&self, ring: i32, target: i32) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![ring];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(entry) = self.keys.get(&current) {
                stack.extend(entry.members.iter().copied());
            }
        }
        false
    }

    fn find_member(&self, ring: i32, kind: KeyKind, description: &str) -> Option<i32> {
        self.key(ring)
            .members
            .iter()
            .copied()
            .find(|member| {
                let entry = self.key(*member);
                entry.kind == kind && entry.description == description
            })
    }

    fn search_recursive(
        &self,
        ring: i32,
        kind: KeyKind,
        description: &str,
        visited: &mut HashSet<i32>,
    ) -> Option<i32> {
        if !visited.insert(ring) {
            return None;
        }
        for member in self.key(ring).members.clone() {
            let entry = self.key(member);
            if entry.kind == kind && entry.description == description {
                return Some(member);
            }
            if entry.kind == KeyKind::Keyring && !entry.revoked {
                if let Some(found) = self.search_recursive(member, kind, description, visited) {
                    return Some(found);
                }
            }
        }
        None
    }
}

impl Default for SimKeyFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyFacility for SimKeyFacility {
    fn add_key(
        &mut self,
        key_type: &str,
        description: &str,
        payload: &[u8],
        keyring: KeySerial,
    ) -> Result<KeySerial, Errno> {
        self.take_fault()?;
        let kind = KeyKind::from_tag(key_type)?;
        if kind == KeyKind::Keyring && !payload.is_empty() {
            return Err(Errno(libc::EINVAL));
        }
        let ring = self.resolve_keyring(keyring)?;

        if let Some(existing) = self.find_member(ring, kind, description) {
            let entry = self.key(existing);
            entry.check_usable()?;
            match kind {
                KeyKind::User => {
                    // add_key onto an existing match updates in place
                    if let Some(entry) = self.keys.get_mut(&existing) {
                        entry.payload = payload.to_vec();
                    }
                    return Ok(KeySerial::from_raw(existing));
                }
                KeyKind::Keyring => {
                    // A fresh keyring displaces the old link
                    let serial = self.insert(SimKey::new(kind, description, &[]));
                    if let Some(ring_entry) = self.keys.get_mut(&ring) {
                        ring_entry.members.retain(|member| *member != existing);
                        ring_entry.members.push(serial);
                    }
                    return Ok(KeySerial::from_raw(serial));
                }
            }
        }

        let serial = self.insert(SimKey::new(kind, description, payload));
        if let Some(ring_entry) = self.keys.get_mut(&ring) {
            ring_entry.members.push(serial);
        }
        Ok(KeySerial::from_raw(serial))
    }

    fn update(&mut self, key: KeySerial, payload: &[u8]) -> Result<(), Errno> {
        self.take_fault()?;
        let resolved = self.resolve(key)?;
        self.key(resolved).check_usable()?;
        if self.key(resolved).kind == KeyKind::Keyring {
            return Err(Errno(libc::EOPNOTSUPP));
        }
        if let Some(entry) = self.keys.get_mut(&resolved) {
            entry.payload = payload.to_vec();
        }
        Ok(())
    }

    fn link(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno> {
        self.take_fault()?;
        let target = self.resolve(key)?;
        self.key(target).check_usable()?;
        let ring = self.resolve_keyring(keyring)?;
        if target == ring || self.reaches(target, ring) {
            return Err(Errno(libc::EDEADLK));
        }
        if let Some(ring_entry) = self.keys.get_mut(&ring) {
            if !ring_entry.members.contains(&target) {
                ring_entry.members.push(target);
            }
        }
        Ok(())
    }

    fn unlink(&mut self, key: KeySerial, keyring: KeySerial) -> Result<(), Errno> {
        self.take_fault()?;
        let target = self.resolve(key)?;
        let ring = self.resolve_keyring(keyring)?;
        let ring_entry = match self.keys.get_mut(&ring) {
            Some(entry) => entry,
            None => return Err(Errno(libc::ENOKEY)),
        };
        let before = ring_entry.members.len();
        ring_entry.members.retain(|member| *member != target);
        if ring_entry.members.len() == before {
            return Err(Errno(libc::ENOENT));
        }
        Ok(())
    }

    fn describe(&mut self, key: KeySerial) -> Result<String, Errno> {
        self.take_fault()?;
        let resolved = self.resolve(key)?;
        let entry = self.key(resolved);
        entry.check_usable()?;
        Ok(format!(
            "{};{};{};{:08x};{}",
            entry.kind.tag(),
            entry.uid,
            entry.gid,
            entry.permissions,
            entry.description
        ))
    }

    fn read(&mut self, key: KeySerial) -> Result<Vec<u8>, Errno> {
        self.take_fault()?;
        let resolved = self.resolve(key)?;
        let entry = self.key(resolved);
        entry.check_usable()?;
        match entry.kind {
            KeyKind::User => Ok(entry.payload.clone()),
            KeyKind::Keyring => {
                // The kernel's binary member-list reply format
                let mut raw = Vec::with_capacity(entry.members.len() * 4);
                for member in &entry.members {
                    raw.extend_from_slice(&member.to_ne_bytes());
                }
                Ok(raw)
            }
        }
    }

    fn search(
        &mut self,
        keyring: KeySerial,
        key_type: &str,
        description: &str,
        destination: KeySerial,
    ) -> Result<KeySerial, Errno> {
        self.take_fault()?;
        let kind = KeyKind::from_tag(key_type)?;
        let ring = self.resolve_keyring(keyring)?;

        let mut visited = HashSet::new();
        let found = self
            .search_recursive(ring, kind, description, &mut visited)
            .ok_or(Errno(libc::ENOKEY))?;
        self.key(found).check_usable()?;

        if destination != KeySerial::NO_DESTINATION {
            let dest = self.resolve_keyring(destination)?;
            if let Some(dest_entry) = self.keys.get_mut(&dest) {
                if !dest_entry.members.contains(&found) {
                    dest_entry.members.push(found);
                }
            }
        }
        Ok(KeySerial::from_raw(found))
    }

    fn clear(&mut self, keyring: KeySerial) -> Result<(), Errno> {
        self.take_fault()?;
        let ring = self.resolve_keyring(keyring)?;
        if let Some(entry) = self.keys.get_mut(&ring) {
            entry.members.clear();
        }
        Ok(())
    }

    fn set_timeout(&mut self, key: KeySerial, timeout_seconds: u32) -> Result<(), Errno> {
        self.take_fault()?;
        let resolved = self.resolve(key)?;
        self.key(resolved).check_usable()?;
        if let Some(entry) = self.keys.get_mut(&resolved) {
            // Zero cancels expiration
            entry.timeout_seconds = if timeout_seconds == 0 {
                None
            } else {
                Some(timeout_seconds)
            };
        }
        Ok(())
    }

    fn revoke(&mut self, key: KeySerial) -> Result<(), Errno> {
        self.take_fault()?;
        let resolved = self.resolve(key)?;
        self.key(resolved).check_usable()?;
        if let Some(entry) = self.keys.get_mut(&resolved) {
            entry.revoked = true;
        }
        Ok(())
    }
}
