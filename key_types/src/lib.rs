//! # Key Types
//!
//! This crate defines the fundamental types shared by the key-management
//! bridge.
//!
//! ## Philosophy
//!
//! - **Kernel-assigned identity**: key serials come from the kernel and are
//!   never validated for existence here; the kernel call's outcome is the
//!   only arbiter of validity.
//! - **Explicit over implicit**: well-known keyrings are named constants,
//!   not magic numbers scattered through call sites.
//! - **Opaque payloads**: key payloads are byte sequences with explicit
//!   length, never implicitly text.
//!
//! ## Key Types
//!
//! - [`KeySerial`]: signed identifier for a key or keyring
//! - [`KeyPermissions`]: hexadecimal permission mask
//! - [`KeyDescription`]: structured decode of the kernel description reply

pub mod description;
pub mod serial;

pub use description::{KeyDescription, KeyPermissions};
pub use serial::KeySerial;
