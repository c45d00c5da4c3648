//! # Keyctl API
//!
//! This crate defines the interface between typed Rust code and the kernel
//! key-management facility.
//!
//! ## Philosophy
//!
//! The kernel owns the keys; this layer only marshals:
//! - Argument conversion happens once, at the boundary, before any call
//! - Every errno is captured at failure time and mapped to a typed error
//! - Variable-length kernel replies are parsed strictly or rejected whole
//!
//! ## Design Goals
//!
//! 1. **Testability**: the facility is a trait; the whole API runs against a
//!    simulated keyring as well as the real syscalls
//! 2. **Explicitness**: no process-global error state leaks past the seam;
//!    results carry their errno
//! 3. **Scoped ownership**: reply buffers are owned values, released on
//!    every exit path by drop
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A keystore (nothing is persisted here; the kernel persists)
//! - A concurrency layer (the kernel is the sole arbiter of concurrent use)
//! - A retry layer (every failure surfaces immediately)

pub mod errno;
pub mod error;
pub mod facility;
pub mod reply;
pub mod service;

pub use errno::Errno;
pub use error::{ErrorCondition, KeyError};
pub use facility::KeyFacility;
pub use reply::{parse_description, parse_key_list, KEY_SERIAL_WIDTH};
pub use service::KeyService;
