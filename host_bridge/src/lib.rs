//! # Host Bridge
//!
//! This crate is the host-runtime face of the key-management stack: a
//! registry of named operations and constants, a dynamic value type, and a
//! dispatcher that turns `(name, args)` pairs into typed calls.
//!
//! ## Philosophy
//!
//! The host runtime is dynamically typed; the kernel is not. Everything this
//! crate does serves that seam:
//! - Operations are looked up by name against a single static registry
//! - Arguments are converted positionally, all of them, before any call
//! - Failures are values: a typed error naming the operation, the argument,
//!   or the kernel condition that rejected the request
//!
//! ## Design Goals
//!
//! 1. **One registry**: arity, documentation, and dispatch agree because
//!    they read the same table
//! 2. **Closed error surface**: hosts see the named conditions of
//!    [`error_registrations`] plus a generic OS fallback, nothing else
//! 3. **Byte fidelity**: payloads cross the seam as exact byte strings in
//!    both directions
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A host-runtime binding (no foreign ABI here; hosts adapt [`Value`])
//! - A policy layer (permissions and quotas are the kernel's)

pub mod bridge;
pub mod error;
pub mod registry;
pub mod value;

pub use bridge::Bridge;
pub use error::BridgeError;
pub use registry::{
    error_registrations, operation, ConstantSpec, ErrorRegistration, OperationSpec, CONSTANTS,
    ERROR_GROUP, OPERATIONS,
};
pub use value::Value;
