//! # Bridge Contract Tests
//!
//! This crate provides "golden" tests for the host-facing contracts to
//! ensure they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The contracts are written out as code
//! - **Testability first**: Contract tests fail when interfaces change
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each contract surface has a module:
//! - Operation names, arities and result shapes
//! - Well-known keyring constants
//! - Error condition names, grouping and errno mapping

pub mod constants;
pub mod errors;
pub mod operations;
