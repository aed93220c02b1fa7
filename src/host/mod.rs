//! Host environment introspection.
//!
//! System checks never read process globals directly: they receive a
//! [`HostContext`] assembled up front, so tests can substitute synthetic
//! environments.
//!
//! # Modules
//!
//! - [`context`] - Read-only view of server variables and the memory limit
//! - [`fs`] - Effective-permission filesystem probes

pub mod context;
pub mod fs;

pub use context::{is_ci, HostContext};
pub use fs::is_path_writable;
