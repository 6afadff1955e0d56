//! Access control subsystem.

pub mod access_control;

pub use access_control::is_allowed;
