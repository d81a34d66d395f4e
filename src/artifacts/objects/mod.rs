//! Stored object types
//!
//! The only object kind is the commit: a self-contained record holding the
//! tracked paths and the content of the paths it changed. Records share the
//! framing helpers from [`object`].

pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
