//! Repository command implementations
//!
//! All commands are porcelain: each operation loads the metadata record,
//! works against the commit store and the working tree, and saves the record
//! last.

pub mod porcelain;
