//! Core engine for the Lethe forgotten-files command service.
//!
//! "Forgotten" artifacts are document conversion outputs left in object
//! storage after an editing session ended without the client fetching the
//! result. This crate holds the command engine (retrieve with signed URLs,
//! atomic batch delete, namespace listing), the key-format validation rules,
//! the storage gateway trait with its backends, and the signed-URL issuer.

pub mod command;
pub mod config;
pub mod error;
pub mod signing;
pub mod storage;
