//! Utility functions and helpers
//!
//! File helpers shared by the store: atomic rewrites and JSON Lines I/O.

pub mod atomic;
pub mod jsonl;

pub use atomic::{atomic_write_jsonl, cleanup_temp_files};
pub use jsonl::{append_jsonl, read_jsonl, read_jsonl_strict};
