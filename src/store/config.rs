//! Store configuration

use std::path::{Path, PathBuf};

/// Configuration for the file-backed store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StoreConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to donations.jsonl
    pub fn donations_path(&self) -> PathBuf {
        self.data_dir.join("donations.jsonl")
    }

    /// Get path to recipients.jsonl
    pub fn recipients_path(&self) -> PathBuf {
        self.data_dir.join("recipients.jsonl")
    }

    /// Get path to availability.jsonl
    pub fn availability_path(&self) -> PathBuf {
        self.data_dir.join("availability.jsonl")
    }

    /// Get path to donors.jsonl
    pub fn donors_path(&self) -> PathBuf {
        self.data_dir.join("donors.jsonl")
    }
}
