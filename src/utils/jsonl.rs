//! JSON Lines helpers for collection files

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Append one document and fsync
pub fn append_jsonl<P, T>(path: P, item: &T) -> io::Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut line = serde_json::to_string(item)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.sync_all()?;

    Ok(())
}

/// Load every parsable document; a missing file is an empty collection
///
/// Malformed lines are skipped with a warning so one torn append does not
/// make the whole log unreadable. Only for append-only files.
pub fn read_jsonl<P, T>(path: P) -> io::Result<Vec<T>>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    load_lines(path, |line_num, e| {
        warn!(
            file = %path.display(),
            line = line_num,
            error = %e,
            "skipping malformed document"
        );
        Ok(())
    })
}

/// Load every document, failing with `InvalidData` on the first bad line
///
/// For files that are only ever replaced whole, where a bad line means
/// corruption rather than an interrupted append.
pub fn read_jsonl_strict<P, T>(path: P) -> io::Result<Vec<T>>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let path = path.as_ref();
    load_lines(path, |line_num, e| {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} line {}: {}", path.display(), line_num, e),
        ))
    })
}

fn load_lines<T, F>(path: &Path, mut on_malformed: F) -> io::Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(usize, serde_json::Error) -> io::Result<()>,
{
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut items = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(item) => items.push(item),
            Err(e) => on_malformed(line_num + 1, e)?,
        }
    }

    Ok(items)
}
