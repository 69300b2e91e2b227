use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a loan description (or any JSON document) from disk.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    debug!("loading loan file {}", resolved.display());

    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read loan file '{}': {}", resolved.display(), e))?;
    if contents.trim().is_empty() {
        return Err(format!("Loan file '{}' is empty", resolved.display()).into());
    }

    serde_json::from_str(&contents).map_err(|e| {
        format!(
            "Loan file '{}' is not a valid loan description (line {}, column {}): {}",
            resolved.display(),
            e.line(),
            e.column(),
            e
        )
        .into()
    })
}

/// Anchor relative paths at the working directory and require a regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    match fs::metadata(&resolved) {
        Err(_) => Err(format!("File not found: {}", resolved.display()).into()),
        Ok(meta) if !meta.is_file() => Err(format!("Not a file: {}", resolved.display()).into()),
        Ok(_) => Ok(resolved),
    }
}
