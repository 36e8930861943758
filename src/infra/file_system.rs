use crate::domain::models::RecordBody;
use anyhow::Context;
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Component, Path};

/// Reads the rules file. `None` means it does not exist; any other failure is fatal.
pub fn load_rules(path: &Path) -> anyhow::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8(bytes)
                .with_context(|| format!("Rules file is not valid UTF-8: {}", path.display()))?;
            info!(
                "Loaded {} lines from {}",
                text.lines().count(),
                path.display()
            );
            Ok(Some(text))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(
                "No rules file found at {}. Proceeding without exclusion.",
                path.display()
            );
            Ok(None)
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read rules file: {}", path.display()))
        }
    }
}

pub fn read_file_text(path: &Path) -> RecordBody {
    debug!("Reading file contents: {}", path.display());
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!("Permission denied: {}", path.display());
            return RecordBody::Unreadable(format!("Could not read file: {}", e));
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return RecordBody::Unreadable(format!("Unexpected error: {}", e));
        }
    };

    match String::from_utf8(bytes) {
        Ok(contents) => {
            debug!("Read {} bytes from file", contents.len());
            RecordBody::Text(contents)
        }
        Err(e) => {
            warn!("Not valid UTF-8: {}", path.display());
            RecordBody::Unreadable(format!("Could not read file: {}", e))
        }
    }
}

/// Root-relative path joined with `/`, whatever the platform separator.
pub fn relative_posix(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
