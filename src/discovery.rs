//! Filesystem discovery of plugin binaries.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Returns the executable files found in `dirs`, sorted by path so
/// registration order is stable. Subdirectories and dotfiles are skipped.
pub fn plugin_binaries(dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut binaries = Vec::new();

    for dir in dirs {
        let entries = fs::read_dir(dir).map_err(|err| {
            Error::Configuration(format!("reading plugin directory {}: {err}", dir.display()))
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if path.is_dir() || name.starts_with('.') {
                continue;
            }
            if is_executable(&path) {
                binaries.push(path);
            }
        }
    }

    binaries.sort();
    Ok(binaries)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("exe"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn finds_executables_and_skips_everything_else() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let plugin = root.join("rate-limit");
        fs::write(&plugin, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&plugin, fs::Permissions::from_mode(0o755)).unwrap();

        fs::write(root.join("README.md"), b"docs").unwrap();
        fs::write(root.join(".hidden"), b"").unwrap();
        fs::set_permissions(
            root.join(".hidden"),
            fs::Permissions::from_mode(0o755),
        )
        .unwrap();
        fs::create_dir(root.join("subdir")).unwrap();

        let found = plugin_binaries(&[root.to_path_buf()]).unwrap();
        assert_eq!(found, vec![plugin]);
    }

    #[test]
    fn missing_directory_is_a_configuration_error() {
        let missing = PathBuf::from("/definitely/not/a/real/plugin/dir");
        let err = plugin_binaries(&[missing]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
