//
//  upcloud-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Configuration file I/O.
//!
//! The configuration holds an API password, so files written here are
//! readable by the owner only on Unix.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the configuration file at `path` into a string.
///
/// # Errors
///
/// Fails if the file does not exist, cannot be read, or is not valid UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// On Unix the file mode is set to `0600`.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Returns `true` if a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        assert!(!config_exists(&path));

        write_config_file(&path, "timeout = 5\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "timeout = 5\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!config_exists(dir.path()));
    }
}
