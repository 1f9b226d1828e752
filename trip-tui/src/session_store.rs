use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config::TripConfig;

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn session_path() -> Result<PathBuf> {
    Ok(TripConfig::config_dir()?.join("session"))
}

pub fn load_session() -> Result<Option<String>> {
    load_session_from(&session_path()?)
}

pub fn save_session(token: &str) -> Result<()> {
    save_session_to(&session_path()?, token)
}

pub fn clear_session() -> Result<()> {
    clear_session_at(&session_path()?)
}

fn load_session_from(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let session = std::fs::read_to_string(path).context("Failed to read session file")?;
    let session = session.trim().to_string();
    if session.is_empty() {
        return Ok(None);
    }
    Ok(Some(session))
}

fn save_session_to(path: &Path, token: &str) -> Result<()> {
    let token = token.trim();
    anyhow::ensure!(!token.is_empty(), "Session token is empty");
    secure_write(path, token)
}

fn clear_session_at(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("trip-tui-test-{}-{}", name, std::process::id()))
            .join("session")
    }

    #[test]
    fn save_load_clear() {
        let path = temp_session_path("roundtrip");
        assert_eq!(load_session_from(&path).unwrap(), None);

        save_session_to(&path, "  abc123\n").unwrap();
        assert_eq!(load_session_from(&path).unwrap().as_deref(), Some("abc123"));

        clear_session_at(&path).unwrap();
        assert_eq!(load_session_from(&path).unwrap(), None);
        clear_session_at(&path).unwrap();
    }

    #[test]
    fn blank_token_is_refused() {
        let path = temp_session_path("blank");
        assert!(save_session_to(&path, "   ").is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_session_path("perms");
        save_session_to(&path, "secret").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        clear_session_at(&path).unwrap();
    }
}
