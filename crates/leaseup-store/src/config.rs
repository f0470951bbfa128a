//! Store configuration
//!
//! Resolves which database file to use. Resolution order:
//! 1. An explicit path (e.g. the CLI `--db` flag)
//! 2. The `LEASEUP_DATABASE` environment variable
//! 3. `database/leaseup.db` if that file already exists
//! 4. `instance/leaseup.db`

use std::path::{Path, PathBuf};

/// Environment variable naming the database file
pub const DATABASE_ENV: &str = "LEASEUP_DATABASE";

/// Preferred location when a database already exists there
pub const EXISTING_DB_PATH: &str = "database/leaseup.db";

/// Fallback location for new databases
pub const DEFAULT_DB_PATH: &str = "instance/leaseup.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Resolve the database path from the process environment, relative to
    /// the current directory
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let from_env = std::env::var_os(DATABASE_ENV).map(PathBuf::from);
        Self::resolve_in(Path::new("."), explicit, from_env)
    }

    /// Resolution with every input supplied by the caller
    pub fn resolve_in(base: &Path, explicit: Option<PathBuf>, from_env: Option<PathBuf>) -> Self {
        if let Some(path) = explicit.or(from_env).filter(|p| !p.as_os_str().is_empty()) {
            return Self::new(path);
        }

        let existing = base.join(EXISTING_DB_PATH);
        if existing.exists() {
            return Self::new(existing);
        }

        Self::new(base.join(DEFAULT_DB_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins_over_env() {
        let config = StoreConfig::resolve_in(
            Path::new("/tmp/none"),
            Some(PathBuf::from("a.db")),
            Some(PathBuf::from("b.db")),
        );
        assert_eq!(config.database_path, PathBuf::from("a.db"));
    }

    #[test]
    fn test_env_used_without_explicit() {
        let config =
            StoreConfig::resolve_in(Path::new("/tmp/none"), None, Some(PathBuf::from("b.db")));
        assert_eq!(config.database_path, PathBuf::from("b.db"));
    }

    #[test]
    fn test_existing_database_preferred_over_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            StoreConfig::resolve_in(dir.path(), None, None).database_path,
            dir.path().join(DEFAULT_DB_PATH)
        );

        std::fs::create_dir_all(dir.path().join("database")).unwrap();
        std::fs::write(dir.path().join(EXISTING_DB_PATH), b"").unwrap();
        assert_eq!(
            StoreConfig::resolve_in(dir.path(), None, None).database_path,
            dir.path().join(EXISTING_DB_PATH)
        );
    }
}
