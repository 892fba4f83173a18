//! Loading of shell-style env files such as `~/.env`.

use crate::error::AuthError;
use std::path::Path;

/// Load `KEY=value` pairs from an env file into the process environment.
///
/// Accepts both plain `KEY=value` and `export KEY=value` lines, unquotes
/// quoted values and skips comments. Variables that are already set are left
/// untouched. A missing file is not an error; unparsable lines are skipped.
///
/// Returns the number of variables that were set.
pub fn load_env_file(path: &Path) -> Result<usize, AuthError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Env file not found, skipping");
        return Ok(0);
    }

    let entries = dotenvy::from_path_iter(path).map_err(|e| AuthError::EnvFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut loaded = 0;
    for entry in entries {
        let (key, value) = match entry {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping malformed env line");
                continue;
            }
        };

        if std::env::var_os(&key).is_some() {
            continue;
        }

        std::env::set_var(&key, value);
        loaded += 1;
    }

    tracing::debug!(path = %path.display(), loaded = loaded, "Loaded env file");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const KEY: &str = "KUBERA_API_KEY";
    const SECRET: &str = "KUBERA_SECRET";

    fn write_env(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn clear() {
        std::env::remove_var(KEY);
        std::env::remove_var(SECRET);
    }

    #[test]
    #[serial]
    fn test_standard_format() {
        clear();
        let file = write_env("KUBERA_API_KEY=test_key\nKUBERA_SECRET=test_secret\n");

        let loaded = load_env_file(file.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(std::env::var(KEY).unwrap(), "test_key");
        assert_eq!(std::env::var(SECRET).unwrap(), "test_secret");
        clear();
    }

    #[test]
    #[serial]
    fn test_export_format() {
        clear();
        let file = write_env(
            "export KUBERA_API_KEY=test_key_export\nexport KUBERA_SECRET=test_secret_export\n",
        );

        load_env_file(file.path()).unwrap();

        assert_eq!(std::env::var(KEY).unwrap(), "test_key_export");
        assert_eq!(std::env::var(SECRET).unwrap(), "test_secret_export");
        clear();
    }

    #[test]
    #[serial]
    fn test_mixed_format_with_comments() {
        clear();
        let file = write_env(
            "# This is a comment\n\
             export KUBERA_API_KEY=test_key_mixed\n\
             \n\
             KUBERA_SECRET=test_secret_mixed\n\
             # Another comment\n",
        );

        load_env_file(file.path()).unwrap();

        assert_eq!(std::env::var(KEY).unwrap(), "test_key_mixed");
        assert_eq!(std::env::var(SECRET).unwrap(), "test_secret_mixed");
        clear();
    }

    #[test]
    #[serial]
    fn test_quoted_values() {
        clear();
        let file = write_env(
            "export KUBERA_API_KEY=\"test_key_quoted\"\nKUBERA_SECRET='test_secret_quoted'\n",
        );

        load_env_file(file.path()).unwrap();

        assert_eq!(std::env::var(KEY).unwrap(), "test_key_quoted");
        assert_eq!(std::env::var(SECRET).unwrap(), "test_secret_quoted");
        clear();
    }

    #[test]
    #[serial]
    fn test_existing_env_vars_not_overwritten() {
        clear();
        std::env::set_var(KEY, "env_key");
        std::env::set_var(SECRET, "env_secret");
        let file = write_env("export KUBERA_API_KEY=file_key\nexport KUBERA_SECRET=file_secret\n");

        let loaded = load_env_file(file.path()).unwrap();

        assert_eq!(loaded, 0);
        assert_eq!(std::env::var(KEY).unwrap(), "env_key");
        assert_eq!(std::env::var(SECRET).unwrap(), "env_secret");
        clear();
    }

    #[test]
    fn test_nonexistent_file() {
        let loaded = load_env_file(Path::new("/nonexistent/path/.env")).unwrap();
        assert_eq!(loaded, 0);
    }
}
