//! Runtime configuration.
//!
//! Values are resolved from command-line flags first, then environment
//! variables, then built-in defaults.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "TODO_LOG";
/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "TODO_LOG_DIR";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl Config {
    /// Resolve settings from optional CLI values and the process environment.
    pub fn resolve(log_level: Option<&str>, log_dir: Option<&Path>) -> Result<Self> {
        let env_level = env::var(LOG_LEVEL_ENV).ok();
        let env_dir = env::var_os(LOG_DIR_ENV).map(PathBuf::from);
        Self::resolve_from(log_level, log_dir, env_level.as_deref(), env_dir.as_deref())
    }

    /// Resolution with the environment passed in explicitly.
    pub fn resolve_from(
        log_level: Option<&str>,
        log_dir: Option<&Path>,
        env_level: Option<&str>,
        env_dir: Option<&Path>,
    ) -> Result<Self> {
        let log_level = match log_level.or(env_level) {
            Some(raw) => normalize_level(raw)?,
            None => default_log_level(),
        };
        let log_dir = match log_dir.or(env_dir) {
            Some(dir) => absolutize(dir)?,
            None => default_log_dir(),
        };
        Ok(Config { log_level, log_dir })
    }
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// `$HOME/.todo/logs`, or `./.todo/logs` when `HOME` is unset.
pub fn default_log_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".todo").join("logs")
}

/// Map a user-supplied level onto one `log` understands.
pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(Error::Config(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        ))),
    }
}

fn absolutize(dir: &Path) -> Result<PathBuf> {
    if dir.as_os_str().is_empty() {
        return Err(Error::Config("log directory cannot be empty".to_string()));
    }
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(env::current_dir()?.join(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_environment() {
        let cfg = Config::resolve_from(
            Some("WARN"),
            Some(Path::new("/tmp/flag")),
            Some("trace"),
            Some(Path::new("/tmp/env")),
        )
        .unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_dir, PathBuf::from("/tmp/flag"));
    }

    #[test]
    fn environment_beats_default() {
        let cfg =
            Config::resolve_from(None, None, Some(" warning "), Some(Path::new("/tmp/env")))
                .unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_dir, PathBuf::from("/tmp/env"));
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::resolve_from(None, None, None, None).unwrap();
        assert_eq!(cfg.log_level, default_log_level());
        assert!(cfg.log_dir.ends_with(".todo/logs"));
    }

    #[test]
    fn relative_dir_is_made_absolute() {
        let cfg = Config::resolve_from(None, Some(Path::new("logs")), None, None).unwrap();
        assert!(cfg.log_dir.is_absolute());
        assert!(cfg.log_dir.ends_with("logs"));
    }

    #[test]
    fn rejects_unknown_level() {
        let err = normalize_level("loud").unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));
    }
}
