//! File logging bootstrap.
//!
//! The terminal belongs to the UI, so log records go to rotating files only.
//! Records carry metadata (ids, counts, sizes), never task text or memos.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;

use crate::config::Config;
use crate::error::{Error, Result};

const LOG_FILE_BASENAME: &str = "todo";
const MAX_LOG_FILE_BYTES: u64 = 4 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;
const MAX_PANIC_CHARS: usize = 160;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Start file logging. Later calls in the same process are ignored.
pub fn init(config: &Config) -> Result<()> {
    LOGGER.get_or_try_init(|| -> Result<LoggerHandle> {
        std::fs::create_dir_all(&config.log_dir)?;
        let handle = Logger::try_with_str(config.log_level)
            .map_err(|e| Error::Logging(format!("invalid level `{}`: {e}", config.log_level)))?
            .log_to_file(
                FileSpec::default()
                    .directory(config.log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| Error::Logging(format!("failed to start logger: {e}")))?;

        install_panic_hook();
        info!(
            "event=app_start version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            config.log_level,
            config.log_dir.display()
        );
        Ok(handle)
    })?;
    Ok(())
}

/// Write out buffered records. The handle is never dropped, so every exit
/// path calls this first.
pub fn flush() {
    if let Some(handle) = LOGGER.get() {
        handle.flush();
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.clone()
        } else {
            "non-string panic payload".to_string()
        };
        error!(
            "event=panic location={} payload={}",
            location,
            one_line(&payload, MAX_PANIC_CHARS)
        );
        flush();
        previous(info);
    }));
}

/// Collapse newlines and cap the length of a message.
fn one_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let mut out: String = flat.chars().take(max_chars).collect();
    if flat.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_flattens_and_truncates() {
        let out = one_line("line1\nline2\rline3", 8);
        assert!(!out.contains('\n'));
        assert!(!out.contains('\r'));
        assert_eq!(out, "line1 li...");
        assert_eq!(one_line("short", 10), "short");
    }

    fn read_logs(dir: &std::path::Path) -> String {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap_or_default())
            .collect()
    }

    // One test owns the process-wide logger.
    #[test]
    fn init_is_idempotent_and_flush_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_level: "info",
            log_dir: dir.path().join("logs"),
        };
        init(&config).unwrap();
        init(&config).unwrap();
        assert!(config.log_dir.is_dir());

        info!("event=flush_check marker=7f3a");
        flush();
        let logs = read_logs(&config.log_dir);
        assert!(logs.contains("event=app_start"));
        assert!(logs.contains("marker=7f3a"));
    }
}
