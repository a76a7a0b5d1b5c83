//! Command implementations for the CLI interface.
//!
//! The board itself is interactive; the other subcommands are small helpers
//! around it (checking an image against the attachment rules, shell
//! completions).

use std::path::{Path, PathBuf};

use clap::Subcommand;
use clap_complete::{generate, Shell};
use log::info;
use serde::Serialize;

use crate::attachment::{self, format_size, AttachmentError, MAX_IMAGE_BYTES};
use crate::error::Result;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board.
    Ui,

    /// Check whether an image file would be accepted as an attachment.
    CheckImage {
        /// Path to the image file.
        path: PathBuf,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Outcome of checking one file against the attachment rules.
#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub path: PathBuf,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub mime: Option<&'static str>,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri_len: Option<usize>,
    #[serde(skip)]
    pub rejection: Option<AttachmentError>,
}

impl ImageReport {
    /// Validate and, when accepted, read the file the same way the board does.
    pub fn check(path: &Path) -> Self {
        let mut report = ImageReport {
            path: path.to_path_buf(),
            name: None,
            size: None,
            mime: None,
            accepted: false,
            error: None,
            data_uri_len: None,
            rejection: None,
        };
        let candidate = match attachment::ImageCandidate::from_path(path) {
            Ok(candidate) => candidate,
            Err(err) => {
                report.reject(err);
                return report;
            }
        };
        report.name = Some(candidate.name.clone());
        report.size = Some(candidate.size);
        report.mime = Some(candidate.mime());

        match candidate.validate().and_then(|_| attachment::read_data_uri(&candidate)) {
            Ok(uri) => {
                report.accepted = true;
                report.data_uri_len = Some(uri.len());
            }
            Err(err) => report.reject(err),
        }
        report
    }

    fn reject(&mut self, err: AttachmentError) {
        self.error = Some(err.to_string());
        self.rejection = Some(err);
    }

    fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.path.display());
        if let (Some(name), Some(size), Some(mime)) = (&self.name, self.size, self.mime) {
            out.push_str(&format!("  name:  {}\n", name));
            out.push_str(&format!(
                "  size:  {} (limit {})\n",
                format_size(size),
                format_size(MAX_IMAGE_BYTES)
            ));
            out.push_str(&format!("  type:  {}\n", mime));
        }
        match (&self.error, self.accepted) {
            (_, true) => out.push_str("  accepted\n"),
            (Some(err), false) => out.push_str(&format!("  rejected: {}\n", err)),
            (None, false) => out.push_str("  rejected\n"),
        }
        out
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui() -> Result<()> {
    run_tui()?;
    Ok(())
}

/// Check an image and print the report. A rejected file is returned as an
/// error after the report is printed.
pub fn cmd_check_image(path: &Path, json: bool) -> Result<()> {
    let report = ImageReport::check(path);
    info!(
        "event=check_image accepted={} size={}",
        report.accepted,
        report.size.map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    match report.rejection {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn report_accepts_valid_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let report = ImageReport::check(&path);
        assert!(report.accepted);
        assert_eq!(report.size, Some(3));
        assert_eq!(report.mime, Some("image/png"));
        assert_eq!(report.data_uri_len, Some("data:image/png;base64,AQID".len()));
        assert!(report.render_text().contains("accepted"));
    }

    #[test]
    fn report_rejects_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my photo.png");
        fs::write(&path, [1u8]).unwrap();

        let report = ImageReport::check(&path);
        assert!(!report.accepted);
        assert!(report.error.as_deref().unwrap().contains("English letters"));
        assert!(report.data_uri_len.is_none());

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["name"], "my photo.png");
        assert!(json.get("data_uri_len").is_none());
    }

    #[test]
    fn check_image_returns_rejection_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("café.png");
        fs::write(&path, [1u8]).unwrap();
        assert!(matches!(
            cmd_check_image(&path, true),
            Err(Error::Attachment(AttachmentError::InvalidFilename(_)))
        ));

        let ok = dir.path().join("photo.png");
        fs::write(&ok, [1u8]).unwrap();
        assert!(cmd_check_image(&ok, false).is_ok());
    }

    #[test]
    fn report_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = ImageReport::check(&dir.path().join("gone.png"));
        assert!(!report.accepted);
        assert!(report.size.is_none());
        assert!(report.render_text().contains("rejected: could not read"));
    }
}
