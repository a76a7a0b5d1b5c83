//! Image attachment intake.
//!
//! Files are validated synchronously (ASCII file name, 5 MiB size cap) and
//! then read on a background thread into a `data:` URI. The result comes back
//! over a channel that the UI drains between frames.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::task::TaskId;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid file name regex"));

/// Reasons an attachment is refused.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("image file names may only use English letters, digits, '.', '_' and '-' (got `{0}`)")]
    InvalidFilename(String),

    #[error("image must be 5MB or smaller ({size} bytes given)")]
    FileTooLarge { size: u64 },

    #[error("`{}` is not a regular file", .0.display())]
    NotAFile(PathBuf),

    #[error("could not read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A file offered for attachment, before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl ImageCandidate {
    /// Build a candidate from file metadata without reading the contents.
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AttachmentError::InvalidFilename(path.display().to_string()))?
            .to_string();
        let meta = fs::metadata(path).map_err(|source| AttachmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Devices and pipes report a length of 0 whatever they hold.
        if !meta.is_file() {
            return Err(AttachmentError::NotAFile(path.to_path_buf()));
        }
        Ok(ImageCandidate {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
        })
    }

    pub fn validate(&self) -> Result<(), AttachmentError> {
        validate(&self.name, self.size)
    }

    pub fn mime(&self) -> &'static str {
        mime_for_name(&self.name)
    }
}

/// Check a file name and size against the intake rules.
///
/// The name check runs first, so a bad name wins over a bad size.
pub fn validate(name: &str, size: u64) -> Result<(), AttachmentError> {
    if !FILENAME_RE.is_match(name) {
        return Err(AttachmentError::InvalidFilename(name.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AttachmentError::FileTooLarge { size });
    }
    Ok(())
}

/// Resolve and validate the file at `path`.
pub fn intake(path: &Path) -> Result<ImageCandidate, AttachmentError> {
    let candidate = ImageCandidate::from_path(path)?;
    candidate.validate()?;
    Ok(candidate)
}

/// MIME type guessed from the file extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Encode raw bytes as a base64 `data:` URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read a validated candidate into a `data:` URI.
pub fn read_data_uri(candidate: &ImageCandidate) -> Result<String, AttachmentError> {
    let io_err = |source: io::Error| AttachmentError::Io {
        path: candidate.path.clone(),
        source,
    };
    let mut bytes = Vec::with_capacity(candidate.size as usize);
    File::open(&candidate.path)
        .map_err(io_err)?
        .take(MAX_IMAGE_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(io_err)?;
    // The file may have grown between the metadata check and the read.
    validate(&candidate.name, bytes.len() as u64)?;
    Ok(encode_data_uri(candidate.mime(), &bytes))
}

/// Summary of an encoded attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUriInfo {
    pub mime: String,
    pub bytes: usize,
}

/// Parse a base64 `data:` URI into its MIME type and decoded size.
///
/// The size is computed from the payload length, without decoding.
pub fn describe_data_uri(uri: &str) -> Option<DataUriInfo> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    if payload.len() % 4 != 0 {
        return None;
    }
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    if padding > 2 {
        return None;
    }
    Some(DataUriInfo {
        mime: mime.to_string(),
        bytes: payload.len() / 4 * 3 - padding,
    })
}

/// Completion message from a background read.
#[derive(Debug)]
pub struct AttachmentLoaded {
    pub task_id: TaskId,
    pub name: String,
    pub result: Result<String, AttachmentError>,
}

/// Read `candidate` on a worker thread and report back through `tx`.
///
/// There is no cancellation; if the receiver is gone the result is dropped.
pub fn spawn_load(
    task_id: TaskId,
    candidate: ImageCandidate,
    tx: Sender<AttachmentLoaded>,
) -> io::Result<thread::JoinHandle<()>> {
    debug!(
        "event=attachment_load status=started id={} bytes={}",
        task_id, candidate.size
    );
    thread::Builder::new()
        .name("attachment-read".to_string())
        .spawn(move || {
            let result = read_data_uri(&candidate);
            if let Err(err) = &result {
                warn!("event=attachment_load status=error id={} error={}", task_id, err);
            }
            let _ = tx.send(AttachmentLoaded {
                task_id,
                name: candidate.name,
                result,
            });
        })
}

/// Human-readable byte count ("812 B", "12.3 KiB", "4.0 MiB").
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{:.1} MiB", b / (KIB * KIB))
    }
}
