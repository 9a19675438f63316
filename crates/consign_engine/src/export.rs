use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use consign_core::ShipmentRecord;

const FALLBACK_STEM: &str = "shipment_export";
const MAX_STEM_LEN: usize = 80;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory missing or not writable: {0}")]
    ExportDir(String),
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Pretty-printed JSON, written atomically (temp file then rename) so a
/// failed export never leaves a partial file behind.
pub fn write_shipment_json(dir: &Path, record: &ShipmentRecord) -> Result<PathBuf, ExportError> {
    let filename = export_filename(record.bill_of_lading_number.as_deref());
    let body = serde_json::to_string_pretty(record)?;
    write_atomic(dir, &filename, &body)
}

/// `shipment_{BOL}.json` with the BOL sanitized for the filesystem; generic
/// fallback when the BOL is absent, blank, or sanitizes to nothing.
pub fn export_filename(bol: Option<&str>) -> String {
    let stem = bol
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .map(|bol| format!("shipment_{bol}"))
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{stem}.json")
}

/// Windows-safe filename component: forbidden characters and whitespace
/// become single underscores, length is capped, reserved device names are
/// patched.
fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                cleaned.push('_');
            }
            prev_underscore = true;
        } else {
            cleaned.push(c);
            prev_underscore = false;
        }
    }

    let mut cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.len() > MAX_STEM_LEN {
        let mut end = MAX_STEM_LEN;
        while end > 0 && !cleaned.is_char_boundary(end) {
            end -= 1;
        }
        cleaned.truncate(end);
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn ensure_export_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::ExportDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::ExportDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| ExportError::ExportDir(e.to_string()))?;
    }
    Ok(())
}

fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ExportError> {
    ensure_export_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace any previous export for the same BOL.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| ExportError::Io(e.error))?;
    Ok(target)
}
