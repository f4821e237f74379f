// SYNOID Catalog - I/O Shield (Shadow Write & Atomic Move)
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// The catalog is written exactly once per run:
//   1. Serialize the whole document into a `.synoid_tmp` sidecar.
//   2. `AtomicMover::commit()` renames it over the final path.
// A crash before the rename leaves any previous catalog untouched.

use crate::catalog::assembler::Catalog;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CatalogIoError {
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogIoError {
    fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.to_path_buf();
        move |source| CatalogIoError::Io {
            action,
            path,
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// AtomicMover
// ---------------------------------------------------------------------------

pub struct AtomicMover;

impl AtomicMover {
    /// Move a completed temp file over its final destination.
    ///
    /// * Same filesystem → `fs::rename`.
    /// * Cross-filesystem → `fs::copy` + `fs::remove_file`.
    pub fn commit(temp_path: &Path, final_path: &Path) -> Result<(), CatalogIoError> {
        match fs::rename(temp_path, final_path) {
            Ok(()) => {
                info!(
                    "[IO_SHIELD] Atomic rename: {:?} → {:?}",
                    temp_path, final_path
                );
                Ok(())
            }
            Err(rename_err) => {
                if !temp_path.exists() {
                    return Err(CatalogIoError::Io {
                        action: "temp file missing before commit",
                        path: temp_path.to_path_buf(),
                        source: rename_err,
                    });
                }
                warn!(
                    "[IO_SHIELD] Rename failed ({}). Falling back to copy-delete.",
                    rename_err
                );
                fs::copy(temp_path, final_path).map_err(CatalogIoError::io("failed to copy onto", final_path))?;
                fs::remove_file(temp_path).map_err(CatalogIoError::io("failed to clean up", temp_path))?;
                Ok(())
            }
        }
    }

    /// `videos.json` → `videos.json.synoid_tmp`
    pub fn tmp_path_for(final_path: &Path) -> PathBuf {
        let mut tmp = final_path.as_os_str().to_owned();
        tmp.push(".synoid_tmp");
        PathBuf::from(tmp)
    }
}

// ---------------------------------------------------------------------------
// Catalog persistence
// ---------------------------------------------------------------------------

/// Write `catalog` to `path`, replacing whatever was there.
///
/// Pretty-printed with two-space indentation; non-ASCII text is written as-is.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<(), CatalogIoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(CatalogIoError::io("failed to create directory", parent))?;
    }

    let tmp = AtomicMover::tmp_path_for(path);
    let result = write_shadow(catalog, &tmp).and_then(|()| AtomicMover::commit(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result?;

    info!(
        "[IO_SHIELD] Wrote {} videos to {}",
        catalog.videos.len(),
        path.display()
    );
    Ok(())
}

fn write_shadow(catalog: &Catalog, tmp: &Path) -> Result<(), CatalogIoError> {
    let file = File::create(tmp).map_err(CatalogIoError::io("failed to create", tmp))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, catalog)?;
    writer.flush().map_err(CatalogIoError::io("failed to flush", tmp))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(CatalogIoError::io("failed to sync", tmp))?;
    Ok(())
}

impl Catalog {
    /// Read a catalog document previously produced by [`write_catalog`].
    pub fn load(path: &Path) -> Result<Self, CatalogIoError> {
        let raw = fs::read(path).map_err(CatalogIoError::io("failed to read", path))?;
        Ok(serde_json::from_slice(&raw)?)
    }
}
