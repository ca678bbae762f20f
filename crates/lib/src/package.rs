//! Artifact packaging.
//!
//! The custom runtime only executes a file named `bootstrap`, so the compiled
//! binary is written into `<binary>.zip` under that name. The zip holds exactly
//! one entry and the original binary is left in place. The archive is written
//! next to its final path and renamed into place, so a failed write never
//! leaves a truncated `<binary>.zip` behind.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::consts::{BOOTSTRAP, BOOTSTRAP_MODE};

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("cannot read binary {path}: {source}")]
  ReadBinary {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot write archive {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot read archive {path}: {source}")]
  ReadArchive {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("zip error: {0}")]
  Zip(#[from] zip::result::ZipError),
}

/// One entry of a packaged archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
  pub name: String,
  /// Unix mode including file type bits, when recorded.
  pub mode: Option<u32>,
  pub size: u64,
}

impl ArchiveEntry {
  pub fn is_executable(&self) -> bool {
    self.mode.is_some_and(|mode| mode & 0o111 != 0)
  }
}

/// Package `<output_dir>/<binary>` into `<output_dir>/<binary>.zip`.
///
/// Returns the archive path. An existing archive is overwritten.
pub fn package_binary(output_dir: &Path, binary: &str) -> Result<PathBuf, PackageError> {
  let binary_path = output_dir.join(binary);
  let archive_path = output_dir.join(format!("{binary}.zip"));

  let data = fs::read(&binary_path).map_err(|source| PackageError::ReadBinary {
    path: binary_path.clone(),
    source,
  })?;

  let temp_path = output_dir.join(format!("{binary}.zip.tmp"));
  let written = write_archive(&temp_path, &data).and_then(|()| {
    fs::rename(&temp_path, &archive_path).map_err(|source| PackageError::Write {
      path: archive_path.clone(),
      source,
    })
  });
  if let Err(err) = written {
    let _ = fs::remove_file(&temp_path);
    return Err(err);
  }

  info!(binary = %binary_path.display(), archive = %archive_path.display(), "packaged {}", BOOTSTRAP);

  for entry in list_entries(&archive_path)? {
    debug!(name = %entry.name, mode = ?entry.mode.map(|m| format!("{:o}", m)), size = entry.size, "archive entry");
  }

  Ok(archive_path)
}

fn write_archive(path: &Path, data: &[u8]) -> Result<(), PackageError> {
  let write_err = |source| PackageError::Write {
    path: path.to_path_buf(),
    source,
  };

  let file = File::create(path).map_err(write_err)?;
  let mut zip = ZipWriter::new(file);
  let options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .unix_permissions(BOOTSTRAP_MODE);

  zip.start_file(BOOTSTRAP, options)?;
  zip.write_all(data).map_err(write_err)?;
  let mut file = zip.finish()?;
  file.flush().map_err(write_err)?;
  file.sync_all().map_err(write_err)
}

/// List the entries of an archive.
pub fn list_entries(archive_path: &Path) -> Result<Vec<ArchiveEntry>, PackageError> {
  let file = File::open(archive_path).map_err(|source| PackageError::ReadArchive {
    path: archive_path.to_path_buf(),
    source,
  })?;
  let mut archive = ZipArchive::new(BufReader::new(file))?;

  let mut entries = Vec::with_capacity(archive.len());
  for i in 0..archive.len() {
    let entry = archive.by_index(i)?;
    entries.push(ArchiveEntry {
      name: entry.name().to_string(),
      mode: entry.unix_mode(),
      size: entry.size(),
    });
  }

  Ok(entries)
}
