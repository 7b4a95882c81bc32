// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weight file reading and writing

use super::{decode, encode, DecodedFile};
use crate::error::Result;
use crate::weights::{FileMetadata, WeightSet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Encode `weights` and write them to `path`.
///
/// The text is fully encoded before the file system is touched and is
/// written through a temporary file in the destination directory, so a
/// failure never leaves a partial file behind.
pub fn export_file(
    path: impl AsRef<Path>,
    metadata: &FileMetadata,
    weights: &WeightSet,
) -> Result<()> {
    let path = path.as_ref();
    let text = encode(metadata, weights)?;
    write_atomic(path, &text)?;

    tracing::info!(
        path = %path.display(),
        groups = weights.len(),
        bytes = text.len(),
        "exported weight file"
    );
    Ok(())
}

/// Replace the contents of `path` through a temporary file in the same
/// directory. On failure the previous contents are left in place.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Read and decode the weight file at `path`
pub fn import_file(path: impl AsRef<Path>) -> Result<DecodedFile> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let decoded = decode(&text)?;

    tracing::info!(
        path = %path.display(),
        groups = decoded.weights.len(),
        entries = decoded.weights.entry_count(),
        "imported weight file"
    );
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeightFileError;
    use crate::weights::GroupWeights;
    use tempfile::TempDir;

    fn sample() -> WeightSet {
        let mut weights = WeightSet::new();
        weights.insert_group("leftArm", GroupWeights::from([(0, 0.5), (5, 0.8)]));
        weights
    }

    #[test]
    fn test_export_then_import() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("body.mhw");

        export_file(&path, &FileMetadata::for_object("Body"), &sample())?;
        let decoded = import_file(&path)?;

        assert_eq!(decoded.weights, sample());
        assert_eq!(decoded.header.name.as_deref(), Some("Body"));
        Ok(())
    }

    #[test]
    fn test_failed_export_writes_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("empty.mhw");

        let mut weights = WeightSet::new();
        weights.insert_group("leftArm", GroupWeights::from([(0, 0.0001)]));
        let err = export_file(&path, &FileMetadata::default(), &weights).unwrap_err();

        assert!(matches!(err, WeightFileError::EmptyResult));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
        Ok(())
    }

    #[test]
    fn test_export_overwrites_existing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("body.mhw");
        std::fs::write(&path, "stale")?;

        export_file(&path, &FileMetadata::default(), &sample())?;
        assert!(std::fs::read_to_string(&path)?.starts_with("{\n\"copyright\""));
        Ok(())
    }

    #[test]
    fn test_write_atomic_into_missing_directory_keeps_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("mesh.json");

        assert!(matches!(write_atomic(&path, "{}"), Err(WeightFileError::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let err = import_file("/nonexistent/weights.mhw").unwrap_err();
        assert!(matches!(err, WeightFileError::Io(_)));
    }
}
