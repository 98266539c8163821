use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::error::{Error, Result};
use crate::record::DeploymentRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub record: PathBuf,
    pub drosera_config: PathBuf,
}

/// Writes the record and the generated document together.
///
/// Both files are fully written to temporary siblings before either
/// destination is replaced; a failure while staging leaves the existing
/// files untouched. Each replacement is an atomic rename.
pub fn commit(paths: &OutputPaths, record: &DeploymentRecord, document: &str) -> Result<()> {
    let mut record_json = record.to_json();
    record_json.push('\n');
    let staged_record = stage(&paths.record, record_json.as_bytes())?;
    let staged_config = stage(&paths.drosera_config, document.as_bytes())?;

    persist(staged_record, &paths.record)?;
    persist(staged_config, &paths.drosera_config)?;
    tracing::debug!(
        record = %paths.record.display(),
        drosera_config = %paths.drosera_config.display(),
        "Outputs written"
    );
    Ok(())
}

fn stage(destination: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let io_error = |source: std::io::Error| Error::Io {
        path: destination.to_path_buf(),
        source,
    };
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(contents).map_err(io_error)?;
    file.as_file().sync_all().map_err(io_error)?;
    Ok(file)
}

fn persist(file: NamedTempFile, destination: &Path) -> Result<()> {
    file.persist(destination).map_err(|err| Error::Io {
        path: destination.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
