// assay-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes a report atomically: a temporary file next to the target is filled
/// then renamed over it, so readers never see a half-written report.
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Same directory as the target, so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file.flush()?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_nested_report() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("reports/daily/structure.txt");

        atomic_write(&file_path, "PASS 3/3")?;

        assert_eq!(fs::read_to_string(file_path)?, "PASS 3/3");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_previous_report() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.txt");

        atomic_write(&file_path, "first run")?;
        atomic_write(&file_path, "second run")?;

        assert_eq!(fs::read_to_string(file_path)?, "second run");
        Ok(())
    }
}
