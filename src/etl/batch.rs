//! Walks a data directory and runs one transaction per file.

use crate::warehouse::{SqliteWarehouse, WarehouseWriter};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub files_found: usize,
    pub files_processed: usize,
}

/// All `.json` files below `root`, sorted by path. A symlink counts when it
/// points at a regular file.
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        bail!("Data directory does not exist: {:?}", root);
    }
    if !root.is_dir() {
        bail!("Data directory is not a directory: {:?}", root);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", root))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        // Symlinked files count, symlinked directories are not descended into.
        if is_json && entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Run `process` on every JSON file under `root`, committing after each file.
///
/// Stops at the first failure. The failing file's writes are rolled back,
/// files committed before it stay in the warehouse.
pub fn process_data<F>(warehouse: &mut SqliteWarehouse, root: &Path, mut process: F) -> Result<BatchStats>
where
    F: FnMut(&mut WarehouseWriter<'_>, &Path) -> Result<()>,
{
    let files = find_json_files(root)?;
    let mut stats = BatchStats {
        files_found: files.len(),
        files_processed: 0,
    };
    info!("{} files found in {}", files.len(), root.display());

    for (index, path) in files.iter().enumerate() {
        let tx = warehouse
            .begin_file()
            .with_context(|| format!("Failed to start transaction for {:?}", path))?;
        let mut writer = tx.writer();
        process(&mut writer, path).with_context(|| format!("Failed to process {:?}", path))?;
        tx.commit()
            .with_context(|| format!("Failed to commit {:?}", path))?;

        stats.files_processed += 1;
        info!("{}/{} files processed.", index + 1, files.len());
    }

    Ok(stats)
}
