// src/file.rs

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::ExportOptions;
use crate::csv::write_records;
use crate::data::CoinRecord;
use crate::error::ExportError;

/// Write the given rows to `export.out_path()` (headers/delimiter per
/// `ExportOptions`). Parent directories are created. Returns the final path.
pub fn write_export<'a, I>(export: &ExportOptions, records: I) -> Result<PathBuf, ExportError>
where
    I: IntoIterator<Item = &'a CoinRecord>,
{
    let path = export.out_path();
    write_export_to(&path, export, records)?;
    Ok(path)
}

/// Same as [`write_export`] with an explicit target.
pub fn write_export_to<'a, I>(path: &Path, export: &ExportOptions, records: I) -> Result<(), ExportError>
where
    I: IntoIterator<Item = &'a CoinRecord>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let file = File::create(path)?;
    write_records(BufWriter::new(file), records, export.format.delimiter(), export.include_headers)?;
    info!(path = %path.display(), "Export: written");
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn file_in_the_way_of_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("out");
        fs::write(&blocker, "x").unwrap();

        assert_matches!(ensure_directory(&blocker), Err(ExportError::NotADirectory(p)) if p == blocker);
    }

    #[test]
    fn nested_directories_are_created() {
        let tmp = tempfile::tempdir().unwrap();
        let mut export = ExportOptions::default();
        export.set_path(&tmp.path().join("a/b/coins.csv").to_string_lossy());

        let path = write_export(&export, std::iter::empty()).unwrap();
        assert!(path.ends_with("a/b/coins.csv"));
        assert!(fs::read_to_string(path).unwrap().starts_with("coin_name,"));
    }
}
