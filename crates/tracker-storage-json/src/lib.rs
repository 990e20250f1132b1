//! tracker-storage-json
//!
//! A ledger "sheet" persisted as a JSON document on disk. The document holds
//! the grid exactly as a spreadsheet tab would: the header row first, then
//! one array of cells per transaction. Rows are addressed with the same
//! 1-based physical numbering a spreadsheet uses.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tracker_core::{
    storage::{header_row, records_from_grid, FIRST_DATA_ROW},
    CellValue, CoreError, LedgerStore, RawRow,
};

const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of a sheet file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetDocument {
    pub title: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: vec![header_row()],
        }
    }
}

/// Filesystem-backed [`LedgerStore`].
#[derive(Debug)]
pub struct JsonSheetStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonSheetStore {
    /// Opens an existing sheet file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if !path.exists() {
            return Err(CoreError::Store(format!(
                "sheet `{}` not found",
                path.display()
            )));
        }
        Ok(Self::at(path))
    }

    /// Opens the sheet at `path`, creating an empty one titled `title` when
    /// the file does not exist yet.
    pub fn open_or_create(path: impl Into<PathBuf>, title: &str) -> Result<Self, CoreError> {
        let path = path.into();
        if !path.exists() {
            save_document(&SheetDocument::new(title), &path)?;
            info!(path = %path.display(), title, "created ledger sheet");
        }
        Ok(Self::at(path))
    }

    fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn title(&self) -> Result<String, CoreError> {
        Ok(load_document(&self.path)?.title)
    }

    fn modify<F>(&self, mutate: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut SheetDocument) -> Result<(), CoreError>,
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| CoreError::Store("sheet lock poisoned".into()))?;
        let mut document = load_document(&self.path)?;
        mutate(&mut document)?;
        save_document(&document, &self.path)
    }
}

impl LedgerStore for JsonSheetStore {
    fn load_all(&self) -> Result<Vec<RawRow>, CoreError> {
        let document = load_document(&self.path)?;
        let records = records_from_grid(&document.rows);
        debug!(path = %self.path.display(), rows = records.len(), "sheet read");
        Ok(records)
    }

    fn append_row(&self, cells: Vec<CellValue>) -> Result<(), CoreError> {
        self.modify(|document| {
            if document.rows.is_empty() {
                document.rows.push(header_row());
            }
            document.rows.push(cells);
            Ok(())
        })
    }

    fn delete_row(&self, physical_row: usize) -> Result<(), CoreError> {
        self.modify(|document| {
            if physical_row < FIRST_DATA_ROW || physical_row > document.rows.len() {
                return Err(CoreError::RowOutOfRange(physical_row));
            }
            document.rows.remove(physical_row - 1);
            Ok(())
        })
    }
}

/// Reads a sheet document from disk.
pub fn load_document(path: &Path) -> Result<SheetDocument, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Writes a sheet document through a temporary file and a rename.
pub fn save_document(document: &SheetDocument, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
