use std::fs;
use std::path::PathBuf;

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};
use tracing::debug;

use crate::app::infrastructure::collaborators::{
    ExportRequest, Exporter, FilePicker, ImportedFile, import_filter,
};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::{decode_lossy, extract_filename};

fn run_chooser(mut nfc: NativeFileChooser) -> Option<PathBuf> {
    nfc.show(); // blocks until close
    let filename = nfc.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

/// Native "open" chooser restricted to the importable extensions.
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick(&self) -> Result<Option<ImportedFile>> {
        let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
        nfc.set_title("Open File");
        nfc.set_filter(&import_filter());
        let Some(path) = run_chooser(nfc) else {
            return Ok(None);
        };

        let bytes =
            fs::read(&path).map_err(|e| AppError::Import(format!("{}: {e}", path.display())))?;
        let content = decode_lossy(bytes);
        let name = extract_filename(&path.to_string_lossy());
        debug!(path = %path.display(), bytes = content.len(), "read imported file");
        Ok(Some(ImportedFile { name, content }))
    }
}

/// Native "save" chooser preset to the document's name.
pub struct NativeExporter;

impl Exporter for NativeExporter {
    fn export(&self, request: &ExportRequest) -> Result<bool> {
        let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
        nfc.set_title("Save File");
        nfc.set_option(FileDialogOptions::SaveAsConfirm);
        nfc.set_preset_file(&request.name);
        let Some(path) = run_chooser(nfc) else {
            return Ok(false);
        };

        fs::write(&path, &request.content)
            .map_err(|e| AppError::Export(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), mime = request.mime, "wrote exported file");
        Ok(true)
    }
}
