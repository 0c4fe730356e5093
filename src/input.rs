//! Conversion input: a local file or an in-memory buffer.
//!
//! The whole input is read into memory before the upload starts, so a read
//! failure surfaces as a local I/O error and never as a half-sent request.

use crate::error::PdfTablesError;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Multipart field name the API reads the document from.
const FORM_FIELD: &str = "f";

/// Filename reported when the input has no path of its own.
const DEFAULT_FILENAME: &str = "file.pdf";

/// Source document for a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionInput {
    /// A file on the local file system.
    Path(PathBuf),
    /// Document bytes already in memory.
    Bytes(Vec<u8>),
}

impl ConversionInput {
    /// Read the input fully into memory. In-memory input is moved, not copied.
    pub async fn load(self) -> Result<LoadedInput, PdfTablesError> {
        match self {
            ConversionInput::Path(path) => {
                let data = read_local(&path).await?;
                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_FILENAME)
                    .to_string();
                debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(LoadedInput { filename, data })
            }
            ConversionInput::Bytes(data) => Ok(LoadedInput {
                filename: DEFAULT_FILENAME.to_string(),
                data,
            }),
        }
    }
}

impl From<PathBuf> for ConversionInput {
    fn from(p: PathBuf) -> Self {
        ConversionInput::Path(p)
    }
}

impl From<&Path> for ConversionInput {
    fn from(p: &Path) -> Self {
        ConversionInput::Path(p.to_path_buf())
    }
}

impl From<&PathBuf> for ConversionInput {
    fn from(p: &PathBuf) -> Self {
        ConversionInput::Path(p.clone())
    }
}

/// Strings are file paths.
impl From<&str> for ConversionInput {
    fn from(p: &str) -> Self {
        ConversionInput::Path(PathBuf::from(p))
    }
}

impl From<String> for ConversionInput {
    fn from(p: String) -> Self {
        ConversionInput::Path(PathBuf::from(p))
    }
}

impl From<Vec<u8>> for ConversionInput {
    fn from(b: Vec<u8>) -> Self {
        ConversionInput::Bytes(b)
    }
}

impl From<&[u8]> for ConversionInput {
    fn from(b: &[u8]) -> Self {
        ConversionInput::Bytes(b.to_vec())
    }
}

/// An input read into memory, ready to upload.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub filename: String,
    pub data: Vec<u8>,
}

impl LoadedInput {
    /// Wrap the document as the multipart form the API expects.
    pub fn into_form(self) -> Result<Form, PdfTablesError> {
        let part = Part::bytes(self.data)
            .file_name(self.filename)
            .mime_str("application/pdf")
            .map_err(|e| PdfTablesError::Internal(format!("multipart: {e}")))?;
        Ok(Form::new().part(FORM_FIELD, part))
    }
}

async fn read_local(path: &Path) -> Result<Vec<u8>, PdfTablesError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PdfTablesError::InputNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => PdfTablesError::InputPermissionDenied {
            path: path.to_path_buf(),
        },
        _ => PdfTablesError::InputReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })
}
