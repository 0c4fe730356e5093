//! Output formats offered by the PDFTables API.
//!
//! The service selects the output container by URL path segment, so each
//! [`OutputFormat`] knows its segment, the file extension its output is saved
//! under, and whether the body is text or binary.

use crate::error::PdfTablesError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Target output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Comma-separated values, all tables concatenated.
    Csv,
    /// HTML document with one `<table>` per detected table.
    Html,
    /// Excel workbook, one sheet per page. Also what plain `xlsx` means.
    #[default]
    XlsxMultiple,
    /// Excel workbook, every page on a single sheet.
    XlsxSingle,
    /// XML document.
    Xml,
}

impl OutputFormat {
    /// Every supported format, in path-segment order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Csv,
        OutputFormat::Html,
        OutputFormat::XlsxMultiple,
        OutputFormat::XlsxSingle,
        OutputFormat::Xml,
    ];

    /// Path segment appended to the API base URL.
    pub fn path_segment(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
            OutputFormat::XlsxMultiple => "xlsx-multiple",
            OutputFormat::XlsxSingle => "xlsx-single",
            OutputFormat::Xml => "xml",
        }
    }

    /// File extension (with the leading dot) for files of this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => ".csv",
            OutputFormat::Html => ".html",
            OutputFormat::XlsxMultiple | OutputFormat::XlsxSingle => ".xlsx",
            OutputFormat::Xml => ".xml",
        }
    }

    /// True for formats whose body is UTF-8 text.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            OutputFormat::Csv | OutputFormat::Html | OutputFormat::Xml
        )
    }

    /// Guess a format from a file extension (with or without the dot).
    ///
    /// `.xlsx` maps to [`OutputFormat::XlsxMultiple`].
    pub fn from_extension(ext: &str) -> Option<OutputFormat> {
        match ext.strip_prefix('.').unwrap_or(ext) {
            "csv" => Some(OutputFormat::Csv),
            "html" => Some(OutputFormat::Html),
            "xlsx" => Some(OutputFormat::XlsxMultiple),
            "xml" => Some(OutputFormat::Xml),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for OutputFormat {
    type Err = PdfTablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "html" => Ok(OutputFormat::Html),
            "xlsx" | "xlsx-multiple" => Ok(OutputFormat::XlsxMultiple),
            "xlsx-single" => Ok(OutputFormat::XlsxSingle),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(PdfTablesError::UnknownFormat {
                value: s.to_string(),
            }),
        }
    }
}

/// Settle the output path and format when either may be missing.
///
/// * No path: the format defaults to `xlsx-multiple` and the path stays `None`
///   (the caller wants the bytes, not a file).
/// * No format: guessed from the path's extension, defaulting to
///   `xlsx-multiple` for unknown extensions.
/// * The path gets the format's extension appended when its own extension is
///   missing or does not match, so `report.txt` with CSV becomes
///   `report.txt.csv`.
pub fn resolve_output(
    path: Option<&Path>,
    format: Option<OutputFormat>,
) -> (Option<PathBuf>, OutputFormat) {
    let Some(path) = path else {
        return (None, format.unwrap_or_default());
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"));

    let format = format.unwrap_or_else(|| {
        ext.as_deref()
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default()
    });

    if ext.as_deref() == Some(format.extension()) {
        return (Some(path.to_path_buf()), format);
    }

    let mut with_ext = OsString::from(path.as_os_str());
    with_ext.push(format.extension());
    (Some(PathBuf::from(with_ext)), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: Option<&str>, format: Option<&str>) -> (Option<String>, OutputFormat) {
        let format = format.map(|f| f.parse().unwrap());
        let (p, f) = resolve_output(path.map(Path::new), format);
        (p.map(|p| p.to_string_lossy().into_owned()), f)
    }

    #[test]
    fn path_segments() {
        assert_eq!(OutputFormat::Csv.path_segment(), "csv");
        assert_eq!(OutputFormat::Html.path_segment(), "html");
        assert_eq!(OutputFormat::XlsxMultiple.path_segment(), "xlsx-multiple");
        assert_eq!(OutputFormat::XlsxSingle.path_segment(), "xlsx-single");
        assert_eq!(OutputFormat::Xml.path_segment(), "xml");
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("xlsx".parse::<OutputFormat>().unwrap(), OutputFormat::XlsxMultiple);
        assert_eq!("xlsx_single".parse::<OutputFormat>().unwrap(), OutputFormat::XlsxSingle);
        assert_eq!(" CSV ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "txt".parse::<OutputFormat>(),
            Err(PdfTablesError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn text_formats() {
        let text: Vec<_> = OutputFormat::ALL.iter().filter(|f| f.is_text()).collect();
        assert_eq!(text, [&OutputFormat::Csv, &OutputFormat::Html, &OutputFormat::Xml]);
    }

    #[test]
    fn resolve_keeps_matching_extension() {
        assert_eq!(resolve(Some("foo.csv"), Some("csv")), (Some("foo.csv".into()), OutputFormat::Csv));
        assert_eq!(
            resolve(Some("foo.xlsx"), Some("xlsx-multiple")),
            (Some("foo.xlsx".into()), OutputFormat::XlsxMultiple)
        );
        assert_eq!(resolve(Some("foo.xml"), Some("xml")), (Some("foo.xml".into()), OutputFormat::Xml));
        assert_eq!(resolve(Some("foo.html"), Some("html")), (Some("foo.html".into()), OutputFormat::Html));
    }

    #[test]
    fn resolve_guesses_missing_format() {
        assert_eq!(resolve(Some("foo"), None), (Some("foo.xlsx".into()), OutputFormat::XlsxMultiple));
        assert_eq!(
            resolve(Some("foo.txt"), None),
            (Some("foo.txt.xlsx".into()), OutputFormat::XlsxMultiple)
        );
        assert_eq!(resolve(Some("foo.xlsx"), None), (Some("foo.xlsx".into()), OutputFormat::XlsxMultiple));
        assert_eq!(resolve(Some("foo.csv"), None), (Some("foo.csv".into()), OutputFormat::Csv));
    }

    #[test]
    fn resolve_appends_missing_or_wrong_extension() {
        assert_eq!(resolve(Some("foo"), Some("csv")), (Some("foo.csv".into()), OutputFormat::Csv));
        assert_eq!(resolve(Some("foo.txt"), Some("csv")), (Some("foo.txt.csv".into()), OutputFormat::Csv));
        assert_eq!(resolve(Some("foo.xlsx"), Some("csv")), (Some("foo.xlsx.csv".into()), OutputFormat::Csv));
    }

    #[test]
    fn resolve_without_path() {
        assert_eq!(resolve(None, None), (None, OutputFormat::XlsxMultiple));
        assert_eq!(resolve(None, Some("csv")), (None, OutputFormat::Csv));
    }
}
