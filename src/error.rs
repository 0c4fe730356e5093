//! Error types for the pdftables-client library.
//!
//! Every failure is reported through a single [`PdfTablesError`] enum, grouped
//! into four classes that callers usually want to treat differently:
//!
//! * **Configuration** — the client was asked to do something it can reject
//!   locally (empty API key, unknown format name, bad option combination).
//! * **Transport** — the request never produced an HTTP response (DNS,
//!   connect failure, timeout). No status code is available.
//! * **Remote rejection** — the service answered with a non-2xx status. The
//!   status and the response body are kept verbatim.
//! * **Local I/O** — the input could not be read or the output could not be
//!   written.
//!
//! Nothing is retried. Every error propagates to the caller as-is.

use crate::format::OutputFormat;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdftables-client library.
#[derive(Debug, Error)]
pub enum PdfTablesError {
    // ── Configuration errors ─────────────────────────────────────────────
    /// No API key, or a blank one.
    #[error("Missing API key\nGet one at https://pdftables.com/api and pass it to the client.")]
    MissingApiKey,

    /// Builder validation or enum parsing failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A format name did not match any supported output format.
    #[error("Unknown output format '{value}' (expected one of: xlsx, xlsx-single, xlsx-multiple, csv, xml, html)")]
    UnknownFormat { value: String },

    /// Text output was requested for a binary format.
    #[error("Output format '{format}' is binary and cannot be returned as text")]
    NotTextFormat { format: OutputFormat },

    // ── Transport errors ─────────────────────────────────────────────────
    /// Connect or read timeout elapsed before the response completed.
    #[error("Request to '{url}' timed out\nIncrease the connect/read timeout for large documents.")]
    Timeout { url: String },

    /// Any other failure below HTTP (DNS, refused connection, TLS, broken body).
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // ── Remote errors ────────────────────────────────────────────────────
    /// The service answered with a non-success status.
    #[error("PDFTables rejected the request (HTTP {status}: {message}): {body}")]
    Rejected {
        status: u16,
        message: String,
        body: String,
    },

    /// A success response whose body could not be interpreted.
    #[error("Unexpected response from PDFTables: {detail}")]
    InvalidResponse { detail: String },

    // ── I/O errors ───────────────────────────────────────────────────────
    /// Input file does not exist.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    InputPermissionDenied { path: PathBuf },

    /// Input exists but reading it failed.
    #[error("Failed to read input file '{path}': {source}")]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PdfTablesError {
    /// Build a [`PdfTablesError::Rejected`] from a status code and body.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: describe_status(status).to_string(),
            body: body.into(),
        }
    }

    /// Map a reqwest failure for `url` onto the transport class.
    ///
    /// `url` must not carry the query string; the URL reqwest attached to
    /// `err` does (it holds the API key) and is stripped.
    pub(crate) fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source: err.without_url(),
            }
        }
    }

    /// True when the request never got an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }

    /// True when the service answered with a non-success status.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// HTTP status of a remote rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Human description of the statuses the PDFTables API documents.
pub fn describe_status(status: u16) -> &'static str {
    match status {
        400 => "Unknown file format",
        401 => "Unauthorized API key",
        402 => "Usage limit exceeded",
        403 => "Unknown format requested",
        404 => "Not found",
        429 => "Too many requests",
        500..=599 => "Server error",
        _ => "Unexpected status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_status_and_body() {
        let e = PdfTablesError::rejected(401, "Invalid API key");
        assert_eq!(e.status(), Some(401));
        assert!(e.is_rejection());
        assert!(!e.is_transport());
        let msg = e.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(msg.contains("Unauthorized API key"), "got: {msg}");
        assert!(msg.contains("Invalid API key"), "got: {msg}");
    }

    #[test]
    fn documented_statuses_have_messages() {
        assert_eq!(describe_status(400), "Unknown file format");
        assert_eq!(describe_status(402), "Usage limit exceeded");
        assert_eq!(describe_status(403), "Unknown format requested");
        assert_eq!(describe_status(503), "Server error");
        assert_eq!(describe_status(418), "Unexpected status");
    }

    #[test]
    fn timeout_is_transport() {
        let e = PdfTablesError::Timeout {
            url: "https://pdftables.com/api/csv".into(),
        };
        assert!(e.is_transport());
        assert_eq!(e.status(), None);
        assert!(e.to_string().contains("timed out"));
    }

    #[test]
    fn not_text_format_display() {
        let e = PdfTablesError::NotTextFormat {
            format: OutputFormat::XlsxSingle,
        };
        assert!(e.to_string().contains("xlsx-single"));
    }

    #[test]
    fn output_write_failed_display() {
        let e = PdfTablesError::OutputWriteFailed {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/nope/out.csv"));
    }
}
