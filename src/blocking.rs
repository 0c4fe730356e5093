//! Synchronous wrapper around [`Client`].
//!
//! [`BlockingClient`] owns a single-threaded tokio runtime and drives the
//! async client on it, for callers without an async context. Do not use it
//! from inside a tokio runtime; `block_on` panics there.

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::PdfTablesError;
use crate::format::OutputFormat;
use crate::input::ConversionInput;
use std::path::{Path, PathBuf};

/// Blocking PDFTables client.
#[derive(Debug)]
pub struct BlockingClient {
    inner: Client,
    runtime: tokio::runtime::Runtime,
}

impl BlockingClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PdfTablesError> {
        Self::with_config(ClientConfig::builder().api_key(api_key).build()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, PdfTablesError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| PdfTablesError::Internal(format!("Failed to create tokio runtime: {e}")))?;
        let inner = {
            let _guard = runtime.enter();
            Client::with_config(config)?
        };
        Ok(Self { inner, runtime })
    }

    /// The async client this wrapper drives.
    pub fn async_client(&self) -> &Client {
        &self.inner
    }

    pub fn xlsx(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.xlsx(input, output))
    }

    pub fn xlsx_single(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.xlsx_single(input, output))
    }

    pub fn xlsx_multiple(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.xlsx_multiple(input, output))
    }

    pub fn csv(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.csv(input, output))
    }

    pub fn xml(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.xml(input, output))
    }

    pub fn html(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime.block_on(self.inner.html(input, output))
    }

    pub fn convert(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
    ) -> Result<Vec<u8>, PdfTablesError> {
        self.runtime.block_on(self.inner.convert(input, format))
    }

    pub fn convert_text(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
    ) -> Result<String, PdfTablesError> {
        self.runtime.block_on(self.inner.convert_text(input, format))
    }

    pub fn convert_to_file(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.runtime
            .block_on(self.inner.convert_to_file(input, format, output))
    }

    pub fn convert_auto(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
        format: Option<OutputFormat>,
    ) -> Result<PathBuf, PdfTablesError> {
        self.runtime
            .block_on(self.inner.convert_auto(input, output, format))
    }

    pub fn remaining(&self) -> Result<u64, PdfTablesError> {
        self.runtime.block_on(self.inner.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails() {
        assert!(matches!(
            BlockingClient::new(""),
            Err(PdfTablesError::MissingApiKey)
        ));
    }

    #[test]
    fn missing_input_is_local_error() {
        let client = BlockingClient::new("k").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.csv");
        let err = client
            .csv(dir.path().join("missing.pdf"), &out)
            .unwrap_err();
        assert!(matches!(err, PdfTablesError::InputNotFound { .. }));
        assert!(!out.exists());
    }
}
