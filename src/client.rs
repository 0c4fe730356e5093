//! The PDFTables API client.
//!
//! Each conversion is exactly one multipart `POST` to
//! `<api_url>/<format>` carrying the document; the response body is the
//! converted file. The client never retries: timeouts, rejections and I/O
//! failures go straight back to the caller.

use crate::config::ClientConfig;
use crate::error::PdfTablesError;
use crate::format::{resolve_output, OutputFormat};
use crate::input::ConversionInput;
use crate::output::write_atomic;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Async client for the PDFTables conversion API.
///
/// Cheap to clone; clones share the connection pool and configuration.
///
/// # Example
/// ```rust,no_run
/// use pdftables_client::Client;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("my-api-key")?;
/// client.xlsx("statement.pdf", "statement.xlsx").await?;
/// let csv = client.convert_text("statement.pdf", pdftables_client::OutputFormat::Csv).await?;
/// println!("{csv}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Client {
    /// Client with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PdfTablesError> {
        Self::with_config(ClientConfig::builder().api_key(api_key).build()?)
    }

    /// Client for an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, PdfTablesError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .connect_timeout(config.timeout.connect)
            .read_timeout(config.timeout.read)
            .user_agent(concat!("pdftables-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PdfTablesError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint URL for `format`.
    pub fn format_url(&self, format: OutputFormat) -> String {
        format!("{}/{}", self.config.base_url(), format.path_segment())
    }

    // ── Per-format conveniences ──────────────────────────────────────────

    /// Convert to an Excel workbook with one sheet per page.
    ///
    /// Same as [`Client::xlsx_multiple`].
    pub async fn xlsx(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.xlsx_multiple(input, output).await
    }

    /// Convert to an Excel workbook with every page on one sheet.
    pub async fn xlsx_single(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.convert_to_file(input, OutputFormat::XlsxSingle, output)
            .await
    }

    /// Convert to an Excel workbook with one sheet per page.
    pub async fn xlsx_multiple(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.convert_to_file(input, OutputFormat::XlsxMultiple, output)
            .await
    }

    pub async fn csv(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.convert_to_file(input, OutputFormat::Csv, output).await
    }

    pub async fn xml(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.convert_to_file(input, OutputFormat::Xml, output).await
    }

    pub async fn html(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        self.convert_to_file(input, OutputFormat::Html, output).await
    }

    // ── Generic entry points ─────────────────────────────────────────────

    /// Convert and return the raw response body.
    pub async fn convert(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
    ) -> Result<Vec<u8>, PdfTablesError> {
        let url = self.format_url(format);
        let response = self.send(input.into(), format).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PdfTablesError::from_transport(&url, e))?;
        Ok(bytes.to_vec())
    }

    /// Convert to a text format and return the decoded body.
    ///
    /// Fails with [`PdfTablesError::NotTextFormat`] for the XLSX formats
    /// before any request is made.
    pub async fn convert_text(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
    ) -> Result<String, PdfTablesError> {
        if !format.is_text() {
            return Err(PdfTablesError::NotTextFormat { format });
        }
        let url = self.format_url(format);
        let response = self.send(input.into(), format).await?;
        response
            .text()
            .await
            .map_err(|e| PdfTablesError::from_transport(&url, e))
    }

    /// Convert and write the body to exactly `output`.
    ///
    /// The body is fully received before the file is touched; on any error
    /// `output` is left as it was.
    pub async fn convert_to_file(
        &self,
        input: impl Into<ConversionInput>,
        format: OutputFormat,
        output: impl AsRef<Path>,
    ) -> Result<(), PdfTablesError> {
        let output = output.as_ref();
        let bytes = self.convert(input, format).await?;
        write_atomic(output, &bytes).await?;
        info!("Saved {} ({} bytes)", output.display(), bytes.len());
        Ok(())
    }

    /// Convert to a file, settling the format and extension from each other.
    ///
    /// Without a format it is guessed from `output`'s extension (XLSX when
    /// unknown). The format's extension is appended when `output` lacks it.
    /// Returns the path actually written.
    pub async fn convert_auto(
        &self,
        input: impl Into<ConversionInput>,
        output: impl AsRef<Path>,
        format: Option<OutputFormat>,
    ) -> Result<PathBuf, PdfTablesError> {
        let (path, format) = resolve_output(Some(output.as_ref()), format);
        let path = path.unwrap_or_else(|| output.as_ref().to_path_buf());
        self.convert_to_file(input, format, &path).await?;
        Ok(path)
    }

    /// Number of pages left on the account.
    pub async fn remaining(&self) -> Result<u64, PdfTablesError> {
        let url = format!("{}/remaining", self.config.base_url());
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
            .map_err(|e| PdfTablesError::from_transport(&url, e))?;
        let response = check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| PdfTablesError::from_transport(&url, e))?;
        body.trim()
            .parse::<u64>()
            .map_err(|e| PdfTablesError::InvalidResponse {
                detail: format!("remaining pages '{}' is not a number: {e}", body.trim()),
            })
    }

    // ── Internal helpers ─────────────────────────────────────────────────

    /// Upload `input` for `format` and return the successful response.
    pub(crate) async fn send(
        &self,
        input: ConversionInput,
        format: OutputFormat,
    ) -> Result<reqwest::Response, PdfTablesError> {
        let url = self.format_url(format);
        let loaded = input.load().await?;
        info!(
            "Converting {} ({} bytes) to {} with {} extractor",
            loaded.filename,
            loaded.data.len(),
            format,
            self.config.extractor
        );
        let form = loaded.into_form()?;

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .query(&self.config.query_params())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let err = PdfTablesError::from_transport(&url, e);
                warn!("Request failed after {}ms: {}", start.elapsed().as_millis(), err);
                err
            })?;
        debug!(
            "POST {} -> {} in {}ms",
            url,
            response.status(),
            start.elapsed().as_millis()
        );

        check_status(response).await
    }
}

/// Turn a non-success response into [`PdfTablesError::Rejected`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PdfTablesError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Could not read the HTTP {} error body: {}", status.as_u16(), e.without_url());
            String::new()
        }
    };
    warn!("PDFTables answered HTTP {}: {}", status.as_u16(), body);
    Err(PdfTablesError::rejected(status.as_u16(), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExtractMode, Extractor};

    #[test]
    fn empty_key_fails_at_construction() {
        assert!(matches!(Client::new(""), Err(PdfTablesError::MissingApiKey)));
    }

    #[test]
    fn format_urls() {
        let client = Client::with_config(
            ClientConfig::builder()
                .api_key("k")
                .api_url("http://example.com/api/")
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(client.format_url(OutputFormat::Csv), "http://example.com/api/csv");
        assert_eq!(
            client.format_url(OutputFormat::XlsxMultiple),
            "http://example.com/api/xlsx-multiple"
        );
    }

    #[test]
    fn with_config_revalidates_public_fields() {
        let mut config = ClientConfig::builder().api_key("k").build().unwrap();
        config.extract = ExtractMode::TablesParagraphs;
        assert!(matches!(
            Client::with_config(config.clone()),
            Err(PdfTablesError::InvalidConfig(_))
        ));
        config.extractor = Extractor::Ai1;
        assert!(Client::with_config(config).is_ok());
    }

    #[tokio::test]
    async fn text_rejects_binary_format_without_request() {
        // Unroutable URL: reaching the network would fail differently.
        let client = Client::with_config(
            ClientConfig::builder()
                .api_key("k")
                .api_url("http://127.0.0.1:9/api")
                .build()
                .unwrap(),
        )
        .unwrap();
        let err = client
            .convert_text(&b"pdf"[..], OutputFormat::XlsxSingle)
            .await
            .unwrap_err();
        assert!(matches!(err, PdfTablesError::NotTextFormat { .. }));
    }
}
