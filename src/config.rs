//! Client configuration.
//!
//! Everything a [`crate::Client`] needs is held in one [`ClientConfig`],
//! built via [`ClientConfigBuilder`]. The config is immutable once the client
//! is constructed; every request reads the same values.

use crate::error::PdfTablesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://pdftables.com/api";

/// Configuration for a PDFTables [`crate::Client`].
///
/// # Example
/// ```rust
/// use pdftables_client::{ClientConfig, ExtractMode, Extractor};
///
/// let config = ClientConfig::builder()
///     .api_key("my-key")
///     .extractor(Extractor::Ai1)
///     .extract(ExtractMode::TablesParagraphs)
///     .build()
///     .unwrap();
/// assert_eq!(config.extractor, Extractor::Ai1);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as the `key` query parameter. Required.
    pub api_key: String,

    /// Base URL; format path segments are appended to it. Default: [`DEFAULT_API_URL`].
    pub api_url: String,

    /// Extraction engine. Default: [`Extractor::Standard`].
    pub extractor: Extractor,

    /// What the AI extractors return. Ignored by the standard extractor.
    pub extract: ExtractMode,

    /// Connect and read timeouts. Default: 10 s / 300 s.
    ///
    /// Large documents can take minutes on the remote side; the read timeout
    /// is the only knob that bounds how long a call may block.
    pub timeout: Timeout,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            extractor: Extractor::default(),
            extract: ExtractMode::default(),
            timeout: Timeout::default(),
        }
    }
}

// The API key is never printed.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("extractor", &self.extractor)
            .field("extract", &self.extract)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the constraints the client can verify locally.
    ///
    /// Everything else (key validity, quota, file type) is left to the service.
    pub fn validate(&self) -> Result<(), PdfTablesError> {
        if self.api_key.trim().is_empty() {
            return Err(PdfTablesError::MissingApiKey);
        }

        let url = reqwest::Url::parse(&self.api_url).map_err(|e| {
            PdfTablesError::InvalidConfig(format!("API URL '{}' is invalid: {e}", self.api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PdfTablesError::InvalidConfig(format!(
                "API URL must be http or https, got '{}'",
                self.api_url
            )));
        }

        if !self.extractor.is_ai() && self.extract != ExtractMode::Tables {
            return Err(PdfTablesError::InvalidConfig(format!(
                "extract mode '{}' requires an AI extractor (ai-1 or ai-2), got '{}'",
                self.extract, self.extractor
            )));
        }

        if self.timeout.connect.is_zero() || self.timeout.read.is_zero() {
            return Err(PdfTablesError::InvalidConfig(
                "Timeouts must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Query parameters sent with every conversion request.
    ///
    /// `extractor` is omitted for the standard engine and `extract` is only
    /// sent alongside an AI extractor.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("key", self.api_key.as_str())];
        if self.extractor.is_ai() {
            params.push(("extractor", self.extractor.as_str()));
            params.push(("extract", self.extract.as_str()));
        }
        params
    }

    /// `api_url` without a trailing slash.
    pub(crate) fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn extractor(mut self, extractor: Extractor) -> Self {
        self.config.extractor = extractor;
        self
    }

    pub fn extract(mut self, mode: ExtractMode) -> Self {
        self.config.extract = mode;
        self
    }

    pub fn timeout(mut self, timeout: impl Into<Timeout>) -> Self {
        self.config.timeout = timeout.into();
        self
    }

    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.config.timeout.connect = d;
        self
    }

    pub fn read_timeout(mut self, d: Duration) -> Self {
        self.config.timeout.read = d;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, PdfTablesError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Remote extraction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Extractor {
    /// Rule-based extractor. (default)
    #[default]
    Standard,
    /// First-generation AI extractor.
    #[serde(rename = "ai-1")]
    Ai1,
    /// Second-generation AI extractor.
    #[serde(rename = "ai-2")]
    Ai2,
}

impl Extractor {
    pub fn as_str(self) -> &'static str {
        match self {
            Extractor::Standard => "standard",
            Extractor::Ai1 => "ai-1",
            Extractor::Ai2 => "ai-2",
        }
    }

    /// True for the engines that understand [`ExtractMode`].
    pub fn is_ai(self) -> bool {
        matches!(self, Extractor::Ai1 | Extractor::Ai2)
    }
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extractor {
    type Err = PdfTablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Extractor::Standard),
            "ai-1" | "ai1" => Ok(Extractor::Ai1),
            "ai-2" | "ai2" => Ok(Extractor::Ai2),
            other => Err(PdfTablesError::InvalidConfig(format!(
                "unknown extractor '{other}' (expected standard, ai-1 or ai-2)"
            ))),
        }
    }
}

/// What an AI extractor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractMode {
    /// Tables only. (default)
    #[default]
    Tables,
    /// Tables plus the paragraph text around them.
    TablesParagraphs,
}

impl ExtractMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractMode::Tables => "tables",
            ExtractMode::TablesParagraphs => "tables-paragraphs",
        }
    }
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractMode {
    type Err = PdfTablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tables" => Ok(ExtractMode::Tables),
            "tables-paragraphs" => Ok(ExtractMode::TablesParagraphs),
            other => Err(PdfTablesError::InvalidConfig(format!(
                "unknown extract mode '{other}' (expected tables or tables-paragraphs)"
            ))),
        }
    }
}

/// Connect and read timeouts for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeout {
    /// Time allowed to establish the connection.
    pub connect: Duration,
    /// Time allowed between reads of the response.
    pub read: Duration,
}

impl Timeout {
    pub const fn new(connect: Duration, read: Duration) -> Self {
        Self { connect, read }
    }

    /// Same duration for connect and read.
    pub const fn uniform(d: Duration) -> Self {
        Self {
            connect: d,
            read: d,
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(300),
        }
    }
}

impl From<Duration> for Timeout {
    fn from(d: Duration) -> Self {
        Timeout::uniform(d)
    }
}

impl From<(Duration, Duration)> for Timeout {
    fn from((connect, read): (Duration, Duration)) -> Self {
        Timeout::new(connect, read)
    }
}
